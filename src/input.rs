//! Description file loading
//!
//! The CLI front end feeds the pipeline from a declarative description of
//! the annotated source: resources, their endpoint methods, and the object
//! types reachable from them. YAML or JSON, decided by file extension.

use crate::model::{
    Annotation, Element, MethodElement, ParamDecl, TypeDecl, TypeElement, TypeRef, TypeRegistry,
};
use crate::tree::AnnotationMatch;
use std::path::Path;

/// Root of a description file
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Description {
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// One annotated resource class
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ResourceDecl {
    pub name: String,
    pub qualified_name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

/// One annotated endpoint method
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "TypeRef::unit")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

pub fn load_description(path: &Path) -> anyhow::Result<Description> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let description = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(description)
}

impl Description {
    /// Flatten into annotation matches, one per annotation per element
    pub fn matches(&self) -> Vec<AnnotationMatch> {
        let mut out = Vec::new();
        for resource in &self.resources {
            let type_element = TypeElement {
                simple_name: resource.name.clone(),
                qualified_name: resource.qualified_name.clone(),
            };
            for annotation in &resource.annotations {
                out.push(AnnotationMatch::new(
                    Element::Type(type_element.clone()),
                    annotation.clone(),
                ));
            }
            for method in &resource.methods {
                let method_element = MethodElement {
                    simple_name: method.name.clone(),
                    enclosing_type: resource.qualified_name.clone(),
                    return_type: method.return_type.clone(),
                    parameters: method.parameters.clone(),
                };
                for annotation in &method.annotations {
                    out.push(AnnotationMatch::new(
                        Element::Method(method_element.clone()),
                        annotation.clone(),
                    ));
                }
            }
        }
        out
    }

    pub fn type_registry(&self) -> TypeRegistry {
        TypeRegistry::new(self.types.iter().cloned())
    }
}
