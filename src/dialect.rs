//! Bundled route-mapping dialect
//!
//! Interprets the closed [`Descriptor`] set for annotations named
//! `web.mapping.Resource` (type-level marker) and `web.mapping.Route`
//! (mapping attributes on types and methods). Hosts with a different
//! annotation dialect implement [`Extractor`] themselves and register it
//! alongside or instead of this one.

use crate::error::Error;
use crate::extractor::Extractor;
use crate::model::{
    Annotation, Binding, BodyParameter, Descriptor, MappingAttrs, Parameter, PathParameter,
    QueryParameter,
};
use crate::paths::collapse_separators;
use crate::tree::{MemberNode, OwnerNode};
use http::Method;

/// Type-level marker annotation kind
pub const RESOURCE_ANNOTATION: &str = "web.mapping.Resource";
/// Route-mapping annotation kind, valid on types and methods
pub const ROUTE_ANNOTATION: &str = "web.mapping.Route";

/// Extractor for the bundled route-mapping dialect
#[derive(Debug, Default)]
pub struct MappingExtractor;

fn mapping_attrs(annotation: &Annotation) -> Option<&MappingAttrs> {
    match &annotation.descriptor {
        Descriptor::Mapping(attrs) => Some(attrs),
        Descriptor::Marker => None,
    }
}

/// Declared paths of a mapping, defaulting to "/" when none are declared
fn paths_of(attrs: &MappingAttrs) -> Vec<String> {
    if attrs.paths.is_empty() {
        vec!["/".to_string()]
    } else {
        attrs.paths.clone()
    }
}

fn parse_verb(verb: &str) -> Result<Method, Error> {
    match verb.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        "TRACE" => Ok(Method::TRACE),
        _ => Err(Error::InvalidVerb {
            verb: verb.to_string(),
        }),
    }
}

impl Extractor for MappingExtractor {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn can_handle(&self, annotation_name: &str) -> bool {
        annotation_name == RESOURCE_ANNOTATION || annotation_name == ROUTE_ANNOTATION
    }

    fn extract_full_paths(
        &self,
        owner: &OwnerNode,
        member: &MemberNode,
    ) -> Result<Vec<String>, Error> {
        let member_paths = mapping_attrs(&member.annotation)
            .map(paths_of)
            .unwrap_or_else(|| vec!["/".to_string()]);
        let mut full_paths = Vec::new();
        match owner.annotation.as_ref().and_then(mapping_attrs) {
            Some(owner_attrs) => {
                for owner_path in paths_of(owner_attrs) {
                    for member_path in &member_paths {
                        full_paths.push(collapse_separators(&format!(
                            "{owner_path}{member_path}"
                        )));
                    }
                }
            }
            None => {
                for member_path in &member_paths {
                    full_paths.push(collapse_separators(member_path));
                }
            }
        }
        Ok(full_paths)
    }

    fn extract_methods(
        &self,
        owner: &OwnerNode,
        member: &MemberNode,
    ) -> Result<Vec<Method>, Error> {
        let mut methods = Vec::new();
        let declared = owner
            .annotation
            .as_ref()
            .and_then(mapping_attrs)
            .map(|a| a.methods.as_slice())
            .unwrap_or_default()
            .iter()
            .chain(
                mapping_attrs(&member.annotation)
                    .map(|a| a.methods.as_slice())
                    .unwrap_or_default(),
            );
        for verb in declared {
            let method = parse_verb(verb)?;
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        // a mapping with no declared verbs reads as a plain GET
        if methods.is_empty() {
            methods.push(Method::GET);
        }
        Ok(methods)
    }

    fn extract_produces(
        &self,
        owner: &OwnerNode,
        member: &MemberNode,
    ) -> Result<Vec<String>, Error> {
        let mut produces = Vec::new();
        if let Some(attrs) = owner.annotation.as_ref().and_then(mapping_attrs) {
            produces.extend(attrs.produces.iter().cloned());
        }
        if let Some(attrs) = mapping_attrs(&member.annotation) {
            produces.extend(attrs.produces.iter().cloned());
        }
        Ok(produces)
    }

    fn extract_consumes(
        &self,
        owner: &OwnerNode,
        member: &MemberNode,
    ) -> Result<Vec<String>, Error> {
        let mut consumes = Vec::new();
        if let Some(attrs) = owner.annotation.as_ref().and_then(mapping_attrs) {
            consumes.extend(attrs.consumes.iter().cloned());
        }
        if let Some(attrs) = mapping_attrs(&member.annotation) {
            consumes.extend(attrs.consumes.iter().cloned());
        }
        Ok(consumes)
    }

    fn extract_parameters(&self, member: &MemberNode) -> Result<Vec<Parameter>, Error> {
        let mut parameters = Vec::new();
        let mut body_seen = false;
        for decl in &member.element.parameters {
            match &decl.binding {
                Some(Binding::Path { name }) => {
                    parameters.push(Parameter::Path(PathParameter {
                        name: name.clone().unwrap_or_else(|| decl.name.clone()),
                    }));
                }
                Some(Binding::Query {
                    name,
                    required,
                    default,
                }) => {
                    parameters.push(Parameter::Query(QueryParameter {
                        name: name.clone().unwrap_or_else(|| decl.name.clone()),
                        required: *required,
                        default_value: default.clone(),
                    }));
                }
                Some(Binding::Body) => {
                    if body_seen {
                        return Err(Error::MultipleBodyParameters {
                            member: member.element.simple_name.clone(),
                        });
                    }
                    body_seen = true;
                    parameters.push(Parameter::Body(BodyParameter {
                        name: decl.name.clone(),
                        ty: decl.ty.clone(),
                    }));
                }
                None => {}
            }
        }
        Ok(parameters)
    }
}
