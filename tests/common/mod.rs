#![allow(dead_code)]

use jsrest::dialect::{RESOURCE_ANNOTATION, ROUTE_ANNOTATION};
use jsrest::model::{
    Annotation, Binding, Descriptor, Element, FieldDecl, MappingAttrs, MethodElement, ParamDecl,
    TypeDecl, TypeElement, TypeRef, TypeRegistry,
};
use jsrest::tree::AnnotationMatch;

pub fn marker() -> Annotation {
    Annotation {
        name: RESOURCE_ANNOTATION.to_string(),
        descriptor: Descriptor::Marker,
    }
}

pub fn route(paths: &[&str], methods: &[&str]) -> Annotation {
    Annotation {
        name: ROUTE_ANNOTATION.to_string(),
        descriptor: Descriptor::Mapping(MappingAttrs {
            paths: paths.iter().map(|s| s.to_string()).collect(),
            methods: methods.iter().map(|s| s.to_string()).collect(),
            ..MappingAttrs::default()
        }),
    }
}

pub fn type_match(
    simple_name: &str,
    qualified_name: &str,
    annotation: Annotation,
) -> AnnotationMatch {
    AnnotationMatch::new(
        Element::Type(TypeElement {
            simple_name: simple_name.to_string(),
            qualified_name: qualified_name.to_string(),
        }),
        annotation,
    )
}

pub fn method_match(
    simple_name: &str,
    enclosing_type: &str,
    return_type: TypeRef,
    parameters: Vec<ParamDecl>,
    annotation: Annotation,
) -> AnnotationMatch {
    AnnotationMatch::new(
        Element::Method(MethodElement {
            simple_name: simple_name.to_string(),
            enclosing_type: enclosing_type.to_string(),
            return_type,
            parameters,
        }),
        annotation,
    )
}

pub fn param(name: &str, ty: TypeRef, binding: Binding) -> ParamDecl {
    ParamDecl {
        name: name.to_string(),
        ty,
        binding: Some(binding),
    }
}

pub fn path_binding() -> Binding {
    Binding::Path { name: None }
}

pub fn query_binding(default: Option<&str>) -> Binding {
    Binding::Query {
        name: None,
        required: default.is_none(),
        default: default.map(str::to_string),
    }
}

pub fn field(name: &str, ty: TypeRef) -> FieldDecl {
    FieldDecl {
        name: name.to_string(),
        ty,
    }
}

pub fn type_decl(name: &str, qualified_name: &str, fields: Vec<FieldDecl>) -> TypeDecl {
    TypeDecl {
        name: name.to_string(),
        qualified_name: qualified_name.to_string(),
        fields,
    }
}

pub fn registry_of(decls: Vec<TypeDecl>) -> TypeRegistry {
    TypeRegistry::new(decls)
}
