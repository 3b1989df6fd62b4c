//! Match tree building
//!
//! Groups the flat list of annotation matches from one processing round
//! into owner nodes (types) holding member nodes (methods). Members whose
//! enclosing type was never matched itself get a synthesized, annotation-less
//! placeholder owner, so no member is ever dropped.

use crate::model::{Annotation, Element, MethodElement, TypeElement};
use std::collections::HashMap;

/// An (element, annotation) pair found during one processing round
///
/// The annotation is absent only on owners synthesized for orphaned
/// members; matches built from discovered annotations always carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMatch {
    pub element: Element,
    pub annotation: Option<Annotation>,
}

impl AnnotationMatch {
    pub fn new(element: Element, annotation: Annotation) -> Self {
        Self {
            element,
            annotation: Some(annotation),
        }
    }
}

/// A type-level node of the match tree
///
/// `annotation` is `None` for placeholder owners that exist purely to host
/// members whose enclosing type carried no matched annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerNode {
    pub element: TypeElement,
    pub annotation: Option<Annotation>,
    pub members: Vec<MemberNode>,
}

/// A method-level node of the match tree
#[derive(Debug, Clone, PartialEq)]
pub struct MemberNode {
    pub element: MethodElement,
    pub annotation: Annotation,
}

/// Group matches into a two-level owner/member tree
///
/// Ownership is resolved by structural containment: a method match attaches
/// to the owner whose element equals its enclosing type, regardless of
/// iteration order. Owners appear in first-seen order, synthesized owners
/// in first-use order after them.
pub fn build_match_tree(matches: &[AnnotationMatch]) -> Vec<OwnerNode> {
    let mut owners: Vec<OwnerNode> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        if let Element::Type(ty) = &m.element {
            // first annotation on a type wins as the owner annotation
            if !index.contains_key(&ty.qualified_name) {
                index.insert(ty.qualified_name.clone(), owners.len());
                owners.push(OwnerNode {
                    element: ty.clone(),
                    annotation: m.annotation.clone(),
                    members: Vec::new(),
                });
            }
        }
    }

    for m in matches {
        let Element::Method(method) = &m.element else {
            continue;
        };
        let Some(annotation) = m.annotation.clone() else {
            continue;
        };
        let idx = match index.get(&method.enclosing_type) {
            Some(&idx) => idx,
            None => {
                let idx = owners.len();
                index.insert(method.enclosing_type.clone(), idx);
                owners.push(OwnerNode {
                    element: placeholder_owner(&method.enclosing_type),
                    annotation: None,
                    members: Vec::new(),
                });
                idx
            }
        };
        owners[idx].members.push(MemberNode {
            element: method.clone(),
            annotation,
        });
    }

    owners
}

fn placeholder_owner(qualified_name: &str) -> TypeElement {
    let simple_name = qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
        .to_string();
    TypeElement {
        simple_name,
        qualified_name: qualified_name.to_string(),
    }
}
