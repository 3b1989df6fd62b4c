//! Type graph transformation
//!
//! Recursively expands the object types reachable from endpoints into a
//! deduplicated, emission-ready set. Memoization is keyed by qualified type
//! name and the memo entry is inserted *before* recursing into a type's own
//! fields, so self-referential and mutually-referential graphs terminate
//! with exactly one entry per distinct type.

use crate::error::Error;
use crate::model::{FieldDecl, TypeRef, TypeRegistry};
use std::collections::HashMap;

/// An object type rewritten for emission
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedType {
    /// Simple name used in the emitted module
    pub name: String,
    /// Deduplication key
    pub qualified_name: String,
    pub fields: Vec<TransformedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformedField {
    pub name: String,
    pub shape: FieldShape,
}

/// Semantic shape of a transformed field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    String,
    Number,
    Boolean,
    /// Reference to another transformed type, by simple name
    Object { type_name: String },
    Array { element: ElementShape },
    /// String-keyed map
    Map { value: ElementShape },
}

/// Shape of an array element or map value
///
/// Deliberately shallower than [`FieldShape`]: nested arrays and maps of
/// maps have no supported rendering and fail fast instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementShape {
    String,
    Number,
    Boolean,
    Object { type_name: String },
}

/// Memoization context for one generation run
///
/// Threaded explicitly through every recursive call; discovery order is
/// preserved so output is deterministic.
#[derive(Debug, Default)]
pub struct TransformContext {
    order: Vec<String>,
    types: HashMap<String, TransformedType>,
}

impl TransformContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform a root type reached from an endpoint
    ///
    /// Container shapes are peeled down to the named object types they
    /// carry; primitives and unit contribute nothing.
    pub fn transform_root(&mut self, registry: &TypeRegistry, ty: &TypeRef) -> Result<(), Error> {
        match ty {
            TypeRef::Named { name } => {
                self.transform(registry, name)?;
            }
            TypeRef::Array { item } | TypeRef::Collection { item } => {
                self.transform_root(registry, item)?;
            }
            TypeRef::Map { value } => {
                self.transform_root(registry, value)?;
            }
            TypeRef::String | TypeRef::Number | TypeRef::Boolean | TypeRef::Unit => {}
        }
        Ok(())
    }

    /// Transform a declared object type, returning its simple name
    ///
    /// Inserted into the memo map before field expansion; a self-referential
    /// field resolves to the in-progress entry instead of recursing again.
    pub fn transform(&mut self, registry: &TypeRegistry, qualified_name: &str) -> Result<String, Error> {
        if let Some(existing) = self.types.get(qualified_name) {
            return Ok(existing.name.clone());
        }
        let decl = registry
            .get(qualified_name)
            .ok_or_else(|| Error::UnknownType {
                qualified_name: qualified_name.to_string(),
            })?
            .clone();

        self.order.push(qualified_name.to_string());
        self.types.insert(
            qualified_name.to_string(),
            TransformedType {
                name: decl.name.clone(),
                qualified_name: qualified_name.to_string(),
                fields: Vec::new(),
            },
        );

        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in &decl.fields {
            fields.push(TransformedField {
                name: field.name.clone(),
                shape: self.field_shape(registry, &decl.name, field)?,
            });
        }
        if let Some(entry) = self.types.get_mut(qualified_name) {
            entry.fields = fields;
        }
        Ok(decl.name)
    }

    fn field_shape(
        &mut self,
        registry: &TypeRegistry,
        type_name: &str,
        field: &FieldDecl,
    ) -> Result<FieldShape, Error> {
        match &field.ty {
            TypeRef::String => Ok(FieldShape::String),
            TypeRef::Number => Ok(FieldShape::Number),
            TypeRef::Boolean => Ok(FieldShape::Boolean),
            TypeRef::Named { name } => Ok(FieldShape::Object {
                type_name: self.transform(registry, name)?,
            }),
            TypeRef::Map { value } => Ok(FieldShape::Map {
                value: self.element_shape(registry, type_name, &field.name, value, "map value")?,
            }),
            TypeRef::Array { item } | TypeRef::Collection { item } => Ok(FieldShape::Array {
                element: self.element_shape(registry, type_name, &field.name, item, "array element")?,
            }),
            TypeRef::Unit => Err(Error::UnknownFieldType {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            }),
        }
    }

    fn element_shape(
        &mut self,
        registry: &TypeRegistry,
        type_name: &str,
        field: &str,
        ty: &TypeRef,
        context: &str,
    ) -> Result<ElementShape, Error> {
        match ty {
            TypeRef::String => Ok(ElementShape::String),
            TypeRef::Number => Ok(ElementShape::Number),
            TypeRef::Boolean => Ok(ElementShape::Boolean),
            TypeRef::Named { name } => Ok(ElementShape::Object {
                type_name: self.transform(registry, name)?,
            }),
            TypeRef::Array { .. } | TypeRef::Collection { .. } => {
                Err(Error::UnsupportedTypeShape {
                    type_name: type_name.to_string(),
                    field: field.to_string(),
                    detail: format!("nested array types are not supported as {context}"),
                })
            }
            TypeRef::Map { .. } => Err(Error::UnsupportedTypeShape {
                type_name: type_name.to_string(),
                field: field.to_string(),
                detail: format!("map types cannot be classified as {context}"),
            }),
            TypeRef::Unit => Err(Error::UnknownFieldType {
                type_name: type_name.to_string(),
                field: field.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consume the context, yielding transformed types in discovery order
    pub fn into_types(self) -> Vec<TransformedType> {
        let TransformContext { order, mut types } = self;
        order.into_iter().filter_map(|q| types.remove(&q)).collect()
    }
}
