//! Type module rendering
//!
//! Emits one ES5 constructor function per transformed type, every field
//! nullable, with a `has<Field>()` accessor reporting whether the field is
//! set.

use super::capitalize;
use crate::transform::{ElementShape, FieldShape, TransformedType};
use askama::Template;

#[derive(Template)]
#[template(path = "classes.js.txt", escape = "none")]
struct TypesModuleTemplate {
    types: Vec<TypeView>,
}

struct TypeView {
    name: String,
    arg_list: String,
    fields: Vec<FieldView>,
}

struct FieldView {
    name: String,
    hint: String,
    accessor: String,
}

/// JSDoc type hint for a field shape
fn field_hint(shape: &FieldShape) -> String {
    match shape {
        FieldShape::String => "string".to_string(),
        FieldShape::Number => "number".to_string(),
        FieldShape::Boolean => "boolean".to_string(),
        FieldShape::Object { type_name } => type_name.clone(),
        FieldShape::Array { element } => format!("{}[]", element_hint(element)),
        FieldShape::Map { value } => format!("Object.<string, {}>", element_hint(value)),
    }
}

fn element_hint(shape: &ElementShape) -> String {
    match shape {
        ElementShape::String => "string".to_string(),
        ElementShape::Number => "number".to_string(),
        ElementShape::Boolean => "boolean".to_string(),
        ElementShape::Object { type_name } => type_name.clone(),
    }
}

/// Render the type-definition module in discovery order
pub fn render_types_module(types: &[TransformedType]) -> askama::Result<String> {
    let views = types
        .iter()
        .map(|ty| TypeView {
            name: ty.name.clone(),
            arg_list: ty
                .fields
                .iter()
                .map(|f| f.name.clone())
                .collect::<Vec<_>>()
                .join(", "),
            fields: ty
                .fields
                .iter()
                .map(|f| FieldView {
                    name: f.name.clone(),
                    hint: field_hint(&f.shape),
                    accessor: format!("has{}", capitalize(&f.name)),
                })
                .collect(),
        })
        .collect();
    TypesModuleTemplate { types: views }.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_for_scalar_shapes() {
        assert_eq!(field_hint(&FieldShape::String), "string");
        assert_eq!(field_hint(&FieldShape::Number), "number");
        assert_eq!(field_hint(&FieldShape::Boolean), "boolean");
    }

    #[test]
    fn hints_for_container_shapes() {
        assert_eq!(
            field_hint(&FieldShape::Array {
                element: ElementShape::Object {
                    type_name: "Item".to_string()
                }
            }),
            "Item[]"
        );
        assert_eq!(
            field_hint(&FieldShape::Map {
                value: ElementShape::Number
            }),
            "Object.<string, number>"
        );
    }
}
