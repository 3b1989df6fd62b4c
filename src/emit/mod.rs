//! Code emission
//!
//! Two independent renders, both pure functions of the structures built by
//! the earlier stages: [`types::render_types_module`] turns the transformed
//! type set into a type-definition module, [`client::render_client_module`]
//! turns the merged path tree into a nested client-call module. Module
//! shells live in askama templates under `templates/`.

pub mod client;
pub mod types;

pub use client::render_client_module;
pub use types::render_types_module;

/// Uppercase the first character, leaving the rest untouched
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
