//! Client module rendering
//!
//! Renders the merged path forest into a nested `RestServices` namespace.
//! A node whose endpoint declares exactly one verb becomes a single
//! callable taking a parameters object; multiple verbs fan out into one
//! verb-named callable each, taking positional parameters. Path-parameter
//! segments never open a namespace of their own: their callables are
//! verb-named after the nearest static segment and spliced into that
//! segment's namespace; when that segment's own endpoint already claims a
//! verb key, the parameter callable appends `By<Param>` so no object key
//! is ever defined twice.

use super::capitalize;
use crate::model::{Parameter, QueryParameter, TypeRef};
use crate::paths::{Endpoint, PathNode};
use askama::Template;
use http::Method;

#[derive(Template)]
#[template(path = "services.js.txt", escape = "none")]
struct ServicesModuleTemplate {
    properties: Vec<String>,
    body: String,
}

/// Render the client-call module for the whole forest
pub fn render_client_module(roots: &[PathNode]) -> askama::Result<String> {
    let mut entries = Vec::new();
    let mut used = Vec::new();
    for root in roots {
        entries.extend(node_entries(root, "RestServices", "    ", &mut used));
    }
    let mut properties: Vec<String> = Vec::new();
    for root in roots {
        if !properties.contains(&root.name) {
            properties.push(root.name.clone());
        }
    }
    ServicesModuleTemplate {
        properties,
        body: entries.join(",\n"),
    }
    .render()
}

/// Render one node as a list of `key: value` object entries
///
/// `used` tracks the object keys already claimed in the enclosing
/// namespace, so spliced parameter callables never shadow a sibling.
fn node_entries(
    node: &PathNode,
    parent_name: &str,
    prefix: &str,
    used: &mut Vec<String>,
) -> Vec<String> {
    if node.parameter {
        // parameter segments splice into the enclosing namespace
        let mut entries = Vec::new();
        if let Some(endpoint) = &node.endpoint {
            entries.extend(verb_callables(node, endpoint, prefix, used));
        }
        for child in &node.children {
            entries.extend(node_entries(child, parent_name, prefix, used));
        }
        return entries;
    }
    let child_prefix = format!("{prefix}  ");
    used.push(node.name.clone());
    match &node.endpoint {
        Some(endpoint) if node.children.is_empty() && endpoint.methods.len() == 1 => {
            vec![callable(
                &node.name,
                &endpoint.methods[0],
                node,
                endpoint,
                false,
                prefix,
            )]
        }
        Some(endpoint) => {
            let mut inner_used = Vec::new();
            let mut inner = verb_callables(node, endpoint, &child_prefix, &mut inner_used);
            for child in &node.children {
                inner.extend(node_entries(child, &node.name, &child_prefix, &mut inner_used));
            }
            vec![namespace(node, parent_name, &inner, prefix)]
        }
        None => {
            let mut inner_used = Vec::new();
            let mut inner = Vec::new();
            for child in &node.children {
                inner.extend(node_entries(child, &node.name, &child_prefix, &mut inner_used));
            }
            vec![namespace(node, parent_name, &inner, prefix)]
        }
    }
}

/// One verb-named callable per declared verb
fn verb_callables(
    node: &PathNode,
    endpoint: &Endpoint,
    prefix: &str,
    used: &mut Vec<String>,
) -> Vec<String> {
    let positional = endpoint.methods.len() > 1;
    endpoint
        .methods
        .iter()
        .map(|verb| {
            let mut key = format!(
                "{}{}",
                verb.as_str().to_lowercase(),
                capitalize(&node.name)
            );
            // a static segment and its parameter child can share a verb
            // (list plus get-by-id); the child keys on the parameter name
            if node.parameter && used.contains(&key) {
                key.push_str("By");
                key.push_str(&capitalize(&param_segment(node)));
            }
            used.push(key.clone());
            callable(&key, verb, node, endpoint, positional, prefix)
        })
        .collect()
}

/// Name of the parameter in a parameter node's own path segment
fn param_segment(node: &PathNode) -> String {
    node.path
        .rsplit('/')
        .next()
        .unwrap_or("")
        .trim_matches(|c| c == '{' || c == '}')
        .to_string()
}

fn namespace(node: &PathNode, parent_name: &str, inner: &[String], p: &str) -> String {
    let mut lines = vec![
        format!("{p}/**"),
        format!("{p} * @class"),
        format!("{p} * @inner"),
        format!("{p} * @memberOf {parent_name}"),
        format!("{p} */"),
        format!("{p}{}: {{", node.name),
    ];
    if !inner.is_empty() {
        lines.push(inner.join(",\n"));
    }
    lines.push(format!("{p}}}"));
    lines.join("\n")
}

fn callable(
    key: &str,
    verb: &Method,
    node: &PathNode,
    endpoint: &Endpoint,
    positional: bool,
    p: &str,
) -> String {
    let path_params: Vec<&str> = endpoint
        .parameters
        .iter()
        .filter_map(|param| match param {
            Parameter::Path(path) => Some(path.name.as_str()),
            _ => None,
        })
        .collect();
    let query_params: Vec<&QueryParameter> = endpoint
        .parameters
        .iter()
        .filter_map(|param| match param {
            Parameter::Query(query) => Some(query),
            _ => None,
        })
        .collect();
    let body_param = endpoint.parameters.iter().find_map(|param| match param {
        Parameter::Body(body) => Some(body),
        _ => None,
    });
    // positional callables reference arguments by name, object-style
    // callables read everything off the single `parameters` argument
    let arg_ref = |name: &str| {
        if positional {
            name.to_string()
        } else {
            format!("parameters.{name}")
        }
    };

    let mut lines = vec![format!("{p}/**")];
    if positional {
        for param in &endpoint.parameters {
            let hint = param_hint(param);
            let target = if param.required() {
                param.name().to_string()
            } else {
                format!("[{}]", param.name())
            };
            lines.push(format!("{p} * @param {{{hint}}} {target}"));
        }
    } else if !endpoint.parameters.is_empty() {
        lines.push(format!(
            "{p} * @param parameters Parameters to pass to the method"
        ));
        for param in &endpoint.parameters {
            let hint = param_hint(param);
            let target = if param.required() {
                format!("parameters.{}", param.name())
            } else {
                format!("[parameters.{}]", param.name())
            };
            lines.push(format!("{p} * @param {{{hint}}} {target}"));
        }
    }
    lines.push(format!("{p} * @returns {{Promise<Response>}}"));
    lines.push(format!("{p} */"));

    let signature = if positional {
        endpoint
            .parameters
            .iter()
            .map(|param| param.name().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    } else if endpoint.parameters.is_empty() {
        String::new()
    } else {
        "parameters".to_string()
    };
    lines.push(format!("{p}{key}: function ({signature}) {{"));

    let needs_path_var = !path_params.is_empty();
    if needs_path_var {
        lines.push(format!("{p}  var path = '{}';", node.path));
        for name in &path_params {
            lines.push(format!(
                "{p}  path = path.replace('{{{name}}}', encodeURIComponent({}));",
                arg_ref(name)
            ));
        }
    }
    if !query_params.is_empty() {
        lines.push(format!("{p}  var queryParams = {{"));
        for (i, query) in query_params.iter().enumerate() {
            let default = query
                .default_value
                .as_ref()
                .map(|value| format!(" || '{}'", escape_single_quoted(value)))
                .unwrap_or_default();
            let comma = if i + 1 == query_params.len() { "" } else { "," };
            lines.push(format!(
                "{p}    {}: {}{default}{comma}",
                query.name,
                arg_ref(&query.name)
            ));
        }
        lines.push(format!("{p}  }};"));
        lines.push(format!(
            "{p}  var queryString = Object.keys(queryParams).filter(function (key) {{"
        ));
        lines.push(format!(
            "{p}    return queryParams[key] !== undefined && queryParams[key] !== null;"
        ));
        lines.push(format!("{p}  }}).map(function (key) {{"));
        lines.push(format!(
            "{p}    return key + '=' + encodeURIComponent(queryParams[key]);"
        ));
        lines.push(format!("{p}  }}).join('&');"));
    }

    let mut url = if needs_path_var {
        "config.baseURL + path".to_string()
    } else {
        format!("config.baseURL + '{}'", node.path)
    };
    if !query_params.is_empty() {
        url.push_str(" + (queryString ? '?' + queryString : '')");
    }
    lines.push(format!("{p}  return fetch({url}, {{"));
    let verb_lower = verb.as_str().to_lowercase();
    match body_param {
        Some(body) => {
            lines.push(format!("{p}    method: '{verb_lower}',"));
            lines.push(format!(
                "{p}    body: JSON.stringify({})",
                arg_ref(&body.name)
            ));
        }
        None => lines.push(format!("{p}    method: '{verb_lower}'")),
    }
    lines.push(format!("{p}  }});"));
    lines.push(format!("{p}}}"));
    lines.join("\n")
}

/// Escape a value for embedding in a single-quoted JS string literal
fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn param_hint(param: &Parameter) -> String {
    match param {
        Parameter::Path(_) | Parameter::Query(_) => "string".to_string(),
        Parameter::Body(body) => body_hint(&body.ty),
    }
}

fn body_hint(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Named { name } => name.rsplit('.').next().unwrap_or(name).to_string(),
        _ => "Object".to_string(),
    }
}
