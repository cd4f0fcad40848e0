//! Whitelist sanitization of untrusted plan trees.
//!
//! The sanitizer never fails. Nodes it cannot make safe are dropped and the
//! parent continues with the remaining children.

use serde_json::Value;
use uiplan_core::{
    Component, ComponentKind, Plan, Props, DEFAULT_LAYOUT, MAX_PROP_CHARS, SANITIZE_MAX_DEPTH,
};

const FALLBACK_CHILD_LABEL: &str = "Action";

/// Builds a plan from an untrusted document.
///
/// A non-string `layout` becomes `"default"` and a non-array `components`
/// becomes empty.
pub fn sanitize_plan(raw: &Value) -> Plan {
    let layout = raw
        .get("layout")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LAYOUT)
        .to_string();
    let components = raw
        .get("components")
        .and_then(Value::as_array)
        .map(|nodes| nodes.iter().filter_map(sanitize_component).collect())
        .unwrap_or_default();
    Plan { layout, components }
}

/// Sanitizes one top-level node. `None` means the node was dropped.
pub fn sanitize_component(node: &Value) -> Option<Component> {
    sanitize_at_depth(node, 0)
}

fn sanitize_at_depth(node: &Value, depth: usize) -> Option<Component> {
    if depth > SANITIZE_MAX_DEPTH {
        tracing::debug!(depth, "dropping node below sanitizer depth guard");
        return None;
    }

    let object = node.as_object()?;
    let kind = match object.get("type").and_then(Value::as_str) {
        Some(name) => match name.parse::<ComponentKind>() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::debug!(depth, %err, "dropping unsupported component");
                return None;
            }
        },
        None => {
            tracing::debug!(depth, "dropping component without string `type`");
            return None;
        }
    };

    let props = sanitize_props(kind, object.get("props"));

    let mut children = object
        .get("children")
        .and_then(Value::as_array)
        .map(|nodes| {
            nodes
                .iter()
                .filter_map(|child| sanitize_at_depth(child, depth + 1))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    if kind.is_container() && children.is_empty() {
        children.push(Component::button(FALLBACK_CHILD_LABEL));
    }

    Some(Component {
        kind,
        props,
        children,
    })
}

fn sanitize_props(kind: ComponentKind, raw: Option<&Value>) -> Props {
    let mut props = Props::new();
    let Some(source) = raw.and_then(Value::as_object) else {
        return props;
    };
    for key in kind.allowed_props() {
        if let Some(value) = source.get(*key).and_then(Value::as_str) {
            props.insert((*key).to_string(), truncate_chars(value, MAX_PROP_CHARS));
        }
    }
    props
}

/// Keeps at most `max` characters of `value`.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
