//! Deterministic markup rendering.

use uiplan_core::{Component, ComponentKind, Plan};

const MODULE_BODY_INDENT: &str = "      ";

/// Escapes `&` first, then `"`, `<` and `>`.
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_attributes(component: &Component) -> String {
    component
        .props
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!(" {key}=\"{}\"", escape_attribute(value)))
        .collect()
}

/// Leaf kinds never render children, even when the tree carries some.
pub fn render_component(component: &Component) -> String {
    let tag = component.kind.as_str();
    let attributes = render_attributes(component);
    if !component.kind.is_container() || component.children.is_empty() {
        return format!("<{tag}{attributes} />");
    }
    let body = component
        .children
        .iter()
        .map(render_component)
        .collect::<Vec<_>>()
        .join("\n");
    format!("<{tag}{attributes}>\n{body}\n</{tag}>")
}

pub fn render_markup(plan: &Plan) -> String {
    plan.components
        .iter()
        .map(render_component)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps the markup in a self-contained component module.
pub fn render_module(plan: &Plan) -> String {
    let imports = ComponentKind::ALL
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let markup = render_markup(plan);
    let body = markup
        .lines()
        .map(|line| format!("{MODULE_BODY_INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::new();
    out.push_str("import React from \"react\";\n");
    out.push_str(&format!("import {{ {imports} }} from \"./components\";\n\n"));
    out.push_str("export default function GeneratedUI() {\n");
    out.push_str("  return (\n");
    out.push_str("    <div className=\"generated-ui\">\n");
    if !body.is_empty() {
        out.push_str(&body);
        out.push('\n');
    }
    out.push_str("    </div>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

#[cfg(test)]
#[path = "codegen_test.rs"]
mod tests;
