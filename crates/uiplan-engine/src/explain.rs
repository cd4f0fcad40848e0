use uiplan_core::{Component, Limits, Plan};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExplainError {
    #[error("explanation is {length} characters, limit is {max}")]
    OutputTooLarge { length: usize, max: usize },
}

/// Describes `plan` as indented plain text, one line per node.
///
/// Nodes deeper than `limits.explain_max_depth` are left out. Output longer
/// than `limits.max_explanation_chars` is an error rather than truncated.
pub fn explain_plan(prompt: &str, plan: &Plan, limits: &Limits) -> Result<String, ExplainError> {
    let mut lines = vec![
        format!("User intent: \"{prompt}\""),
        format!("Layout: {}", plan.layout),
        "Components:".to_string(),
    ];
    for component in &plan.components {
        describe(component, 0, limits.explain_max_depth, &mut lines);
    }
    let text = lines.join("\n");

    let length = text.chars().count();
    if length > limits.max_explanation_chars {
        return Err(ExplainError::OutputTooLarge {
            length,
            max: limits.max_explanation_chars,
        });
    }
    Ok(text)
}

fn describe(component: &Component, depth: usize, max_depth: usize, lines: &mut Vec<String>) {
    if depth > max_depth {
        return;
    }
    let indent = "  ".repeat(depth);
    let label = component.display_label().unwrap_or("N/A");
    lines.push(format!("{indent}- {}: {label}", component.kind));
    for child in &component.children {
        describe(child, depth + 1, max_depth, lines);
    }
}

#[cfg(test)]
#[path = "explain_test.rs"]
mod tests;
