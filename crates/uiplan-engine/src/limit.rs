use uiplan_core::{Component, Limits, Plan};

/// Truncates the top-level sequence and drops nodes below `limits.max_depth`.
pub fn limit_plan(plan: &Plan, limits: &Limits) -> Plan {
    if plan.components.len() > limits.max_components {
        tracing::debug!(
            count = plan.components.len(),
            max = limits.max_components,
            "truncating top-level components"
        );
    }
    let components = plan
        .components
        .iter()
        .take(limits.max_components)
        .filter_map(|component| limit_depth(component, 0, limits.max_depth))
        .collect();
    Plan {
        layout: plan.layout.clone(),
        components,
    }
}

/// Returns `None` when `depth` exceeds `max_depth`; otherwise a copy whose
/// descendants are pruned the same way.
pub fn limit_depth(component: &Component, depth: usize, max_depth: usize) -> Option<Component> {
    if depth > max_depth {
        tracing::debug!(depth, kind = %component.kind, "dropping node beyond max depth");
        return None;
    }
    Some(Component {
        kind: component.kind,
        props: component.props.clone(),
        children: component
            .children
            .iter()
            .filter_map(|child| limit_depth(child, depth + 1, max_depth))
            .collect(),
    })
}

#[cfg(test)]
#[path = "limit_test.rs"]
mod tests;
