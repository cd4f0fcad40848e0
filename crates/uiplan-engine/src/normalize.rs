use uiplan_core::{Component, ComponentKind, Plan, Props};

/// Fills missing display props with their defaults, recursively.
///
/// Absent and empty values are treated alike. Running it twice yields the
/// same tree as running it once.
pub fn normalize_component(component: &Component) -> Component {
    let mut props = component.props.clone();
    match component.kind {
        ComponentKind::Card => fill(&mut props, "title", "Card"),
        ComponentKind::Modal => fill(&mut props, "title", "Modal"),
        ComponentKind::Input => {
            fill(&mut props, "label", "Input");
            let label = props.get("label").cloned().unwrap_or_default();
            fill(&mut props, "placeholder", &label);
        }
        ComponentKind::Button => fill(&mut props, "label", "Click"),
    }

    Component {
        kind: component.kind,
        props,
        children: component.children.iter().map(normalize_component).collect(),
    }
}

pub fn normalize_plan(plan: &Plan) -> Plan {
    Plan {
        layout: plan.layout.clone(),
        components: plan.components.iter().map(normalize_component).collect(),
    }
}

fn fill(props: &mut Props, key: &str, default: &str) {
    let missing = props.get(key).map_or(true, String::is_empty);
    if missing {
        props.insert(key.to_string(), default.to_string());
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
