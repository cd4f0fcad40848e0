use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uiplan_core::{plan_fingerprint, Component, ComponentKind, Plan};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDiffNodeIdentity {
    pub path: String,
    pub kind: ComponentKind,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChange {
    Kind,
    Props,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDiffNodeChanged {
    pub path: String,
    pub changes: Vec<PlanChange>,
    pub before: PlanDiffNodeIdentity,
    pub after: PlanDiffNodeIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDiffJson {
    pub summary: PlanDiffSummary,
    pub before_hash: String,
    pub after_hash: String,
    pub layout_changed: bool,
    pub added: Vec<PlanDiffNodeIdentity>,
    pub removed: Vec<PlanDiffNodeIdentity>,
    pub changed: Vec<PlanDiffNodeChanged>,
}

/// Compares two plans node by node, identifying nodes by index path (`0`, `0.1`).
pub fn diff_plans_json(before: &Plan, after: &Plan) -> PlanDiffJson {
    let before_nodes = index_nodes(before);
    let after_nodes = index_nodes(after);

    let before_paths = before_nodes.keys().cloned().collect::<BTreeSet<_>>();
    let after_paths = after_nodes.keys().cloned().collect::<BTreeSet<_>>();

    let added = after_paths
        .difference(&before_paths)
        .filter_map(|path| after_nodes.get(path).map(|node| node_identity(path, node)))
        .collect::<Vec<_>>();
    let removed = before_paths
        .difference(&after_paths)
        .filter_map(|path| before_nodes.get(path).map(|node| node_identity(path, node)))
        .collect::<Vec<_>>();

    let mut changed = Vec::<PlanDiffNodeChanged>::new();
    for path in before_paths.intersection(&after_paths) {
        let (Some(left), Some(right)) = (before_nodes.get(path), after_nodes.get(path)) else {
            continue;
        };
        let changes = detect_changes(left, right);
        if !changes.is_empty() {
            changed.push(PlanDiffNodeChanged {
                path: render_path(path),
                changes,
                before: node_identity(path, left),
                after: node_identity(path, right),
            });
        }
    }

    PlanDiffJson {
        summary: PlanDiffSummary {
            added: added.len(),
            removed: removed.len(),
            changed: changed.len(),
        },
        before_hash: plan_fingerprint(before),
        after_hash: plan_fingerprint(after),
        layout_changed: before.layout != after.layout,
        added,
        removed,
        changed,
    }
}

pub fn diff_plans_text(before: &Plan, after: &Plan) -> String {
    let diff = diff_plans_json(before, after);
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "plan diff: added={} removed={} changed={}",
        diff.summary.added, diff.summary.removed, diff.summary.changed
    ));
    lines.push(format!("before={} after={}", diff.before_hash, diff.after_hash));
    if diff.layout_changed {
        lines.push(format!("layout: {} -> {}", before.layout, after.layout));
    }
    if !diff.added.is_empty() {
        lines.push("added:".to_string());
        lines.extend(diff.added.iter().map(identity_line));
    }
    if !diff.removed.is_empty() {
        lines.push("removed:".to_string());
        lines.extend(diff.removed.iter().map(identity_line));
    }
    if !diff.changed.is_empty() {
        lines.push("changed:".to_string());
        for node in &diff.changed {
            lines.push(format!(
                "- path={} changes={}",
                node.path,
                node.changes
                    .iter()
                    .map(change_label)
                    .collect::<Vec<_>>()
                    .join(",")
            ));
        }
    }
    lines.join("\n")
}

fn identity_line(node: &PlanDiffNodeIdentity) -> String {
    format!(
        "- path={} kind={} label={}",
        node.path,
        node.kind,
        node.label.as_deref().unwrap_or("-")
    )
}

fn change_label(change: &PlanChange) -> &'static str {
    match change {
        PlanChange::Kind => "kind",
        PlanChange::Props => "props",
    }
}

fn index_nodes(plan: &Plan) -> BTreeMap<Vec<usize>, &Component> {
    let mut out = BTreeMap::new();
    let mut stack = plan
        .components
        .iter()
        .enumerate()
        .map(|(index, component)| (vec![index], component))
        .collect::<Vec<_>>();
    while let Some((path, component)) = stack.pop() {
        for (index, child) in component.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(index);
            stack.push((child_path, child));
        }
        out.insert(path, component);
    }
    out
}

fn render_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

fn node_identity(path: &[usize], node: &Component) -> PlanDiffNodeIdentity {
    PlanDiffNodeIdentity {
        path: render_path(path),
        kind: node.kind,
        label: node.display_label().map(str::to_string),
    }
}

fn detect_changes(left: &Component, right: &Component) -> Vec<PlanChange> {
    let mut changes = Vec::<PlanChange>::new();
    if left.kind != right.kind {
        changes.push(PlanChange::Kind);
    }
    if left.props != right.props {
        changes.push(PlanChange::Props);
    }
    changes
}

#[cfg(test)]
#[path = "diff_test.rs"]
mod tests;
