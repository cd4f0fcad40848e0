use super::{diff_plans_json, diff_plans_text, PlanChange};
use uiplan_core::{plan_fingerprint, Component, ComponentKind, Plan};

fn login() -> Plan {
    Plan::new(
        "centered-card",
        vec![Component::card("Login").with_children(vec![
            Component::input("Email"),
            Component::button("Submit"),
        ])],
    )
}

#[test]
fn identical_plans_have_empty_diff() {
    let diff = diff_plans_json(&login(), &login());
    assert_eq!(diff.summary.added + diff.summary.removed + diff.summary.changed, 0);
    assert_eq!(diff.before_hash, diff.after_hash);
    assert!(!diff.layout_changed);
}

#[test]
fn appended_child_is_reported_by_index_path() {
    let mut after = login();
    after.components[0].children.push(Component::input("Remember Me"));
    let diff = diff_plans_json(&login(), &after);
    assert_eq!(diff.summary.added, 1);
    assert_eq!(diff.added[0].path, "0.2");
    assert_eq!(diff.added[0].kind, ComponentKind::Input);
    assert_eq!(diff.added[0].label.as_deref(), Some("Remember Me"));
    assert_eq!(diff.after_hash, plan_fingerprint(&after));
}

#[test]
fn kind_and_prop_changes_are_detected() {
    let mut after = login();
    after.components[0].props.insert("title".to_string(), "Sign Up".to_string());
    after.components[0].children[1] = Component::input("Submit");
    let diff = diff_plans_json(&login(), &after);
    assert_eq!(diff.summary.changed, 2);
    assert_eq!(diff.changed[0].path, "0");
    assert_eq!(diff.changed[0].changes, vec![PlanChange::Props]);
    assert_eq!(diff.changed[1].path, "0.1");
    assert_eq!(diff.changed[1].changes, vec![PlanChange::Kind]);
}

#[test]
fn removed_subtree_lists_every_node() {
    let after = Plan::new("centered-card", Vec::new());
    let diff = diff_plans_json(&login(), &after);
    let paths = diff.removed.iter().map(|node| node.path.as_str()).collect::<Vec<_>>();
    assert_eq!(paths, vec!["0", "0.0", "0.1"]);
}

#[test]
fn text_output_has_summary_line_first() {
    let mut after = login();
    after.layout = "single-column".to_string();
    after.components[0].children.pop();
    let text = diff_plans_text(&login(), &after);
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "plan diff: added=0 removed=1 changed=0");
    assert!(lines.contains(&"layout: centered-card -> single-column"));
    assert!(lines.contains(&"- path=0.1 kind=Button label=Submit"));
}
