//! Rule-based plan construction and editing.

use crate::classify::{Action, Classification, Intent, IntentClassifier};
use crate::templates::build_plan;
use serde::Serialize;
use uiplan_core::{Component, ComponentKind, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEffect {
    AppendChild {
        kind: ComponentKind,
        label: &'static str,
    },
    RemoveChildrenOfKind(ComponentKind),
    SetTitle(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRule {
    pub trigger: &'static str,
    pub effect: EditEffect,
}

/// Applied in order to the first top-level component; every matching rule fires.
pub const EDIT_RULES: &[EditRule] = &[
    EditRule {
        trigger: "remember",
        effect: EditEffect::AppendChild {
            kind: ComponentKind::Input,
            label: "Remember Me",
        },
    },
    EditRule {
        trigger: "confirm password",
        effect: EditEffect::AppendChild {
            kind: ComponentKind::Input,
            label: "Confirm Password",
        },
    },
    EditRule {
        trigger: "remove button",
        effect: EditEffect::RemoveChildrenOfKind(ComponentKind::Button),
    },
    EditRule {
        trigger: "signup",
        effect: EditEffect::SetTitle("Sign Up"),
    },
];

pub const FORGOT_PASSWORD_TRIGGER: &str = "forgot";
const FORGOT_PASSWORD_LABEL: &str = "Forgot Password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchBranch {
    Built,
    Edited,
    ForgotPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOutcome {
    pub classification: Classification,
    pub branch: PatchBranch,
    pub plan: Plan,
}

impl EditEffect {
    fn apply(self, target: &mut Component) {
        match self {
            EditEffect::AppendChild { kind, label } => {
                target
                    .children
                    .push(Component::new(kind).with_prop(kind.primary_prop(), label));
            }
            EditEffect::RemoveChildrenOfKind(kind) => {
                target.children.retain(|child| child.kind != kind);
            }
            EditEffect::SetTitle(title) => {
                if target.kind.allowed_props().contains(&"title") {
                    target.props.insert("title".to_string(), title.to_string());
                } else {
                    tracing::debug!(kind = %target.kind, "kind has no title; skipping title edit");
                }
            }
        }
    }
}

/// Applies every matching edit rule to a copy of `plan`.
pub fn edit_plan(plan: &Plan, instruction: &str) -> Plan {
    let lowered = instruction.to_lowercase();
    let mut edited = plan.clone();
    let Some(target) = edited.first_component_mut() else {
        return edited;
    };
    for rule in EDIT_RULES {
        if lowered.contains(rule.trigger) {
            tracing::debug!(trigger = rule.trigger, "applying edit rule");
            rule.effect.apply(target);
        }
    }
    edited
}

pub fn apply_forgot_password(plan: &Plan) -> Plan {
    let mut patched = plan.clone();
    if let Some(target) = patched.first_component_mut() {
        target.children.push(Component::button(FORGOT_PASSWORD_LABEL));
    }
    patched
}

/// Chooses between the forgot-password rule, editing and building from a template.
pub fn plan_for_prompt(
    classifier: &IntentClassifier,
    prompt: &str,
    previous: Option<&Plan>,
) -> PatchOutcome {
    let classification = classifier.classify(prompt);
    let lowered = prompt.to_lowercase();

    let (branch, plan) = match previous {
        Some(previous)
            if classification.intent == Intent::Login
                && lowered.contains(FORGOT_PASSWORD_TRIGGER) =>
        {
            (PatchBranch::ForgotPassword, apply_forgot_password(previous))
        }
        Some(previous) if classification.action == Action::Edit => {
            (PatchBranch::Edited, edit_plan(previous, prompt))
        }
        _ => (PatchBranch::Built, build_plan(classification.intent)),
    };

    tracing::info!(
        intent = %classification.intent,
        action = ?classification.action,
        branch = ?branch,
        "plan selected"
    );

    PatchOutcome {
        classification,
        branch,
        plan,
    }
}

#[cfg(test)]
#[path = "patch_test.rs"]
mod tests;
