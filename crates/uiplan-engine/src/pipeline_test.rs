use super::{
    check_prompt, compile_explanation, compile_markup, handle_plan_request, prepare_plan,
    prepare_untrusted_plan, refine_plan, PipelineError, PlanRequest,
};
use crate::classify::IntentClassifier;
use crate::patch::PatchBranch;
use serde_json::json;
use uiplan_core::{Component, ComponentKind, Limits, Plan};

#[test]
fn invalid_plan_reports_first_violation_path() {
    let raw = json!({"layout": "x", "components": [{"type": "Script"}]});
    let err = prepare_plan(&raw, &Limits::default()).expect_err("must fail");
    match err {
        PipelineError::Validation(issue) => {
            assert_eq!(issue.field_path.to_string(), "$.components[0].type");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nested_unknown_kind_is_rejected_by_schema_but_dropped_for_model_output() {
    let raw = json!({
        "layout": "centered-card",
        "components": [{
            "type": "Card",
            "props": {"title": "Login"},
            "children": [{"type": "Script"}, {"type": "Button", "props": {"label": "Go"}}]
        }]
    });
    assert!(prepare_plan(&raw, &Limits::default()).is_err());

    let plan = prepare_untrusted_plan(&raw, &Limits::default()).expect("repaired");
    assert_eq!(plan.components[0].children.len(), 1);
    assert_eq!(plan.components[0].children[0].kind, ComponentKind::Button);
}

#[test]
fn prepare_plan_normalizes_and_limits() {
    let components: Vec<_> = (0..25).map(|_| json!({"type": "Button"})).collect();
    let raw = json!({"layout": "single-column", "components": components});
    let plan = prepare_plan(&raw, &Limits::default()).expect("valid");
    assert_eq!(plan.components.len(), 20);
    assert!(plan.components.iter().all(|c| c.prop("label") == Some("Click")));
}

#[test]
fn untrusted_plan_defaults_missing_fields() {
    let plan = prepare_untrusted_plan(&json!({}), &Limits::default()).expect("valid");
    assert_eq!(plan, Plan::new("default", Vec::new()));
}

#[test]
fn prompt_envelope_is_checked() {
    let limits = Limits::default();
    assert!(matches!(check_prompt("   ", &limits), Err(PipelineError::EmptyPrompt)));
    let long = "a".repeat(1001);
    assert!(matches!(
        check_prompt(&long, &limits),
        Err(PipelineError::PromptTooLong { length: 1001, max: 1000 })
    ));
    assert!(check_prompt(&"a".repeat(1000), &limits).is_ok());
}

#[test]
fn oversized_prompt_is_rejected_before_previous_plan_is_read() {
    let request = PlanRequest {
        user_prompt: "x".repeat(1500),
        previous_plan: Some(json!("not a plan")),
    };
    let err = handle_plan_request(&IntentClassifier::new(), &request, &Limits::default())
        .expect_err("too long");
    assert!(matches!(err, PipelineError::PromptTooLong { .. }));
}

#[test]
fn fresh_login_request_is_normalized() {
    let request = PlanRequest {
        user_prompt: "login form".to_string(),
        previous_plan: None,
    };
    let outcome =
        handle_plan_request(&IntentClassifier::new(), &request, &Limits::default()).expect("ok");
    assert_eq!(outcome.branch, PatchBranch::Built);
    let card = &outcome.plan.components[0];
    assert_eq!(card.prop("title"), Some("Login"));
    assert_eq!(card.children[0].prop("placeholder"), Some("Email"));
}

#[test]
fn edit_request_uses_previous_plan() {
    let previous = json!({
        "layout": "centered-card",
        "components": [{
            "type": "Card",
            "props": {"title": "Login"},
            "children": [
                {"type": "Input", "props": {"label": "Email"}},
                {"type": "Button", "props": {"label": "Submit"}}
            ]
        }]
    });
    let request = PlanRequest {
        user_prompt: "add remember me".to_string(),
        previous_plan: Some(previous),
    };
    let outcome =
        handle_plan_request(&IntentClassifier::new(), &request, &Limits::default()).expect("ok");
    assert_eq!(outcome.branch, PatchBranch::Edited);
    let last = outcome.plan.components[0].children.last().expect("child");
    assert_eq!(last.prop("label"), Some("Remember Me"));
}

#[test]
fn invalid_previous_plan_fails_validation() {
    let request = PlanRequest {
        user_prompt: "add remember me".to_string(),
        previous_plan: Some(json!({"components": []})),
    };
    let err = handle_plan_request(&IntentClassifier::new(), &request, &Limits::default())
        .expect_err("missing layout");
    assert!(matches!(err, PipelineError::Validation(_)));
}

#[test]
fn refine_repairs_empty_containers() {
    let plan = Plan::new("dashboard", vec![Component::card("Users")]);
    let refined = refine_plan(&plan, &Limits::default());
    assert_eq!(refined.components[0].children.len(), 1);
    assert_eq!(refined.components[0].children[0].prop("label"), Some("Action"));
}

#[test]
fn markup_and_explanation_compile_from_raw_plans() {
    let raw = json!({
        "layout": "single-column",
        "components": [{"type": "Button", "props": {"label": "Go", "onClick": "x"}}]
    });
    assert_eq!(
        compile_markup(&raw, &Limits::default()).expect("ok"),
        "<Button label=\"Go\" />"
    );
    let text = compile_explanation("go", &raw, &Limits::default()).expect("ok");
    assert!(text.contains("- Button: Go"));
}

#[test]
fn request_deserializes_without_previous_plan() {
    let request: PlanRequest =
        serde_json::from_value(json!({"user_prompt": "login"})).expect("valid");
    assert_eq!(request.previous_plan, None);
}
