use proptest::prelude::*;
use serde_json::{json, Value};
use uiplan_core::{Component, ComponentKind, Limits, Plan, SANITIZE_MAX_DEPTH};
use uiplan_engine::{
    escape_attribute, handle_plan_request, limit_plan, normalize_plan, render_markup, sanitize_plan,
    IntentClassifier, PatchBranch, PipelineError, PlanRequest,
};

fn kind_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Card"),
        Just("Input"),
        Just("Button"),
        Just("Modal"),
        Just("Script"),
        Just("card"),
    ]
    .prop_map(String::from)
}

fn props() -> impl Strategy<Value = Value> {
    let key = prop_oneof![Just("label"), Just("title"), Just("onClick")].prop_map(String::from);
    let value = prop_oneof![
        ".{0,120}".prop_map(Value::String),
        any::<i64>().prop_map(Value::from),
    ];
    prop::collection::btree_map(key, value, 0..3)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

fn node() -> impl Strategy<Value = Value> {
    let leaf = (kind_name(), props()).prop_map(|(kind, props)| json!({"type": kind, "props": props}));
    leaf.prop_recursive(9, 64, 4, |inner| {
        (kind_name(), props(), prop::collection::vec(inner, 0..4)).prop_map(
            |(kind, props, children)| json!({"type": kind, "props": props, "children": children}),
        )
    })
}

fn raw_plan() -> impl Strategy<Value = Value> {
    prop::collection::vec(node(), 0..25)
        .prop_map(|components| json!({"layout": "default", "components": components}))
}

fn every_node(components: &[Component], visit: &mut dyn FnMut(&Component, usize), depth: usize) {
    for component in components {
        visit(component, depth);
        every_node(&component.children, visit, depth + 1);
    }
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

proptest! {
    #[test]
    fn prop_normalized_sanitization_is_idempotent(raw in raw_plan()) {
        let once = normalize_plan(&sanitize_plan(&raw));
        let twice = normalize_plan(&sanitize_plan(&once.to_value()));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_sanitized_kinds_stay_closed(raw in raw_plan()) {
        let value = sanitize_plan(&raw).to_value();
        let mut stack = value["components"].as_array().cloned().unwrap_or_default();
        while let Some(node) = stack.pop() {
            let name = node["type"].as_str().unwrap_or_default();
            prop_assert!(ComponentKind::ALL.iter().any(|kind| kind.as_str() == name));
            if let Some(children) = node["children"].as_array() {
                stack.extend(children.iter().cloned());
            }
        }
    }

    #[test]
    fn prop_sanitized_containers_are_never_empty(raw in raw_plan()) {
        let plan = sanitize_plan(&raw);
        let mut empty_containers = 0;
        every_node(&plan.components, &mut |component: &Component, _: usize| {
            if component.kind.is_container() && component.children.is_empty() {
                empty_containers += 1;
            }
        }, 0);
        prop_assert_eq!(empty_containers, 0);
        prop_assert!(plan.max_depth().unwrap_or(0) <= SANITIZE_MAX_DEPTH + 1);
    }

    #[test]
    fn prop_limited_plans_respect_bounds(
        raw in raw_plan(),
        max_components in 1..10usize,
        max_depth in 0..5usize,
    ) {
        let limits = Limits { max_components, max_depth, ..Limits::default() };
        let plan = limit_plan(&sanitize_plan(&raw), &limits);
        prop_assert!(plan.components.len() <= max_components);
        prop_assert!(plan.max_depth().unwrap_or(0) <= max_depth);
    }

    #[test]
    fn prop_escaping_round_trips(value in ".{0,64}") {
        let escaped = escape_attribute(&value);
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert_eq!(unescape(&escaped), value);
    }

    #[test]
    fn prop_rendered_markup_has_no_raw_quotes_in_values(raw in raw_plan()) {
        let plan = normalize_plan(&sanitize_plan(&raw));
        let markup = render_markup(&plan);
        for line in markup.lines() {
            // Every attribute contributes exactly two quote characters.
            prop_assert_eq!(line.matches('"').count() % 2, 0);
        }
    }
}

#[test]
fn login_form_scenario() {
    let request = PlanRequest {
        user_prompt: "login form".to_string(),
        previous_plan: None,
    };
    let outcome = handle_plan_request(&IntentClassifier::new(), &request, &Limits::default())
        .expect("login prompt is valid");
    assert_eq!(outcome.branch, PatchBranch::Built);
    assert_eq!(outcome.plan.layout, "centered-card");
    assert_eq!(
        render_markup(&outcome.plan),
        "<Card title=\"Login\">\n\
<Input label=\"Email\" placeholder=\"Email\" />\n\
<Input label=\"Password\" placeholder=\"Password\" />\n\
<Button label=\"Submit\" />\n\
</Card>"
    );
}

#[test]
fn remember_me_then_forgot_password_scenario() {
    let classifier = IntentClassifier::new();
    let limits = Limits::default();
    let login = handle_plan_request(
        &classifier,
        &PlanRequest {
            user_prompt: "login form".to_string(),
            previous_plan: None,
        },
        &limits,
    )
    .expect("valid");

    let remembered = handle_plan_request(
        &classifier,
        &PlanRequest {
            user_prompt: "add remember me".to_string(),
            previous_plan: Some(login.plan.to_value()),
        },
        &limits,
    )
    .expect("valid");
    assert_eq!(remembered.branch, PatchBranch::Edited);
    assert_eq!(remembered.plan.components[0].children.len(), 4);

    let forgot = handle_plan_request(
        &classifier,
        &PlanRequest {
            user_prompt: "Add forgot password to the login".to_string(),
            previous_plan: Some(remembered.plan.to_value()),
        },
        &limits,
    )
    .expect("valid");
    assert_eq!(forgot.branch, PatchBranch::ForgotPassword);
    let last = forgot.plan.components[0].children.last().expect("child");
    assert_eq!(last, &Component::button("Forgot Password"));
}

#[test]
fn unknown_kind_from_model_output_is_dropped_without_error() {
    let raw = json!({
        "layout": "centered-card",
        "components": [
            {"type": "Script", "props": {"label": "alert(1)"}},
            {"type": "Button", "props": {"label": "Ok"}}
        ]
    });
    let plan = uiplan_engine::prepare_untrusted_plan(&raw, &Limits::default()).expect("repaired");
    assert_eq!(plan, Plan::new("centered-card", vec![Component::button("Ok")]));
}

#[test]
fn oversized_prompt_scenario() {
    let request = PlanRequest {
        user_prompt: "login ".repeat(200),
        previous_plan: None,
    };
    let err = handle_plan_request(&IntentClassifier::new(), &request, &Limits::default())
        .expect_err("prompt too long");
    assert!(matches!(err, PipelineError::PromptTooLong { length: 1200, max: 1000 }));
}
