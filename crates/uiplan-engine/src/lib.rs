pub mod classify;
pub mod codegen;
pub mod explain;
pub mod limit;
pub mod normalize;
pub mod patch;
pub mod pipeline;
pub mod sanitize;
pub mod templates;

pub use classify::{
    classify_action, Action, Classification, Intent, IntentClassifier, IntentRule, EDIT_VERBS,
    INTENT_RULES,
};
pub use codegen::{escape_attribute, render_component, render_markup, render_module};
pub use explain::{explain_plan, ExplainError};
pub use limit::{limit_depth, limit_plan};
pub use normalize::{normalize_component, normalize_plan};
pub use patch::{
    apply_forgot_password, edit_plan, plan_for_prompt, EditEffect, EditRule, PatchBranch,
    PatchOutcome, EDIT_RULES, FORGOT_PASSWORD_TRIGGER,
};
pub use pipeline::{
    check_prompt, compile_explanation, compile_markup, handle_plan_request, prepare_plan,
    prepare_untrusted_plan, refine_plan, validate_plan, PipelineError, PlanRequest,
};
pub use sanitize::{sanitize_component, sanitize_plan, truncate_chars};
pub use templates::build_plan;
