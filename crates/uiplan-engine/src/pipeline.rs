//! End-to-end plan processing: validate, sanitize, normalize, limit.

use crate::classify::IntentClassifier;
use crate::codegen::render_markup;
use crate::explain::{explain_plan, ExplainError};
use crate::limit::limit_plan;
use crate::normalize::normalize_plan;
use crate::patch::{plan_for_prompt, PatchOutcome};
use crate::sanitize::sanitize_plan;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uiplan_core::{Limits, Plan, StructuredIssue};
use uiplan_schema::validate_plan_value;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("plan validation failed: {0}")]
    Validation(StructuredIssue),
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("prompt is {length} characters, limit is {max}")]
    PromptTooLong { length: usize, max: usize },
    #[error(transparent)]
    Explain(#[from] ExplainError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub user_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_plan: Option<Value>,
}

/// Surfaces the first schema violation, if any.
pub fn validate_plan(raw: &Value) -> Result<(), PipelineError> {
    match validate_plan_value(raw).into_iter().next() {
        Some(issue) => Err(PipelineError::Validation(issue)),
        None => Ok(()),
    }
}

/// Runs a caller-supplied plan through every stage.
pub fn prepare_plan(raw: &Value, limits: &Limits) -> Result<Plan, PipelineError> {
    validate_plan(raw)?;
    Ok(limit_plan(&normalize_plan(&sanitize_plan(raw)), limits))
}

/// Re-runs sanitize, normalize and limit over an already typed plan.
pub fn refine_plan(plan: &Plan, limits: &Limits) -> Plan {
    limit_plan(&normalize_plan(&sanitize_plan(&plan.to_value())), limits)
}

/// For model output: repair first, then require the result to pass the schema.
pub fn prepare_untrusted_plan(raw: &Value, limits: &Limits) -> Result<Plan, PipelineError> {
    let plan = limit_plan(&normalize_plan(&sanitize_plan(raw)), limits);
    validate_plan(&plan.to_value())?;
    Ok(plan)
}

pub fn check_prompt(prompt: &str, limits: &Limits) -> Result<(), PipelineError> {
    if prompt.trim().is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }
    let length = prompt.chars().count();
    if length > limits.max_prompt_chars {
        return Err(PipelineError::PromptTooLong {
            length,
            max: limits.max_prompt_chars,
        });
    }
    Ok(())
}

/// Checks the envelope, prepares any previous plan, then patches and refines.
pub fn handle_plan_request(
    classifier: &IntentClassifier,
    request: &PlanRequest,
    limits: &Limits,
) -> Result<PatchOutcome, PipelineError> {
    check_prompt(&request.user_prompt, limits)?;
    let previous = request
        .previous_plan
        .as_ref()
        .map(|raw| prepare_plan(raw, limits))
        .transpose()?;
    let mut outcome = plan_for_prompt(classifier, &request.user_prompt, previous.as_ref());
    outcome.plan = refine_plan(&outcome.plan, limits);
    Ok(outcome)
}

pub fn compile_markup(raw: &Value, limits: &Limits) -> Result<String, PipelineError> {
    Ok(render_markup(&prepare_plan(raw, limits)?))
}

pub fn compile_explanation(prompt: &str, raw: &Value, limits: &Limits) -> Result<String, PipelineError> {
    let plan = prepare_plan(raw, limits)?;
    Ok(explain_plan(prompt, &plan, limits)?)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
