//! Model-backed plan generation.
//!
//! The model's answer is untrusted: it is repaired and re-validated by the
//! engine before anything else sees it.

use crate::config::UpstreamConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use uiplan_core::{Limits, Plan, DEFAULT_LAYOUT};
use uiplan_engine::{prepare_untrusted_plan, PipelineError};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("model request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("model endpoint `{url}` unavailable: {source}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model returned no JSON object")]
    EmptyResponse,
    #[error("model returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("model plan rejected: {0}")]
    Rejected(#[source] PipelineError),
    #[error("build async runtime failed: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Instruction sent to the model around the user's prompt.
pub fn build_model_prompt(user_prompt: &str) -> String {
    format!(
        "You are a UI planner. Reply with ONLY a JSON object and no other text.\n\
The object has this shape:\n\
{{\"layout\": string, \"components\": [{{\"type\": \"Card\"|\"Input\"|\"Button\"|\"Modal\", \"props\": {{...}}, \"children\": [...]}}]}}\n\
Card and Modal use a \"title\" prop, Input and Button use a \"label\" prop. All prop values are strings.\n\
User request: {user_prompt}"
    )
}

fn json_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("valid regex"))
}

/// Pulls the outermost `{...}` span out of free-form model text and parses it.
pub fn extract_plan_json(text: &str) -> Result<Value, UpstreamError> {
    let candidate = json_object_pattern()
        .find(text)
        .ok_or(UpstreamError::EmptyResponse)?;
    serde_json::from_str(candidate.as_str()).map_err(UpstreamError::InvalidJson)
}

/// Gives the parsed object its required top-level fields.
pub fn enforce_plan_structure(raw: Value) -> Value {
    let mut object = match raw {
        Value::Object(object) => object,
        _ => serde_json::Map::new(),
    };
    if !object.get("components").is_some_and(Value::is_array) {
        object.insert("components".to_string(), Value::Array(Vec::new()));
    }
    if !object.get("layout").is_some_and(Value::is_string) {
        object.insert("layout".to_string(), Value::String(DEFAULT_LAYOUT.to_string()));
    }
    Value::Object(object)
}

/// Turns the raw model reply into a plan that passed the full pipeline.
pub fn plan_from_model_text(text: &str, limits: &Limits) -> Result<Plan, UpstreamError> {
    let raw = enforce_plan_structure(extract_plan_json(text)?);
    prepare_untrusted_plan(&raw, limits).map_err(UpstreamError::Rejected)
}

pub struct UpstreamClient {
    config: UpstreamConfig,
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(UpstreamError::Runtime)?;
        Ok(Self {
            config,
            http: reqwest::Client::new(),
            runtime,
        })
    }

    /// Sends one non-streaming generate request and returns the model's text.
    pub fn generate_text(&self, user_prompt: &str) -> Result<String, UpstreamError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_model_prompt(user_prompt),
            stream: false,
        };
        let url = self.config.url.clone();
        let timeout_ms = self.config.timeout_ms;
        tracing::debug!(%url, model = %request.model, timeout_ms, "requesting model plan");

        let unavailable = |source| UpstreamError::Unavailable {
            url: url.clone(),
            source,
        };
        let call = async {
            let response = self
                .http
                .post(url.as_str())
                .json(&request)
                .send()
                .await
                .map_err(unavailable)?
                .error_for_status()
                .map_err(unavailable)?;
            let body = response
                .json::<GenerateResponse>()
                .await
                .map_err(unavailable)?;
            Ok::<String, UpstreamError>(body.response)
        };
        let result = self
            .runtime
            .block_on(async { tokio::time::timeout(Duration::from_millis(timeout_ms), call).await });
        match result {
            Ok(text) => text,
            Err(_) => {
                tracing::warn!(%url, timeout_ms, "model request timed out");
                Err(UpstreamError::Timeout { timeout_ms })
            }
        }
    }

    pub fn generate_plan(&self, user_prompt: &str, limits: &Limits) -> Result<Plan, UpstreamError> {
        let text = self.generate_text(user_prompt)?;
        let plan = plan_from_model_text(text.as_str(), limits)?;
        tracing::info!(components = plan.components.len(), "model plan accepted");
        Ok(plan)
    }
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
