use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uiplan_core::{FieldPath, Limits, StructuredIssue, SCHEMA_MAX_COMPONENTS};

pub const RUNNER_CONFIG_SCHEMA: &str = "uiplan-runner/0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_runner_schema")]
    pub schema: String,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            schema: default_runner_schema(),
            limits: Limits::default(),
            upstream: UpstreamConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub url: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434/api/generate".to_string(),
            model: "mistral".to_string(),
            timeout_ms: 20_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("plan-history.jsonl"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerConfigError {
    #[error("read runner config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("runner config parse failed: {0}")]
    Parse(String),
    #[error("runner config validation failed: {}", render_issues(.0))]
    Validation(Vec<StructuredIssue>),
}

pub fn load_runner_config(path: &Path) -> Result<RunnerConfig, RunnerConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| RunnerConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let expanded = expand_env_placeholders(raw.as_str()).map_err(RunnerConfigError::Parse)?;
    let config: RunnerConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("json decode error: {error}")))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(expanded.as_str())
            .map_err(|error| RunnerConfigError::Parse(format!("yaml decode error: {error}")))?,
        _ => serde_yaml::from_str(expanded.as_str())
            .or_else(|_| serde_json::from_str(expanded.as_str()))
            .map_err(|error| RunnerConfigError::Parse(error.to_string()))?,
    };

    let mut issues = validate_runner_config(&config);
    StructuredIssue::sort_stable(&mut issues);
    if !issues.is_empty() {
        return Err(RunnerConfigError::Validation(issues));
    }
    tracing::debug!(path = %path.display(), "runner config loaded");
    Ok(config)
}

/// Loads `path` when given, otherwise returns the defaults.
pub fn resolve_runner_config(path: Option<&Path>) -> Result<RunnerConfig, RunnerConfigError> {
    match path {
        Some(path) => load_runner_config(path),
        None => Ok(RunnerConfig::default()),
    }
}

pub fn validate_runner_config(config: &RunnerConfig) -> Vec<StructuredIssue> {
    let mut issues = Vec::<StructuredIssue>::new();
    if config.schema != RUNNER_CONFIG_SCHEMA {
        issues.push(config_issue(
            "runner.config.schema",
            FieldPath::root().key("schema"),
            format!(
                "unsupported runner config schema `{}` (expected `{RUNNER_CONFIG_SCHEMA}`)",
                config.schema
            ),
        ));
    }

    let limits = &config.limits;
    for (name, value) in [
        ("max_components", limits.max_components),
        ("max_depth", limits.max_depth),
        ("explain_max_depth", limits.explain_max_depth),
        ("max_prompt_chars", limits.max_prompt_chars),
        ("max_explanation_chars", limits.max_explanation_chars),
    ] {
        if value == 0 {
            issues.push(config_issue(
                "runner.config.limits.positive",
                FieldPath::root().key("limits").key(name),
                format!("limits.{name} must be > 0"),
            ));
        }
    }
    if limits.max_components > SCHEMA_MAX_COMPONENTS {
        issues.push(config_issue(
            "runner.config.limits.max_components",
            FieldPath::root().key("limits").key("max_components"),
            format!("limits.max_components must be <= {SCHEMA_MAX_COMPONENTS}"),
        ));
    }

    if !is_supported_upstream_url(config.upstream.url.as_str()) {
        issues.push(config_issue(
            "runner.config.upstream.url",
            FieldPath::root().key("upstream").key("url"),
            "upstream.url must be http(s)".to_string(),
        ));
    }
    if config.upstream.model.trim().is_empty() {
        issues.push(config_issue(
            "runner.config.upstream.model",
            FieldPath::root().key("upstream").key("model"),
            "upstream.model must not be empty".to_string(),
        ));
    }
    if config.upstream.timeout_ms == 0 {
        issues.push(config_issue(
            "runner.config.upstream.timeout",
            FieldPath::root().key("upstream").key("timeout_ms"),
            "upstream.timeout_ms must be > 0".to_string(),
        ));
    }

    issues
}

fn config_issue(reference: &str, path: FieldPath, message: String) -> StructuredIssue {
    StructuredIssue::error("runner_config_error", path, message).with_reference(reference)
}

fn default_runner_schema() -> String {
    RUNNER_CONFIG_SCHEMA.to_string()
}

fn is_supported_upstream_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn render_issues(issues: &[StructuredIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn expand_env_placeholders(input: &str) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(start_offset) = input[cursor..].find("${") {
        let start = cursor + start_offset;
        out.push_str(&input[cursor..start]);
        let name_start = start + 2;
        let Some(end_offset) = input[name_start..].find('}') else {
            return Err("unterminated env placeholder `${...`".to_string());
        };
        let end = name_start + end_offset;
        let name = &input[name_start..end];
        if name.is_empty() {
            return Err("empty env placeholder `${}`".to_string());
        }
        let value =
            std::env::var(name).map_err(|_| format!("missing env var for placeholder `${{{name}}}`"))?;
        out.push_str(value.as_str());
        cursor = end + 1;
    }
    out.push_str(&input[cursor..]);
    Ok(out)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
