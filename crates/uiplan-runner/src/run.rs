use crate::cli::{
    BuildCommand, DiffCommand, ExplainCommand, GenerateCommand, HistoryListCommand,
    HistoryShowCommand, OutputFormat, PlanCommand,
};
use crate::config::{resolve_runner_config, RunnerConfig, RunnerConfigError};
use crate::diff::{diff_plans_json, diff_plans_text};
use crate::history::{HistoryError, PlanHistory};
use crate::upstream::{UpstreamClient, UpstreamError};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uiplan_core::{plan_fingerprint, Plan};
use uiplan_engine::{
    check_prompt, compile_explanation, compile_markup, explain_plan, handle_plan_request,
    prepare_plan, render_markup, render_module, Action, Intent, IntentClassifier, PatchBranch,
    PipelineError, PlanRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("plan parse failed `{path}`: {source}")]
    PlanParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("before plan parse failed: {0}")]
    DiffBeforeParse(String),
    #[error("after plan parse failed: {0}")]
    DiffAfterParse(String),
    #[error(transparent)]
    Config(#[from] RunnerConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("history has no version {version} (latest is {latest})")]
    HistoryVersionNotFound { version: usize, latest: usize },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Built,
    Edited,
    ForgotPassword,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub source: PlanSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    pub plan_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_version: Option<usize>,
    pub plan: Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct BuildReport {
    #[serde(flatten)]
    report: PlanReport,
    markup: String,
    explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct HistoryListItem<'a> {
    version: usize,
    prompt: &'a str,
    plan_hash: &'a str,
}

pub fn execute_plan(command: &PlanCommand) -> Result<String, RunnerError> {
    let config = resolve_runner_config(command.config.as_deref())?;
    let report = produce_plan(
        &config,
        command.prompt.as_str(),
        command.previous.as_deref(),
        command.model,
        history_target(command.history.as_deref(), command.config.as_deref(), &config),
    )?;
    match command.format {
        OutputFormat::Text => Ok(format!(
            "{}\n{}",
            report_header(&report),
            serde_json::to_string_pretty(&report.plan)?
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
    }
}

pub fn execute_generate(command: &GenerateCommand) -> Result<String, RunnerError> {
    let config = resolve_runner_config(command.config.as_deref())?;
    let raw = read_plan_value(command.plan.as_path())?;
    if command.module {
        let plan = prepare_plan(&raw, &config.limits)?;
        return Ok(render_module(&plan));
    }
    Ok(compile_markup(&raw, &config.limits)?)
}

pub fn execute_explain(command: &ExplainCommand) -> Result<String, RunnerError> {
    let config = resolve_runner_config(command.config.as_deref())?;
    check_prompt(command.prompt.as_str(), &config.limits)?;
    let raw = read_plan_value(command.plan.as_path())?;
    Ok(compile_explanation(command.prompt.as_str(), &raw, &config.limits)?)
}

pub fn execute_build(command: &BuildCommand) -> Result<String, RunnerError> {
    let config = resolve_runner_config(command.config.as_deref())?;
    let report = produce_plan(
        &config,
        command.prompt.as_str(),
        command.previous.as_deref(),
        command.model,
        history_target(command.history.as_deref(), command.config.as_deref(), &config),
    )?;
    let markup = if command.module {
        render_module(&report.plan)
    } else {
        render_markup(&report.plan)
    };
    let explanation = explain_plan(command.prompt.as_str(), &report.plan, &config.limits)
        .map_err(PipelineError::from)?;

    match command.format {
        OutputFormat::Text => Ok(format!(
            "{}\n\n{}\n\n{}",
            report_header(&report),
            markup.trim_end(),
            explanation
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&BuildReport {
            report,
            markup,
            explanation,
        })?),
    }
}

pub fn execute_diff(command: &DiffCommand) -> Result<String, RunnerError> {
    let before = read_typed_plan(command.before.as_path()).map_err(RunnerError::DiffBeforeParse)?;
    let after = read_typed_plan(command.after.as_path()).map_err(RunnerError::DiffAfterParse)?;
    match command.format {
        OutputFormat::Text => Ok(diff_plans_text(&before, &after)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&diff_plans_json(&before, &after))?),
    }
}

pub fn execute_history_list(command: &HistoryListCommand) -> Result<String, RunnerError> {
    let history = open_history(command.history.as_deref(), command.config.as_deref())?;
    match command.format {
        OutputFormat::Text => {
            if history.entries().is_empty() {
                return Ok(format!("history is empty: {}", history.path().display()));
            }
            Ok(history
                .entries()
                .iter()
                .map(|entry| {
                    format!(
                        "{} {} {}",
                        entry.version,
                        short_hash(&entry.plan_hash),
                        entry.prompt
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        OutputFormat::Json => {
            let items = history
                .entries()
                .iter()
                .map(|entry| HistoryListItem {
                    version: entry.version,
                    prompt: entry.prompt.as_str(),
                    plan_hash: entry.plan_hash.as_str(),
                })
                .collect::<Vec<_>>();
            Ok(serde_json::to_string_pretty(&items)?)
        }
    }
}

pub fn execute_history_show(command: &HistoryShowCommand) -> Result<String, RunnerError> {
    let history = open_history(command.history.as_deref(), command.config.as_deref())?;
    let entry = history
        .get(command.version)
        .ok_or(RunnerError::HistoryVersionNotFound {
            version: command.version,
            latest: history.entries().len(),
        })?;
    Ok(serde_json::to_string_pretty(&entry.plan)?)
}

fn produce_plan(
    config: &RunnerConfig,
    prompt: &str,
    previous: Option<&Path>,
    use_model: bool,
    history_path: Option<PathBuf>,
) -> Result<PlanReport, RunnerError> {
    let limits = &config.limits;
    let (source, intent, action, plan) = if use_model {
        check_prompt(prompt, limits)?;
        let client = UpstreamClient::new(config.upstream.clone())?;
        let plan = client.generate_plan(prompt, limits)?;
        (PlanSource::Model, None, None, plan)
    } else {
        let request = PlanRequest {
            user_prompt: prompt.to_string(),
            previous_plan: previous.map(read_plan_value).transpose()?,
        };
        let outcome = handle_plan_request(&IntentClassifier::new(), &request, limits)?;
        let source = match outcome.branch {
            PatchBranch::Built => PlanSource::Built,
            PatchBranch::Edited => PlanSource::Edited,
            PatchBranch::ForgotPassword => PlanSource::ForgotPassword,
        };
        (
            source,
            Some(outcome.classification.intent),
            Some(outcome.classification.action),
            outcome.plan,
        )
    };

    let history_version = match history_path {
        Some(path) => {
            let mut history = PlanHistory::load_or_empty(path)?;
            Some(history.append(prompt, &plan)?.version)
        }
        None => None,
    };

    Ok(PlanReport {
        source,
        intent,
        action,
        plan_hash: plan_fingerprint(&plan),
        history_version,
        plan,
    })
}

/// Explicit `--history` wins; a config file enables its `history.path`.
fn history_target(
    flag: Option<&Path>,
    config_path: Option<&Path>,
    config: &RunnerConfig,
) -> Option<PathBuf> {
    match (flag, config_path) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(_)) => Some(config.history.path.clone()),
        (None, None) => None,
    }
}

fn open_history(flag: Option<&Path>, config_path: Option<&Path>) -> Result<PlanHistory, RunnerError> {
    let path = match flag {
        Some(path) => path.to_path_buf(),
        None => resolve_runner_config(config_path)?.history.path,
    };
    Ok(PlanHistory::load_or_empty(path)?)
}

fn report_header(report: &PlanReport) -> String {
    let mut header = format!("source={}", source_label(report.source));
    if let Some(intent) = report.intent {
        header.push_str(&format!(" intent={intent}"));
    }
    if let Some(action) = report.action {
        header.push_str(match action {
            Action::Create => " action=create",
            Action::Edit => " action=edit",
        });
    }
    header.push_str(&format!(" hash={}", short_hash(&report.plan_hash)));
    if let Some(version) = report.history_version {
        header.push_str(&format!(" version={version}"));
    }
    header
}

fn source_label(source: PlanSource) -> &'static str {
    match source {
        PlanSource::Built => "built",
        PlanSource::Edited => "edited",
        PlanSource::ForgotPassword => "forgot_password",
        PlanSource::Model => "model",
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

fn read_plan_value(path: &Path) -> Result<Value, RunnerError> {
    let content = fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(content.as_str()).map_err(|source| RunnerError::PlanParse {
        path: path.display().to_string(),
        source,
    })
}

fn read_typed_plan(path: &Path) -> Result<Plan, String> {
    let content = fs::read_to_string(path).map_err(|error| format!("{}: {error}", path.display()))?;
    serde_json::from_str::<Plan>(content.as_str()).map_err(|error| format!("{}: {error}", path.display()))
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
