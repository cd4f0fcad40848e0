mod cli;
mod config;
mod diff;
mod history;
mod logging;
mod run;
mod upstream;

pub use cli::{
    BuildCommand, Cli, Commands, DiffCommand, ExplainCommand, GenerateCommand, HistoryCommand,
    HistoryListCommand, HistoryShowCommand, OutputFormat, PlanCommand,
};
pub use config::{
    load_runner_config, resolve_runner_config, validate_runner_config, HistoryConfig,
    RunnerConfig, RunnerConfigError, UpstreamConfig, RUNNER_CONFIG_SCHEMA,
};
pub use diff::{
    diff_plans_json, diff_plans_text, PlanChange, PlanDiffJson, PlanDiffNodeChanged,
    PlanDiffNodeIdentity, PlanDiffSummary,
};
pub use history::{
    encode_history_jsonl_line, parse_history_jsonl_line, HistoryEntry, HistoryError, PlanHistory,
};
pub use logging::{default_log_filter, init_tracing};
pub use run::{
    execute_build, execute_diff, execute_explain, execute_generate, execute_history_list,
    execute_history_show, execute_plan, PlanReport, PlanSource, RunnerError,
};
pub use upstream::{
    build_model_prompt, enforce_plan_structure, extract_plan_json, plan_from_model_text,
    GenerateRequest, UpstreamClient, UpstreamError,
};
