use super::{load_runner_config, resolve_runner_config, RunnerConfig, RunnerConfigError};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_file(prefix: &str, extension: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!(
        "uiplan-runner-{prefix}-{}-{nanos}.{extension}",
        std::process::id()
    ));
    fs::write(&path, content).expect("must write temp file");
    path
}

#[test]
fn load_runner_config_parses_full_yaml() {
    let path = write_temp_file(
        "config-ok",
        "yaml",
        r#"
schema: uiplan-runner/0.0.1
limits:
  max_components: 10
  max_depth: 2
  max_prompt_chars: 500
  max_explanation_chars: 4000
upstream:
  url: https://models.example/api/generate
  model: llama3
  timeout_ms: 5000
history:
  path: /tmp/uiplan-history.jsonl
"#,
    );
    let config = load_runner_config(path.as_path()).expect("config must load");
    assert_eq!(config.limits.max_components, 10);
    assert_eq!(config.limits.max_depth, 2);
    assert_eq!(config.limits.explain_max_depth, 5);
    assert_eq!(config.upstream.model, "llama3");
    assert_eq!(config.upstream.timeout_ms, 5000);
    assert_eq!(config.history.path, PathBuf::from("/tmp/uiplan-history.jsonl"));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let path = write_temp_file("config-min", "json", r#"{"schema":"uiplan-runner/0.0.1"}"#);
    let config = load_runner_config(path.as_path()).expect("config must load");
    assert_eq!(config, RunnerConfig::default());
    assert_eq!(config.upstream.url, "http://localhost:11434/api/generate");
    assert_eq!(config.upstream.model, "mistral");
    assert_eq!(config.upstream.timeout_ms, 20_000);
}

#[test]
fn validation_collects_every_issue() {
    let path = write_temp_file(
        "config-bad",
        "yaml",
        r#"
schema: uiplan-runner/9.9.9
limits:
  max_components: 40
  max_depth: 0
upstream:
  url: ftp://models.example
  timeout_ms: 0
"#,
    );
    let issues = match load_runner_config(path.as_path()) {
        Err(RunnerConfigError::Validation(issues)) => issues,
        other => panic!("expected validation error, got {other:?}"),
    };
    let references = issues
        .iter()
        .filter_map(|issue| issue.reference.as_deref())
        .collect::<Vec<_>>();
    assert!(references.contains(&"runner.config.schema"));
    assert!(references.contains(&"runner.config.limits.positive"));
    assert!(references.contains(&"runner.config.limits.max_components"));
    assert!(references.contains(&"runner.config.upstream.url"));
    assert!(references.contains(&"runner.config.upstream.timeout"));
    assert!(issues
        .iter()
        .any(|issue| issue.field_path.to_string() == "$.limits.max_depth"));
}

#[test]
fn env_placeholders_are_expanded() {
    std::env::set_var("UIPLAN_TEST_MODEL", "phi3");
    let path = write_temp_file(
        "config-env",
        "yaml",
        "schema: uiplan-runner/0.0.1\nupstream:\n  model: ${UIPLAN_TEST_MODEL}\n",
    );
    let config = load_runner_config(path.as_path()).expect("config must load");
    assert_eq!(config.upstream.model, "phi3");
}

#[test]
fn missing_env_var_is_a_parse_error() {
    let path = write_temp_file(
        "config-env-missing",
        "yaml",
        "schema: uiplan-runner/0.0.1\nupstream:\n  model: ${UIPLAN_TEST_UNSET_VARIABLE}\n",
    );
    let err = load_runner_config(path.as_path()).expect_err("must fail");
    assert!(matches!(err, RunnerConfigError::Parse(message) if message.contains("UIPLAN_TEST_UNSET_VARIABLE")));
}

#[test]
fn unreadable_config_reports_path() {
    let err = load_runner_config(std::path::Path::new("/nonexistent/uiplan.yaml"))
        .expect_err("must fail");
    assert!(err.to_string().contains("/nonexistent/uiplan.yaml"));
}

#[test]
fn resolve_without_path_uses_defaults() {
    assert_eq!(resolve_runner_config(None).expect("defaults"), RunnerConfig::default());
}
