//! Integration tests for merge-keeper

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

mod common;

use assert_cmd::Command;
use common::{SCENARIO_TOML, TempConfig, set};
use merge_keeper::config::{ConfigAgent, load_config};
use predicates::prelude::*;

// =============================================================================
// Library Tests
// =============================================================================

#[test]
fn test_scenario_from_toml_file() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let config = load_config(&temp.path, 1).unwrap();
    let policy = config.context_policy("o", "r", "master").unwrap();

    assert_eq!(
        policy.required_contexts,
        set(&["always-run", "non-lighthouse-job"])
    );
    assert_eq!(
        policy.required_if_present_contexts,
        set(&["run-if-changed", "not-always"])
    );
    assert_eq!(policy.optional_contexts, set(&["optional"]));
}

#[test]
fn test_branch_level_options_override_org_defaults() {
    let content = format!(
        "{SCENARIO_TOML}\n[keeper.context_options.orgs.o.repos.r.branches.master]\nfrom_branch_protection = false\noptional_contexts = [\"coverage\"]\n"
    );
    let temp = TempConfig::new(&content);
    let config = load_config(&temp.path, 1).unwrap();

    let master = config.context_policy("o", "r", "master").unwrap();
    assert!(!master.is_known("non-lighthouse-job"));
    assert!(master.optional_contexts.contains("coverage"));

    let develop = config.context_policy("o", "r", "develop").unwrap();
    assert!(develop.required_contexts.contains("non-lighthouse-job"));
    assert!(!develop.is_known("coverage"));
}

#[test]
fn test_reload_swaps_snapshot() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let agent = ConfigAgent::default();
    let before = agent.current();
    assert!(before.context_policy("o", "r", "master").unwrap().required_contexts.is_empty());

    agent.reload(&temp.path).unwrap();
    let after = agent.current();
    assert_eq!(after.generation, 1);
    assert!(after
        .context_policy("o", "r", "master")
        .unwrap()
        .required_contexts
        .contains("always-run"));
    // the old snapshot is untouched
    assert!(before.context_policy("o", "r", "master").unwrap().required_contexts.is_empty());
}

#[test]
fn test_invalid_branch_pattern_fails_load() {
    let temp = TempConfig::new("[[presubmits.\"o/r\"]]\nname = \"x\"\nbranches = [\"(\"]\n");
    let err = load_config(&temp.path, 1).unwrap_err();
    assert!(err.is_config());
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Status-check context policies"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_policy_text() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config")
        .arg(&temp.path)
        .args(["policy", "o", "r", "master"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Required if present"))
        .stdout(predicate::str::contains("non-lighthouse-job"))
        .stdout(predicate::str::contains("skip-report").not());
}

#[test]
fn test_policy_json() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config")
        .arg(&temp.path)
        .args(["policy", "o", "r", "master", "--json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let policy: merge_keeper::ContextPolicy = serde_json::from_slice(&output).unwrap();
    assert_eq!(policy.optional_contexts, set(&["optional"]));
}

#[test]
fn test_jobs_lists_classification() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config")
        .arg(&temp.path)
        .args(["jobs", "o", "r", "master"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("changes matching `foo`"))
        .stdout(predicate::str::contains("excluded"));
}

#[test]
fn test_check_passes_when_green() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let statuses = temp.write(
        "statuses.json",
        r#"[
            {"context": "always-run", "state": "success"},
            {"context": "non-lighthouse-job", "state": "success"},
            {"context": "optional", "state": "failure"}
        ]"#,
    );
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config")
        .arg(&temp.path)
        .args(["check", "o", "r", "master", "--statuses"])
        .arg(&statuses);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("status checks satisfied"));
}

#[test]
fn test_check_fails_when_required_missing() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let statuses = temp.write(
        "statuses.json",
        r#"[{"context": "always-run", "state": "success"}]"#,
    );
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config")
        .arg(&temp.path)
        .args(["check", "o", "r", "master", "--statuses"])
        .arg(&statuses);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("non-lighthouse-job: missing"));
}

#[test]
fn test_validate_reports_counts() {
    let temp = TempConfig::new(SCENARIO_TOML);
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.arg("--config").arg(&temp.path).arg("validate");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("5 presubmit(s) across 1 repositories"));
}

#[test]
fn test_missing_config_fails() {
    let mut cmd = Command::cargo_bin("keeper").unwrap();
    cmd.args(["--config", "/nonexistent/keeper.toml", "validate"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
