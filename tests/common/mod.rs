//! Shared fixtures for merge-keeper tests
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use merge_keeper::branchprotection::{BranchProtection, Org, Policy, Repo, RequiredStatusChecks};
use merge_keeper::config::{Config, RawConfig};
use merge_keeper::job::{BrancherConfig, PresubmitConfig};
use merge_keeper::policy::ContextPolicyOptions;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a presubmit with the given context
pub fn job(context: &str) -> PresubmitConfig {
    PresubmitConfig {
        context: Some(context.to_string()),
        ..Default::default()
    }
}

/// The five jobs used by the reference scenarios
///
/// always-run, run-if-changed (pattern `foo`), not-always,
/// skip-report (skipped on master) and optional.
pub fn scenario_jobs() -> Vec<PresubmitConfig> {
    vec![
        PresubmitConfig {
            always_run: true,
            ..job("always-run")
        },
        PresubmitConfig {
            run_if_changed: Some("foo".to_string()),
            ..job("run-if-changed")
        },
        job("not-always"),
        PresubmitConfig {
            always_run: true,
            skip_report: true,
            brancher: BrancherConfig {
                branches: vec![],
                skip_branches: vec!["master".to_string()],
            },
            ..job("skip-report")
        },
        PresubmitConfig {
            always_run: true,
            optional: true,
            ..job("optional")
        },
    ]
}

/// Branch protection tree requiring `contexts` on every branch of `o/r`
pub fn repo_protection(contexts: &[&str]) -> BranchProtection {
    let repo = Repo {
        policy: Policy {
            protect: None,
            required_status_checks: Some(RequiredStatusChecks {
                contexts: strings(contexts),
                strict: None,
            }),
        },
        ..Default::default()
    };
    let mut org = Org::default();
    org.repos.insert("r".to_string(), repo);
    let mut tree = BranchProtection::default();
    tree.orgs.insert("o".to_string(), org);
    tree
}

/// Compile a config for `o/r` with the given pieces
pub fn make_config(
    jobs: Vec<PresubmitConfig>,
    branch_protection: BranchProtection,
    from_branch_protection: bool,
    skip_unknown_contexts: bool,
) -> Config {
    let mut raw = RawConfig::default();
    raw.presubmits.insert("o/r".to_string(), jobs);
    raw.branch_protection = branch_protection;
    raw.keeper.context_options = ContextPolicyOptions::default();
    raw.keeper.context_options.policy.from_branch_protection = Some(from_branch_protection);
    raw.keeper.context_options.policy.skip_unknown_contexts = Some(skip_unknown_contexts);
    raw.compile(1).unwrap()
}

/// Convert string slices to owned strings
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Build a context set
pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(ToString::to_string).collect()
}

/// A temporary directory holding a `keeper.toml`
pub struct TempConfig {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// Path of the written config file
    pub path: PathBuf,
}

impl TempConfig {
    /// Write `content` to `keeper.toml` in a fresh temp dir
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keeper.toml");
        fs::write(&path, content).unwrap();
        Self { dir, path }
    }

    /// Write an extra file next to the config
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

/// TOML equivalent of the reference scenarios with branch protection
pub const SCENARIO_TOML: &str = r#"
[[presubmits."o/r"]]
context = "always-run"
always_run = true

[[presubmits."o/r"]]
context = "run-if-changed"
run_if_changed = "foo"

[[presubmits."o/r"]]
context = "not-always"

[[presubmits."o/r"]]
context = "skip-report"
always_run = true
skip_report = true
skip_branches = ["master"]

[[presubmits."o/r"]]
context = "optional"
always_run = true
optional = true

[branch_protection.orgs.o.repos.r.required_status_checks]
contexts = ["always-run", "run-if-changed", "non-lighthouse-job"]

[keeper.context_options]
from_branch_protection = true
skip_unknown_contexts = false
"#;
