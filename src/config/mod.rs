//! Keeper configuration: parse, compile, freeze.
//!
//! [`RawConfig`] is plain deserialized data. [`RawConfig::compile`] turns it
//! into a frozen [`Config`] with every pattern compiled exactly once; only
//! a `Config` can answer context policy queries.

mod agent;
mod storage;

pub use agent::ConfigAgent;
pub use storage::{load_config, parse_config, read_file};

use crate::branchprotection::BranchProtection;
use crate::error::Result;
use crate::job::{JobConfig, PresubmitConfig};
use crate::policy::ContextPolicyOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keeper settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeeperConfig {
    /// Layered context policy options
    pub context_options: ContextPolicyOptions,
}

/// Configuration as read from disk, before any pattern is compiled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Presubmit jobs keyed by `"org/repo"`
    pub presubmits: HashMap<String, Vec<PresubmitConfig>>,
    /// Host-side branch protection tree
    pub branch_protection: BranchProtection,
    /// Keeper settings
    pub keeper: KeeperConfig,
}

impl RawConfig {
    /// Compile all patterns and freeze the configuration.
    ///
    /// `generation` identifies this snapshot for callers that cache results.
    pub fn compile(&self, generation: u64) -> Result<Config> {
        Ok(Config {
            generation,
            loaded_at: Utc::now(),
            jobs: JobConfig::compile(&self.presubmits)?,
            branch_protection: self.branch_protection.clone(),
            context_options: self.keeper.context_options.clone(),
        })
    }
}

/// A frozen, fully compiled configuration snapshot
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot identifier, increases on every reload
    pub generation: u64,
    /// When the snapshot was compiled
    pub loaded_at: DateTime<Utc>,
    /// Compiled presubmit jobs
    pub jobs: JobConfig,
    /// Branch protection tree
    pub branch_protection: BranchProtection,
    /// Keeper context policy options
    pub context_options: ContextPolicyOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: 0,
            loaded_at: Utc::now(),
            jobs: JobConfig::default(),
            branch_protection: BranchProtection::default(),
            context_options: ContextPolicyOptions::default(),
        }
    }
}
