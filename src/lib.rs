//! merge-keeper: status-check context policies for merge-queue automation
//!
//! Given a repository's CI job definitions and an optional branch protection
//! tree, compute which status contexts must pass before a pull request can
//! merge:
//!
//! - required contexts must be reported and successful
//! - required-if-present contexts must be successful when reported
//! - optional contexts never block
//!
//! ```no_run
//! use merge_keeper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("keeper.toml"), 1)?;
//! let policy = config.context_policy("org", "repo", "main")?;
//! println!("{:?}", policy.required_contexts);
//! # Ok::<(), merge_keeper::error::Error>(())
//! ```

pub mod branchprotection;
pub mod config;
pub mod error;
pub mod job;
pub mod policy;
pub mod status;
pub mod types;

pub use config::{Config, ConfigAgent};
pub use error::{Error, Result};
pub use types::{ContextPolicy, JobClass, ReportedStatus, StatusState, StatusVerdict};
