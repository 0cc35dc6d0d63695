//! Core types for merge-keeper

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a job's context counts towards merge eligibility on one branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobClass {
    /// Must be reported and successful
    Required,
    /// Must be successful if reported; absence is fine
    RequiredIfPresent,
    /// Never blocks merge
    Optional,
    /// Contributes nothing (skipped branch or unreported job)
    Excluded,
}

impl std::fmt::Display for JobClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::RequiredIfPresent => write!(f, "required-if-present"),
            Self::Optional => write!(f, "optional"),
            Self::Excluded => write!(f, "excluded"),
        }
    }
}

/// The status-check rules governing merge for one org/repo/branch
///
/// Built fresh for every query and never mutated afterwards. The three
/// context sets are pairwise disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPolicy {
    /// Contexts that must be present and successful
    pub required_contexts: BTreeSet<String>,
    /// Contexts that must be successful when present
    pub required_if_present_contexts: BTreeSet<String>,
    /// Contexts that never block merge
    pub optional_contexts: BTreeSet<String>,
    /// Ignore reported contexts that appear in none of the sets
    pub skip_unknown_contexts: bool,
}

impl ContextPolicy {
    /// Which set, if any, `context` belongs to.
    ///
    /// Returns `None` for contexts unknown to the policy.
    pub fn class_of(&self, context: &str) -> Option<JobClass> {
        if self.required_contexts.contains(context) {
            Some(JobClass::Required)
        } else if self.required_if_present_contexts.contains(context) {
            Some(JobClass::RequiredIfPresent)
        } else if self.optional_contexts.contains(context) {
            Some(JobClass::Optional)
        } else {
            None
        }
    }

    /// Whether `context` appears in any of the three sets
    pub fn is_known(&self, context: &str) -> bool {
        self.class_of(context).is_some()
    }
}

/// Outcome of one status check reported on a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// Finished and green
    Success,
    /// Still running or queued
    Pending,
    /// Finished and red
    Failure,
    /// Could not run
    Error,
}

impl std::fmt::Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Pending => write!(f, "pending"),
            Self::Failure => write!(f, "failure"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A status check as reported on a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedStatus {
    /// Status context name
    pub context: String,
    /// Reported outcome
    pub state: StatusState,
}

impl ReportedStatus {
    /// Create a reported status
    pub fn new(context: impl Into<String>, state: StatusState) -> Self {
        Self {
            context: context.into(),
            state,
        }
    }
}

/// Result of comparing reported statuses against a [`ContextPolicy`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVerdict {
    /// Required contexts that were not reported
    pub missing: Vec<String>,
    /// Blocking contexts that reported failure or error
    pub failing: Vec<String>,
    /// Blocking contexts that have not finished yet
    pub pending: Vec<String>,
    /// Reported contexts that can never block (optional or skipped unknown)
    pub ignored: Vec<String>,
}

impl StatusVerdict {
    /// Check if anything prevents the merge.
    pub fn is_blocked(&self) -> bool {
        !self.missing.is_empty() || !self.failing.is_empty() || !self.pending.is_empty()
    }

    /// Human-readable reasons why the pull request cannot merge yet
    pub fn blocking_reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        reasons.extend(self.missing.iter().map(|c| format!("{c}: missing")));
        reasons.extend(self.failing.iter().map(|c| format!("{c}: failing")));
        reasons.extend(self.pending.iter().map(|c| format!("{c}: pending")));
        reasons
    }
}
