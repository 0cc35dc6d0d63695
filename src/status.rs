//! Comparing reported pull request statuses against a context policy
//!
//! This is where `skip_unknown_contexts` takes effect: a reported context
//! that the policy does not know about blocks like a required-if-present
//! context unless the policy says to skip unknown contexts.

use crate::types::{ContextPolicy, ReportedStatus, StatusState, StatusVerdict};
use std::collections::{BTreeMap, BTreeSet};

impl ContextPolicy {
    /// Whether a reported `context` can be ignored when deciding merge.
    ///
    /// Optional contexts can always be ignored, required and
    /// required-if-present ones never. Unknown contexts follow
    /// `skip_unknown_contexts`.
    pub fn is_optional(&self, context: &str) -> bool {
        if self.optional_contexts.contains(context) {
            return true;
        }
        if self.required_contexts.contains(context)
            || self.required_if_present_contexts.contains(context)
        {
            return false;
        }
        self.skip_unknown_contexts
    }

    /// Required contexts that do not appear in `reported`, sorted
    pub fn missing_required_contexts<'a, I>(&self, reported: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: BTreeSet<&str> = reported.into_iter().collect();
        self.required_contexts
            .iter()
            .filter(|c| !present.contains(c.as_str()))
            .cloned()
            .collect()
    }

    /// Compare reported statuses against the policy.
    ///
    /// When a context is reported more than once the last report wins.
    pub fn evaluate(&self, reported: &[ReportedStatus]) -> StatusVerdict {
        let latest: BTreeMap<&str, StatusState> = reported
            .iter()
            .map(|s| (s.context.as_str(), s.state))
            .collect();

        let mut verdict = StatusVerdict {
            missing: self.missing_required_contexts(latest.keys().copied()),
            ..StatusVerdict::default()
        };

        for (context, state) in latest {
            if self.is_optional(context) {
                verdict.ignored.push(context.to_string());
                continue;
            }
            match state {
                StatusState::Success => {}
                StatusState::Pending => verdict.pending.push(context.to_string()),
                StatusState::Failure | StatusState::Error => {
                    verdict.failing.push(context.to_string());
                }
            }
        }

        verdict
    }
}
