//! Check command - compare reported statuses against the context policy

use crate::cli::context::{CommandContext, Target};
use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use merge_keeper::config::read_file;
use merge_keeper::error::Result;
use merge_keeper::types::{ReportedStatus, StatusVerdict};
use std::path::Path;
use tracing::debug;

/// Read a JSON array of `{"context": ..., "state": ...}` objects.
pub fn load_statuses(path: &Path) -> Result<Vec<ReportedStatus>> {
    let content = read_file(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run the check command.
///
/// Returns `true` when the pull request is blocked.
pub fn run_check(
    ctx: &CommandContext,
    target: &Target,
    statuses_path: &Path,
    json: bool,
) -> Result<bool> {
    let policy = ctx
        .config
        .context_policy(&target.org, &target.repo, &target.branch)?;
    let statuses = load_statuses(statuses_path)?;
    debug!(count = statuses.len(), "loaded reported statuses");

    let verdict = policy.evaluate(&statuses);
    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_verdict(target, &verdict);
    }
    Ok(verdict.is_blocked())
}

fn print_verdict(target: &Target, verdict: &StatusVerdict) {
    if verdict.is_blocked() {
        println!(
            "{} {} {}",
            cross(),
            target.to_string().accent(),
            "is not ready to merge".error()
        );
        for reason in verdict.blocking_reasons() {
            println!("    - {}", reason.muted());
        }
    } else {
        println!(
            "{} {} {}",
            check(),
            target.to_string().accent(),
            "status checks satisfied".success()
        );
    }
    if !verdict.ignored.is_empty() {
        println!(
            "  {} {}",
            "Ignored:".muted(),
            verdict.ignored.join(", ").muted()
        );
    }
}
