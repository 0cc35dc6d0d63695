//! Policy and jobs commands - show how contexts are classified

use crate::cli::context::{CommandContext, Target};
use crate::cli::style::Stylize;
use anstream::println;
use merge_keeper::error::Result;
use merge_keeper::types::{ContextPolicy, JobClass};
use std::collections::BTreeSet;

/// Run the policy command
pub fn run_policy(ctx: &CommandContext, target: &Target, json: bool) -> Result<()> {
    let policy = ctx
        .config
        .context_policy(&target.org, &target.repo, &target.branch)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
    } else {
        print_policy(target, &policy);
    }
    Ok(())
}

fn print_policy(target: &Target, policy: &ContextPolicy) {
    println!(
        "{} {}",
        "Context policy for".emphasis(),
        target.to_string().accent()
    );
    print_set("Required", &policy.required_contexts);
    print_set("Required if present", &policy.required_if_present_contexts);
    print_set("Optional", &policy.optional_contexts);
    println!(
        "  {} {}",
        "Skip unknown contexts:".emphasis(),
        if policy.skip_unknown_contexts { "yes" } else { "no" }
    );
}

fn print_set(label: &str, contexts: &BTreeSet<String>) {
    println!("  {}:", label.emphasis());
    if contexts.is_empty() {
        println!("    {}", "(none)".muted());
    }
    for context in contexts {
        println!("    {context}");
    }
}

/// Run the jobs command: list every presubmit of the repository with its
/// classification for the branch
pub fn run_jobs(ctx: &CommandContext, target: &Target) -> Result<()> {
    let jobs = ctx.config.jobs.presubmits(&target.org, &target.repo);
    if jobs.is_empty() {
        println!(
            "{}",
            format!("No presubmits configured for {}/{}", target.org, target.repo).muted()
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Presubmits for".emphasis(),
        target.to_string().accent()
    );
    for job in jobs {
        let class = job.classify(&target.branch);
        let trigger = match &job.change_matcher {
            _ if job.always_run => "always".to_string(),
            Some(matcher) => format!("changes matching `{}`", matcher.pattern()),
            None => "explicit trigger".to_string(),
        };
        let class_label = match class {
            JobClass::Required => class.to_string().success().to_string(),
            JobClass::Excluded => class.to_string().muted().to_string(),
            _ => class.to_string().accent().to_string(),
        };
        println!(
            "  {} {} {}",
            job.context,
            class_label,
            format!("({trigger})").muted()
        );
    }
    Ok(())
}
