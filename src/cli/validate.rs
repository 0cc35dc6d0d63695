//! Validate command - load and compile the configuration

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use merge_keeper::error::Result;

/// Run the validate command
pub fn run_validate(ctx: &CommandContext) -> Result<()> {
    let jobs = &ctx.config.jobs;
    println!(
        "{} {} is valid: {} presubmit(s) across {} repositories",
        check(),
        ctx.config_path.display().to_string().emphasis(),
        jobs.job_count().accent(),
        jobs.repo_count().accent()
    );
    Ok(())
}
