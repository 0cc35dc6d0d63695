//! keeper - inspect merge-queue context policies
//!
//! ## Commands
//!
//! - `policy`: show required / required-if-present / optional contexts
//! - `jobs`: show how each presubmit is classified for a branch
//! - `check`: compare a status report against the policy
//! - `validate`: load and compile the configuration

mod cli;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cli::context::{CommandContext, Target};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "keeper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Status-check context policies for merge-queue automation", long_about = None)]
struct Cli {
    /// Path to the keeper configuration file
    #[arg(short, long, global = true, default_value = "keeper.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    /// Organization
    org: String,
    /// Repository
    repo: String,
    /// Base branch of the pull request
    branch: String,
}

impl From<TargetArgs> for Target {
    fn from(args: TargetArgs) -> Self {
        Self {
            org: args.org,
            repo: args.repo,
            branch: args.branch,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the context policy for a branch
    Policy {
        #[command(flatten)]
        target: TargetArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show how each presubmit is classified for a branch
    Jobs {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Check reported statuses against the context policy
    Check {
        #[command(flatten)]
        target: TargetArgs,

        /// JSON file with reported statuses
        #[arg(short, long)]
        statuses: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load and compile the configuration
    Validate,
}

fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(
        args.json_logs,
        if args.verbose { Level::DEBUG } else { Level::WARN },
    );

    let ctx = CommandContext::new(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    match args.command {
        Commands::Policy { target, json } => {
            cli::policy::run_policy(&ctx, &target.into(), json)?;
        }
        Commands::Jobs { target } => {
            cli::policy::run_jobs(&ctx, &target.into())?;
        }
        Commands::Check {
            target,
            statuses,
            json,
        } => {
            let blocked = cli::check::run_check(&ctx, &target.into(), &statuses, json)
                .with_context(|| format!("failed to check {}", statuses.display()))?;
            if blocked {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Validate => cli::validate::run_validate(&ctx)?,
    }

    Ok(ExitCode::SUCCESS)
}
