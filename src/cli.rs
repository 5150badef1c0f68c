use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::load_config;
use crate::logging::init_logging;
use crate::update_gate::UpdateGate;
use crate::verdict::Verdict;
use crate::version::compare;

/// Top-level CLI interface for the update gate
#[derive(Parser)]
#[command(
    name = "update-gate",
    version,
    about = "Check a running app version against a published update policy"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the policy and print the verdict for this platform
    Check,

    /// Resolve the policy document (with cache fallback) and print it
    Fetch,

    /// Print the cached policy document
    Cached,

    /// Compare two MAJOR.MINOR.PATCH versions
    Compare { a: String, b: String },
}

/// Process exit code for a verdict; blocking verdicts are non-zero.
pub fn exit_code_for(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Nop | Verdict::Optional => 0,
        Verdict::Mandatory => 2,
        Verdict::Maintenance => 3,
    }
}

fn load_gate(config_path: Option<&Path>) -> anyhow::Result<UpdateGate> {
    let config = load_config(config_path).context("failed to load configuration")?;
    init_logging(&config.log_level);
    UpdateGate::from_config(&config).context("failed to set up update gate")
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check => {
            let gate = load_gate(config_path)?;
            let outcome = gate.validate()?.await?;
            println!("{} (running {})", outcome.verdict, outcome.current_version);
            if outcome.verdict != Verdict::Nop {
                println!("update: {}", outcome.record.url);
            }
            Ok(ExitCode::from(exit_code_for(outcome.verdict)))
        }
        Commands::Fetch => {
            let gate = load_gate(config_path)?;
            let document = gate.metadata().resolve()?.await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Cached => {
            let gate = load_gate(config_path)?;
            let document = gate.metadata().read_cache()?.await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare { a, b } => {
            let symbol = match compare(&a, &b)? {
                Ordering::Less => "<",
                Ordering::Equal => "=",
                Ordering::Greater => ">",
            };
            println!("{a} {symbol} {b}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
