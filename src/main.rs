// update-gate CLI
// Loads configuration, runs the requested gate operation, and maps the verdict to an exit code.

use clap::Parser;
use std::process::ExitCode;

use update_gate::cli::{dispatch, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("update-gate: {e:#}");
            ExitCode::FAILURE
        }
    }
}
