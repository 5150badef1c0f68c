// Logging setup for hosts and the CLI
// The library itself only emits `tracing` events; installing a subscriber is the host's call.

use std::str::FromStr;

use tracing::Level;

/// Parse a level name, falling back to `INFO` for anything unrecognised.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Install a stderr `fmt` subscriber at `level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
