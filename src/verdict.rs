use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a policy record against the running version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The platform is disabled; outranks every version comparison.
    Maintenance,
    /// Running version is below the minimum.
    Mandatory,
    /// Running version is at least the minimum but below the latest.
    Optional,
    /// Running version is current.
    Nop,
}

impl Verdict {
    /// Whether the host must stop the user from continuing.
    pub fn blocks_usage(&self) -> bool {
        matches!(self, Verdict::Maintenance | Verdict::Mandatory)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Maintenance => "MAINTENANCE",
            Verdict::Mandatory => "MANDATORY",
            Verdict::Optional => "OPTIONAL",
            Verdict::Nop => "NOP",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
