//! Semantic version parsing and ordering.
//!
//! Versions are strict `MAJOR.MINOR.PATCH` triples of non-negative decimal
//! integers. Anything else is rejected as malformed rather than coerced.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{GateError, GateResult};

/// A parsed `MAJOR.MINOR.PATCH` version.
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for SemVer {
    type Err = GateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(GateError::malformed(
                "version",
                format!("'{input}' must have exactly three components"),
            ));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = parse_component(input, part)?;
        }

        Ok(SemVer::new(numbers[0], numbers[1], numbers[2]))
    }
}

fn parse_component(input: &str, part: &str) -> GateResult<u64> {
    // u64::from_str accepts a leading '+', which is not a valid component
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GateError::malformed(
            "version",
            format!("'{input}' has non-numeric component '{part}'"),
        ));
    }
    part.parse::<u64>().map_err(|e| {
        GateError::malformed("version", format!("'{input}' component '{part}': {e}"))
    })
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compare two version strings numerically.
///
/// Fails with [`GateError::Malformed`] if either side does not parse.
pub fn compare(a: &str, b: &str) -> GateResult<Ordering> {
    let left: SemVer = a.parse()?;
    let right: SemVer = b.parse()?;
    Ok(left.cmp(&right))
}
