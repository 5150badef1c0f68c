//! Verdict evaluation over a platform's policy record.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::collaborators::Collaborators;
use crate::errors::{GateError, GateResult};
use crate::platform::{active_platform, PlatformIdentity, KNOWN_PLATFORMS};
use crate::policy::{PolicyDocument, PolicyRecord};
use crate::verdict::Verdict;
use crate::version::SemVer;

/// Projects a document to the active platform and classifies the running version.
#[derive(Debug, Clone)]
pub struct VersionGate {
    collaborators: Collaborators,
}

impl VersionGate {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Select the record for the platform the configured identity reports.
    pub fn select_platform_record(&self, document: &PolicyDocument) -> GateResult<PolicyRecord> {
        let platform = self
            .collaborators
            .require_platform("select_platform_record")?;
        select_platform_record(document, platform.as_ref())
    }

    /// Classify `current_version` against `record`.
    ///
    /// Rules apply in order: disabled, below minimum, below latest, current.
    pub fn evaluate(record: &PolicyRecord, current_version: &str) -> GateResult<Verdict> {
        if !record.enabled {
            return Ok(Verdict::Maintenance);
        }

        let current: SemVer = current_version.parse()?;
        let minimum: SemVer = record.minimum.parse()?;
        let latest: SemVer = record.latest.parse()?;
        if minimum > latest {
            warn!(%minimum, %latest, "policy record has minimum above latest");
        }

        if current < minimum {
            return Ok(Verdict::Mandatory);
        }
        Ok(match current.cmp(&latest) {
            Ordering::Less => Verdict::Optional,
            Ordering::Equal | Ordering::Greater => Verdict::Nop,
        })
    }
}

/// Select the record keyed by the single known identifier `identity` affirms.
///
/// Known identifiers are tried in [`KNOWN_PLATFORMS`] order.
pub fn select_platform_record(
    document: &PolicyDocument,
    identity: &dyn PlatformIdentity,
) -> GateResult<PolicyRecord> {
    let platform = active_platform(identity).ok_or_else(|| {
        GateError::unsupported_platform(format!(
            "host matches none of {}",
            KNOWN_PLATFORMS.join(", ")
        ))
    })?;

    let record = document
        .record(platform)?
        .ok_or_else(|| GateError::unsupported_platform(format!("{platform} (no policy record)")))?;
    debug!(platform, "selected policy record");
    Ok(record)
}
