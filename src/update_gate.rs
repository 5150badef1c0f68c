//! End-to-end check: resolve the policy, select the platform record, evaluate.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::app_version::StaticVersion;
use crate::cache_store_sled::SledCacheStore;
use crate::collaborators::Collaborators;
use crate::config::GateConfig;
use crate::errors::GateResult;
use crate::gate::VersionGate;
use crate::metadata::MetadataSource;
use crate::platform::{FixedPlatform, HostPlatform, PlatformIdentity};
use crate::policy::PolicyRecord;
use crate::transport::HttpTransport;
use crate::verdict::Verdict;

/// What the host needs to present the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutcome {
    pub verdict: Verdict,
    pub record: PolicyRecord,
    pub current_version: String,
}

#[derive(Debug, Clone)]
pub struct UpdateGate {
    metadata: MetadataSource,
    gate: VersionGate,
    collaborators: Collaborators,
}

impl UpdateGate {
    pub fn new(policy_url: impl Into<String>, collaborators: Collaborators) -> Self {
        Self {
            metadata: MetadataSource::new(policy_url, collaborators.clone()),
            gate: VersionGate::new(collaborators.clone()),
            collaborators,
        }
    }

    /// Wire the stock collaborators described by `config`.
    pub fn from_config(config: &GateConfig) -> GateResult<Self> {
        let platform: Arc<dyn PlatformIdentity> = match &config.platform {
            Some(identifier) => Arc::new(FixedPlatform::new(identifier.clone())),
            None => Arc::new(HostPlatform),
        };

        let mut collaborators = Collaborators::new()
            .with_transport(Arc::new(HttpTransport::new(config.request_timeout())?))
            .with_platform(platform)
            .with_app_version(Arc::new(StaticVersion::new(config.app_version())));

        let cache_path = config.cache_path.as_ref().filter(|_| config.cache_enabled);
        if let Some(path) = cache_path {
            // The cache only serves fallback; a locked or unreadable one must not block the network
            match SledCacheStore::open(path) {
                Ok(store) => collaborators = collaborators.with_cache(Arc::new(store)),
                Err(e) => {
                    warn!(error = %e, "policy cache unavailable, continuing without fallback")
                }
            }
        }

        Ok(Self::new(config.policy_url.clone(), collaborators))
    }

    pub fn metadata(&self) -> &MetadataSource {
        &self.metadata
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    /// Run the full check.
    ///
    /// Transport, platform identity and version provider must all be
    /// configured; that is checked before any request is made.
    pub fn validate(
        &self,
    ) -> GateResult<impl Future<Output = GateResult<GateOutcome>> + Send + '_> {
        self.collaborators.require_platform("validate")?;
        let app_version = self.collaborators.require_app_version("validate")?;
        let resolve = self.metadata.resolve()?;

        Ok(async move {
            let document = resolve.await?;
            let record = self.gate.select_platform_record(&document)?;
            let current_version = app_version.current_version()?;
            let verdict = VersionGate::evaluate(&record, &current_version)?;

            info!(
                %verdict,
                current = %current_version,
                minimum = %record.minimum,
                latest = %record.latest,
                "update gate evaluated"
            );

            Ok(GateOutcome {
                verdict,
                record,
                current_version,
            })
        })
    }
}
