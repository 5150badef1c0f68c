//! The set of external collaborators the gate may be wired with.
//!
//! Every field is optional. Operations ask for exactly the collaborators they
//! need through the `require_*` accessors and fail with
//! [`GateError::Configuration`] before doing any I/O when one is missing.

use std::fmt;
use std::sync::Arc;

use crate::app_version::VersionProvider;
use crate::cache_store::CacheStore;
use crate::errors::{GateError, GateResult};
use crate::platform::PlatformIdentity;
use crate::transport::Transport;

#[derive(Clone, Default)]
pub struct Collaborators {
    pub transport: Option<Arc<dyn Transport>>,
    pub cache: Option<Arc<dyn CacheStore>>,
    pub platform: Option<Arc<dyn PlatformIdentity>>,
    pub app_version: Option<Arc<dyn VersionProvider>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformIdentity>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_app_version(mut self, app_version: Arc<dyn VersionProvider>) -> Self {
        self.app_version = Some(app_version);
        self
    }

    pub fn require_transport(&self, operation: &'static str) -> GateResult<&Arc<dyn Transport>> {
        self.transport
            .as_ref()
            .ok_or_else(|| GateError::configuration("network transport", operation))
    }

    pub fn require_cache(&self, operation: &'static str) -> GateResult<&Arc<dyn CacheStore>> {
        self.cache
            .as_ref()
            .ok_or_else(|| GateError::configuration("cache store", operation))
    }

    pub fn require_platform(
        &self,
        operation: &'static str,
    ) -> GateResult<&Arc<dyn PlatformIdentity>> {
        self.platform
            .as_ref()
            .ok_or_else(|| GateError::configuration("platform identity", operation))
    }

    pub fn require_app_version(
        &self,
        operation: &'static str,
    ) -> GateResult<&Arc<dyn VersionProvider>> {
        self.app_version
            .as_ref()
            .ok_or_else(|| GateError::configuration("version provider", operation))
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("transport", &self.transport.is_some())
            .field("cache", &self.cache.is_some())
            .field("platform", &self.platform.is_some())
            .field("app_version", &self.app_version.is_some())
            .finish()
    }
}
