use crate::errors::GateResult;

/// Supplies the running application's own version string.
pub trait VersionProvider: Send + Sync {
    fn current_version(&self) -> GateResult<String>;
}

/// A version fixed at construction, e.g. from configuration or `CARGO_PKG_VERSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVersion(String);

impl StaticVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionProvider for StaticVersion {
    fn current_version(&self) -> GateResult<String> {
        Ok(self.0.clone())
    }
}
