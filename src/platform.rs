//! Platform identity: which policy record applies to this host.

/// Platform identifiers understood by the gate, in lookup priority order.
pub const KNOWN_PLATFORMS: [&str; 3] = ["ios", "android", "windows"];

/// Answers whether the host is running as a given platform.
pub trait PlatformIdentity: Send + Sync {
    fn is(&self, identifier: &str) -> bool;
}

/// Identity derived from the compile target.
///
/// Desktop targets other than Windows match nothing, which surfaces as
/// an unsupported platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformIdentity for HostPlatform {
    fn is(&self, identifier: &str) -> bool {
        std::env::consts::OS == identifier
    }
}

/// Identity pinned to a single identifier, e.g. from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPlatform(String);

impl FixedPlatform {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl PlatformIdentity for FixedPlatform {
    fn is(&self, identifier: &str) -> bool {
        self.0 == identifier
    }
}

/// First known identifier the identity affirms, in priority order.
pub fn active_platform(identity: &dyn PlatformIdentity) -> Option<&'static str> {
    KNOWN_PLATFORMS.iter().copied().find(|id| identity.is(id))
}
