use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::errors::{GateError, GateResult};

pub const DEFAULT_CONFIG_FILE: &str = "update-gate.toml";
pub const ENV_PREFIX: &str = "UPDATE_GATE_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// Where the policy document is published.
    pub policy_url: String,
    /// Directory of the sled cache.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    /// Set to `false` to run without the cache fallback.
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    /// Platform identifier override; host detection when absent.
    #[serde(default)]
    pub platform: Option<String>,
    /// Running application version; this crate's version when absent.
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("update-gate"))
}

impl GateConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn app_version(&self) -> &str {
        self.app_version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }
}

// policy_url has no default and must come from the file or environment
#[derive(Serialize)]
struct GateConfigDefaults {
    cache_path: Option<PathBuf>,
    cache_enabled: bool,
    request_timeout_secs: u64,
    log_level: String,
}

/// Layered configuration: defaults, then the TOML file, then `UPDATE_GATE_*` variables.
pub fn figment(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    Figment::from(Serialized::defaults(GateConfigDefaults {
        cache_path: default_cache_path(),
        cache_enabled: default_cache_enabled(),
        request_timeout_secs: default_timeout_secs(),
        log_level: default_log_level(),
    }))
    .merge(Toml::file(file))
    .merge(Env::prefixed(ENV_PREFIX))
}

pub fn load_config(path: Option<&Path>) -> GateResult<GateConfig> {
    let config: GateConfig = figment(path).extract()?;

    if config.policy_url.trim().is_empty() {
        return Err(GateError::config("policy_url must be set"));
    }
    if config.request_timeout_secs == 0 {
        return Err(GateError::config("request_timeout_secs must be positive"));
    }

    Ok(config)
}
