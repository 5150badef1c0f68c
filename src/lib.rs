//! Library root for the `update-gate` crate
//!
//! Resolves a remotely published version policy (with a cached fallback) and
//! decides whether the running application must be blocked, nagged, or left alone.

// Core error handling
pub mod errors;

// Policy model and decision logic
pub mod gate;
pub mod policy;
pub mod verdict;
pub mod version;

// Metadata acquisition
pub mod metadata;

// Collaborators and their stock implementations
pub mod app_version;
pub mod cache_store;
pub mod cache_store_sled;
pub mod collaborators;
pub mod platform;
pub mod transport;

// Orchestration
pub mod update_gate;

// Configuration & CLI
pub mod cli;
pub mod config;

// Logging
pub mod logging;

pub use collaborators::Collaborators;
pub use errors::{GateError, GateResult};
pub use gate::VersionGate;
pub use metadata::{MetadataSource, CACHE_KEY};
pub use policy::{PolicyDocument, PolicyRecord};
pub use update_gate::{GateOutcome, UpdateGate};
pub use verdict::Verdict;
pub use version::{compare, SemVer};
