use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{GateError, GateResult};

/// Key/value store holding the last-known-good policy document.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value under `key`. Fails with [`GateError::NotFound`] when absent.
    async fn get(&self, key: &str) -> GateResult<String>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> GateResult<()>;
}

/// Process-local cache store. Contents do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> GateResult<String> {
        self.entries
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| GateError::not_found(key))
    }

    async fn set(&self, key: &str, value: &str) -> GateResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
