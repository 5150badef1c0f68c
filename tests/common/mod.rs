// Shared test collaborators: scripted transports and a cache that records its calls.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use update_gate::cache_store::{CacheStore, MemoryCacheStore};
use update_gate::transport::Transport;
use update_gate::{GateError, GateResult};

pub const POLICY_URL: &str = "https://test.example.com/policy.json";

pub fn http_policy() -> Value {
    json!({
        "ios": {
            "minimum": "1.0.0",
            "latest": "2.4.5",
            "enabled": true,
            "url": "http://http.example.com"
        }
    })
}

pub fn storage_policy() -> Value {
    json!({
        "ios": {
            "minimum": "1.0.0",
            "latest": "2.4.5",
            "enabled": true,
            "url": "http://storage.example.com"
        }
    })
}

/// Transport that answers every request with a fixed result.
pub struct ScriptedTransport {
    response: Result<Value, String>,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl ScriptedTransport {
    pub fn ok(body: Value) -> Self {
        Self {
            response: Ok(body),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> GateResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(message) => Err(GateError::transport(format!("GET {url}"), message.clone())),
        }
    }
}

/// In-memory cache that counts calls and remembers what was written.
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryCacheStore,
    gets: AtomicUsize,
    sets: Mutex<Vec<(String, String)>>,
    fail_sets: bool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose writes always fail with a storage error.
    pub fn read_only() -> Self {
        Self {
            fail_sets: true,
            ..Self::default()
        }
    }

    pub async fn seeded(key: &str, value: &str) -> Self {
        let cache = Self::new();
        cache.inner.set(key, value).await.unwrap();
        cache
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> Vec<(String, String)> {
        self.sets.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn get(&self, key: &str) -> GateResult<String> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> GateResult<()> {
        self.sets
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        if self.fail_sets {
            return Err(GateError::storage("set", "disk full"));
        }
        self.inner.set(key, value).await
    }
}
