//! Policy document acquisition with cache fallback.
//!
//! Each public operation checks its collaborators synchronously and only then
//! hands back the future that performs I/O, so wiring mistakes surface before
//! any request is made:
//!
//! ```ignore
//! let document = source.resolve()?.await?;
//! ```

use std::future::Future;

use tracing::{debug, info, warn};

use crate::cache_store::CacheStore;
use crate::collaborators::Collaborators;
use crate::errors::{GateError, GateResult};
use crate::policy::PolicyDocument;
use crate::transport::Transport;

/// Key under which the last fetched document is cached.
pub const CACHE_KEY: &str = "com.nextfaze.ionic-manup.manup";

#[derive(Debug, Clone)]
pub struct MetadataSource {
    policy_url: String,
    collaborators: Collaborators,
}

impl MetadataSource {
    pub fn new(policy_url: impl Into<String>, collaborators: Collaborators) -> Self {
        Self {
            policy_url: policy_url.into(),
            collaborators,
        }
    }

    pub fn policy_url(&self) -> &str {
        &self.policy_url
    }

    /// Fetch the document, caching it on success and falling back to the
    /// cached copy when the fetch fails.
    ///
    /// Requires a transport. The cache store is optional; without one a fetch
    /// failure is final.
    pub fn resolve(
        &self,
    ) -> GateResult<impl Future<Output = GateResult<PolicyDocument>> + Send + '_> {
        let transport = self.collaborators.require_transport("resolve")?;
        let cache = self.collaborators.cache.as_deref();

        Ok(async move {
            let fetch_err = match fetch(transport.as_ref(), &self.policy_url).await {
                Ok(document) => {
                    if let Some(cache) = cache {
                        // A failed write only costs us the next fallback
                        if let Err(e) = write_cache(cache, &document).await {
                            warn!(error = %e, "failed to cache policy document");
                        }
                    }
                    return Ok(document);
                }
                Err(e) if e.is_fallback_trigger() => e,
                Err(e) => return Err(e),
            };

            let Some(cache) = cache else {
                warn!(
                    url = %self.policy_url,
                    error = %fetch_err,
                    "policy fetch failed, no cache configured"
                );
                return Err(fetch_err);
            };

            warn!(
                url = %self.policy_url,
                error = %fetch_err,
                "policy fetch failed, falling back to cache"
            );
            match read_from(cache).await {
                Ok(document) => {
                    info!(platforms = document.len(), "serving cached policy document");
                    Ok(document)
                }
                Err(cache_err @ GateError::Malformed { .. }) => Err(cache_err),
                Err(cache_err) => {
                    warn!(error = %cache_err, "cache fallback unavailable");
                    Err(fetch_err)
                }
            }
        })
    }

    /// Read the cached document. Requires a cache store.
    pub fn read_cache(
        &self,
    ) -> GateResult<impl Future<Output = GateResult<PolicyDocument>> + Send + '_> {
        let cache = self.collaborators.require_cache("read_cache")?;
        Ok(async move { read_from(cache.as_ref()).await })
    }

    /// Write `document` to the cache. Requires a cache store.
    pub fn persist<'a>(
        &'a self,
        document: &'a PolicyDocument,
    ) -> GateResult<impl Future<Output = GateResult<()>> + Send + 'a> {
        let cache = self.collaborators.require_cache("persist")?;
        Ok(async move { write_cache(cache.as_ref(), document).await })
    }
}

async fn fetch(transport: &dyn Transport, url: &str) -> GateResult<PolicyDocument> {
    let payload = transport.get(url).await?;
    let document = PolicyDocument::from_value(payload)?;
    debug!(url, platforms = document.len(), "fetched policy document");
    Ok(document)
}

async fn read_from(cache: &dyn CacheStore) -> GateResult<PolicyDocument> {
    let raw = cache.get(CACHE_KEY).await?;
    PolicyDocument::from_json(&raw)
}

async fn write_cache(cache: &dyn CacheStore, document: &PolicyDocument) -> GateResult<()> {
    let raw = document.to_json()?;
    cache.set(CACHE_KEY, &raw).await
}
