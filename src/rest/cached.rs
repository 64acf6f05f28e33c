//! Cached wrapper for the public market-data path.
//!
//! Wraps any [`PublicApi`] implementation with a TTL response cache keyed
//! by `(pair, path)`. Only successful responses are cached; errors always
//! surface and never poison the cache. Expiry is pull-based: entries are
//! checked when read and swept when a fresh response is inserted.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use indodax_api_client::rest::{CachedPublicApi, IndodaxRestClient, PublicApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CachedPublicApi::new(IndodaxRestClient::new(), Duration::from_secs(10));
//!
//!     let first = client.ticker("btc_idr").await?;  // network
//!     let second = client.ticker("btc_idr").await?; // cache, within 10s
//!     assert_eq!(first.server_time, second.server_time);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::cache::TtlCache;
use crate::error::IndodaxError;
use crate::rest::endpoints::public as public_paths;
use crate::rest::public::{self, Depth, PublicTrade, Ticker};
use crate::rest::traits::PublicApi;

/// A caching decorator around any [`PublicApi`] implementation.
pub struct CachedPublicApi<C> {
    inner: C,
    cache: Mutex<TtlCache<(String, String), Value>>,
}

impl<C> CachedPublicApi<C> {
    /// Wrap `inner` with a response cache holding entries for `ttl`.
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::new(ttl)),
        }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwrap the decorator, discarding the cache.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: PublicApi> CachedPublicApi<C> {
    /// Fetch `/api/{pair}/{path}` bypassing the cache, refreshing the
    /// cached entry with the response.
    pub async fn force_refresh(&self, pair: &str, path: &str) -> Result<Value, IndodaxError> {
        self.request(pair, path, true).await
    }

    async fn request(
        &self,
        pair: &str,
        path: &str,
        force_refresh: bool,
    ) -> Result<Value, IndodaxError> {
        let key = (pair.to_string(), path.to_string());

        if !force_refresh {
            let cache = self.cache.lock().await;
            if let Some(hit) = cache.get(&key) {
                tracing::debug!(pair, path, "public response served from cache");
                return Ok(hit.clone());
            }
        }

        let fresh = self.inner.public_request(pair, path).await?;

        let mut cache = self.cache.lock().await;
        cache.cleanup();
        cache.insert(key, fresh.clone());
        Ok(fresh)
    }
}

impl<C: PublicApi> PublicApi for CachedPublicApi<C> {
    async fn public_request(&self, pair: &str, path: &str) -> Result<Value, IndodaxError> {
        self.request(pair, path, false).await
    }

    async fn ticker(&self, pair: &str) -> Result<Ticker, IndodaxError> {
        let value = self.request(pair, public_paths::TICKER, false).await?;
        public::ticker_from_value(value)
    }

    async fn trades(&self, pair: &str) -> Result<Vec<PublicTrade>, IndodaxError> {
        let value = self.request(pair, public_paths::TRADES, false).await?;
        public::trades_from_value(value)
    }

    async fn depth(&self, pair: &str) -> Result<Depth, IndodaxError> {
        let value = self.request(pair, public_paths::DEPTH, false).await?;
        public::depth_from_value(value)
    }
}
