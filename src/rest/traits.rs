//! Trait definition for the public market-data path.
//!
//! [`PublicApi`] abstracts the unauthenticated request surface so it can be
//! decorated (e.g. by [`crate::rest::CachedPublicApi`]) or mocked in tests
//! without a live client.

use std::future::Future;

use serde_json::Value;

use crate::error::IndodaxError;
use crate::rest::IndodaxRestClient;
use crate::rest::public::{Depth, PublicTrade, Ticker};

/// The unauthenticated market-data operations.
///
/// All methods are async and return `Result<T, IndodaxError>`.
pub trait PublicApi: Send + Sync {
    /// Issue a raw public call to `/api/{pair}/{path}`.
    fn public_request(
        &self,
        pair: &str,
        path: &str,
    ) -> impl Future<Output = Result<Value, IndodaxError>> + Send;

    /// Get the ticker for a pair.
    fn ticker(&self, pair: &str) -> impl Future<Output = Result<Ticker, IndodaxError>> + Send;

    /// Get recent public trades for a pair.
    fn trades(
        &self,
        pair: &str,
    ) -> impl Future<Output = Result<Vec<PublicTrade>, IndodaxError>> + Send;

    /// Get the aggregated order book for a pair.
    fn depth(&self, pair: &str) -> impl Future<Output = Result<Depth, IndodaxError>> + Send;
}

impl PublicApi for IndodaxRestClient {
    async fn public_request(&self, pair: &str, path: &str) -> Result<Value, IndodaxError> {
        IndodaxRestClient::public_request(self, pair, path).await
    }

    async fn ticker(&self, pair: &str) -> Result<Ticker, IndodaxError> {
        IndodaxRestClient::ticker(self, pair).await
    }

    async fn trades(&self, pair: &str) -> Result<Vec<PublicTrade>, IndodaxError> {
        IndodaxRestClient::trades(self, pair).await
    }

    async fn depth(&self, pair: &str) -> Result<Depth, IndodaxError> {
        IndodaxRestClient::depth(self, pair).await
    }
}
