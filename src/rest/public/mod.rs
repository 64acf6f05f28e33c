//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::IndodaxError;
use crate::rest::IndodaxRestClient;
use crate::rest::endpoints::public;

impl IndodaxRestClient {
    /// Get the ticker for a pair.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use indodax_api_client::rest::IndodaxRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = IndodaxRestClient::new();
    ///     let ticker = client.ticker("btc_idr").await?;
    ///     println!("last: {} bid: {} ask: {}", ticker.last, ticker.buy, ticker.sell);
    ///     Ok(())
    /// }
    /// ```
    pub async fn ticker(&self, pair: &str) -> Result<Ticker, IndodaxError> {
        let value = self.public_request(pair, public::TICKER).await?;
        types::ticker_from_value(value)
    }

    /// Get recent public trades for a pair, newest first.
    pub async fn trades(&self, pair: &str) -> Result<Vec<PublicTrade>, IndodaxError> {
        let value = self.public_request(pair, public::TRADES).await?;
        types::trades_from_value(value)
    }

    /// Get the aggregated order book for a pair.
    pub async fn depth(&self, pair: &str) -> Result<Depth, IndodaxError> {
        let value = self.public_request(pair, public::DEPTH).await?;
        types::depth_from_value(value)
    }
}
