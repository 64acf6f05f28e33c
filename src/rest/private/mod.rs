//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Every method builds an ordered payload and forwards it through the
//! nonce-authenticated request cycle in
//! [`IndodaxRestClient::private_request`].

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::IndodaxError;
use crate::rest::IndodaxRestClient;
use crate::rest::endpoints::methods;
use crate::rest::payload::Payload;

impl IndodaxRestClient {
    /// Get balances, deposit addresses and account metadata.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use indodax_api_client::auth::StaticCredentials;
    /// use indodax_api_client::rest::IndodaxRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = IndodaxRestClient::builder()
    ///         .credentials(Arc::new(StaticCredentials::new("key", "secret")))
    ///         .build();
    ///
    ///     let info = client.get_info().await?;
    ///     for (currency, amount) in &info.balance {
    ///         println!("{currency}: {amount}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_info(&self) -> Result<AccountInfo, IndodaxError> {
        self.private_request(&Payload::new(methods::GET_INFO)).await
    }

    /// Get deposit and withdrawal history across all currencies.
    pub async fn trans_history(&self) -> Result<TransRecords, IndodaxError> {
        let envelope: TransHistoryEnvelope = self
            .private_request(&Payload::new(methods::TRANS_HISTORY))
            .await?;
        Ok(envelope.trans)
    }

    /// Place an order.
    pub async fn trade(&self, request: &TradeRequest) -> Result<TradeReceipt, IndodaxError> {
        self.private_request(&request.to_payload()).await
    }

    /// Get executed trades for a pair.
    pub async fn trade_history(
        &self,
        request: &TradeHistoryRequest,
    ) -> Result<Vec<PrivateTrade>, IndodaxError> {
        let envelope: TradeHistoryEnvelope = self.private_request(&request.to_payload()).await?;
        Ok(envelope.trades)
    }

    /// Get orders resting on the book for one pair.
    pub async fn open_orders(&self, pair: &str) -> Result<Vec<OpenOrder>, IndodaxError> {
        let payload = Payload::new(methods::OPEN_ORDERS).field("pair", pair);
        let envelope: OpenOrdersEnvelope = self.private_request(&payload).await?;
        Ok(envelope.orders)
    }

    /// Get all resting orders, grouped by pair.
    pub async fn open_orders_all(
        &self,
    ) -> Result<HashMap<String, Vec<OpenOrder>>, IndodaxError> {
        let envelope: OpenOrdersByPairEnvelope = self
            .private_request(&Payload::new(methods::OPEN_ORDERS))
            .await?;
        Ok(envelope.orders)
    }

    /// Get finished (filled or cancelled) orders for a pair.
    pub async fn order_history(
        &self,
        request: &OrderHistoryRequest,
    ) -> Result<Vec<OrderInfo>, IndodaxError> {
        let envelope: OrderHistoryEnvelope = self.private_request(&request.to_payload()).await?;
        Ok(envelope.orders)
    }

    /// Get a single order by id.
    pub async fn get_order(&self, request: &GetOrderRequest) -> Result<OrderInfo, IndodaxError> {
        let envelope: SingleOrderEnvelope = self.private_request(&request.to_payload()).await?;
        Ok(envelope.order)
    }

    /// Cancel a resting order.
    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<CancelReceipt, IndodaxError> {
        self.private_request(&request.to_payload()).await
    }
}
