//! Types for private (`tapi`) endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::rest::endpoints::methods;
use crate::rest::payload::Payload;
use crate::types::serde_helpers::stringly_int;
use crate::types::{OrderSide, OrderStatus};

// ========== Requests ==========

/// Request parameters for placing an order.
///
/// Indodax keys the spend amount by currency: a buy spends the quote
/// currency of the pair (`idr` for `btc_idr`), a sell spends the base
/// currency (`btc`). The constructors derive the right field name from
/// the pair.
#[derive(Debug, Clone)]
pub struct TradeRequest {
    /// Pair to trade, e.g. "btc_idr"
    pub pair: String,
    /// Buy or sell
    pub side: OrderSide,
    /// Limit price, in the quote currency
    pub price: Decimal,
    /// Amount to spend: quote currency for buys, base currency for sells
    pub amount: Decimal,
}

impl TradeRequest {
    /// Create a buy order spending `amount` of the quote currency.
    pub fn buy(pair: impl Into<String>, price: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            side: OrderSide::Buy,
            price,
            amount,
        }
    }

    /// Create a sell order selling `amount` of the base currency.
    pub fn sell(pair: impl Into<String>, price: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            side: OrderSide::Sell,
            price,
            amount,
        }
    }

    /// Wire name of the amount field for this pair and side.
    ///
    /// An unsplittable pair yields an empty name, which payload
    /// validation rejects before anything is signed or sent.
    fn amount_field(&self) -> &str {
        let mut currencies = self.pair.split('_');
        let base = currencies.next().unwrap_or_default();
        let quote = currencies.next().unwrap_or_default();
        match self.side {
            OrderSide::Buy => quote,
            OrderSide::Sell => base,
        }
    }

    pub(crate) fn to_payload(&self) -> Payload {
        Payload::new(methods::TRADE)
            .field("pair", &self.pair)
            .field("type", self.side)
            .field("price", self.price)
            .field(self.amount_field(), self.amount)
    }
}

/// Request parameters for cancelling a resting order.
#[derive(Debug, Clone)]
pub struct CancelOrderRequest {
    /// Pair the order rests on
    pub pair: String,
    /// Order id as returned by [`TradeReceipt::order_id`]
    pub order_id: i64,
    /// Side of the order being cancelled
    pub side: OrderSide,
}

impl CancelOrderRequest {
    /// Create a new cancel request.
    pub fn new(pair: impl Into<String>, order_id: i64, side: OrderSide) -> Self {
        Self {
            pair: pair.into(),
            order_id,
            side,
        }
    }

    pub(crate) fn to_payload(&self) -> Payload {
        Payload::new(methods::CANCEL_ORDER)
            .field("pair", &self.pair)
            .field("order_id", self.order_id)
            .field("type", self.side)
    }
}

/// Request parameters for fetching a single order.
#[derive(Debug, Clone)]
pub struct GetOrderRequest {
    /// Pair the order belongs to
    pub pair: String,
    /// Order id
    pub order_id: i64,
}

impl GetOrderRequest {
    /// Create a new single-order lookup.
    pub fn new(pair: impl Into<String>, order_id: i64) -> Self {
        Self {
            pair: pair.into(),
            order_id,
        }
    }

    pub(crate) fn to_payload(&self) -> Payload {
        Payload::new(methods::GET_ORDER)
            .field("pair", &self.pair)
            .field("order_id", self.order_id)
    }
}

/// Request parameters for finished-order history.
#[derive(Debug, Clone)]
pub struct OrderHistoryRequest {
    /// Pair to list orders for
    pub pair: String,
    /// Maximum number of orders to return
    pub count: Option<u32>,
    /// Offset into the history
    pub from: Option<u32>,
}

impl OrderHistoryRequest {
    /// Create a history request for a pair with default paging.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
            from: None,
        }
    }

    /// Limit the number of returned orders.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Start the listing at an offset.
    pub fn from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    pub(crate) fn to_payload(&self) -> Payload {
        Payload::new(methods::ORDER_HISTORY)
            .field("pair", &self.pair)
            .optional_field("count", self.count)
            .optional_field("from", self.from)
    }
}

/// Request parameters for executed-trade history.
#[derive(Debug, Clone)]
pub struct TradeHistoryRequest {
    /// Pair to list trades for
    pub pair: String,
    /// Maximum number of trades to return
    pub count: Option<u32>,
    /// Lowest trade id to include
    pub from_id: Option<u64>,
    /// Highest trade id to include
    pub end_id: Option<u64>,
    /// Sort order, "asc" or "desc"
    pub order: Option<String>,
    /// Earliest unix time to include
    pub since: Option<i64>,
    /// Latest unix time to include
    pub end: Option<i64>,
}

impl TradeHistoryRequest {
    /// Create a trade-history request for a pair with default filters.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
            from_id: None,
            end_id: None,
            order: None,
            since: None,
            end: None,
        }
    }

    /// Limit the number of returned trades.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Restrict to a trade id range.
    pub fn id_range(mut self, from_id: u64, end_id: u64) -> Self {
        self.from_id = Some(from_id);
        self.end_id = Some(end_id);
        self
    }

    pub(crate) fn to_payload(&self) -> Payload {
        Payload::new(methods::TRADE_HISTORY)
            .field("pair", &self.pair)
            .optional_field("count", self.count)
            .optional_field("from_id", self.from_id)
            .optional_field("end_id", self.end_id)
            .optional_field("order", self.order.as_deref())
            .optional_field("since", self.since)
            .optional_field("end", self.end)
    }
}

// ========== Responses ==========

/// Balances, deposit addresses and account metadata from `getInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Server unix time (seconds)
    #[serde(with = "stringly_int")]
    pub server_time: i64,
    /// Available balance per currency
    #[serde(default)]
    pub balance: HashMap<String, Decimal>,
    /// Balance locked in open orders, per currency
    #[serde(default)]
    pub balance_hold: HashMap<String, Decimal>,
    /// Deposit address per currency, when the account has one
    #[serde(default)]
    pub address: HashMap<String, String>,
    /// Numeric account id
    #[serde(default)]
    pub user_id: Option<String>,
    /// Account holder name
    #[serde(default)]
    pub name: Option<String>,
    /// Account email
    #[serde(default)]
    pub email: Option<String>,
    /// KYC state, e.g. "verified"
    #[serde(default)]
    pub verification_status: Option<String>,
    /// Whether two-factor auth is enabled
    #[serde(default)]
    pub gauth_enable: Option<bool>,
}

/// Receipt for a placed order from `trade`.
///
/// The exchange reports fills and spends in per-currency fields
/// (`receive_btc`, `spend_rp`, `remain_rp`, ...), collected verbatim in
/// [`TradeReceipt::details`].
#[derive(Debug, Clone, Deserialize)]
pub struct TradeReceipt {
    /// Id of the created order (0 when fully filled immediately)
    #[serde(with = "stringly_int")]
    pub order_id: i64,
    /// Balances after the trade, per currency
    #[serde(default)]
    pub balance: HashMap<String, Decimal>,
    /// Per-currency fill/spend/remain amounts
    #[serde(flatten)]
    pub details: HashMap<String, Value>,
}

/// An order resting on the book, from `openOrders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrder {
    /// Order id
    pub order_id: String,
    /// Submission unix time (seconds)
    #[serde(with = "stringly_int")]
    pub submit_time: i64,
    /// Limit price
    pub price: Decimal,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Per-currency order/remain amounts (`order_idr`, `remain_idr`, ...)
    #[serde(flatten)]
    pub amounts: HashMap<String, Value>,
}

/// A finished or looked-up order, from `orderHistory`/`getOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Order id
    pub order_id: String,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Limit price
    pub price: Decimal,
    /// Submission unix time (seconds)
    #[serde(with = "stringly_int")]
    pub submit_time: i64,
    /// Completion unix time (seconds); 0 while still open
    #[serde(default, with = "stringly_int")]
    pub finish_time: i64,
    /// Lifecycle state
    pub status: OrderStatus,
    /// Per-currency order/remain amounts
    #[serde(flatten)]
    pub amounts: HashMap<String, Value>,
}

/// Receipt for a cancelled order from `cancelOrder`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelReceipt {
    /// Id of the cancelled order
    #[serde(with = "stringly_int")]
    pub order_id: i64,
    /// Side of the cancelled order
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Pair the order rested on
    #[serde(default)]
    pub pair: Option<String>,
    /// Balances after the cancel, per currency
    #[serde(default)]
    pub balance: HashMap<String, Decimal>,
}

/// An executed trade from `tradeHistory`.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateTrade {
    /// Trade id
    pub trade_id: String,
    /// Id of the order this execution belongs to
    pub order_id: String,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Execution price
    pub price: Decimal,
    /// Fee charged, in the quote currency
    #[serde(default)]
    pub fee: Option<Decimal>,
    /// Execution unix time (seconds)
    #[serde(with = "stringly_int")]
    pub trade_time: i64,
    /// Per-currency executed amounts
    #[serde(flatten)]
    pub amounts: HashMap<String, Value>,
}

/// Deposit and withdrawal history from `transHistory`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransRecords {
    /// Withdrawals per currency
    #[serde(default)]
    pub withdraw: HashMap<String, Value>,
    /// Deposits per currency
    #[serde(default)]
    pub deposit: HashMap<String, Value>,
}

// Wire envelopes around list/map results.

#[derive(Debug, Deserialize)]
pub(crate) struct OpenOrdersEnvelope {
    pub orders: Vec<OpenOrder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenOrdersByPairEnvelope {
    pub orders: HashMap<String, Vec<OpenOrder>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderHistoryEnvelope {
    pub orders: Vec<OrderInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SingleOrderEnvelope {
    pub order: OrderInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TradeHistoryEnvelope {
    pub trades: Vec<PrivateTrade>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransHistoryEnvelope {
    pub trans: TransRecords,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_request_buy_spends_quote_currency() {
        let request = TradeRequest::buy("btc_idr", Decimal::from(390_000_000u64), Decimal::from(100_000u64));
        assert_eq!(
            request.to_payload().form_with_nonce(43),
            "method=trade&pair=btc_idr&type=buy&price=390000000&idr=100000&nonce=43"
        );
    }

    #[test]
    fn test_trade_request_sell_spends_base_currency() {
        let request = TradeRequest::sell("eth_idr", Decimal::from(30_000_000u64), "0.5".parse().unwrap());
        assert_eq!(
            request.to_payload().form_with_nonce(7),
            "method=trade&pair=eth_idr&type=sell&price=30000000&eth=0.5&nonce=7"
        );
    }

    #[test]
    fn test_trade_request_invalid_pair_fails_validation() {
        let request = TradeRequest::buy("btcidr", Decimal::ONE, Decimal::ONE);
        assert!(request.to_payload().ensure_valid().is_err());
    }

    #[test]
    fn test_cancel_order_payload() {
        let request = CancelOrderRequest::new("btc_idr", 11560, OrderSide::Sell);
        assert_eq!(
            request.to_payload().form_with_nonce(1),
            "method=cancelOrder&pair=btc_idr&order_id=11560&type=sell&nonce=1"
        );
    }

    #[test]
    fn test_account_info_parses_mixed_scalars() {
        let info: AccountInfo = serde_json::from_str(
            r#"{
                "server_time": 1638179999,
                "balance": {"idr": 2000000, "btc": "0.015"},
                "balance_hold": {"idr": "0", "btc": "0"},
                "address": {"btc": "1abc"},
                "user_id": "12345",
                "name": "Trader",
                "email": "trader@example.com",
                "verification_status": "verified",
                "gauth_enable": true
            }"#,
        )
        .unwrap();

        assert_eq!(info.balance["idr"], Decimal::from(2_000_000u64));
        assert_eq!(info.balance["btc"], "0.015".parse().unwrap());
        assert_eq!(info.user_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_order_info_parses_history_entry() {
        let order: OrderInfo = serde_json::from_str(
            r#"{
                "order_id": "94425",
                "type": "sell",
                "price": "118500000",
                "submit_time": "1638179000",
                "finish_time": "1638179999",
                "status": "filled",
                "order_btc": "0.005",
                "remain_btc": "0"
            }"#,
        )
        .unwrap();

        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.submit_time, 1_638_179_000);
        assert!(order.amounts.contains_key("order_btc"));
    }
}
