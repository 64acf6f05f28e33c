//! Indodax REST API endpoint constants.

/// Base URL for the Indodax exchange.
pub const INDODAX_BASE_URL: &str = "https://indodax.com";

/// Path of the private (trade) API. All authenticated calls POST here and
/// select their operation with the `method` body field.
pub const TAPI_PATH: &str = "/tapi";

/// Path prefix of the public market-data API. Calls address
/// `{PUBLIC_API_PATH}/{pair}/{path}`.
pub const PUBLIC_API_PATH: &str = "/api";

/// Private method names (sent as the `method` payload field).
pub mod methods {
    /// Get balances, addresses and account metadata.
    pub const GET_INFO: &str = "getInfo";
    /// Get deposit and withdrawal history.
    pub const TRANS_HISTORY: &str = "transHistory";
    /// Place an order.
    pub const TRADE: &str = "trade";
    /// Get executed trade history.
    pub const TRADE_HISTORY: &str = "tradeHistory";
    /// Get orders resting on the book.
    pub const OPEN_ORDERS: &str = "openOrders";
    /// Get finished (filled or cancelled) orders.
    pub const ORDER_HISTORY: &str = "orderHistory";
    /// Get a single order by id.
    pub const GET_ORDER: &str = "getOrder";
    /// Cancel a resting order.
    pub const CANCEL_ORDER: &str = "cancelOrder";
}

/// Public market-data paths (the `{path}` segment after the pair).
pub mod public {
    /// Last price and 24h aggregates.
    pub const TICKER: &str = "ticker";
    /// Recent public trades.
    pub const TRADES: &str = "trades";
    /// Aggregated order book.
    pub const DEPTH: &str = "depth";
}
