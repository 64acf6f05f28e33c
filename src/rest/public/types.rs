//! Types for public market-data endpoints.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::IndodaxError;
use crate::types::OrderSide;
use crate::types::serde_helpers::stringly_int;

/// Last price and 24h aggregates for a pair.
///
/// Volume fields are keyed per currency on the wire (`vol_btc`, `vol_idr`,
/// ...), so they are collected into [`Ticker::volumes`].
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// 24h high
    pub high: Decimal,
    /// 24h low
    pub low: Decimal,
    /// Last traded price
    pub last: Decimal,
    /// Best bid
    pub buy: Decimal,
    /// Best ask
    pub sell: Decimal,
    /// Server unix time (seconds)
    #[serde(with = "stringly_int")]
    pub server_time: i64,
    /// 24h volumes keyed `vol_{currency}`
    #[serde(flatten)]
    pub volumes: HashMap<String, Decimal>,
}

#[derive(Debug, Deserialize)]
struct TickerEnvelope {
    ticker: Ticker,
}

pub(crate) fn ticker_from_value(value: Value) -> Result<Ticker, IndodaxError> {
    let envelope: TickerEnvelope = serde_json::from_value(value)?;
    Ok(envelope.ticker)
}

/// A single public trade.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicTrade {
    /// Trade unix time (seconds)
    #[serde(with = "stringly_int")]
    pub date: i64,
    /// Execution price
    pub price: Decimal,
    /// Executed amount, in the base currency
    pub amount: Decimal,
    /// Trade id
    pub tid: String,
    /// Taker side
    #[serde(rename = "type")]
    pub side: OrderSide,
}

pub(crate) fn trades_from_value(value: Value) -> Result<Vec<PublicTrade>, IndodaxError> {
    Ok(serde_json::from_value(value)?)
}

/// One aggregated order book level: `(price, amount)`.
///
/// The API emits prices as numbers and amounts as strings; both sides of
/// the tuple accept either.
pub type DepthLevel = (Decimal, Decimal);

/// Aggregated order book for a pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    /// Bid levels, best first
    pub buy: Vec<DepthLevel>,
    /// Ask levels, best first
    pub sell: Vec<DepthLevel>,
}

pub(crate) fn depth_from_value(value: Value) -> Result<Depth, IndodaxError> {
    Ok(serde_json::from_value(value)?)
}
