//! # Indodax Client
//!
//! An async Rust client library for the Indodax exchange REST API.
//!
//! ## Features
//!
//! - Public market-data endpoints (ticker, trades, depth)
//! - Private `tapi` endpoints (balances, orders, trade placement)
//! - HMAC-SHA512 request signing over the exact POST body
//! - Persisted, strictly increasing nonce with automatic recovery from
//!   `invalid_nonce` rejections
//! - Optional TTL caching of public responses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use indodax_api_client::rest::IndodaxRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IndodaxRestClient::new();
//!     let ticker = client.ticker("btc_idr").await?;
//!     println!("BTC/IDR last: {}", ticker.last);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cache;
pub mod error;
pub mod rest;
pub mod store;
pub mod types;

// Re-export commonly used types at crate root
pub use error::IndodaxError;
pub use types::common::{OrderSide, OrderStatus};

/// Result type alias using IndodaxError
pub type Result<T> = std::result::Result<T, IndodaxError>;
