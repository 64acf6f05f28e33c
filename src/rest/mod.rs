//! Indodax REST API client.
//!
//! This module provides:
//! - [`IndodaxRestClient`] - the HTTP client for public and private endpoints
//! - [`Payload`] - insertion-ordered payloads for the private API
//! - [`PublicApi`] - the market-data trait used for decoration and mocking
//! - [`CachedPublicApi`] - a TTL response cache over any [`PublicApi`]

pub mod cached;
pub mod client;
pub mod endpoints;
pub mod payload;
pub mod private;
pub mod public;
pub mod traits;

pub use cached::CachedPublicApi;
pub use client::{DEFAULT_NONCE_RETRY_BUDGET, IndodaxRestClient, IndodaxRestClientBuilder};
pub use payload::Payload;
pub use traits::PublicApi;
