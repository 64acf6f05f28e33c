//! Authentication module for the Indodax API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce derivation and recovery from server-reported nonce hints
//! - HMAC-SHA512 signing of the canonical request form

mod credentials;
mod nonce;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use nonce::{next_nonce, nonce_storage_key, parse_server_nonce_hint, unix_millis};
pub use signature::sign_form;
