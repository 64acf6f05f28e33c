//! HMAC-SHA512 signing for Indodax private API requests.
//!
//! Indodax signs the POST body itself: the canonical `key=value&...` form
//! is fed to HMAC-SHA512 keyed with the raw UTF-8 API secret, and the MAC
//! is sent as lowercase hex in the `Sign` header. The body bytes on the
//! wire must be identical to the signed string.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::IndodaxError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a canonical request form for the Indodax private API.
///
/// # Arguments
///
/// * `form` - The canonical `key=value&...` form, exactly as it will be
///   sent as the POST body
/// * `secret` - The API secret
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA512 of `form`.
///
/// # Example
///
/// ```rust
/// use indodax_api_client::auth::sign_form;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign_form("method=getInfo&nonce=43", "api_secret")?;
/// assert_eq!(signature.len(), 128);
/// # Ok(())
/// # }
/// ```
pub fn sign_form(form: &str, secret: &str) -> Result<String, IndodaxError> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| IndodaxError::InvalidPayload(format!("invalid HMAC key: {e}")))?;
    mac.update(form.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_shape() {
        let signature = sign_form("method=getInfo&nonce=43", "test_secret").unwrap();

        // HMAC-SHA512 produces 64 bytes, hex encoded = 128 chars.
        assert_eq!(signature.len(), 128);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(signature, signature.to_lowercase());
    }

    #[test]
    fn test_signature_deterministic() {
        let sig1 = sign_form("method=getInfo&nonce=43", "my_secret").unwrap();
        let sig2 = sign_form("method=getInfo&nonce=43", "my_secret").unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_value() {
        let sig1 = sign_form("method=getInfo&nonce=43", "my_secret").unwrap();
        let sig2 = sign_form("method=getInfo&nonce=44", "my_secret").unwrap();

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_field_order() {
        // Field order is part of the signed contract.
        let sig1 = sign_form("pair=btc_idr&method=openOrders&nonce=7", "my_secret").unwrap();
        let sig2 = sign_form("method=openOrders&pair=btc_idr&nonce=7", "my_secret").unwrap();

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_secret() {
        let sig1 = sign_form("method=getInfo&nonce=43", "secret_one").unwrap();
        let sig2 = sign_form("method=getInfo&nonce=43", "secret_two").unwrap();

        assert_ne!(sig1, sig2);
    }
}
