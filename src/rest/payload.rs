//! Ordered request payloads for the private API.
//!
//! The canonical form Indodax signs is the `key=value` pairs of the payload
//! joined by `&` in field-insertion order, with values inserted verbatim -
//! no URL encoding. The same bytes are sent as the POST body, so field
//! order is part of the signed contract and [`Payload`] preserves it
//! exactly as fields were added. The `nonce` field is reserved: the request
//! cycle appends it after all caller fields so that every implementation
//! signs the same string.

use crate::error::IndodaxError;

/// Field name appended by the request cycle; callers must not supply it.
const NONCE_FIELD: &str = "nonce";

/// Field name selecting the remote operation; every payload must carry it.
const METHOD_FIELD: &str = "method";

/// An insertion-ordered `method` + parameters mapping for a private call.
///
/// # Example
///
/// ```rust
/// use indodax_api_client::rest::Payload;
///
/// let payload = Payload::new("trade")
///     .field("pair", "btc_idr")
///     .field("type", "buy")
///     .field("price", 390_000_000u64)
///     .field("idr", 100_000u64);
///
/// assert_eq!(
///     payload.form_with_nonce(43),
///     "method=trade&pair=btc_idr&type=buy&price=390000000&idr=100000&nonce=43"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    /// Create a payload for the given remote method.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            fields: vec![(METHOD_FIELD.to_string(), method.into())],
        }
    }

    /// Build a payload from raw name/value pairs, preserving their order.
    ///
    /// Unlike [`Payload::new`] this does not add a `method` field; the
    /// pairs must already contain one or validation will reject the
    /// payload before it is signed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        }
    }

    /// Append a field, keeping insertion order. Values are rendered with
    /// `ToString` and inserted verbatim into the canonical form.
    pub fn field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((name.into(), value.to_string()));
        self
    }

    /// Append a field only when the value is present.
    pub fn optional_field(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Check the payload is signable: non-empty, carries a `method`
    /// field, and does not try to smuggle in the reserved `nonce` field.
    ///
    /// Runs before any lock, crypto or network work so a bad payload
    /// fails fast without side effects.
    pub fn ensure_valid(&self) -> Result<(), IndodaxError> {
        if self.fields.is_empty() {
            return Err(IndodaxError::InvalidPayload(
                "payload must contain at least a method field".to_string(),
            ));
        }
        if !self.fields.iter().any(|(name, _)| name == METHOD_FIELD) {
            return Err(IndodaxError::InvalidPayload(
                "payload is missing the method field".to_string(),
            ));
        }
        if self.fields.iter().any(|(name, _)| name == NONCE_FIELD) {
            return Err(IndodaxError::InvalidPayload(
                "nonce is managed by the client and must not be supplied".to_string(),
            ));
        }
        if self.fields.iter().any(|(name, _)| name.is_empty()) {
            return Err(IndodaxError::InvalidPayload(
                "field names must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the canonical form with `nonce` appended after all other
    /// fields. This exact string is both signed and sent as the body.
    pub fn form_with_nonce(&self, nonce: u64) -> String {
        let mut form = String::new();
        for (name, value) in &self.fields {
            if !form.is_empty() {
                form.push('&');
            }
            form.push_str(name);
            form.push('=');
            form.push_str(value);
        }
        if !form.is_empty() {
            form.push('&');
        }
        form.push_str(NONCE_FIELD);
        form.push('=');
        form.push_str(&nonce.to_string());
        form
    }
}
