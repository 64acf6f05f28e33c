//! Nonce derivation for Indodax API authentication.
//!
//! Indodax rejects any private request whose nonce is not strictly greater
//! than the last nonce it has seen for the credential pair. The counter is
//! persisted so restarts do not reset it below the server's watermark, and
//! when the server still disagrees its error message carries the expected
//! value, which is parsed out here to resynchronize.

use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key for the persisted nonce counter, scoped per credential.
pub fn nonce_storage_key(api_key: &str) -> String {
    format!("nonce:{api_key}")
}

/// Current unix time in milliseconds.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Derive the nonce candidate for the next private request.
///
/// A persisted counter takes precedence: the candidate is `stored + 1`.
/// Only when persistence is empty (first run, or a wiped store) does the
/// current time in milliseconds serve as a floor that cannot repeat
/// values an earlier process already spent.
pub fn next_nonce(stored: Option<u64>, now_millis: u64) -> u64 {
    match stored {
        Some(last) => last.saturating_add(1),
        None => now_millis.max(1),
    }
}

/// Extract the server-expected nonce from an `invalid_nonce` error message.
///
/// The message is a sentence in which one whitespace-delimited token is the
/// numeric nonce watermark, possibly with a fractional tail to discard
/// (e.g. `"Nonce should be bigger than 1721036201000.000000; you sent 43"`).
/// The message may also echo the nonce the client sent, so of all numeric
/// tokens the largest wins - the watermark is by definition the value every
/// other number in the sentence failed to exceed.
///
/// Returns `None` when no token parses as a number.
pub fn parse_server_nonce_hint(text: &str) -> Option<u64> {
    text.split_whitespace()
        .filter_map(parse_numeric_token)
        .max()
}

/// Parse a single token as an integer, discarding a trailing fractional
/// part and any surrounding punctuation.
fn parse_numeric_token(token: &str) -> Option<u64> {
    let trimmed = token.trim_matches(|c: char| !c.is_ascii_digit() && c != '.');
    let integer_part = trimmed.split('.').next()?;
    if integer_part.is_empty() {
        return None;
    }
    integer_part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_nonce_takes_precedence() {
        // The stored counter wins even over a much larger time floor.
        assert_eq!(next_nonce(Some(42), 1_700_000_000_000), 43);
    }

    #[test]
    fn test_time_floor_when_store_empty() {
        assert_eq!(next_nonce(None, 1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn test_time_floor_never_zero() {
        assert_eq!(next_nonce(None, 0), 1);
    }

    #[test]
    fn test_stored_max_does_not_wrap() {
        assert_eq!(next_nonce(Some(u64::MAX), 0), u64::MAX);
    }

    #[test]
    fn test_hint_with_fractional_tail() {
        let hint =
            parse_server_nonce_hint("Invalid nonce. Nonce should be bigger than 1721036201000.000000");
        assert_eq!(hint, Some(1_721_036_201_000));
    }

    #[test]
    fn test_hint_prefers_largest_token() {
        // The echoed client nonce (43) must not shadow the watermark.
        let hint = parse_server_nonce_hint(
            "You sent nonce 43 but it should be bigger than 1721036201000.123; request rejected",
        );
        assert_eq!(hint, Some(1_721_036_201_000));
    }

    #[test]
    fn test_hint_with_trailing_punctuation() {
        let hint = parse_server_nonce_hint("Nonce should be bigger than 1500.");
        assert_eq!(hint, Some(1500));
    }

    #[test]
    fn test_hint_absent() {
        assert_eq!(parse_server_nonce_hint("Invalid nonce."), None);
        assert_eq!(parse_server_nonce_hint(""), None);
    }

    #[test]
    fn test_storage_key_scoped_per_credential() {
        assert_eq!(nonce_storage_key("ABCD-1234"), "nonce:ABCD-1234");
        assert_ne!(nonce_storage_key("key_a"), nonce_storage_key("key_b"));
    }

    #[test]
    fn test_unix_millis_is_plausible() {
        // 2020-01-01 in milliseconds; anything earlier means a broken clock.
        assert!(unix_millis() > 1_577_836_800_000);
    }
}
