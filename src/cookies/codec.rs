//! Consent cookie codec.
//!
//! Two pure functions translate between a [`ConsentRecord`] and its cookie
//! representation, independently of any cookie store: [`encode`] builds the
//! full assignment string, [`decode`] finds and parses the record in a raw
//! cookie header. `decode(header_of(encode(r))) == Some(r)` for every
//! record.

use time::format_description::well_known::Rfc2822;
use time::{Duration, OffsetDateTime};

use crate::errors::ConsentError;
use crate::record::ConsentRecord;

/// Builds the cookie assignment string persisting `record`.
///
/// The value is the record's JSON; attributes are an `expires` date
/// `expiry_days` from `now`, root path, and `SameSite=Lax`.
pub fn encode(
    record: &ConsentRecord,
    cookie_name: &str,
    expiry_days: i64,
    now: OffsetDateTime,
) -> Result<String, ConsentError> {
    let value = serde_json::to_string(record)?;
    let expires = (now + Duration::days(expiry_days)).format(&Rfc2822)?;

    Ok(format!(
        "{cookie_name}={value}; expires={expires}; path=/; SameSite=Lax"
    ))
}

/// Finds and decodes the consent record in a raw cookie header.
///
/// The header is split on `;`, each entry trimmed and matched by name.
/// An absent entry, an empty value or malformed JSON all yield `None`;
/// this function never fails.
pub fn decode(header: &str, cookie_name: &str) -> Option<ConsentRecord> {
    for cookie in header.split(';') {
        let Some((name, value)) = cookie.trim().split_once('=') else {
            continue;
        };

        if name == cookie_name && !value.is_empty() {
            return match serde_json::from_str(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::debug!("Discarding malformed consent cookie: {e}");
                    None
                }
            };
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn round_trip_preserves_the_record() {
        let record = ConsentRecord::with_analytics(true, now());
        let cookie = encode(&record, "cookie-consent", 365, now()).unwrap();

        assert_eq!(decode(&cookie, "cookie-consent"), Some(record));
    }

    #[test]
    fn round_trip_preserves_a_declined_record() {
        let record = ConsentRecord::decline_all(now());
        let cookie = encode(&record, "cookie-consent", 365, now()).unwrap();

        let loaded = decode(&cookie, "cookie-consent").unwrap();
        assert!(!loaded.analytics);
        assert!(loaded.necessary);
        assert_eq!(loaded.timestamp_ms, record.timestamp_ms);
    }

    #[test]
    fn encode_sets_the_required_attributes() {
        let record = ConsentRecord::accept_all(now());
        let cookie = encode(&record, "cookie-consent", 365, now()).unwrap();

        assert!(cookie.starts_with("cookie-consent={"));
        assert!(cookie.contains("; expires="));
        assert!(cookie.contains("; path=/"));
        assert!(cookie.ends_with("; SameSite=Lax"));
    }

    #[test]
    fn decode_finds_the_record_among_other_cookies() {
        let record = ConsentRecord::accept_all(now());
        let value = serde_json::to_string(&record).unwrap();
        let header = format!("session=abc; cookie-consent={value}; _ga=GA1.1");

        assert_eq!(decode(&header, "cookie-consent"), Some(record));
    }

    #[test]
    fn decode_of_absent_cookie_is_none() {
        assert_eq!(decode("session=abc; _ga=GA1.1", "cookie-consent"), None);
        assert_eq!(decode("", "cookie-consent"), None);
    }

    #[test]
    fn decode_of_malformed_json_is_none() {
        assert_eq!(decode("cookie-consent={not json", "cookie-consent"), None);
        assert_eq!(decode("cookie-consent=", "cookie-consent"), None);
        assert_eq!(decode("cookie-consent={}", "cookie-consent"), None);
    }

    #[test]
    fn decode_does_not_match_name_prefixes() {
        let record = ConsentRecord::accept_all(now());
        let value = serde_json::to_string(&record).unwrap();
        let header = format!("cookie-consent-v2={value}");

        assert_eq!(decode(&header, "cookie-consent"), None);
    }
}
