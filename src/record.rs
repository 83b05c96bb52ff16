//! Consent data model.
//!
//! [`ConsentRecord`] is the persisted decision. It is wire-compatible with
//! the JSON payload of the `cookie-consent` cookie: field names on the wire
//! are `necessary`, `analytics` and `timestamp`.
//!
//! Records are immutable-by-replacement: every state change constructs a
//! brand-new record through one of the constructors, so a half-updated
//! decision can never be observed.
//!
//! [`ConsentSignals`] and [`ConsentEvent`] are the two outbound projections
//! of a record: the per-category granted/denied map sent to the consent
//! API, and the event pushed onto the page's tag-management queue.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use time::OffsetDateTime;

/// The persisted consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Strictly-necessary cookies. Always `true` once a decision exists.
    pub necessary: bool,

    /// Opt-in for analytics/tracking cookies.
    pub analytics: bool,

    /// Epoch milliseconds at which the decision was recorded.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl ConsentRecord {
    /// A decision accepting every category.
    pub fn accept_all(now: OffsetDateTime) -> Self {
        Self::with_analytics(true, now)
    }

    /// A decision declining everything but the necessary category.
    pub fn decline_all(now: OffsetDateTime) -> Self {
        Self::with_analytics(false, now)
    }

    /// A decision with an explicit analytics choice.
    pub fn with_analytics(analytics: bool, now: OffsetDateTime) -> Self {
        Self {
            necessary: true,
            analytics,
            timestamp_ms: epoch_ms(now),
        }
    }
}

pub(crate) fn epoch_ms(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Granted/denied state of a single consent signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Granted,
    Denied,
}

impl SignalState {
    fn from_bool(granted: bool) -> Self {
        if granted {
            SignalState::Granted
        } else {
            SignalState::Denied
        }
    }

    /// The wire spelling used by the consent API (`"granted"` / `"denied"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalState::Granted => "granted",
            SignalState::Denied => "denied",
        }
    }
}

impl Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The named consent signals forwarded to the consent API
/// (`gtag('consent', 'update', ...)`).
///
/// Storage and ad signals follow the analytics choice, the functionality
/// signal follows the necessary category, and the security signal is always
/// granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentSignals {
    pub analytics_storage: SignalState,
    pub ad_storage: SignalState,
    pub functionality_storage: SignalState,
    pub security_storage: SignalState,
}

impl ConsentSignals {
    /// Derives the signal map from a recorded decision.
    pub fn from_record(record: &ConsentRecord) -> Self {
        Self {
            analytics_storage: SignalState::from_bool(record.analytics),
            ad_storage: SignalState::from_bool(record.analytics),
            functionality_storage: SignalState::from_bool(record.necessary),
            security_storage: SignalState::Granted,
        }
    }
}

/// Event pushed onto the tag-management queue when a decision is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentEvent {
    AnalyticsGranted,
    AnalyticsDenied,
}

impl ConsentEvent {
    /// Derives the event from a recorded decision.
    pub fn from_record(record: &ConsentRecord) -> Self {
        if record.analytics {
            ConsentEvent::AnalyticsGranted
        } else {
            ConsentEvent::AnalyticsDenied
        }
    }

    /// The event name as it appears on the queue.
    pub fn name(&self) -> &'static str {
        match self {
            ConsentEvent::AnalyticsGranted => "analytics_consent_granted",
            ConsentEvent::AnalyticsDenied => "analytics_consent_denied",
        }
    }
}

impl Display for ConsentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn constructors_always_set_necessary() {
        assert!(ConsentRecord::accept_all(now()).necessary);
        assert!(ConsentRecord::decline_all(now()).necessary);
        assert!(ConsentRecord::with_analytics(false, now()).necessary);
    }

    #[test]
    fn wire_field_names_match_the_cookie_payload() {
        let record = ConsentRecord::accept_all(now());
        let value = serde_json::to_value(record).unwrap();

        assert_eq!(value["necessary"], true);
        assert_eq!(value["analytics"], true);
        assert_eq!(value["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn timestamp_is_epoch_milliseconds() {
        let record = ConsentRecord::accept_all(now());
        assert_eq!(record.timestamp_ms, 1_700_000_000 * 1000);
    }

    #[test]
    fn signals_for_accepted_analytics() {
        let signals = ConsentSignals::from_record(&ConsentRecord::accept_all(now()));
        assert_eq!(signals.analytics_storage, SignalState::Granted);
        assert_eq!(signals.ad_storage, SignalState::Granted);
        assert_eq!(signals.functionality_storage, SignalState::Granted);
        assert_eq!(signals.security_storage, SignalState::Granted);
    }

    #[test]
    fn signals_for_declined_analytics() {
        let signals = ConsentSignals::from_record(&ConsentRecord::decline_all(now()));
        assert_eq!(signals.analytics_storage, SignalState::Denied);
        assert_eq!(signals.ad_storage, SignalState::Denied);
        // Necessary stays granted, security is unconditional
        assert_eq!(signals.functionality_storage, SignalState::Granted);
        assert_eq!(signals.security_storage, SignalState::Granted);
    }

    #[test]
    fn event_names() {
        let granted = ConsentEvent::from_record(&ConsentRecord::accept_all(now()));
        let denied = ConsentEvent::from_record(&ConsentRecord::decline_all(now()));

        assert_eq!(granted.name(), "analytics_consent_granted");
        assert_eq!(denied.name(), "analytics_consent_denied");
        assert_eq!(denied.to_string(), "analytics_consent_denied");
    }
}
