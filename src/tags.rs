//! Tag-management layer seam.
//!
//! The browser original probed the page for a `gtag` function and a
//! `dataLayer` array at every call site. Here the host injects a
//! [`TagLayer`] implementation once and the core never presence-checks:
//! a page without a tag manager supplies [`NullTagLayer`].
//!
//! Both operations are fire-and-forget. They must not block and their
//! outcome never influences whether the consent cookie is persisted.

use std::sync::{Arc, RwLock};

use crate::record::{ConsentEvent, ConsentSignals};

/// A handle to a tag layer trait.
pub type TagLayerHandle = Arc<RwLock<dyn TagLayer + Send + Sync>>;

/// Outbound consent signaling toward the page's tag management.
pub trait TagLayer: Send + Sync {
    /// Propagates granted/denied per named signal, the
    /// `gtag('consent', 'update', {...})` capability.
    fn update_consent(&mut self, signals: &ConsentSignals);

    /// Appends one event to the page's event queue, the
    /// `dataLayer.push({event})` capability.
    fn push_event(&mut self, event: ConsentEvent);
}

/// Tag layer for pages without a tag manager. Every call is a no-op.
#[derive(Debug, Default)]
pub struct NullTagLayer;

impl TagLayer for NullTagLayer {
    fn update_consent(&mut self, _signals: &ConsentSignals) {}
    fn push_event(&mut self, _event: ConsentEvent) {}
}

/// Recording tag layer: an append-only event queue plus the most recent
/// signal update. Doubles as the reference `dataLayer` model and as the
/// assertion point in tests.
#[derive(Debug, Default)]
pub struct DataLayer {
    events: Vec<ConsentEvent>,
    last_signals: Option<ConsentSignals>,
}

impl DataLayer {
    /// Creates an empty data layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The events pushed so far, oldest first.
    pub fn events(&self) -> &[ConsentEvent] {
        &self.events
    }

    /// The most recent consent-signal update, if any.
    pub fn last_signals(&self) -> Option<&ConsentSignals> {
        self.last_signals.as_ref()
    }
}

impl TagLayer for DataLayer {
    fn update_consent(&mut self, signals: &ConsentSignals) {
        self.last_signals = Some(*signals);
    }

    fn push_event(&mut self, event: ConsentEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ConsentRecord, SignalState};
    use time::OffsetDateTime;

    #[test]
    fn data_layer_is_append_only() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let mut layer = DataLayer::new();

        layer.push_event(ConsentEvent::AnalyticsDenied);
        layer.push_event(ConsentEvent::AnalyticsGranted);

        assert_eq!(
            layer.events(),
            &[ConsentEvent::AnalyticsDenied, ConsentEvent::AnalyticsGranted]
        );

        layer.update_consent(&ConsentSignals::from_record(&ConsentRecord::accept_all(now)));
        assert_eq!(
            layer.last_signals().unwrap().analytics_storage,
            SignalState::Granted
        );
    }
}
