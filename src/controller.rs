//! The consent controller.
//!
//! [`ConsentController`] owns the in-memory consent decision and ties the
//! three host-supplied seams together: the cookie jar (durable copy), the
//! UI surface (banner/modal/toggle presentation) and the tag layer
//! (outbound consent signaling).
//!
//! Control flow on a page load: the host constructs the controller, calls
//! [`init`](ConsentController::init) once, and from then on forwards clicks
//! via [`handle_click`](ConsentController::handle_click). Interactions
//! mutate the decision, persist it, re-apply it to the tag layer and update
//! the presentation flags. Host-facing notifications are queued as
//! [`WidgetEvent`]s and drained with
//! [`take_events`](ConsentController::take_events).
//!
//! Everything runs on the caller's thread; nothing blocks or suspends.
//! Storage and signaling failures are logged and swallowed: the worst case
//! is a decision that is not remembered across loads, which self-heals by
//! showing the banner again.

use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

use crate::config::WidgetConfig;
use crate::cookies::{codec, sweep, CookieJar, CookieJarHandle, InMemoryCookieJar};
use crate::record::{ConsentEvent, ConsentRecord, ConsentSignals};
use crate::tags::{DataLayer, TagLayer, TagLayerHandle};
use crate::ui::{HeadlessUi, Hook, UiFlags, UiHandle, UiSurface};

/// Notifications queued for the hosting page.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Banner became visible (decision pending)
    BannerShown,
    /// Banner was dismissed
    BannerHidden,
    /// Settings modal was opened
    ModalShown,
    /// Settings modal was closed
    ModalHidden,
    /// A new decision was recorded and persisted
    ConsentChanged { record: ConsentRecord },
    /// The host must reload the page (issued by [`ConsentController::reset`])
    ReloadRequested,
}

/// Owns the consent decision and drives the widget.
pub struct ConsentController {
    config: WidgetConfig,
    /// The in-memory decision. `None` means "no decision yet", which is
    /// distinct from a declined decision.
    consent: Option<ConsentRecord>,
    jar: CookieJarHandle,
    ui: UiHandle,
    tags: TagLayerHandle,
    events: Vec<WidgetEvent>,
}

impl ConsentController {
    /// Creates a controller over host-supplied jar, UI surface and tag layer.
    pub fn new(
        config: WidgetConfig,
        jar: CookieJarHandle,
        ui: UiHandle,
        tags: TagLayerHandle,
    ) -> Self {
        Self {
            config,
            consent: None,
            jar,
            ui,
            tags,
            events: Vec::new(),
        }
    }

    /// Creates a controller with the built-in in-memory jar, a headless UI
    /// surface with every hook present, and a recording [`DataLayer`].
    pub fn headless(config: WidgetConfig) -> Self {
        Self::new(
            config,
            Arc::new(RwLock::new(InMemoryCookieJar::new())),
            Arc::new(RwLock::new(HeadlessUi::with_all_hooks())),
            Arc::new(RwLock::new(DataLayer::new())),
        )
    }

    /// The current in-memory decision, if any.
    pub fn consent(&self) -> Option<&ConsentRecord> {
        self.consent.as_ref()
    }

    /// Drains the queued host notifications.
    pub fn take_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    /// One-time page-load initialization.
    ///
    /// Loads the persisted decision. With none, the banner is revealed
    /// (plus overlay and page blur when configured) and the decision stays
    /// pending. With one, it is re-applied to the tag layer immediately:
    /// the tag layer's own state does not survive navigations, so it must
    /// be informed on every load. The banner is never shown in that case.
    ///
    /// Call once per load; a second call re-applies consent once more.
    pub fn init(&mut self) {
        self.load_consent();

        if self.consent.is_none() {
            self.show_banner();
        } else {
            self.apply_consent();
        }
    }

    /// Forwards a click on `hook` to the matching operation.
    ///
    /// The host owns event binding and may wire every control it finds;
    /// hooks without a click action are ignored here.
    pub fn handle_click(&mut self, hook: Hook) {
        match hook {
            Hook::AcceptAll => self.accept_all(),
            Hook::DeclineAll => self.decline_all(),
            Hook::ShowSettings => self.show_modal(),
            Hook::SaveSettings => self.save_settings(),
            Hook::CloseModal => self.hide_modal(),
            Hook::AnalyticsToggle => self.toggle_switch(),
            Hook::Banner | Hook::Modal | Hook::Overlay => {}
        }
    }

    fn show_banner(&mut self) {
        {
            let mut ui = self.ui.write().unwrap();
            ui.insert(Hook::Banner, UiFlags::SHOWN);
            if self.config.overlay {
                ui.insert(Hook::Overlay, UiFlags::SHOWN | UiFlags::BLURRED);
            }
        }
        self.events.push(WidgetEvent::BannerShown);
    }

    fn hide_banner(&mut self) {
        {
            let mut ui = self.ui.write().unwrap();
            ui.remove(Hook::Banner, UiFlags::SHOWN);
            if self.config.overlay {
                ui.remove(Hook::Overlay, UiFlags::SHOWN | UiFlags::BLURRED);
            }
        }
        self.events.push(WidgetEvent::BannerHidden);
    }

    /// Reveals the settings modal.
    ///
    /// When a decision exists, the analytics toggle is synced to it first
    /// so reopening the settings reflects the last saved choice. Without
    /// one, the toggle keeps whatever state the markup gave it.
    pub fn show_modal(&mut self) {
        {
            let mut ui = self.ui.write().unwrap();
            if let Some(consent) = &self.consent {
                if consent.analytics {
                    ui.insert(Hook::AnalyticsToggle, UiFlags::ACTIVE);
                } else {
                    ui.remove(Hook::AnalyticsToggle, UiFlags::ACTIVE);
                }
            }
            ui.insert(Hook::Modal, UiFlags::SHOWN);
        }
        self.events.push(WidgetEvent::ModalShown);
    }

    /// Hides the settings modal.
    pub fn hide_modal(&mut self) {
        self.ui.write().unwrap().remove(Hook::Modal, UiFlags::SHOWN);
        self.events.push(WidgetEvent::ModalHidden);
    }

    /// Accepts every category; persists, applies and hides the banner.
    /// The modal is left untouched.
    pub fn accept_all(&mut self) {
        self.commit(ConsentRecord::accept_all(OffsetDateTime::now_utc()));
        self.hide_banner();
    }

    /// Declines everything but the necessary category; persists, applies,
    /// sweeps previously-set tracking cookies and hides the banner.
    pub fn decline_all(&mut self) {
        self.commit(ConsentRecord::decline_all(OffsetDateTime::now_utc()));
        self.delete_ga_cookies();
        self.hide_banner();
    }

    /// Commits the choice currently shown on the analytics toggle, then
    /// hides both banner and modal. An absent toggle reads as inactive.
    pub fn save_settings(&mut self) {
        let analytics = self
            .ui
            .read()
            .unwrap()
            .contains(Hook::AnalyticsToggle, UiFlags::ACTIVE);

        self.commit(ConsentRecord::with_analytics(
            analytics,
            OffsetDateTime::now_utc(),
        ));

        if !analytics {
            self.delete_ga_cookies();
        }

        self.hide_banner();
        self.hide_modal();
    }

    /// Flips the analytics toggle, unless it is marked disabled.
    ///
    /// Pure presentation: only [`accept_all`](Self::accept_all),
    /// [`decline_all`](Self::decline_all) and
    /// [`save_settings`](Self::save_settings) commit to the record.
    pub fn toggle_switch(&mut self) {
        let mut ui = self.ui.write().unwrap();
        if ui.contains(Hook::AnalyticsToggle, UiFlags::DISABLED) {
            return;
        }
        ui.toggle(Hook::AnalyticsToggle, UiFlags::ACTIVE);
    }

    /// Replaces the record, persists it and applies it.
    fn commit(&mut self, record: ConsentRecord) {
        self.consent = Some(record);
        self.save_consent();
        self.apply_consent();
        self.events.push(WidgetEvent::ConsentChanged { record });
    }

    /// Forwards the current decision to the tag layer: one signal update
    /// and one queue event. No-op without a record.
    pub fn apply_consent(&mut self) {
        let Some(record) = &self.consent else {
            return;
        };

        let mut tags = self.tags.write().unwrap();
        tags.update_consent(&ConsentSignals::from_record(record));
        tags.push_event(ConsentEvent::from_record(record));
    }

    /// Persists the current record as the consent cookie.
    ///
    /// Failures are logged and swallowed: the in-memory decision stays
    /// authoritative for this page view and the banner simply returns on
    /// the next load.
    pub fn save_consent(&mut self) {
        let Some(record) = &self.consent else {
            return;
        };

        let write = match codec::encode(
            record,
            &self.config.cookie_name,
            self.config.expiry_days,
            OffsetDateTime::now_utc(),
        ) {
            Ok(write) => write,
            Err(e) => {
                log::warn!("Could not encode consent cookie: {e}");
                return;
            }
        };

        if let Err(e) = self.jar.write().unwrap().write(&write) {
            log::warn!("Could not store consent cookie: {e}");
        }
    }

    /// Reconstructs the record from the persisted cookie. Any parse
    /// failure or absent cookie leaves the decision pending.
    pub fn load_consent(&mut self) {
        let header = self.jar.read().unwrap().header();
        self.consent = codec::decode(&header, &self.config.cookie_name);
    }

    /// Best-effort removal of GA-family tracking cookies.
    pub fn delete_ga_cookies(&mut self) {
        let mut jar = self.jar.write().unwrap();
        sweep::sweep(&mut *jar, &self.config.page);
    }

    /// External "reset" entry point: expires the consent cookie, drops the
    /// in-memory decision and asks the host to reload the page.
    pub fn reset(&mut self) {
        let write = format!("{}=; Max-Age=0; path=/", self.config.cookie_name);
        if let Err(e) = self.jar.write().unwrap().write(&write) {
            log::warn!("Could not clear consent cookie: {e}");
        }

        self.consent = None;
        self.events.push(WidgetEvent::ReloadRequested);
    }
}
