//! Presentation surface.
//!
//! The widget drives UI state exclusively through flag mutations on named
//! hooks; it never creates or destroys elements. The host maps each
//! [`Hook`] to a DOM element by id and each [`UiFlags`] bit to a
//! presentation class (`lcc-show`, `lcc-active`, `lcc-disabled`) or, for
//! [`UiFlags::BLURRED`] on the overlay, a page-blur effect.
//!
//! Every hook is optional. A [`UiSurface`] implementation must degrade
//! gracefully when a hook is missing from the page: mutations are dropped
//! and reads come back empty, never an error.

pub mod headless;

use bitflags::bitflags;
use std::fmt::{self, Display};
use std::sync::{Arc, RwLock};

pub use headless::HeadlessUi;

/// A handle to a UI surface trait.
///
/// Reference-counted, read/write-locked pointer to a type-erased
/// [`UiSurface`]. Obtain a **read lock** for queries and a **write lock**
/// for mutations.
pub type UiHandle = Arc<RwLock<dyn UiSurface + Send + Sync>>;

/// The controls and containers the widget knows about, by DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Banner container, shown while a decision is pending
    Banner,
    /// Settings modal container
    Modal,
    /// "Accept all" button
    AcceptAll,
    /// "Decline all" button
    DeclineAll,
    /// "Cookie settings" button, opens the modal
    ShowSettings,
    /// "Save settings" button in the modal
    SaveSettings,
    /// Close button in the modal
    CloseModal,
    /// Analytics opt-in toggle switch
    AnalyticsToggle,
    /// Background overlay accompanying the banner
    Overlay,
}

impl Hook {
    /// Every hook, for hosts that register their controls up front.
    pub const ALL: [Hook; 9] = [
        Hook::Banner,
        Hook::Modal,
        Hook::AcceptAll,
        Hook::DeclineAll,
        Hook::ShowSettings,
        Hook::SaveSettings,
        Hook::CloseModal,
        Hook::AnalyticsToggle,
        Hook::Overlay,
    ];

    /// The DOM id the host should bind this hook to.
    pub fn id(&self) -> &'static str {
        match self {
            Hook::Banner => "lcc-cookie-banner",
            Hook::Modal => "lcc-cookie-modal",
            Hook::AcceptAll => "lcc-accept-all",
            Hook::DeclineAll => "lcc-decline-all",
            Hook::ShowSettings => "lcc-show-settings",
            Hook::SaveSettings => "lcc-save-settings",
            Hook::CloseModal => "lcc-close-modal",
            Hook::AnalyticsToggle => "lcc-analytics-toggle",
            Hook::Overlay => "cookie-overlay",
        }
    }
}

impl Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

bitflags! {
    /// Presentation flags carried by a hook.
    pub struct UiFlags: u8 {
        /// Element is visible (`lcc-show`)
        const SHOWN    = 0b0001;
        /// Toggle is switched on (`lcc-active`)
        const ACTIVE   = 0b0010;
        /// Toggle cannot be switched (`lcc-disabled`)
        const DISABLED = 0b0100;
        /// Page content behind the overlay is blurred
        const BLURRED  = 0b1000;
    }
}

/// Best-effort presentation surface over the page's hooks.
pub trait UiSurface: Send + Sync {
    /// Adds `flags` to the hook's presentation state.
    fn insert(&mut self, hook: Hook, flags: UiFlags);

    /// Removes `flags` from the hook's presentation state.
    fn remove(&mut self, hook: Hook, flags: UiFlags);

    /// Flips `flags` on the hook's presentation state.
    fn toggle(&mut self, hook: Hook, flags: UiFlags);

    /// The hook's current presentation state; empty for absent hooks.
    fn flags(&self, hook: Hook) -> UiFlags;

    /// Whether the hook currently carries all of `flags`.
    fn contains(&self, hook: Hook, flags: UiFlags) -> bool {
        self.flags(hook).contains(flags)
    }
}
