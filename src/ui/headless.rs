//! In-memory UI surface for tests and non-DOM hosts.

use std::collections::HashMap;

use crate::ui::{Hook, UiFlags, UiSurface};

/// A UI surface holding presentation flags in memory.
///
/// Hooks must be registered before they respond; an unregistered hook
/// behaves like an element missing from the page: mutations are dropped
/// and reads come back empty.
#[derive(Debug, Default)]
pub struct HeadlessUi {
    present: HashMap<Hook, UiFlags>,
}

impl HeadlessUi {
    /// Creates a surface with no hooks present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface with every hook present.
    pub fn with_all_hooks() -> Self {
        let mut ui = Self::new();
        for hook in Hook::ALL {
            ui.register(hook);
        }
        ui
    }

    /// Registers `hook` as present, with empty flags.
    pub fn register(&mut self, hook: Hook) {
        self.present.entry(hook).or_insert_with(UiFlags::empty);
    }

    /// Whether `hook` is present on this surface.
    pub fn is_present(&self, hook: Hook) -> bool {
        self.present.contains_key(&hook)
    }
}

impl UiSurface for HeadlessUi {
    fn insert(&mut self, hook: Hook, flags: UiFlags) {
        if let Some(current) = self.present.get_mut(&hook) {
            current.insert(flags);
        }
    }

    fn remove(&mut self, hook: Hook, flags: UiFlags) {
        if let Some(current) = self.present.get_mut(&hook) {
            current.remove(flags);
        }
    }

    fn toggle(&mut self, hook: Hook, flags: UiFlags) {
        if let Some(current) = self.present.get_mut(&hook) {
            current.toggle(flags);
        }
    }

    fn flags(&self, hook: Hook) -> UiFlags {
        self.present
            .get(&hook)
            .copied()
            .unwrap_or_else(UiFlags::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_hook_takes_flags() {
        let mut ui = HeadlessUi::new();
        ui.register(Hook::Banner);

        ui.insert(Hook::Banner, UiFlags::SHOWN);
        assert!(ui.contains(Hook::Banner, UiFlags::SHOWN));

        ui.remove(Hook::Banner, UiFlags::SHOWN);
        assert!(ui.flags(Hook::Banner).is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut ui = HeadlessUi::new();
        ui.register(Hook::AnalyticsToggle);

        ui.toggle(Hook::AnalyticsToggle, UiFlags::ACTIVE);
        assert!(ui.contains(Hook::AnalyticsToggle, UiFlags::ACTIVE));

        ui.toggle(Hook::AnalyticsToggle, UiFlags::ACTIVE);
        assert!(!ui.contains(Hook::AnalyticsToggle, UiFlags::ACTIVE));
    }

    #[test]
    fn absent_hook_degrades_silently() {
        let mut ui = HeadlessUi::new();

        ui.insert(Hook::Overlay, UiFlags::SHOWN);
        ui.toggle(Hook::Overlay, UiFlags::SHOWN);

        assert!(!ui.is_present(Hook::Overlay));
        assert!(ui.flags(Hook::Overlay).is_empty());
    }
}
