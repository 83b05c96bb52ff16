//! Headless walkthrough of the consent widget: first visit, a declined
//! banner, and the follow-up page load that re-applies the stored choice.
//!
//! Run with `RUST_LOG=debug` to see the swallowed-error logging.

use std::sync::{Arc, RwLock};

use lcc_consent::config::WidgetConfig;
use lcc_consent::controller::ConsentController;
use lcc_consent::cookies::{CookieJar, CookieJarHandle, InMemoryCookieJar};
use lcc_consent::tags::{DataLayer, TagLayerHandle};
use lcc_consent::ui::{HeadlessUi, Hook, UiHandle};

fn main() {
    env_logger::init();

    // The "browser" cookie store, pre-seeded with a tracking cookie left
    // behind by an analytics script.
    let jar = Arc::new(RwLock::new(InMemoryCookieJar::new()));
    jar.write()
        .unwrap()
        .write("_ga=GA1.2.12345.67890; path=/")
        .unwrap();

    let ui = Arc::new(RwLock::new(HeadlessUi::with_all_hooks()));
    let tags = Arc::new(RwLock::new(DataLayer::new()));

    // First page load: no stored decision, so the banner comes up.
    let jar_handle: CookieJarHandle = jar.clone();
    let ui_handle: UiHandle = ui.clone();
    let tags_handle: TagLayerHandle = tags.clone();
    let mut widget =
        ConsentController::new(WidgetConfig::default(), jar_handle, ui_handle, tags_handle);

    widget.init();
    println!("first load:      {:?}", widget.take_events());

    // The visitor declines; the tracking cookie is swept.
    widget.handle_click(Hook::DeclineAll);
    println!("after decline:   {:?}", widget.take_events());
    println!("cookies left:    {:?}", jar.read().unwrap().names());

    // Second page load over the same jar: the stored decision is
    // re-applied to the tag layer, no banner this time.
    let jar_handle: CookieJarHandle = jar.clone();
    let ui_handle: UiHandle = ui.clone();
    let tags_handle: TagLayerHandle = tags.clone();
    let mut widget =
        ConsentController::new(WidgetConfig::default(), jar_handle, ui_handle, tags_handle);

    widget.init();
    println!("second load:     {:?}", widget.take_events());
    println!("event queue:     {:?}", tags.read().unwrap().events());
}
