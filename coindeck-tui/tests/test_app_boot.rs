//! Test application initialization and boot sequence
//!
//! Verifies the state the app boots with and that the bootstrap wiring
//! (store + navigator) comes up the way `main` builds it.

use coindeck_tui::app::{reduce, routes, Action, AppState, Tab, MAIN_LAYOUT};
use coindeck_tui::ScreenKind;
use libcoindeck::{Config, LoggingMiddleware, Navigator, Store};

#[test]
fn test_app_boots_on_home_tab() {
    let state = AppState::new(&Config::default());

    assert_eq!(state.selected_tab, Tab::Home);
    assert!(!state.should_quit);
}

#[test]
fn test_trade_modal_hidden_on_boot() {
    let state = AppState::new(&Config::default());

    assert!(!state.trade_modal_visible);
}

#[test]
fn test_market_empty_and_idle_on_boot() {
    let state = AppState::new(&Config::default());

    assert!(!state.market.loading);
    assert!(state.market.quotes.is_empty());
    assert!(state.market.error.is_none());
}

#[test]
fn test_boot_state_idempotent() {
    let config = Config::default();

    // Repeated construction gives the identical initial state.
    assert_eq!(AppState::new(&config), AppState::new(&config));
}

#[test]
fn test_bootstrap_wiring_comes_up() {
    let config = Config::default();

    // The same wiring main() performs.
    let store = Store::new(AppState::new(&config), reduce).with_middleware(LoggingMiddleware::new());
    let nav = Navigator::new(routes()).expect("route table must validate");

    // Exactly one active screen: the tab layout, without header chrome.
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.current().name, MAIN_LAYOUT);
    assert_eq!(nav.current().screen, ScreenKind::MainLayout);
    assert!(!nav.header_shown());

    // The store answers reads immediately.
    assert_eq!(store.state().selected_tab, Tab::Home);
}

#[test]
fn test_store_applies_boot_actions() {
    let config = Config::default();
    let store = Store::new(AppState::new(&config), reduce);

    store.dispatch(Action::SelectTab(Tab::Market)).unwrap();
    store
        .dispatch(Action::SetStatus("ready".to_string()))
        .unwrap();

    let state = store.state();
    assert_eq!(state.selected_tab, Tab::Market);
    assert_eq!(state.status.message.as_deref(), Some("ready"));
}
