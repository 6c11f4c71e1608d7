//! Keybinding coverage through the public mapping function.

use coindeck_tui::app::{action_for_key, reduce, Action, AppState, Tab};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libcoindeck::Config;

fn boot() -> AppState {
    AppState::new(&Config::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_number_keys_select_tabs() {
    let state = boot();

    assert!(matches!(
        action_for_key(&state, key(KeyCode::Char('1'))),
        Some(Action::SelectTab(Tab::Home))
    ));
    assert!(matches!(
        action_for_key(&state, key(KeyCode::Char('2'))),
        Some(Action::SelectTab(Tab::Portfolio))
    ));
    assert!(matches!(
        action_for_key(&state, key(KeyCode::Char('4'))),
        Some(Action::SelectTab(Tab::Market))
    ));
    assert!(matches!(
        action_for_key(&state, key(KeyCode::Char('5'))),
        Some(Action::SelectTab(Tab::Profile))
    ));
}

#[test]
fn test_refresh_key_maps_to_request() {
    assert!(matches!(
        action_for_key(&boot(), key(KeyCode::Char('r'))),
        Some(Action::MarketRefreshRequested)
    ));
}

#[test]
fn test_quit_suppressed_by_modal() {
    let mut state = boot();
    assert!(matches!(
        action_for_key(&state, key(KeyCode::Char('q'))),
        Some(Action::Quit)
    ));

    state.trade_modal_visible = true;
    assert!(action_for_key(&state, key(KeyCode::Char('q'))).is_none());
    assert!(matches!(
        action_for_key(&state, key(KeyCode::Esc)),
        Some(Action::SetTradeModalVisibility(false))
    ));
}

#[test]
fn test_unbound_keys_map_to_nothing() {
    assert!(action_for_key(&boot(), key(KeyCode::Char('z'))).is_none());
    assert!(action_for_key(&boot(), key(KeyCode::F(12))).is_none());
}

#[test]
fn test_key_actions_flow_through_reducer() {
    // The reducer applies the same mapping when handed a raw key event.
    let state = reduce(boot(), &Action::Key(key(KeyCode::Char('4'))));
    assert_eq!(state.selected_tab, Tab::Market);

    let state = reduce(state, &Action::Key(key(KeyCode::Char('t'))));
    assert!(state.trade_modal_visible);
    assert_eq!(state.selected_tab, Tab::Market);
}
