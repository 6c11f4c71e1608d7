//! Pure reducer function for state transitions
//!
//! `(AppState, Action) -> AppState`, with no side effects: no I/O, no task
//! spawning, no terminal access. The market refresh is requested here only
//! as a state marker; the event loop performs the actual side effect.

use crossterm::event::{KeyCode, KeyModifiers};

use super::actions::{Action, Tab};
use super::state::{AppState, MarketState, StatusBarState};

/// Pure reducer function
///
/// Takes current state and an action, returns new state. Deterministic for
/// the same inputs.
pub fn reduce(state: AppState, action: &Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => match action_for_key(&state, *key) {
            Some(mapped) => reduce(state, &mapped),
            None => state,
        },
        Action::Tick => state,
        Action::Resize(_, _) => state, // Terminal handles resize itself

        // === Tabs ===
        Action::SelectTab(tab) => {
            if *tab == Tab::Trade {
                // The trade button toggles the modal; the content area
                // stays on the current tab.
                let visible = !state.trade_modal_visible;
                return reduce(state, &Action::SetTradeModalVisibility(visible));
            }
            AppState {
                selected_tab: *tab,
                trade_modal_visible: false,
                ..state
            }
        }

        Action::SetTradeModalVisibility(visible) => AppState {
            trade_modal_visible: *visible,
            ..state
        },

        // === Market refresh lifecycle ===
        Action::MarketRefreshRequested => {
            // The spawn happens outside the reducer; transitions arrive as
            // MarketRefreshStarted and friends.
            state
        }

        Action::MarketRefreshStarted => AppState {
            market: MarketState {
                loading: true,
                refresh_seq: state.market.refresh_seq + 1,
                error: None,
                ..state.market
            },
            ..state
        },

        Action::MarketRefreshSucceeded { seq, quotes } => {
            if *seq != state.market.refresh_seq {
                // Superseded by a newer refresh; drop the stale result.
                return state;
            }
            AppState {
                market: MarketState {
                    loading: false,
                    quotes: quotes.clone(),
                    error: None,
                    ..state.market
                },
                ..state
            }
        }

        Action::MarketRefreshFailed { seq, error } => {
            if *seq != state.market.refresh_seq {
                return state;
            }
            AppState {
                market: MarketState {
                    loading: false,
                    error: Some(error.clone()),
                    ..state.market
                },
                ..state
            }
        }

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: StatusBarState {
                message: Some(message.clone()),
            },
            ..state
        },

        Action::ClearStatus => AppState {
            status: StatusBarState { message: None },
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },
    }
}

/// Map a key to the semantic action it triggers in the given state.
///
/// This is where keybindings are defined. The reducer routes `Action::Key`
/// through here, and the event loop uses it directly so it can act on the
/// mapped action (e.g. spawning the refresh task).
pub fn action_for_key(state: &AppState, key: crossterm::event::KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        // Quit (not while the trade modal is up; Esc closes it first)
        (KeyCode::Char('q'), KeyModifiers::NONE) if !state.trade_modal_visible => {
            Some(Action::Quit)
        }

        // Dismiss the trade modal
        (KeyCode::Esc, _) if state.trade_modal_visible => {
            Some(Action::SetTradeModalVisibility(false))
        }

        // Direct tab selection
        (KeyCode::Char('1'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Home)),
        (KeyCode::Char('2'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Portfolio)),
        (KeyCode::Char('3'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Trade)),
        (KeyCode::Char('4'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Market)),
        (KeyCode::Char('5'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Profile)),

        // Cycle content tabs
        (KeyCode::Tab, _) => Some(Action::SelectTab(state.selected_tab.next())),
        (KeyCode::BackTab, _) => Some(Action::SelectTab(state.selected_tab.prev())),

        // Trade modal shortcut
        (KeyCode::Char('t'), KeyModifiers::NONE) => Some(Action::SelectTab(Tab::Trade)),

        // Refresh market data
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(Action::MarketRefreshRequested),

        _ => None,
    }
}
