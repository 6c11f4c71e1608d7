//! Application state
//!
//! Immutable state structure; all transitions happen through the reducer
//! (see `reducer.rs`). The store owns the only live copy.

use libcoindeck::{CoinQuote, Config};

use super::actions::Tab;

/// Root application state
///
/// The single source of truth for the TUI. Transitions are pure functions
/// that return new state values.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Currently selected content tab
    pub selected_tab: Tab,

    /// Trade modal visible? (the trade button toggles it)
    pub trade_modal_visible: bool,

    /// Market slice
    pub market: MarketState,

    /// Status bar state
    pub status: StatusBarState,

    /// UI configuration
    pub config: UiConfig,
}

/// Market tab state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketState {
    /// Refresh in flight?
    pub loading: bool,

    /// Bumped every time a refresh starts. Results carrying an older
    /// sequence are stale and dropped by the reducer.
    pub refresh_seq: u64,

    /// Last successfully fetched quotes
    pub quotes: Vec<CoinQuote>,

    /// Last refresh error, if any
    pub error: Option<String>,
}

/// Status bar state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration, fixed at boot from the config file
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,

    /// Symbols shown on the Market tab
    pub symbols: Vec<String>,
}

impl AppState {
    /// Create the boot state from loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            selected_tab: Tab::Home,
            trade_modal_visible: false,
            market: MarketState::default(),
            status: StatusBarState::default(),
            config: UiConfig {
                tick_rate_ms: config.ui.tick_rate_ms,
                symbols: config.market.symbols.clone(),
            },
        }
    }
}
