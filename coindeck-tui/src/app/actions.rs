//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions: immutable values
//! describing what should happen. The reducer (see `reducer.rs`) applies
//! them to state; asynchronous work (the market refresh) dispatches its
//! lifecycle actions from a task.

use crossterm::event::KeyEvent;
use libcoindeck::CoinQuote;

/// Actions that trigger state transitions
#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    /// Keyboard input event
    Key(KeyEvent),

    /// Periodic tick for animations/progress updates
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Tabs ===
    /// Select a tab in the main layout
    SelectTab(Tab),

    /// Show or hide the trade modal
    SetTradeModalVisibility(bool),

    // === Market refresh lifecycle ===
    /// User requested a refresh (side effect handled outside the reducer)
    MarketRefreshRequested,

    /// A refresh task started; bumps the refresh sequence
    MarketRefreshStarted,

    /// Refresh finished; `seq` identifies the refresh that produced it
    MarketRefreshSucceeded { seq: u64, quotes: Vec<CoinQuote> },

    /// Refresh failed
    MarketRefreshFailed { seq: u64, error: String },

    // === Status Bar ===
    /// Update status message
    SetStatus(String),

    /// Clear status message
    ClearStatus,

    /// Quit the application
    Quit,
}

/// Tabs of the main layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Portfolio,
    /// The trade button: selecting it toggles the trade modal rather than
    /// switching the content area.
    Trade,
    Market,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Portfolio, Tab::Trade, Tab::Market, Tab::Profile];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Portfolio => "Portfolio",
            Tab::Trade => "Trade",
            Tab::Market => "Market",
            Tab::Profile => "Profile",
        }
    }

    /// The next content tab, skipping the trade button.
    pub fn next(&self) -> Tab {
        match self {
            Tab::Home => Tab::Portfolio,
            Tab::Portfolio => Tab::Market,
            Tab::Trade => Tab::Market,
            Tab::Market => Tab::Profile,
            Tab::Profile => Tab::Home,
        }
    }

    /// The previous content tab, skipping the trade button.
    pub fn prev(&self) -> Tab {
        match self {
            Tab::Home => Tab::Profile,
            Tab::Portfolio => Tab::Home,
            Tab::Trade => Tab::Portfolio,
            Tab::Market => Tab::Portfolio,
            Tab::Profile => Tab::Market,
        }
    }
}
