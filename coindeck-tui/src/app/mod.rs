//! Application module
//!
//! The core application architecture:
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//! - Routes: the declarative route table mounted at boot

pub mod actions;
pub mod event;
pub mod reducer;
pub mod state;

pub use actions::{Action, Tab};
pub use reducer::{action_for_key, reduce};
pub use state::{AppState, MarketState, StatusBarState, UiConfig};

use libcoindeck::{RouteTable, ScreenOptions};

/// Name of the single registered route.
pub const MAIN_LAYOUT: &str = "MainLayout";

/// Screens registrable with the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// The tab layout mounted at boot.
    MainLayout,
}

/// The application route table: one route, mounted as the initial screen,
/// with header chrome disabled globally.
pub fn routes() -> RouteTable<ScreenKind> {
    RouteTable::new(MAIN_LAYOUT)
        .with_default_options(ScreenOptions {
            header_shown: false,
        })
        .route(MAIN_LAYOUT, ScreenKind::MainLayout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcoindeck::Navigator;

    #[test]
    fn test_route_table_mounts_main_layout() {
        let nav = Navigator::new(routes()).unwrap();

        // Exactly one active screen, no header chrome.
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current().name, MAIN_LAYOUT);
        assert_eq!(nav.current().screen, ScreenKind::MainLayout);
        assert!(!nav.header_shown());
    }

    #[test]
    fn test_route_table_declares_exactly_one_route() {
        assert_eq!(routes().routes().len(), 1);
        assert_eq!(routes().initial(), MAIN_LAYOUT);
    }
}
