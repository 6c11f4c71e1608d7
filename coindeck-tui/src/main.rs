//! coindeck-tui - terminal dashboard for a crypto exchange front-end
//!
//! The bootstrap wires the pieces together once at startup: build the store
//! from the root reducer with the logging middleware attached, build the
//! task runner behind the market feed, mount the navigator with the single
//! `MainLayout` route (header chrome off globally), then run the event
//! loop.

use coindeck_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce,
        reducer::action_for_key,
        routes, Action, AppState,
    },
    error::Result,
    services::MarketFeed,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};
use libcoindeck::{logging, CoindeckError, Config, LoggingMiddleware, Navigator, Store, TaskHandle};

fn main() -> Result<()> {
    install_panic_hook();
    logging::init_default();

    let config = Config::load()?;

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &config);
    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut Tui, config: &Config) -> Result<()> {
    // Store Initializer: root reducer plus the ordered middleware chain,
    // built once and held for the life of the process.
    let store = Store::new(AppState::new(config), reduce).with_middleware(LoggingMiddleware::new());

    let feed = MarketFeed::new(config)?;

    // Navigation Root: the declarative route table, validated before
    // anything renders. A misconfigured table aborts startup here.
    let navigator = Navigator::new(routes()).map_err(CoindeckError::from)?;

    let events = EventHandler::new(config.ui.tick_rate_ms);

    // Populate the market tab on boot.
    let mut refresh: Option<TaskHandle> = Some(feed.refresh(&store));

    loop {
        let state = store.state();
        terminal.draw(|frame| ui::render(frame, &state, &navigator))?;

        if state.should_quit {
            break;
        }

        // Keys are mapped to their semantic action up front so the loop
        // can act on the mapped action below.
        let action = match events.next()? {
            TuiEvent::Key(key) => match action_for_key(&store.state(), key) {
                Some(mapped) => mapped,
                None => continue,
            },
            other => other.into(),
        };
        store.dispatch(action.clone()).map_err(CoindeckError::from)?;

        // Side effects based on the applied action.
        if let Action::MarketRefreshRequested = action {
            // Supersede any in-flight refresh; its result would be dropped
            // as stale anyway, so cancelling is just cleanup.
            if let Some(old) = refresh.take() {
                if !old.is_finished() {
                    old.cancel();
                }
            }
            refresh = Some(feed.refresh(&store));
        }
    }

    Ok(())
}
