//! End-to-end market refresh through store, task runner, and reducer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use coindeck_tui::app::{reduce, Action, AppState};
use coindeck_tui::services::MarketFeed;
use libcoindeck::{Config, SampleMarketSource, Store};

fn boot_store() -> Store<AppState, Action> {
    Store::new(AppState::new(&Config::default()), reduce)
}

#[test]
fn test_refresh_walks_loading_then_loaded() {
    let store = boot_store();
    let feed = MarketFeed::with_source(
        Arc::new(SampleMarketSource::new(Duration::from_millis(20))),
        vec!["BTC".to_string()],
    )
    .unwrap();

    // Record the loading flag at every applied state.
    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_clone = Arc::clone(&observed);
    let _sub = store.subscribe(move |s: &AppState| {
        observed_clone
            .lock()
            .unwrap()
            .push((s.market.loading, s.market.quotes.len()));
    });

    let handle = feed.refresh(&store);
    feed.runner().wait(handle).unwrap();

    let observed = observed.lock().unwrap();
    // Loading was observed strictly before the quotes landed.
    assert_eq!(*observed, vec![(true, 0), (false, 1)]);
}

#[test]
fn test_cancelled_refresh_leaves_loading_state() {
    let store = boot_store();
    let feed = MarketFeed::with_source(
        Arc::new(SampleMarketSource::new(Duration::from_secs(30))),
        vec!["BTC".to_string()],
    )
    .unwrap();

    let handle = feed.refresh(&store);
    // Let the started action land, then cancel mid-fetch.
    std::thread::sleep(Duration::from_millis(100));
    handle.cancel();

    assert!(matches!(
        feed.runner().wait(handle),
        Err(libcoindeck::TaskError::Cancelled)
    ));

    // No result was applied; a follow-up refresh supersedes cleanly.
    let state = store.state();
    assert!(state.market.loading);
    assert!(state.market.quotes.is_empty());

    let fast = MarketFeed::with_source(
        Arc::new(SampleMarketSource::new(Duration::ZERO)),
        vec!["BTC".to_string()],
    )
    .unwrap();
    let handle = fast.refresh(&store);
    fast.runner().wait(handle).unwrap();

    let state = store.state();
    assert!(!state.market.loading);
    assert_eq!(state.market.quotes.len(), 1);
    assert_eq!(state.market.refresh_seq, 2);
}

#[test]
fn test_refresh_requested_is_a_pure_marker() {
    let store = boot_store();
    let before = store.state();

    store.dispatch(Action::MarketRefreshRequested).unwrap();

    // The reducer does not spawn anything; state is untouched.
    assert_eq!(store.state(), before);
}
