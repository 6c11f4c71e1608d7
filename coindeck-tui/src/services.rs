//! Service layer adapter for the TUI
//!
//! Side effects live here, outside the reducer. [`MarketFeed`] wraps the
//! task runner and a market source; a refresh spawns a task that walks the
//! market lifecycle (started, fetch, succeeded/failed) by dispatching into
//! the store from the runtime.
//!
//! A refresh that gets superseded mid-flight is handled on both ends: the
//! caller can cancel the old handle, and the task itself records the
//! refresh sequence it started under so the reducer drops a stale result.

use std::sync::Arc;
use std::time::Duration;

use libcoindeck::{
    Config, MarketSource, SampleMarketSource, Store, Task, TaskContext, TaskHandle, TaskRunner,
};

use crate::app::{Action, AppState};
use crate::error::Result;

/// Market refresh service
pub struct MarketFeed {
    runner: TaskRunner,
    source: Arc<dyn MarketSource>,
    symbols: Vec<String>,
}

impl MarketFeed {
    /// Create a feed over the sample source, configured from the config
    /// file.
    pub fn new(config: &Config) -> Result<Self> {
        let source = SampleMarketSource::new(Duration::from_millis(
            config.market.sample_latency_ms,
        ));
        Ok(Self {
            runner: TaskRunner::new().map_err(libcoindeck::CoindeckError::from)?,
            source: Arc::new(source),
            symbols: config.market.symbols.clone(),
        })
    }

    /// Create a feed over a custom source.
    pub fn with_source(
        source: Arc<dyn MarketSource>,
        symbols: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            runner: TaskRunner::new().map_err(libcoindeck::CoindeckError::from)?,
            source,
            symbols,
        })
    }

    /// Spawn a refresh task against the store.
    ///
    /// The task dispatches `MarketRefreshStarted`, fetches quotes, then
    /// dispatches the outcome tagged with the refresh sequence it started
    /// under.
    pub fn refresh(&self, store: &Store<AppState, Action>) -> TaskHandle {
        let source = Arc::clone(&self.source);
        let symbols = self.symbols.clone();

        let task = Task::new(
            "market-refresh",
            move |ctx: TaskContext<AppState, Action>| async move {
                ctx.dispatch(Action::MarketRefreshStarted)?;
                let seq = ctx.state().market.refresh_seq;

                match source.fetch(&symbols).await {
                    Ok(quotes) => {
                        tracing::debug!(count = quotes.len(), "market refresh fetched");
                        ctx.dispatch(Action::MarketRefreshSucceeded { seq, quotes })?;
                    }
                    Err(e) => {
                        ctx.dispatch(Action::MarketRefreshFailed {
                            seq,
                            error: e.to_string(),
                        })?;
                    }
                }
                Ok(())
            },
        );

        self.runner.spawn(store, task)
    }

    /// The runner, for joining or cancelling handles.
    pub fn runner(&self) -> &TaskRunner {
        &self.runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use libcoindeck::{CoinQuote, MarketError};

    struct FailingSource;

    #[async_trait]
    impl MarketSource for FailingSource {
        async fn fetch(
            &self,
            _symbols: &[String],
        ) -> std::result::Result<Vec<CoinQuote>, MarketError> {
            Err(MarketError::Source("exchange unreachable".to_string()))
        }
    }

    fn boot_store() -> Store<AppState, Action> {
        let config = Config::default();
        Store::new(AppState::new(&config), crate::app::reduce)
    }

    #[test]
    fn test_refresh_populates_quotes() {
        let store = boot_store();
        let feed = MarketFeed::with_source(
            Arc::new(SampleMarketSource::new(Duration::ZERO)),
            vec!["BTC".to_string(), "ETH".to_string()],
        )
        .unwrap();

        let handle = feed.refresh(&store);
        feed.runner().wait(handle).unwrap();

        let state = store.state();
        assert!(!state.market.loading);
        assert_eq!(state.market.quotes.len(), 2);
        assert_eq!(state.market.refresh_seq, 1);
        assert!(state.market.error.is_none());
    }

    #[test]
    fn test_refresh_failure_lands_in_state() {
        let store = boot_store();
        let feed =
            MarketFeed::with_source(Arc::new(FailingSource), vec!["BTC".to_string()]).unwrap();

        let handle = feed.refresh(&store);
        feed.runner().wait(handle).unwrap();

        let state = store.state();
        assert!(!state.market.loading);
        assert!(state.market.quotes.is_empty());
        assert_eq!(
            state.market.error.as_deref(),
            Some("market source failed: exchange unreachable")
        );
    }

    #[test]
    fn test_superseding_refresh_wins() {
        let store = boot_store();
        let slow = MarketFeed::with_source(
            Arc::new(SampleMarketSource::new(Duration::from_millis(200))),
            vec!["BTC".to_string()],
        )
        .unwrap();
        let fast = MarketFeed::with_source(
            Arc::new(SampleMarketSource::new(Duration::ZERO)),
            vec!["BTC".to_string(), "ETH".to_string()],
        )
        .unwrap();

        let slow_handle = slow.refresh(&store);
        // Give the slow refresh time to dispatch Started.
        std::thread::sleep(Duration::from_millis(50));
        let fast_handle = fast.refresh(&store);

        fast.runner().wait(fast_handle).unwrap();
        slow.runner().wait(slow_handle).unwrap();

        // The slow result carries seq 1 against a state at seq 2: dropped.
        let state = store.state();
        assert_eq!(state.market.refresh_seq, 2);
        assert_eq!(state.market.quotes.len(), 2);
        assert!(!state.market.loading);
    }
}
