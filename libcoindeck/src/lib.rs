//! Coindeck - terminal dashboard core for a crypto exchange front-end
//!
//! This library provides the state and navigation core the TUI is built on:
//! an explicit store with a middleware chain and async tasks, and an explicit
//! route table validated at construction.

pub mod config;
pub mod error;
pub mod logging;
pub mod market;
pub mod nav;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{CoindeckError, Result};
pub use market::{CoinQuote, MarketError, MarketSource, SampleMarketSource};
pub use nav::{NavError, Navigator, Params, Route, RouteTable, ScreenOptions};
pub use store::{
    Dispatched, LoggingMiddleware, Middleware, Store, StoreError, Subscription, Task,
    TaskContext, TaskError, TaskHandle, TaskRunner,
};
