//! Middleware chain
//!
//! A middleware wraps dispatch with cross-cutting behavior. The chain is an
//! ordered list; each middleware sees the action and a state snapshot before
//! the reducer runs and may consume the action by returning `false`.

use std::fmt::Debug;

/// Cross-cutting dispatch wrapper.
///
/// Implementations must not dispatch back into the store from `handle`;
/// that is a nested dispatch and will be rejected.
pub trait Middleware<S, A>: Send + Sync {
    /// Inspect an action before it reaches the reducer.
    ///
    /// Return `true` to pass the action along the chain, `false` to consume
    /// it (the reducer and subscribers never see it).
    fn handle(&self, action: &A, state: &S) -> bool;
}

/// Logs every dispatched action at debug level.
///
/// The analogue of an action logger sitting after the task layer: by the
/// time an action reaches this middleware it is always a plain value, never
/// a deferred procedure.
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    A: Debug,
{
    fn handle(&self, action: &A, _state: &S) -> bool {
        tracing::debug!(action = ?action, "dispatch");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_middleware_passes_everything() {
        let mw = LoggingMiddleware::new();
        assert!(Middleware::<u32, &str>::handle(&mw, &"tick", &0));
    }
}
