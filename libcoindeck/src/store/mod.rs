//! State store
//!
//! A single process-wide state container following the reducer pattern:
//! `(State, Action) -> State`. The store owns the only mutable copy of
//! application state; everything else reads snapshots and dispatches actions.
//!
//! Dispatches are serialized: no matter how many threads hold a handle, one
//! action at a time goes through the middleware chain, the reducer, and the
//! subscriber list, and subscribers observe snapshots in application order.
//! A dispatch issued synchronously from inside a subscriber on the same
//! thread is rejected with [`StoreError::NestedDispatch`] instead of
//! deadlocking. The reducer itself has no store capability, so it cannot
//! dispatch at all.

pub mod middleware;
pub mod task;

pub use middleware::{LoggingMiddleware, Middleware};
pub use task::{Task, TaskContext, TaskError, TaskHandle, TaskRunner};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::thread::{self, ThreadId};

use thiserror::Error;

/// Errors surfaced by store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A dispatch was issued synchronously from inside an active dispatch
    /// on the same thread (e.g. from a subscriber). Defer it instead.
    #[error("dispatch issued from inside an active dispatch on the same thread")]
    NestedDispatch,

    /// An earlier reducer fault (panic) left the store in an undefined
    /// state. Every later dispatch fails with this error.
    #[error("store poisoned by an earlier reducer fault")]
    Poisoned,
}

/// Outcome of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// The action went through the reducer and subscribers were notified.
    Applied,
    /// A middleware consumed the action before it reached the reducer.
    Consumed,
}

type ReducerFn<S, A> = Box<dyn Fn(S, &A) -> S + Send + Sync>;
type ListenerFn<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Listener<S> {
    id: u64,
    notify: ListenerFn<S>,
}

struct Shared<S, A> {
    state: RwLock<S>,
    /// Serializes dispatches across threads. Held for the whole
    /// middleware -> reducer -> notify sequence.
    seat: Mutex<()>,
    /// Thread currently holding the seat, for re-entrancy detection.
    owner: Mutex<Option<ThreadId>>,
    reducer: ReducerFn<S, A>,
    middleware: Mutex<Vec<Box<dyn Middleware<S, A>>>>,
    listeners: Mutex<Vec<Listener<S>>>,
    next_listener: AtomicU64,
}

/// Clears the dispatch owner when the seat is released, including on the
/// unwind path of a panicking reducer.
struct OwnerGuard<'a> {
    owner: &'a Mutex<Option<ThreadId>>,
}

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut owner) = self.owner.lock() {
            *owner = None;
        }
    }
}

/// Process-wide state container
///
/// Cheap to clone; all clones share the same state. Holds a pure reducer,
/// an ordered middleware chain, and a subscriber registry.
pub struct Store<S, A> {
    shared: Arc<Shared<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S, A> Store<S, A> {
    /// Create a store from an initial state and a reducer.
    ///
    /// The reducer must be pure: no I/O, no side effects, deterministic for
    /// the same inputs. It receives the current state by value and the
    /// action by reference, and returns the next state.
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(initial),
                seat: Mutex::new(()),
                owner: Mutex::new(None),
                reducer: Box::new(reducer),
                middleware: Mutex::new(Vec::new()),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    /// Append a middleware to the chain. Order is significant: middleware
    /// run front to back, and the first one that consumes an action stops
    /// the chain.
    pub fn with_middleware<M>(self, middleware: M) -> Self
    where
        M: Middleware<S, A> + 'static,
    {
        self.add_middleware(middleware);
        self
    }

    /// Append a middleware to the chain of an already-shared store.
    pub fn add_middleware<M>(&self, middleware: M)
    where
        M: Middleware<S, A> + 'static,
    {
        if let Ok(mut chain) = self.shared.middleware.lock() {
            chain.push(Box::new(middleware));
        }
    }
}

impl<S, A> Store<S, A>
where
    S: Clone,
{
    /// Snapshot of the current state.
    ///
    /// Reads are never blocked by subscriber notification. After a reducer
    /// fault this returns the last state that was fully applied.
    pub fn state(&self) -> S {
        match self.shared.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Dispatch an action.
    ///
    /// Runs the middleware chain, then the reducer, then notifies
    /// subscribers with the new state, all while holding the dispatch seat.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NestedDispatch`] if called from inside an active
    ///   dispatch on the same thread.
    /// - [`StoreError::Poisoned`] if an earlier reducer panic poisoned the
    ///   store.
    ///
    /// A reducer panic itself is not caught here. It propagates to the
    /// caller and poisons the store.
    pub fn dispatch(&self, action: A) -> Result<Dispatched, StoreError> {
        let current = thread::current().id();
        {
            let owner = self.shared.owner.lock().map_err(|_| StoreError::Poisoned)?;
            if *owner == Some(current) {
                return Err(StoreError::NestedDispatch);
            }
        }

        let _seat = self.shared.seat.lock().map_err(|_| StoreError::Poisoned)?;
        {
            let mut owner = self.shared.owner.lock().map_err(|_| StoreError::Poisoned)?;
            *owner = Some(current);
        }
        let _owner_guard = OwnerGuard {
            owner: &self.shared.owner,
        };

        // Middleware chain, front to back.
        {
            let chain = self
                .shared
                .middleware
                .lock()
                .map_err(|_| StoreError::Poisoned)?;
            if !chain.is_empty() {
                let snapshot = self.state();
                for mw in chain.iter() {
                    if !mw.handle(&action, &snapshot) {
                        return Ok(Dispatched::Consumed);
                    }
                }
            }
        }

        let previous = self.state();
        // Reducer fault propagates from here; the held seat poisons the
        // store for subsequent dispatches.
        let next = (self.shared.reducer)(previous, &action);
        {
            let mut slot = self.shared.state.write().map_err(|_| StoreError::Poisoned)?;
            *slot = next.clone();
        }

        // Notify outside the listener lock so a subscriber may
        // subscribe/unsubscribe; a same-thread dispatch from a subscriber
        // still fails the owner check above.
        let listeners: Vec<ListenerFn<S>> = {
            let registry = self
                .shared
                .listeners
                .lock()
                .map_err(|_| StoreError::Poisoned)?;
            registry.iter().map(|l| Arc::clone(&l.notify)).collect()
        };
        for notify in listeners {
            notify(&next);
        }

        Ok(Dispatched::Applied)
    }

    /// Register a listener called with the new state after every applied
    /// dispatch. The returned [`Subscription`] removes the listener when
    /// [`Subscription::unsubscribe`] is called; dropping it without
    /// unsubscribing keeps the listener registered for the life of the
    /// store.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<S, A>
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = self.shared.next_listener.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut registry) = self.shared.listeners.lock() {
            registry.push(Listener {
                id,
                notify: Arc::new(listener),
            });
        }
        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Handle for removing a registered listener
pub struct Subscription<S, A> {
    id: u64,
    shared: Weak<Shared<S, A>>,
}

impl<S, A> Subscription<S, A> {
    /// Remove the listener from the store. No-op if the store is gone.
    pub fn unsubscribe(self) {
        if let Some(shared) = self.shared.upgrade() {
            if let Ok(mut registry) = shared.listeners.lock() {
                registry.retain(|l| l.id != self.id);
            }
        }
    }
}
