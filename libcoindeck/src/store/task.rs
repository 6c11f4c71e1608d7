//! Asynchronous tasks
//!
//! The deferred-dispatch capability: where a plain action describes one
//! state transition, a [`Task`] is a named async procedure that receives a
//! dispatch capability and a state-read capability and may dispatch several
//! actions over time (start, await something, succeed or fail).
//!
//! Tasks run on a tokio runtime owned by the [`TaskRunner`], so the
//! synchronous event loop never blocks on them. Every spawn returns a
//! [`TaskHandle`] that can be cancelled, which makes a superseded in-flight
//! task representable instead of implicit: the racing task is either
//! cancelled outright or drops its own stale result after re-reading state.
//!
//! Dispatches issued by a task are applied in call order; a dispatch placed
//! after an `.await` is observed by subscribers strictly after the ones
//! before it.

use std::future::Future;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use super::{Dispatched, Store, StoreError};

use thiserror::Error;

/// Errors surfaced by task execution
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("failed to start task runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("task cancelled before completion")]
    Cancelled,

    #[error("task panicked: {0}")]
    Panicked(String),

    #[error("task store access failed: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Failed(String),
}

type TaskFn<S, A> =
    Box<dyn FnOnce(TaskContext<S, A>) -> BoxFuture<'static, Result<(), TaskError>> + Send>;

/// A named asynchronous procedure over the store.
pub struct Task<S, A> {
    id: Uuid,
    name: String,
    run: TaskFn<S, A>,
}

impl<S, A> Task<S, A> {
    /// Wrap an async procedure as a named task.
    pub fn new<F, Fut>(name: impl Into<String>, procedure: F) -> Self
    where
        F: FnOnce(TaskContext<S, A>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            run: Box::new(move |ctx| Box::pin(procedure(ctx))),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The two capabilities a task receives: dispatch and state read.
pub struct TaskContext<S, A> {
    store: Store<S, A>,
}

impl<S, A> TaskContext<S, A>
where
    S: Clone,
{
    /// Dispatch an action through the store.
    pub fn dispatch(&self, action: A) -> Result<Dispatched, StoreError> {
        self.store.dispatch(action)
    }

    /// Snapshot of the current state. Re-read this before applying a result
    /// computed from an older snapshot; the state may have moved on.
    pub fn state(&self) -> S {
        self.store.state()
    }
}

/// Handle to a spawned task.
pub struct TaskHandle {
    id: Uuid,
    name: String,
    join: JoinHandle<Result<(), TaskError>>,
}

impl TaskHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cancel the task at its next await point. Dispatches it already made
    /// stay applied; nothing is rolled back.
    pub fn cancel(&self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Owns the tokio runtime tasks run on.
///
/// The synchronous side of the application creates one runner at startup
/// and hands it every task it wants off-thread.
pub struct TaskRunner {
    runtime: tokio::runtime::Runtime,
}

impl TaskRunner {
    /// Create a runner with its own multi-thread runtime.
    pub fn new() -> Result<Self, TaskError> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self { runtime })
    }

    /// Spawn a task against a store.
    pub fn spawn<S, A>(&self, store: &Store<S, A>, task: Task<S, A>) -> TaskHandle
    where
        S: Clone + Send + Sync + 'static,
        A: Send + Sync + 'static,
    {
        let Task { id, name, run } = task;
        let ctx = TaskContext {
            store: store.clone(),
        };
        let span = tracing::info_span!("task", task = %name, id = %id);
        let join = self.runtime.spawn(
            async move {
                tracing::debug!("task started");
                let result = run(ctx).await;
                match &result {
                    Ok(()) => tracing::debug!("task finished"),
                    Err(e) => tracing::warn!(error = %e, "task failed"),
                }
                result
            }
            .instrument(span),
        );
        TaskHandle { id, name, join }
    }

    /// Block until a spawned task finishes and report its outcome.
    ///
    /// Cancellation and panics inside the task are reported as
    /// [`TaskError::Cancelled`] and [`TaskError::Panicked`].
    pub fn wait(&self, handle: TaskHandle) -> Result<(), TaskError> {
        match self.runtime.block_on(handle.join) {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(TaskError::Cancelled),
            Err(join_err) => Err(TaskError::Panicked(join_err.to_string())),
        }
    }
}
