//! Execution contexts.
//!
//! An execution context is anything that can run a closure concurrently with
//! the caller. The adapters only ever need two things from it:
//! - `submit`: hand over a job and return immediately
//! - `sleep`: park the current thread for a while
//!
//! # Ordering
//!
//! [`ConcurrentContext`] runs jobs on a Tokio blocking pool. Jobs submitted
//! from the same context may run at the same time and complete in any order,
//! so one adapted function can be called again before earlier calls finish.
//!
//! # Examples
//!
//! ```rust
//! use core_exec::{ConcurrentContext, ExecutionContext};
//! use std::sync::mpsc;
//!
//! let context = ConcurrentContext::new("doc");
//! let (tx, rx) = mpsc::channel();
//!
//! for i in 0..4 {
//!     let tx = tx.clone();
//!     context.submit(Box::new(move || {
//!         tx.send(i).ok();
//!     }));
//! }
//!
//! let mut seen: Vec<i32> = rx.iter().take(4).collect();
//! seen.sort();
//! assert_eq!(seen, vec![0, 1, 2, 3]);
//! ```

use crate::config::ExecConfig;
use crate::error::Result;
use crate::runtime::{self, Handle, Runtime};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A unit of work submitted to an execution context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs closures concurrently with the caller.
pub trait ExecutionContext: Send + Sync {
    /// Schedules `job` to run at most once on some worker thread.
    ///
    /// Must not block waiting for the job.
    fn submit(&self, job: Job);

    /// Parks the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

impl<C> ExecutionContext for Arc<C>
where
    C: ExecutionContext + ?Sized,
{
    fn submit(&self, job: Job) {
        (**self).submit(job)
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// A labelled context backed by a Tokio blocking pool.
///
/// Cloning is cheap and clones submit to the same pool.
#[derive(Clone)]
pub struct ConcurrentContext {
    label: Arc<str>,
    handle: Handle,
    // Keeps a dedicated runtime alive; `None` for the shared one.
    _runtime: Option<Arc<Runtime>>,
}

impl ConcurrentContext {
    /// Creates a context on the shared process-wide runtime.
    pub fn new(label: impl Into<String>) -> Self {
        let label: String = label.into();
        Self {
            label: label.into(),
            handle: runtime::shared(),
            _runtime: None,
        }
    }

    /// Creates a context with its own runtime built from `config`.
    ///
    /// The runtime shuts down when the last clone of the context is dropped,
    /// after every job already submitted has returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the runtime
    /// cannot be built.
    pub fn with_config(config: &ExecConfig) -> Result<Self> {
        let runtime = runtime::build(config)?;
        Ok(Self {
            label: config.thread_name.as_str().into(),
            handle: runtime.handle().clone(),
            _runtime: Some(Arc::new(runtime)),
        })
    }

    /// The label this context was created with.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ConcurrentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentContext")
            .field("label", &self.label)
            .field("dedicated", &self._runtime.is_some())
            .finish()
    }
}

impl ExecutionContext for ConcurrentContext {
    fn submit(&self, job: Job) {
        tracing::trace!(context = %self.label, "Submitting job");
        // Detached: the job reports back through whatever it captured.
        drop(self.handle.spawn_blocking(job));
    }

    fn sleep(&self, duration: Duration) {
        crate::time::sleep_blocking(duration);
    }
}

/// Runs `job` on a fresh context over the shared runtime.
pub fn dispatch<F>(job: F)
where
    F: FnOnce() + Send + 'static,
{
    ConcurrentContext::new("dispatch").submit(Box::new(job));
}
