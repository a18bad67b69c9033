//! Worker pool configuration.
//!
//! [`ExecConfig`] describes the Tokio runtime that backs a
//! [`ConcurrentContext`](crate::ConcurrentContext). The defaults are what the
//! shared process-wide runtime is built with.
//!
//! ```rust
//! use core_exec::ExecConfig;
//! use std::time::Duration;
//!
//! let config = ExecConfig::default()
//!     .with_thread_name("uploads")
//!     .with_max_blocking_threads(16)
//!     .with_keep_alive(Duration::from_secs(2));
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{ExecError, Result};
use std::time::Duration;

/// Default prefix for worker thread names.
pub const DEFAULT_THREAD_NAME: &str = "syncasync-worker";

/// Configuration for the worker pool behind an execution context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    /// Name given to every thread the runtime spawns
    pub thread_name: String,
    /// Number of async worker threads (jobs run on the blocking pool, so one is enough)
    pub worker_threads: usize,
    /// Upper bound on concurrently running jobs
    pub max_blocking_threads: usize,
    /// How long an idle blocking thread is kept before it exits
    pub keep_alive: Duration,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            worker_threads: 1,
            max_blocking_threads: 512,
            keep_alive: Duration::from_secs(10),
        }
    }
}

impl ExecConfig {
    /// Set the worker thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the number of async worker threads
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Set the maximum number of concurrently running jobs
    pub fn with_max_blocking_threads(mut self, threads: usize) -> Self {
        self.max_blocking_threads = threads;
        self
    }

    /// Set the idle keep-alive for blocking threads
    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Check that the configuration can build a runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Config`] if the thread name is empty or either
    /// thread count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.thread_name.trim().is_empty() {
            return Err(ExecError::Config(
                "thread_name must not be empty".to_string(),
            ));
        }
        if self.worker_threads == 0 {
            return Err(ExecError::Config(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.max_blocking_threads == 0 {
            return Err(ExecError::Config(
                "max_blocking_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
