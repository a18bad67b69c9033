//! Execution contexts and blocking primitives for the sync/async adapters.
//!
//! This crate provides the two collaborators the adapters in `core-bridge`
//! are built on:
//! - A concurrent execution context: "run this closure on some worker thread"
//! - A single-use blocking rendezvous: "park this thread until released"
//!
//! # Architecture
//!
//! Execution contexts are thin labelled handles onto a Tokio runtime's
//! blocking pool. Contexts created with [`ConcurrentContext::new`] share one
//! lazily built process-wide runtime; [`ConcurrentContext::with_config`]
//! builds a dedicated one. Submitted jobs run concurrently and in no
//! particular order.
//!
//! # Modules
//!
//! - `config`: Worker pool configuration
//! - `context`: The `ExecutionContext` trait and its Tokio-backed implementation
//! - `runtime`: Runtime construction and the shared process-wide runtime
//! - `sync`: The `Rendezvous` blocking primitive
//! - `time`: Blocking sleep helpers
//!
//! # Examples
//!
//! ```rust
//! use core_exec::{ConcurrentContext, ExecutionContext, Rendezvous};
//! use std::sync::Arc;
//!
//! let context = ConcurrentContext::new("example");
//! let rendezvous: Arc<Rendezvous<u32, ()>> = Rendezvous::armed();
//!
//! let producer = Arc::clone(&rendezvous);
//! context.submit(Box::new(move || {
//!     producer.fulfill(42);
//! }));
//!
//! assert_eq!(rendezvous.wait(), Ok(42));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod runtime;
pub mod sync;
pub mod time;

pub use config::ExecConfig;
pub use context::{dispatch, ConcurrentContext, ExecutionContext, Job};
pub use error::{ExecError, Result};
pub use sync::Rendezvous;
pub use time::{wait_a_bit, Duration};
