//! Adapters between callback-style operations and blocking calls.
//!
//! This crate re-exports the workspace crates behind one name:
//! - `core-bridge`: the `to_sync*` and `to_async*` adapters
//! - `core-exec`: execution contexts and the `Rendezvous` primitive
//! - `core-runtime` (feature `logging`): tracing subscriber setup
//!
//! ```rust
//! use syncasync::{no_start, to_async1, to_sync1};
//!
//! let double = to_sync1(to_async1(|x: i32| x * 2), no_start);
//! assert_eq!(double(21), 42);
//! ```

pub use core_bridge::*;
pub use core_exec::{
    config, context, runtime, sync, time, wait_a_bit, ExecConfig, ExecError, Job, Rendezvous,
};

#[cfg(feature = "logging")]
pub use core_runtime::logging;
