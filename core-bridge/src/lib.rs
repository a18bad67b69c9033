//! Adapters between callback-style operations and blocking calls.
//!
//! - [`to_sync`](mod@to_sync): wrap an operation that reports through
//!   callbacks into a function that blocks and returns the result
//! - [`to_async`](mod@to_async): wrap a plain function into one that runs on a
//!   worker thread and reports through callbacks
//!
//! The two directions are duals; wrapping a function with `to_async*` and
//! the result with the matching `to_sync*` gives back the original behaviour,
//! except that the body now runs on a worker thread.
//!
//! ```rust
//! use core_bridge::{no_start, to_async_split1, to_sync_split1};
//!
//! #[derive(Debug, PartialEq)]
//! struct DivideByZero;
//!
//! let tenth = to_async_split1(|x: i32| if x == 0 { Err(DivideByZero) } else { Ok(10 / x) });
//! let tenth = to_sync_split1(tenth, no_start);
//!
//! assert_eq!(tenth(5), Ok(2));
//! assert_eq!(tenth(0), Err(DivideByZero));
//! ```

pub mod callback;
pub mod to_async;
pub mod to_sync;

pub use callback::{no_start, AnyError, Completion, Failure, Reply, Status};
pub use core_exec::{dispatch, ConcurrentContext, ExecutionContext};
pub use to_async::*;
pub use to_sync::*;
