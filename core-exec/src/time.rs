//! Blocking time helpers.
//!
//! Execution contexts run plain closures on dedicated threads, so sleeping
//! here parks the calling thread rather than yielding to an executor.

pub use std::time::{Duration, Instant};

/// The pause used by [`wait_a_bit`].
pub const SHORT_WAIT: Duration = Duration::from_millis(10);

/// Parks the current thread for `duration`.
pub fn sleep_blocking(duration: Duration) {
    std::thread::sleep(duration);
}

/// Parks the current thread for [`SHORT_WAIT`].
///
/// Handy for simulating a callback that completes "a little later" on a
/// worker thread.
pub fn wait_a_bit() {
    sleep_blocking(SHORT_WAIT);
}
