//! Runtime construction for execution contexts.
//!
//! We wrap Tokio's runtime builder so that downstream crates never need to
//! depend on Tokio directly. Only the blocking pool is used: jobs are plain
//! closures, not futures.

use crate::config::ExecConfig;
use crate::error::Result;
use std::sync::OnceLock;

pub use tokio::runtime::{Builder, Handle, Runtime};

static SHARED: OnceLock<Runtime> = OnceLock::new();

/// Builds a multi-threaded runtime from the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the operating system
/// refuses to spawn the runtime's threads.
pub fn build(config: &ExecConfig) -> Result<Runtime> {
    config.validate()?;

    let runtime = Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .max_blocking_threads(config.max_blocking_threads)
        .thread_keep_alive(config.keep_alive)
        .thread_name(config.thread_name.clone())
        .enable_all()
        .build()?;

    tracing::debug!(
        thread_name = %config.thread_name,
        max_blocking_threads = config.max_blocking_threads,
        "Built worker runtime"
    );

    Ok(runtime)
}

/// Returns a handle onto the process-wide runtime, building it on first use.
///
/// The shared runtime lives for the rest of the process and is never shut
/// down.
pub fn shared() -> Handle {
    SHARED
        .get_or_init(|| {
            build(&ExecConfig::default())
                .expect("core_exec::runtime::shared: failed to build Tokio runtime")
        })
        .handle()
        .clone()
}
