//! # Core Runtime Module
//!
//! Provides the ambient runtime infrastructure shared by the adapter crates:
//! - Logging and tracing initialization
//!
//! ## Overview
//!
//! The adapters only emit `tracing` events; whether and how those events are
//! printed is decided once, by the host, through [`logging::init_logging`].

pub mod error;
pub mod logging;

pub use error::{Error, Result};
