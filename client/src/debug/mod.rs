//! # Logging
//!
//! Structured logging through `tracing`, written to a daily-rotated file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! // Keep the guard alive for the lifetime of the process
//! let _guard = nuru_client::debug::init();
//!
//! tracing::info!(pool_id = 3, amount = 1.5, "Deposited to pool");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: filter directive (default `nuru_client=info,warn`)
//! - `NURU_LOG_DIR`: log directory (default `logs`)
//! - `NURU_LOG_STDERR`: also log to stderr (`1`/`true`)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
