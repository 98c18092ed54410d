//! Hookwright Telemetry - logging setup for Hookwright plugins and the CLI.
//!
//! Plugins only emit `tracing` events; whoever embeds them installs a
//! subscriber once. Log output goes to stderr or a rolling file, never
//! stdout, because the CLI writes its results there.
//!
//! # Example
//!
//! ```rust,no_run
//! use hookwright_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), hookwright_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("hookwright_verify=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
