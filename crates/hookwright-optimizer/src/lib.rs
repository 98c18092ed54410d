//! Hookwright Optimizer - slim down what each chat request sends the model.
//!
//! Two strategies are available:
//!
//! - **first line**: every tool and parameter description is cut to its
//!   first line and tool metadata outside `type`/`function` is dropped.
//! - **overrides**: descriptions are replaced from a JSON lookup file, and a
//!   leading system message is replaced by the file's prefix plus an optional
//!   markdown document.
//!
//! [`optimize`] is the pure transformation; [`ToolOptimizerPlugin`] wires it
//! into the `chat.params` hook with load-once caching.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod descriptions;
pub mod error;
pub mod plugin;
pub mod rewrite;

pub use descriptions::{OptimizerConfig, derive_system_prompt};
pub use error::{OptimizerError, OptimizerResult};
pub use plugin::ToolOptimizerPlugin;
pub use rewrite::{OptimizeSummary, Rewrite, optimize};
