//! Hookwright Test - shared test utilities for Hookwright plugins.
//!
//! Add to a crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! hookwright-test.workspace = true
//! ```
//!
//! Then use in tests:
//!
//! ```rust,ignore
//! use hookwright_test::MockHost;
//!
//! #[tokio::test]
//! async fn test_failure_is_reported() {
//!     let host = MockHost::new();
//!     // ... build a plugin with `host.client()` ...
//!     assert_eq!(host.sent_prompts().len(), 1);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
