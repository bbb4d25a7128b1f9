//! Conformance tests for a live shared file systems deployment
//!
//! Point `MANILA_CONFORMANCE_CONFIG` at a manila-conformance YAML file and
//! run `cargo test -p manila-conformance-e2e`. Without it every test reports
//! a skip.
//!
//! ## Quick Start
//! ```ignore
//! use manila_conformance_e2e::{SharedHarness, TestContext};
//! use tokio::sync::OnceCell;
//!
//! static HARNESS: OnceCell<Option<SharedHarness>> = OnceCell::const_new();
//!
//! #[tokio::test]
//! async fn my_test() -> anyhow::Result<()> {
//!     let harness = HARNESS.get_or_init(|| async { SharedHarness::from_env().unwrap() }).await;
//!     let Some(harness) = harness else { return Ok(()) };
//!     let ctx = harness.context()?;
//!     let result = async { /* ... */ Ok(()) }.await;
//!     ctx.finish("my_test", result).await
//! }
//! ```

pub mod assertions;

pub use assertions::*;
pub use fixtures::*;
pub use harness::{init_logging, Cleanup, SharedHarness, TestContext, CONFIG_ENV};
