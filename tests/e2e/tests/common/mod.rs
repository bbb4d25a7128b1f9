//! Common test utilities
//!
//! Every test binary shares one [`SharedHarness`], loaded lazily from
//! `MANILA_CONFORMANCE_CONFIG`. Tests call [`context`] and return early when
//! it yields `None`.

pub use manila_conformance_e2e::*;

use anyhow::Result;
use tokio::sync::OnceCell;

/// Global shared harness; `None` when no configuration is given
static SHARED_HARNESS: OnceCell<Option<SharedHarness>> = OnceCell::const_new();

pub async fn shared_harness() -> Option<&'static SharedHarness> {
    SHARED_HARNESS
        .get_or_init(|| async {
            SharedHarness::from_env().expect("Failed to initialize shared harness")
        })
        .await
        .as_ref()
}

/// A fresh test context, or `None` (reported as a skip) without configuration
pub async fn context() -> Result<Option<TestContext<'static>>> {
    match shared_harness().await {
        Some(harness) => Ok(Some(harness.context()?)),
        None => {
            eprintln!("{} is not set; skipping", CONFIG_ENV);
            Ok(None)
        }
    }
}
