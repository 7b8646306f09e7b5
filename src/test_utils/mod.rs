//! Test utilities for invoicegen
//!
//! Helpers shared by unit and integration tests: sample data files, sample
//! templates, and an isolated project directory preconfigured for the HTML
//! engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use invoicegen_cli::test_utils::{DataFixture, TemplateFixture, TestEnvironment};
//!
//! # fn example() -> anyhow::Result<()> {
//! let env = TestEnvironment::new()?;
//! let data = env.add_data(&DataFixture::csv_basic())?;
//! let template = env.add_template(&TemplateFixture::invoice())?;
//! assert!(data.exists() && template.exists());
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::{DataFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Installs a test-writer subscriber once per process. Uses `level` when
/// given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
