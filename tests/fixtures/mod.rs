//! Test fixtures and helpers for emojikit tests.
//!
//! - [`BundleBuilder`] - writes a bundle directory (manifest + assets) into a temp dir
//! - [`CapturedLogs`] - collects `tracing` output for assertions
//! - [`test_data`] - sample keys, texts and timestamps

#![allow(clippy::nursery)] // Test fixtures prioritize clarity over pedantry
#![allow(clippy::pedantic)] // Test fixtures prioritize clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

pub mod bundle_dir;
pub mod logs;
pub mod test_data;

pub use bundle_dir::*;
pub use logs::*;
pub use test_data::*;

use std::sync::Once;

/// Route `tracing` output through the test harness once per binary.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
