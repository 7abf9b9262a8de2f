#![allow(dead_code)]

// tests/common/mod.rs
use std::time::Duration;

use referee::RefereeConfig;

pub mod proptest_prelude;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    referee_test_support::logging::init();
}

/// Config with short deadlines so failure-path tests finish quickly.
pub fn quick_config() -> RefereeConfig {
    RefereeConfig {
        move_timeout: Duration::from_millis(300),
        watchdog_grace: Duration::from_millis(100),
        ..RefereeConfig::default()
    }
}

/// Fixed slack allowed on top of the watchdog for scheduling and teardown.
pub const OVERHEAD: Duration = Duration::from_millis(750);
