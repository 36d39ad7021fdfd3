// system-tests/tests/helpers/timeouts.rs
// ============================================================================
// Module: System Test Timeouts
// Description: Centralized timeout configuration with env overrides.
// Purpose: Keep system-test timeouts consistent and configurable across suites.
// Dependencies: system-tests
// ============================================================================

use std::time::Duration;

use system_tests::config::SystemTestConfig;

/// Returns the effective timeout, honoring the environment override when set.
/// The override acts as a minimum to avoid shortening explicitly longer test
/// timeouts.
#[must_use]
pub fn resolve_timeout(requested: Duration) -> Duration {
    let config = SystemTestConfig::load().unwrap_or_else(|err| panic!("{err}"));
    match config.timeout {
        Some(override_timeout) => std::cmp::max(requested, override_timeout),
        None => requested,
    }
}
