// crates/cube-conformance-harness/src/telemetry.rs
// ============================================================================
// Module: Harness Telemetry
// Description: Observability hooks for scenario execution.
// Purpose: Provide outcome and latency events without hard dependencies.
// Dependencies: cube-conformance-client
// ============================================================================

//! ## Overview
//! This module exposes a thin observer interface for scenario counters and
//! latency measurements. It is intentionally dependency-light so suite
//! runners can plug in their metrics backend of choice without redesign;
//! the default observer does nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use cube_conformance_client::Method;

// ============================================================================
// SECTION: Outcome Labels
// ============================================================================

/// Scenario outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Verification passed.
    Passed,
    /// Verification failed or short-circuited.
    Failed,
}

impl ScenarioOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

// ============================================================================
// SECTION: Observer Seam
// ============================================================================

/// Observer notified around each scenario execution.
pub trait ScenarioObserver: Send + Sync {
    /// Called immediately before the request is dispatched.
    fn on_dispatch(&self, method: Method, url: &str) {
        let _ = (method, url);
    }

    /// Called once with the terminal outcome and elapsed wall time.
    fn on_outcome(&self, outcome: ScenarioOutcome, elapsed: Duration) {
        let _ = (outcome, elapsed);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScenarioObserver for NoopObserver {}
