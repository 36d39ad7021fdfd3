// crates/cube-conformance-harness/src/lib.rs
// ============================================================================
// Module: Cube Conformance Harness
// Description: Single reusable execution path for conformance scenarios.
// Purpose: Compose dispatch, parsing, and verification into one verdict.
// Dependencies: cube-conformance-client, cube-conformance-core, serde,
// serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every scenario, positive or negative, goes through one strictly linear
//! path: build a request, dispatch it, parse the response, verify against
//! expectations, report. There are no loops and no retries; every failure
//! class — transport, unsuccessful status, parse, verification — collapses
//! into a single [`ContentVerificationResult`] at this boundary, and the
//! scenario decides whether a failed verdict is the expected negative
//! outcome or a regression.
//!
//! [`ContentVerificationResult`]: cube_conformance_core::ContentVerificationResult

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod parse;
pub mod scenario;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use parse::EntityPage;
pub use parse::ParseError;
pub use parse::WriteStats;
pub use parse::parse_entity_page;
pub use scenario::Expectation;
pub use scenario::ScenarioBody;
pub use scenario::ScenarioRequest;
pub use scenario::run_scenario;
pub use scenario::run_scenario_observed;
pub use telemetry::NoopObserver;
pub use telemetry::ScenarioObserver;
pub use telemetry::ScenarioOutcome;
