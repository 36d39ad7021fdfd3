// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for conformance system-tests.
// Purpose: Provide the stub analytical API, readiness probes, and timeouts.
// Dependencies: system-tests, axum, cube-conformance-client
// ============================================================================

//! ## Overview
//! Shared helpers for conformance system-tests.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - The stub API is the only network dependency; everything binds loopback.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod readiness;
pub mod stub_api;
pub mod timeouts;
