// crates/cube-conformance-core/src/runtime/mod.rs
// ============================================================================
// Module: Verification Runtime
// Description: Structural comparison of actual entities against fixtures.
// Purpose: Group the verification entry points.
// Dependencies: crate::core
// ============================================================================

//! Verification runtime modules.

pub mod verifier;
