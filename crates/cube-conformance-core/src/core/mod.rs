// crates/cube-conformance-core/src/core/mod.rs
// ============================================================================
// Module: Core Data Model
// Description: Scalar values, entity records, and the query/update grammar.
// Purpose: Group the typed wire shapes shared across client and harness.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! Core data model modules.

pub mod entity;
pub mod field;
pub mod filter;
pub mod value;
