// crates/cube-conformance-core/src/lib.rs
// ============================================================================
// Module: Cube Conformance Core
// Description: Data model and verification engine for analytical API conformance.
// Purpose: Provide typed query/update grammar shapes and the structural verifier.
// Dependencies: bigdecimal, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! This crate holds the reusable core of the conformance kit: the tagged
//! scalar value model, entity records, the filter/field expression grammar
//! understood by the target analytical API, and the type-tolerant structural
//! verifier that turns actual-versus-expected comparison into a single
//! pass/fail verdict with accumulated diagnostics.
//!
//! The model is intentionally structural: it enforces wire-shape invariants
//! (valid enumerants, non-empty complex filters) and nothing about
//! server-side applicability. Response payloads are untrusted input and are
//! normalized through [`ScalarValue`] before comparison.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::entity::AttributeEntry;
pub use core::entity::EntityRecord;
pub use core::field::FieldNode;
pub use core::field::NamedFieldKind;
pub use core::field::UpdateDirective;
pub use core::filter::BoolOperation;
pub use core::filter::ComplexFilter;
pub use core::filter::Condition;
pub use core::filter::FilterError;
pub use core::filter::FilterNode;
pub use core::filter::NamedFilterKind;
pub use core::filter::SimpleKind;
pub use core::value::ScalarValue;
pub use core::value::ValueShapeError;
pub use runtime::verifier::ContentVerificationResult;
pub use runtime::verifier::verify;
pub use runtime::verifier::verify_count;
