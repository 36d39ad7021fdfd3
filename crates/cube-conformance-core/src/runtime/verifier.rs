// crates/cube-conformance-core/src/runtime/verifier.rs
// ============================================================================
// Module: Entity Verifier
// Description: Type-tolerant structural equality over entity sequences.
// Purpose: Turn actual-versus-expected comparison into one verdict with
// accumulated diagnostics.
// Dependencies: crate::core::{entity, value}
// ============================================================================

//! ## Overview
//! The verifier is a golden-fixture differ: it pairs actual and expected
//! entities positionally (index `i` against index `i`, matching the stable
//! ordering the target API guarantees), compares identifiers and names
//! exactly, folder paths as ordered sequences, and attributes set-like by
//! identifier under the cross-representation equality rule of
//! [`ScalarValue::loosely_equals`].
//!
//! Discrepancies never short-circuit: every mismatch across every entity is
//! recorded, and the verdict is a success exactly when no discrepancy was
//! recorded. `verify(a, a)` always succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::entity::EntityRecord;
use crate::core::value::ScalarValue;

// ============================================================================
// SECTION: Verification Result
// ============================================================================

/// Single pass/fail verdict with an appendable diagnostic message.
///
/// # Invariants
/// - Failure is sticky: appending any failed result keeps the verdict failed.
/// - `message` is empty exactly when no discrepancy was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentVerificationResult {
    /// Whether verification recorded no discrepancy.
    is_success: bool,
    /// Accumulated diagnostics, one discrepancy per line.
    message: String,
}

impl ContentVerificationResult {
    /// Builds a passing result with no diagnostics.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            is_success: true,
            message: String::new(),
        }
    }

    /// Builds a failing result carrying one diagnostic.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
        }
    }

    /// Returns whether the verdict is a pass.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.is_success
    }

    /// Returns the accumulated diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Merges another result into this one.
    ///
    /// The verdict stays a pass only when both results passed; diagnostic
    /// lines are concatenated in order.
    pub fn append(&mut self, other: Self) {
        self.is_success = self.is_success && other.is_success;
        if other.message.is_empty() {
            return;
        }
        if !self.message.is_empty() {
            self.message.push('\n');
        }
        self.message.push_str(&other.message);
    }
}

/// Ordered accumulator for discrepancy diagnostics.
#[derive(Debug, Default)]
struct DiscrepancyLog {
    /// Recorded discrepancies, one per line.
    lines: Vec<String>,
}

impl DiscrepancyLog {
    /// Records one discrepancy.
    fn record(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Collapses the log into a verdict.
    fn into_result(self) -> ContentVerificationResult {
        if self.lines.is_empty() {
            ContentVerificationResult::success()
        } else {
            ContentVerificationResult::failure(self.lines.join("\n"))
        }
    }
}

// ============================================================================
// SECTION: Verification Entry Points
// ============================================================================

/// Verifies that a response carries exactly `expected` entities.
///
/// The failure diagnostic names both counts.
#[must_use]
pub fn verify_count(actual: &[EntityRecord], expected: usize) -> ContentVerificationResult {
    if actual.len() == expected {
        ContentVerificationResult::success()
    } else {
        ContentVerificationResult::failure(format!(
            "entity count mismatch: expected {expected}, actual {}",
            actual.len()
        ))
    }
}

/// Verifies actual entities against expected fixtures positionally.
///
/// A length mismatch fails immediately without field comparison. Otherwise
/// every discrepancy across every pair is accumulated into one diagnostic;
/// the verdict is a pass exactly when none was recorded. Expected records
/// are partial: actual attributes without an expected counterpart are
/// ignored, and an expected null matches a missing actual attribute.
#[must_use]
pub fn verify(actual: &[EntityRecord], expected: &[EntityRecord]) -> ContentVerificationResult {
    if actual.len() != expected.len() {
        return ContentVerificationResult::failure(format!(
            "entity count mismatch: expected {}, actual {}",
            expected.len(),
            actual.len()
        ));
    }

    let mut log = DiscrepancyLog::default();
    for (index, (actual_entity, expected_entity)) in actual.iter().zip(expected).enumerate() {
        compare_entities(&mut log, index, actual_entity, expected_entity);
    }
    log.into_result()
}

// ============================================================================
// SECTION: Pairwise Comparison
// ============================================================================

/// Compares one actual/expected pair, recording every discrepancy.
fn compare_entities(
    log: &mut DiscrepancyLog,
    index: usize,
    actual: &EntityRecord,
    expected: &EntityRecord,
) {
    if actual.id != expected.id {
        log.record(format!(
            "entity {index}: id mismatch: expected \"{}\", actual \"{}\"",
            expected.id, actual.id
        ));
    }
    if actual.name != expected.name {
        log.record(format!(
            "entity {index}: name mismatch: expected \"{}\", actual \"{}\"",
            expected.name, actual.name
        ));
    }
    if actual.path != expected.path {
        log.record(format!(
            "entity {index}: path mismatch: expected [{}], actual [{}]",
            expected.path.join(" / "),
            actual.path.join(" / ")
        ));
    }
    for entry in &expected.attributes {
        compare_attribute(log, index, actual, &entry.attribute_id, &entry.value);
    }
}

/// Compares one expected attribute against the actual entity.
fn compare_attribute(
    log: &mut DiscrepancyLog,
    index: usize,
    actual: &EntityRecord,
    attribute_id: &str,
    expected_value: &ScalarValue,
) {
    match actual.attribute(attribute_id) {
        None => {
            if !expected_value.is_null() {
                log.record(format!(
                    "entity {index}: attribute \"{attribute_id}\" missing: expected {expected_value}"
                ));
            }
        }
        Some(actual_value) => {
            if !expected_value.loosely_equals(actual_value) {
                log.record(format!(
                    "entity {index}: attribute \"{attribute_id}\" mismatch: expected \
                     {expected_value}, actual {actual_value}"
                ));
            }
        }
    }
}
