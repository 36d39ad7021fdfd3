// crates/cube-conformance-core/src/core/filter.rs
// ============================================================================
// Module: Filter Expression Grammar
// Description: Tagged filter model serializing to the API query grammar.
// Purpose: Replace ad hoc anonymous filter construction with validated variants.
// Dependencies: crate::core::value, serde, thiserror
// ============================================================================

//! ## Overview
//! Filters are declarative predicates sent to the target API to select
//! entities for read or update. The wire contract is fixed: simple filters
//! serialize to `{value, type, condition}`, named filters add `name`, and
//! complex filters serialize to `{operation, filters}` recursively.
//!
//! The model enforces structural invariants only (valid enumerants,
//! non-empty complex children). Server-side applicability — for example that
//! `contains` is invalid for numeric attributes — is deliberately not
//! validated here; scenarios assert such rules through expected failures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::value::ScalarValue;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural filter construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A complex filter was built without children.
    #[error("complex filter requires at least one child filter")]
    EmptyComplexFilter,
}

// ============================================================================
// SECTION: Enumerants
// ============================================================================

/// Comparison condition applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Exact equality.
    Equals,
    /// Negated equality.
    NotEquals,
    /// Strictly greater.
    Greater,
    /// Greater or equal.
    GreaterOrEquals,
    /// Strictly less.
    Less,
    /// Less or equal.
    LessOrEquals,
    /// Substring containment.
    Contains,
}

/// Target of a simple (unnamed) filter or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SimpleKind {
    /// Entity identifier.
    Id,
    /// Entity display name.
    Name,
    /// Measure-group calendar value.
    Calendar,
}

/// Target of a named filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamedFilterKind {
    /// Typed attribute selected by name.
    Attribute,
    /// Dimension level selected by name.
    Level,
    /// Identifier within a named dimension.
    DimensionId,
    /// Display name within a named dimension.
    DimensionName,
    /// Identifier of a named measure.
    MeasureId,
    /// Display name of a named measure.
    MeasureName,
}

/// Boolean combinator for complex filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOperation {
    /// All children must match.
    And,
    /// At least one child must match.
    Or,
}

// ============================================================================
// SECTION: Filter Nodes
// ============================================================================

/// One node of the filter expression tree.
///
/// # Invariants
/// - `Complex` children are non-empty, enforced by [`ComplexFilter::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterNode {
    /// Predicate on an unnamed target: `{value, type, condition}`.
    Simple {
        /// Comparison value.
        value: ScalarValue,
        /// Filter target.
        #[serde(rename = "type")]
        kind: SimpleKind,
        /// Comparison condition.
        condition: Condition,
    },
    /// Predicate on a named target: `{value, type, name, condition}`.
    Named {
        /// Comparison value.
        value: ScalarValue,
        /// Filter target.
        #[serde(rename = "type")]
        kind: NamedFilterKind,
        /// Name of the targeted attribute, level, dimension, or measure.
        name: String,
        /// Comparison condition.
        condition: Condition,
    },
    /// Boolean combination: `{operation, filters}`.
    Complex(ComplexFilter),
}

impl FilterNode {
    /// Builds a simple filter node.
    #[must_use]
    pub const fn simple(value: ScalarValue, kind: SimpleKind, condition: Condition) -> Self {
        Self::Simple {
            value,
            kind,
            condition,
        }
    }

    /// Builds a named filter node.
    #[must_use]
    pub fn named(
        value: ScalarValue,
        kind: NamedFilterKind,
        name: impl Into<String>,
        condition: Condition,
    ) -> Self {
        Self::Named {
            value,
            kind,
            name: name.into(),
            condition,
        }
    }

    /// Builds an `and` combination of child filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyComplexFilter`] when `filters` is empty.
    pub fn and(filters: Vec<Self>) -> Result<Self, FilterError> {
        ComplexFilter::new(BoolOperation::And, filters).map(Self::Complex)
    }

    /// Builds an `or` combination of child filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyComplexFilter`] when `filters` is empty.
    pub fn or(filters: Vec<Self>) -> Result<Self, FilterError> {
        ComplexFilter::new(BoolOperation::Or, filters).map(Self::Complex)
    }
}

/// Validated boolean combination of filters.
///
/// # Invariants
/// - `filters` is non-empty; the only constructor enforces this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexFilter {
    /// Boolean combinator.
    operation: BoolOperation,
    /// Child filters, order preserved on the wire.
    filters: Vec<FilterNode>,
}

impl ComplexFilter {
    /// Builds a complex filter from a combinator and child filters.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyComplexFilter`] when `filters` is empty.
    pub fn new(operation: BoolOperation, filters: Vec<FilterNode>) -> Result<Self, FilterError> {
        if filters.is_empty() {
            return Err(FilterError::EmptyComplexFilter);
        }
        Ok(Self {
            operation,
            filters,
        })
    }

    /// Returns the boolean combinator.
    #[must_use]
    pub const fn operation(&self) -> BoolOperation {
        self.operation
    }

    /// Returns the child filters.
    #[must_use]
    pub fn filters(&self) -> &[FilterNode] {
        &self.filters
    }
}
