// crates/cube-conformance-core/src/core/field.rs
// ============================================================================
// Module: Field Expression Grammar
// Description: Tagged field model serializing to the API update grammar.
// Purpose: Describe values to set during update operations.
// Dependencies: crate::core::{filter, value}, serde
// ============================================================================

//! ## Overview
//! A field is one declarative update instruction: set this value on that
//! target. Fields serialize exactly like filters minus the `condition`
//! member. An update request body is an ordered sequence of
//! [`UpdateDirective`] values, each optionally scoped by a filter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::filter::FilterNode;
use crate::core::filter::SimpleKind;
use crate::core::value::ScalarValue;

// ============================================================================
// SECTION: Field Nodes
// ============================================================================

/// Target of a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamedFieldKind {
    /// Typed attribute selected by name.
    Attribute,
    /// Dimension level selected by name.
    Level,
}

/// One update instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldNode {
    /// Value for an unnamed target: `{value, type}`.
    Simple {
        /// Value to set.
        value: ScalarValue,
        /// Field target.
        #[serde(rename = "type")]
        kind: SimpleKind,
    },
    /// Value for a named target: `{value, type, name}`.
    Named {
        /// Value to set.
        value: ScalarValue,
        /// Field target.
        #[serde(rename = "type")]
        kind: NamedFieldKind,
        /// Name of the targeted attribute or level.
        name: String,
    },
}

impl FieldNode {
    /// Builds a simple field node.
    #[must_use]
    pub const fn simple(value: ScalarValue, kind: SimpleKind) -> Self {
        Self::Simple {
            value,
            kind,
        }
    }

    /// Builds a named field node.
    #[must_use]
    pub fn named(value: ScalarValue, kind: NamedFieldKind, name: impl Into<String>) -> Self {
        Self::Named {
            value,
            kind,
            name: name.into(),
        }
    }
}

// ============================================================================
// SECTION: Update Directives
// ============================================================================

/// One scoped set of update instructions.
///
/// # Invariants
/// - `filter` is omitted from the wire entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateDirective {
    /// Optional predicate selecting the entities to update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,
    /// Ordered update instructions.
    pub fields: Vec<FieldNode>,
}

impl UpdateDirective {
    /// Builds a directive applying to all entities.
    #[must_use]
    pub const fn unfiltered(fields: Vec<FieldNode>) -> Self {
        Self {
            filter: None,
            fields,
        }
    }

    /// Builds a directive scoped by a filter.
    #[must_use]
    pub const fn filtered(filter: FilterNode, fields: Vec<FieldNode>) -> Self {
        Self {
            filter: Some(filter),
            fields,
        }
    }
}
