// crates/cube-conformance-core/src/core/entity.rs
// ============================================================================
// Module: Entity Records
// Description: Normalized entity shape returned by and expected from the API.
// Purpose: Provide one record type for both expected fixtures and actual rows.
// Dependencies: crate::core::value, serde
// ============================================================================

//! ## Overview
//! An entity is one record returned by the analytical API: a dimension
//! element, a folder, or a measure-group element. The same shape serves as
//! the expected fixture in scenarios; expected records are partial attribute
//! specifications, so actual attributes without an expected counterpart are
//! not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::value::ScalarValue;

// ============================================================================
// SECTION: Entity Shapes
// ============================================================================

/// One typed attribute attached to an entity.
///
/// # Invariants
/// - `attribute_id` is unique within one entity's attribute sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEntry {
    /// Attribute identifier within the owning entity.
    #[serde(rename = "attributeId")]
    pub attribute_id: String,
    /// Attribute value.
    pub value: ScalarValue,
}

/// One entity record, used for both actual rows and expected fixtures.
///
/// # Invariants
/// - `path` lists enclosing folder names top-down; order is significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    /// Entity identifier.
    pub id: String,
    /// Entity display name.
    pub name: String,
    /// Folder hierarchy containing the entity, top-down.
    pub path: Vec<String>,
    /// Typed attributes attached to the entity.
    pub attributes: Vec<AttributeEntry>,
}

impl EntityRecord {
    /// Creates a record without path or attributes.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Replaces the folder path, consuming the record.
    #[must_use]
    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    /// Appends one attribute, consuming the record.
    #[must_use]
    pub fn with_attribute(mut self, attribute_id: impl Into<String>, value: ScalarValue) -> Self {
        self.attributes.push(AttributeEntry {
            attribute_id: attribute_id.into(),
            value,
        });
        self
    }

    /// Looks up an attribute value by identifier.
    #[must_use]
    pub fn attribute(&self, attribute_id: &str) -> Option<&ScalarValue> {
        self.attributes
            .iter()
            .find(|entry| entry.attribute_id == attribute_id)
            .map(|entry| &entry.value)
    }
}
