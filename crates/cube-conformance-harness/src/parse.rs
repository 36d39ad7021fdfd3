// crates/cube-conformance-harness/src/parse.rs
// ============================================================================
// Module: Response Parsing
// Description: Decode raw response bodies into typed entity pages.
// Purpose: Normalize the weakly typed wire shape before verification.
// Dependencies: cube-conformance-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Response bodies are untrusted input. The API renders identifiers
//! inconsistently (sometimes numbers, sometimes strings) and attribute
//! values in whatever representation the storage layer held, so parsing
//! normalizes everything through [`ScalarValue::from_json`] and stringifies
//! numeric identifiers. Parsing is all-or-nothing: a malformed member fails
//! the whole page with a diagnostic naming the offending entity.

// ============================================================================
// SECTION: Imports
// ============================================================================

use cube_conformance_core::AttributeEntry;
use cube_conformance_core::EntityRecord;
use cube_conformance_core::ScalarValue;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Response parsing failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not a valid entity page document.
    #[error("response body is not a valid entity page: {detail}")]
    Decode {
        /// Underlying decode cause.
        detail: String,
    },
    /// One entity member is malformed.
    #[error("entity {index}: {detail}")]
    Entity {
        /// Position of the offending entity.
        index: usize,
        /// Description of the malformed member.
        detail: String,
    },
    /// One attribute member is malformed.
    #[error("entity {index}, attribute {attribute}: {detail}")]
    Attribute {
        /// Position of the owning entity.
        index: usize,
        /// Attribute identifier or position.
        attribute: String,
        /// Description of the malformed member.
        detail: String,
    },
}

// ============================================================================
// SECTION: Page Shapes
// ============================================================================

/// Write-result metadata attached to update responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    /// Records created by the operation.
    pub created: u64,
    /// Records updated by the operation.
    pub updated: u64,
    /// Records skipped by permission restrictions.
    pub restricted: u64,
    /// Records left unchanged.
    pub unchanged: u64,
}

/// Typed list-with-metadata shape of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPage {
    /// Entities returned by the API, order preserved.
    pub entities: Vec<EntityRecord>,
    /// Write-result metadata when the response carries any.
    pub stats: Option<WriteStats>,
}

/// Raw attribute shape before normalization.
#[derive(Debug, Deserialize)]
struct RawAttribute {
    /// Attribute identifier, number or string.
    #[serde(rename = "attributeId")]
    attribute_id: Value,
    /// Attribute value, absent means null.
    #[serde(default)]
    value: Value,
}

/// Raw entity shape before normalization.
#[derive(Debug, Deserialize)]
struct RawEntity {
    /// Entity identifier, number or string.
    id: Value,
    /// Entity display name.
    name: Value,
    /// Folder hierarchy, top-down.
    #[serde(default)]
    path: Vec<String>,
    /// Raw attributes.
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

/// Raw page shape before normalization.
#[derive(Debug, Deserialize)]
struct RawPage {
    /// Raw entities.
    entities: Vec<RawEntity>,
    /// Created-record count for write operations.
    #[serde(default)]
    created: Option<u64>,
    /// Updated-record count for write operations.
    #[serde(default)]
    updated: Option<u64>,
    /// Restricted-record count for write operations.
    #[serde(default)]
    restricted: Option<u64>,
    /// Unchanged-record count for write operations.
    #[serde(default)]
    unchanged: Option<u64>,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Decodes a raw response body into a typed entity page.
///
/// # Errors
///
/// Returns [`ParseError`] when the document or any member does not match
/// the expected shape; no partial page is produced.
pub fn parse_entity_page(raw: &str) -> Result<EntityPage, ParseError> {
    let page: RawPage = serde_json::from_str(raw).map_err(|err| ParseError::Decode {
        detail: err.to_string(),
    })?;

    let mut entities = Vec::with_capacity(page.entities.len());
    for (index, raw_entity) in page.entities.into_iter().enumerate() {
        entities.push(normalize_entity(index, raw_entity)?);
    }

    let stats = collect_stats(&page.created, &page.updated, &page.restricted, &page.unchanged);
    Ok(EntityPage {
        entities,
        stats,
    })
}

/// Normalizes one raw entity.
fn normalize_entity(index: usize, raw: RawEntity) -> Result<EntityRecord, ParseError> {
    let id = identifier_text(&raw.id).ok_or_else(|| ParseError::Entity {
        index,
        detail: "id must be a string or number".to_string(),
    })?;
    let name = identifier_text(&raw.name).ok_or_else(|| ParseError::Entity {
        index,
        detail: "name must be a string or number".to_string(),
    })?;

    let mut attributes = Vec::with_capacity(raw.attributes.len());
    for raw_attribute in raw.attributes {
        let attribute_id =
            identifier_text(&raw_attribute.attribute_id).ok_or_else(|| ParseError::Attribute {
                index,
                attribute: raw_attribute.attribute_id.to_string(),
                detail: "attributeId must be a string or number".to_string(),
            })?;
        let value =
            ScalarValue::from_json(&raw_attribute.value).map_err(|err| ParseError::Attribute {
                index,
                attribute: attribute_id.clone(),
                detail: err.to_string(),
            })?;
        attributes.push(AttributeEntry {
            attribute_id,
            value,
        });
    }

    Ok(EntityRecord {
        id,
        name,
        path: raw.path,
        attributes,
    })
}

/// Stringifies a number-or-string identifier member.
fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Folds the optional write counters into one metadata record.
fn collect_stats(
    created: &Option<u64>,
    updated: &Option<u64>,
    restricted: &Option<u64>,
    unchanged: &Option<u64>,
) -> Option<WriteStats> {
    if created.is_none() && updated.is_none() && restricted.is_none() && unchanged.is_none() {
        return None;
    }
    Some(WriteStats {
        created: created.unwrap_or(0),
        updated: updated.unwrap_or(0),
        restricted: restricted.unwrap_or(0),
        unchanged: unchanged.unwrap_or(0),
    })
}
