// crates/cube-conformance-client/src/roles.rs
// ============================================================================
// Module: Role Identifiers
// Description: Opaque permission-role identifiers.
// Purpose: Provide a strongly typed key for credentials and cached tokens.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A role names a permission scope on the target API (for example `Admin`
//! or `Reader`). Roles are opaque strings on the wire; the newtype keeps
//! credential lookup and token caching strongly typed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Role Identifier
// ============================================================================

/// Opaque permission-role identifier.
///
/// # Invariants
/// - Serializes transparently as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Creates a role identifier.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    /// Returns the role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
