// crates/cube-conformance-client/src/spec.rs
// ============================================================================
// Module: Request Specification
// Description: Normalized description of one HTTP request.
// Purpose: Replace per-method test hierarchies with one parameterized shape.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`RequestSpec`] is created per call and never retained: it captures the
//! method, target path, authorization selection, ordered query parameters,
//! extra headers, and an optional structured body. The authorization
//! selector deliberately supports omitted and literal (possibly invalid)
//! bearer values so negative scenarios can exercise the API's permission
//! enforcement.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::roles::RoleId;

// ============================================================================
// SECTION: Request Shape
// ============================================================================

/// HTTP method supported by the target API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read request.
    Get,
    /// Search or create request.
    Post,
    /// Update request.
    Put,
}

impl Method {
    /// Returns the canonical method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Authorization selection for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSelector {
    /// Bearer token for a configured role, resolved through the registry.
    Role(RoleId),
    /// Literal bearer value, valid or not, sent verbatim.
    Raw(String),
    /// No authorization header at all.
    Anonymous,
}

/// Normalized description of one HTTP request.
///
/// # Invariants
/// - `query` order is preserved on the wire.
/// - Created per call, never retained or mutated after dispatch.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Path (or absolute URL) resolved against the configured base URL.
    pub url: String,
    /// Authorization selection.
    pub auth: AuthSelector,
    /// Ordered query parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers beyond protocol and authorization.
    pub headers: Vec<(String, String)>,
    /// Optional structured request body.
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Creates a spec without query parameters, headers, or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>, auth: AuthSelector) -> Self {
        Self {
            method,
            url: url.into(),
            auth,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends one query parameter, consuming the spec.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends one header, consuming the spec.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the structured body, consuming the spec.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ============================================================================
// SECTION: Paging Parameters
// ============================================================================

/// Standard paging parameters of the target API.
///
/// # Invariants
/// - Pairs render in the fixed order `limit`, `skip`, `getAll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageQuery {
    /// Maximum number of entities to return (server rejects 0).
    pub limit: Option<u64>,
    /// Number of entities to skip.
    pub skip: Option<u64>,
    /// Whether to return the full collection regardless of limit.
    pub get_all: Option<bool>,
}

impl PageQuery {
    /// Renders the present parameters as ordered query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if let Some(get_all) = self.get_all {
            pairs.push(("getAll".to_string(), get_all.to_string()));
        }
        pairs
    }
}
