// crates/cube-conformance-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error taxonomy for configuration, token acquisition, and dispatch.
// Purpose: Keep failure classes distinct and stable for programmatic handling.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Three failure classes exist on the client side. Configuration errors are
//! raised before any scenario runs. Acquisition errors come out of the token
//! registry and are propagated without internal retry. Transport errors are
//! genuine connection-level failures of one dispatch call; non-2xx responses
//! are never transport errors — they surface as data in the response
//! envelope.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::roles::RoleId;

// ============================================================================
// SECTION: Acquisition Errors
// ============================================================================

/// Token acquisition failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - No variant is retried internally; the next registry call re-attempts.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// No credentials are configured for the role.
    #[error("no credentials configured for role {role}")]
    MissingCredentials {
        /// Role without configured credentials.
        role: RoleId,
    },
    /// The login endpoint rejected the credentials.
    #[error("login failed for role {role}: {detail}")]
    Login {
        /// Role whose login failed.
        role: RoleId,
        /// Status and body detail from the login response.
        detail: String,
    },
    /// The login endpoint was unreachable.
    #[error("login transport failure for role {role}: {detail}")]
    Connect {
        /// Role whose login was attempted.
        role: RoleId,
        /// Underlying transport cause.
        detail: String,
    },
    /// The login response did not carry a usable token.
    #[error("login response missing usable token: {detail}")]
    TokenShape {
        /// Description of the malformed response.
        detail: String,
    },
}

// ============================================================================
// SECTION: Transport Errors
// ============================================================================

/// Dispatch-level transport failures.
///
/// # Invariants
/// - Non-2xx statuses are never represented here; they are envelope data.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be constructed from the configured base.
    #[error("failed to construct request url: {detail}")]
    UrlConstruction {
        /// Underlying URL parse cause.
        detail: String,
    },
    /// Connection, DNS, or protocol-level send failure.
    #[error("transport failure: {detail}")]
    Connect {
        /// Underlying transport cause.
        detail: String,
    },
    /// Token acquisition failed while preparing the authorization header.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

// ============================================================================
// SECTION: Configuration Errors
// ============================================================================

/// Target configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse target configuration: {detail}")]
    Parse {
        /// Underlying parse cause.
        detail: String,
    },
    /// The base URL is not a valid absolute URL.
    #[error("invalid base url: {detail}")]
    BaseUrl {
        /// Underlying URL parse cause.
        detail: String,
    },
    /// The base URL uses a scheme other than http or https.
    #[error("unsupported base url scheme: {scheme}")]
    UnsupportedScheme {
        /// Offending scheme.
        scheme: String,
    },
    /// A required field is empty.
    #[error("configuration field must not be empty: {field}")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },
    /// The login path does not start with a slash.
    #[error("login path must be absolute (start with '/'): {path}")]
    RelativeLoginPath {
        /// Offending path.
        path: String,
    },
    /// Two credential entries name the same role.
    #[error("duplicate credentials for role {role}")]
    DuplicateRole {
        /// Duplicated role.
        role: RoleId,
    },
    /// An environment override is present but unusable.
    #[error("invalid environment override {name}: {detail}")]
    Environment {
        /// Environment variable name.
        name: &'static str,
        /// Description of the invalid value.
        detail: String,
    },
}
