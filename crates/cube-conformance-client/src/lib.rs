// crates/cube-conformance-client/src/lib.rs
// ============================================================================
// Module: Cube Conformance Client
// Description: Role-scoped token cache and uniform HTTP request dispatch.
// Purpose: Provide the transport seam every conformance scenario goes through.
// Dependencies: async-trait, reqwest, serde, serde_json, thiserror, tokio, toml, url
// ============================================================================

//! ## Overview
//! This crate owns the client side of the conformance kit: target
//! configuration, the role-scoped [`TokenRegistry`] with its singleflight
//! acquisition contract, the normalized [`RequestSpec`]/[`ResponseEnvelope`]
//! pair, and the [`RequestDispatcher`] that injects protocol and
//! authorization headers and returns raw responses without interpreting
//! them. The dispatcher performs no retries and applies no timeout policy
//! beyond the transport default; non-2xx statuses are data, not errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod roles;
pub mod spec;
pub mod token;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::BASE_URL_ENV;
pub use config::RoleCredential;
pub use config::TargetConfig;
pub use dispatch::API_VERSION_HEADER;
pub use dispatch::Dispatch;
pub use dispatch::RequestDispatcher;
pub use dispatch::TranscriptEntry;
pub use envelope::ResponseEnvelope;
pub use error::AcquisitionError;
pub use error::ConfigError;
pub use error::TransportError;
pub use roles::RoleId;
pub use spec::AuthSelector;
pub use spec::Method;
pub use spec::PageQuery;
pub use spec::RequestSpec;
pub use token::AuthToken;
pub use token::PasswordLoginSource;
pub use token::TokenRegistry;
pub use token::TokenSource;
