// crates/cube-conformance-client/src/config.rs
// ============================================================================
// Module: Target Configuration
// Description: Validated configuration for the API under test.
// Purpose: Centralize base URL, protocol version, and role credentials.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Target configuration is loaded once per suite run from a TOML document
//! and validated eagerly: an unusable base URL or duplicate role credentials
//! fail before any scenario dispatches. The base URL accepts an environment
//! override so the same fixture file can point at different deployments;
//! invalid UTF-8 or an empty override fails closed rather than silently
//! falling back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::ffi::OsStr;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;
use crate::roles::RoleId;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "CUBE_CONFORMANCE_BASE_URL";

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Credentials for one permission role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleCredential {
    /// Role these credentials belong to.
    pub role: RoleId,
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
}

/// Raw configuration document shape before validation.
#[derive(Debug, Deserialize)]
struct RawTargetConfig {
    /// Base URL of the API under test.
    base_url: String,
    /// Protocol version sent in the `X-API-VERSION` header.
    api_version: String,
    /// Absolute path of the login endpoint.
    login_path: String,
    /// Role credentials, unique per role.
    #[serde(default)]
    credentials: Vec<RoleCredential>,
}

/// Validated configuration for the API under test.
///
/// # Invariants
/// - `base_url` is absolute with an http or https scheme.
/// - `login_path` starts with `/`.
/// - `credentials` carries at most one entry per role.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    /// Validated base URL.
    base_url: Url,
    /// Protocol version sent with every request.
    api_version: String,
    /// Absolute login endpoint path.
    login_path: String,
    /// Role credentials.
    credentials: Vec<RoleCredential>,
}

impl TargetConfig {
    /// Builds a validated configuration from raw parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is unusable, a required
    /// field is empty, the login path is relative, or a role is duplicated.
    pub fn new(
        base_url: &str,
        api_version: impl Into<String>,
        login_path: impl Into<String>,
        credentials: Vec<RoleCredential>,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let api_version = api_version.into();
        if api_version.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "api_version",
            });
        }
        let login_path = login_path.into();
        if login_path.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "login_path",
            });
        }
        if !login_path.starts_with('/') {
            return Err(ConfigError::RelativeLoginPath {
                path: login_path,
            });
        }
        for (position, credential) in credentials.iter().enumerate() {
            let duplicated = credentials
                .iter()
                .skip(position + 1)
                .any(|other| other.role == credential.role);
            if duplicated {
                return Err(ConfigError::DuplicateRole {
                    role: credential.role.clone(),
                });
            }
        }
        Ok(Self {
            base_url,
            api_version,
            login_path,
            credentials,
        })
    }

    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document cannot be parsed or fails
    /// validation.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawTargetConfig = toml::from_str(raw).map_err(|err| ConfigError::Parse {
            detail: err.to_string(),
        })?;
        Self::new(&raw.base_url, raw.api_version, raw.login_path, raw.credentials)
    }

    /// Applies the base URL environment override when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when the override is not valid
    /// UTF-8 or is empty, and [`ConfigError`] URL variants when it does not
    /// parse.
    pub fn apply_env_override(self) -> Result<Self, ConfigError> {
        self.apply_base_url_override(env::var_os(BASE_URL_ENV).as_deref())
    }

    /// Applies a base URL override value as read from the environment.
    ///
    /// `None` means the variable is not set and leaves the configuration
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when the value is not valid
    /// UTF-8 or is empty, and [`ConfigError`] URL variants when it does not
    /// parse.
    pub fn apply_base_url_override(mut self, raw: Option<&OsStr>) -> Result<Self, ConfigError> {
        let Some(raw) = raw else {
            return Ok(self);
        };
        let Some(value) = raw.to_str() else {
            return Err(ConfigError::Environment {
                name: BASE_URL_ENV,
                detail: "value is not valid UTF-8".to_string(),
            });
        };
        if value.trim().is_empty() {
            return Err(ConfigError::Environment {
                name: BASE_URL_ENV,
                detail: "value is empty".to_string(),
            });
        }
        self.base_url = parse_base_url(value)?;
        Ok(self)
    }

    /// Returns the validated base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the protocol version.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the absolute login endpoint path.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Looks up the credentials configured for a role.
    #[must_use]
    pub fn credential(&self, role: &RoleId) -> Option<&RoleCredential> {
        self.credentials.iter().find(|credential| &credential.role == role)
    }
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Parses a base URL and checks the scheme.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::BaseUrl {
        detail: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
