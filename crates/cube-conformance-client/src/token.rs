// crates/cube-conformance-client/src/token.rs
// ============================================================================
// Module: Token Registry
// Description: Role-scoped authentication-token cache with singleflight
// acquisition.
// Purpose: Guarantee one concurrent login per role across parallel scenarios.
// Dependencies: async-trait, reqwest, serde_json, tokio
// ============================================================================

//! ## Overview
//! Scenarios run concurrently and share one [`TokenRegistry`]. The registry
//! caches one token per role, acquired lazily on first use: when N callers
//! race on the same role, exactly one underlying acquisition runs and all N
//! observe the identical token. Acquisition failures propagate to every
//! waiting caller without retry and are not cached, so the next call
//! re-attempts. [`TokenRegistry::invalidate`] replaces (never mutates) a
//! token by dropping the cached cell; callers that already hold the old
//! token keep it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::sync::OnceCell;

use crate::config::TargetConfig;
use crate::error::AcquisitionError;
use crate::roles::RoleId;

// ============================================================================
// SECTION: Token Types
// ============================================================================

/// Credential issued for one permission role.
///
/// # Invariants
/// - Immutable once issued; invalidation replaces the token, never mutates.
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Role the token is scoped to.
    pub role: RoleId,
    /// Bearer token value.
    pub value: String,
    /// Acquisition instant.
    pub acquired_at: SystemTime,
}

/// Backend-agnostic token acquisition seam.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Performs one underlying acquisition (login) for a role.
    ///
    /// # Errors
    ///
    /// Returns [`AcquisitionError`] when the login cannot be completed.
    async fn acquire(&self, role: &RoleId) -> Result<AuthToken, AcquisitionError>;
}

// ============================================================================
// SECTION: Token Registry
// ============================================================================

/// Process-wide role-to-token cache with singleflight acquisition.
///
/// # Invariants
/// - At most one acquisition runs concurrently per role.
/// - A cell is populated only on success; failures are never cached.
pub struct TokenRegistry {
    /// Underlying acquisition backend.
    source: Arc<dyn TokenSource>,
    /// One lazily initialized cell per role.
    cells: Mutex<HashMap<RoleId, Arc<OnceCell<AuthToken>>>>,
}

impl TokenRegistry {
    /// Creates a registry over an acquisition backend.
    #[must_use]
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached token for a role, acquiring it on first use.
    ///
    /// Concurrent callers for the same role trigger exactly one underlying
    /// acquisition and observe the same resulting token.
    ///
    /// # Errors
    ///
    /// Returns [`AcquisitionError`] when the underlying acquisition fails;
    /// the failure is not cached and the next call re-attempts.
    pub async fn get(&self, role: &RoleId) -> Result<AuthToken, AcquisitionError> {
        let cell = {
            let mut cells = self.cells.lock().await;
            Arc::clone(cells.entry(role.clone()).or_insert_with(|| Arc::new(OnceCell::new())))
        };
        let token = cell.get_or_try_init(|| self.source.acquire(role)).await?;
        Ok(token.clone())
    }

    /// Drops the cached token for a role so the next `get` re-acquires.
    ///
    /// In-flight callers that already resolved the old cell keep the old
    /// token; only callers arriving after invalidation observe the
    /// replacement.
    pub async fn invalidate(&self, role: &RoleId) {
        self.cells.lock().await.remove(role);
    }
}

// ============================================================================
// SECTION: Password Login Source
// ============================================================================

/// Token source performing password login against the target API.
pub struct PasswordLoginSource {
    /// HTTP client for login calls.
    http: reqwest::Client,
    /// Target configuration carrying the login path and credentials.
    config: TargetConfig,
}

impl PasswordLoginSource {
    /// Creates a login source over the target configuration.
    #[must_use]
    pub fn new(config: TargetConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TokenSource for PasswordLoginSource {
    async fn acquire(&self, role: &RoleId) -> Result<AuthToken, AcquisitionError> {
        let credential =
            self.config.credential(role).ok_or_else(|| AcquisitionError::MissingCredentials {
                role: role.clone(),
            })?;
        let url = self.config.base_url().join(self.config.login_path()).map_err(|err| {
            AcquisitionError::Connect {
                role: role.clone(),
                detail: err.to_string(),
            }
        })?;
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({
                "username": credential.username,
                "password": credential.password,
            }))
            .send()
            .await
            .map_err(|err| AcquisitionError::Connect {
                role: role.clone(),
                detail: err.to_string(),
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|err| AcquisitionError::Connect {
            role: role.clone(),
            detail: err.to_string(),
        })?;
        if !status.is_success() {
            return Err(AcquisitionError::Login {
                role: role.clone(),
                detail: format!("status {status}: {body}"),
            });
        }
        let document: Value =
            serde_json::from_str(&body).map_err(|err| AcquisitionError::TokenShape {
                detail: err.to_string(),
            })?;
        let value = document
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| AcquisitionError::TokenShape {
                detail: "missing string `token` member".to_string(),
            })?;
        Ok(AuthToken {
            role: role.clone(),
            value: value.to_string(),
            acquired_at: SystemTime::now(),
        })
    }
}
