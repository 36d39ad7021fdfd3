// crates/cube-conformance-client/src/dispatch.rs
// ============================================================================
// Module: Request Dispatcher
// Description: Uniform HTTP dispatch with protocol and authorization headers.
// Purpose: Send one normalized request and return one raw envelope.
// Dependencies: async-trait, reqwest, serde, crate::{config, envelope, spec, token}
// ============================================================================

//! ## Overview
//! The dispatcher is the single transport path of the suite. It resolves the
//! request path against the configured base URL, injects the protocol
//! version header and the authorization header selected by the spec,
//! serializes the body when present, and returns the raw status, reason,
//! and body without interpreting them. No retries, no timeout policy beyond
//! the transport default. Every dispatch is appended to a shared transcript
//! so failing suites can be replayed from their recorded traffic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::TargetConfig;
use crate::envelope::ResponseEnvelope;
use crate::error::TransportError;
use crate::spec::AuthSelector;
use crate::spec::Method;
use crate::spec::RequestSpec;
use crate::token::TokenRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Protocol version header injected into every request.
pub const API_VERSION_HEADER: &str = "X-API-VERSION";

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Position in the transcript.
    pub sequence: u64,
    /// HTTP method name.
    pub method: String,
    /// Fully resolved request URL.
    pub url: String,
    /// Response status when the dispatch completed.
    pub status: Option<u16>,
    /// Transport error rendering when the dispatch failed.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Dispatch Seam
// ============================================================================

/// Transport seam the harness depends on.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Sends one normalized request and returns the raw envelope.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for genuine transport failures;
    /// non-2xx statuses are returned inside the envelope.
    async fn dispatch(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, TransportError>;
}

// ============================================================================
// SECTION: Request Dispatcher
// ============================================================================

/// HTTP dispatcher with transcript capture.
pub struct RequestDispatcher {
    /// Underlying HTTP client.
    http: Client,
    /// Target configuration.
    config: TargetConfig,
    /// Shared role-token registry.
    registry: Arc<TokenRegistry>,
    /// Recorded dispatches in order.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl RequestDispatcher {
    /// Creates a dispatcher over a configuration and token registry.
    #[must_use]
    pub fn new(config: TargetConfig, registry: Arc<TokenRegistry>) -> Self {
        Self {
            http: Client::new(),
            config,
            registry,
            transcript: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a snapshot of the dispatch transcript.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Appends one transcript entry.
    fn record(&self, method: Method, url: &str, outcome: &Result<ResponseEnvelope, TransportError>) {
        let mut transcript = self.transcript.lock().unwrap_or_else(PoisonError::into_inner);
        let sequence = u64::try_from(transcript.len()).unwrap_or(u64::MAX);
        transcript.push(TranscriptEntry {
            sequence,
            method: method.as_str().to_string(),
            url: url.to_string(),
            status: outcome.as_ref().ok().map(|envelope| envelope.status_code),
            error: outcome.as_ref().err().map(ToString::to_string),
        });
    }

    /// Performs the actual HTTP exchange.
    async fn send(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, TransportError> {
        let url = self.config.base_url().join(&spec.url).map_err(|err| {
            TransportError::UrlConstruction {
                detail: err.to_string(),
            }
        })?;
        let mut request = match spec.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
        };
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        request = request.header(API_VERSION_HEADER, self.config.api_version());
        for (name, value) in &spec.headers {
            request = request.header(name, value);
        }
        match &spec.auth {
            AuthSelector::Role(role) => {
                let token = self.registry.get(role).await?;
                request = request.bearer_auth(&token.value);
            }
            AuthSelector::Raw(value) => {
                request = request.bearer_auth(value);
            }
            AuthSelector::Anonymous => {}
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| TransportError::Connect {
            detail: err.to_string(),
        })?;
        let status = response.status();
        let raw_body = response.text().await.map_err(|err| TransportError::Connect {
            detail: err.to_string(),
        })?;
        Ok(ResponseEnvelope {
            status_code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            raw_body,
            is_successful: status.is_success(),
        })
    }
}

#[async_trait]
impl Dispatch for RequestDispatcher {
    async fn dispatch(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, TransportError> {
        let resolved = self
            .config
            .base_url()
            .join(&spec.url)
            .map_or_else(|_| spec.url.clone(), |url| url.to_string());
        let outcome = self.send(spec).await;
        self.record(spec.method, &resolved, &outcome);
        outcome
    }
}
