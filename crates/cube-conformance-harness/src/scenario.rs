// crates/cube-conformance-harness/src/scenario.rs
// ============================================================================
// Module: Scenario Execution
// Description: The single request-dispatch-verify path every scenario uses.
// Purpose: Collapse all failure classes into one verification verdict.
// Dependencies: cube-conformance-client, cube-conformance-core, serde_json,
// crate::{parse, telemetry}
// ============================================================================

//! ## Overview
//! Scenario execution is strictly linear: build request, dispatch, parse on
//! success, verify when expectations are supplied, report. An unsuccessful
//! envelope (non-2xx) or transport failure short-circuits with the status
//! or cause as the failure message — no parsing or verification is
//! attempted. Both verification steps run when both expectations are
//! present, and their diagnostics aggregate into one result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use cube_conformance_client::AuthSelector;
use cube_conformance_client::Dispatch;
use cube_conformance_client::Method;
use cube_conformance_client::PageQuery;
use cube_conformance_client::RequestSpec;
use cube_conformance_core::ContentVerificationResult;
use cube_conformance_core::EntityRecord;
use cube_conformance_core::FilterNode;
use cube_conformance_core::UpdateDirective;
use cube_conformance_core::verify;
use cube_conformance_core::verify_count;
use serde_json::Value;

use crate::parse::parse_entity_page;
use crate::telemetry::NoopObserver;
use crate::telemetry::ScenarioObserver;
use crate::telemetry::ScenarioOutcome;

// ============================================================================
// SECTION: Scenario Shapes
// ============================================================================

/// Structured request body of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioBody {
    /// Search request carrying a filter expression.
    Search(FilterNode),
    /// Update request carrying ordered update directives.
    Update(Vec<UpdateDirective>),
    /// Raw document for scenarios that deliberately send malformed bodies.
    Raw(Value),
}

impl ScenarioBody {
    /// Renders the body into its wire document.
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Search(filter) => serde_json::to_value(filter),
            Self::Update(directives) => serde_json::to_value(directives),
            Self::Raw(value) => Ok(value.clone()),
        }
    }
}

/// Declarative description of one scenario request.
#[derive(Debug, Clone)]
pub struct ScenarioRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path resolved against the configured base URL.
    pub path: String,
    /// Authorization selection.
    pub auth: AuthSelector,
    /// Optional paging parameters, rendered before extra query pairs.
    pub page: Option<PageQuery>,
    /// Extra ordered query parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Optional structured body.
    pub body: Option<ScenarioBody>,
}

impl ScenarioRequest {
    /// Creates a request without paging, query, headers, or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, auth: AuthSelector) -> Self {
        Self {
            method,
            path: path.into(),
            auth,
            page: None,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets paging parameters, consuming the request.
    #[must_use]
    pub const fn with_page(mut self, page: PageQuery) -> Self {
        self.page = Some(page);
        self
    }

    /// Appends one query parameter, consuming the request.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends one header, consuming the request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the structured body, consuming the request.
    #[must_use]
    pub fn with_body(mut self, body: ScenarioBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Scenario-supplied expectations, both optional.
#[derive(Debug, Clone, Default)]
pub struct Expectation {
    /// Expected entity count.
    pub count: Option<usize>,
    /// Expected entity fixtures, compared positionally.
    pub entities: Option<Vec<EntityRecord>>,
}

impl Expectation {
    /// Expects an exact entity count.
    #[must_use]
    pub const fn count(count: usize) -> Self {
        Self {
            count: Some(count),
            entities: None,
        }
    }

    /// Expects exact entity fixtures.
    #[must_use]
    pub const fn entities(entities: Vec<EntityRecord>) -> Self {
        Self {
            count: None,
            entities: Some(entities),
        }
    }

    /// Adds a count expectation, consuming the value.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one scenario through the linear dispatch-parse-verify path.
pub async fn run_scenario<D>(
    dispatcher: &D,
    request: &ScenarioRequest,
    expectation: &Expectation,
) -> ContentVerificationResult
where
    D: Dispatch + ?Sized,
{
    run_scenario_observed(dispatcher, request, expectation, &NoopObserver).await
}

/// Runs one scenario, reporting dispatch and outcome to an observer.
pub async fn run_scenario_observed<D, O>(
    dispatcher: &D,
    request: &ScenarioRequest,
    expectation: &Expectation,
    observer: &O,
) -> ContentVerificationResult
where
    D: Dispatch + ?Sized,
    O: ScenarioObserver + ?Sized,
{
    let started = Instant::now();
    let result = execute(dispatcher, request, expectation, observer).await;
    let outcome = if result.is_success() {
        ScenarioOutcome::Passed
    } else {
        ScenarioOutcome::Failed
    };
    observer.on_outcome(outcome, started.elapsed());
    result
}

/// Linear execution: build, dispatch, parse or fail, verify or skip.
async fn execute<D, O>(
    dispatcher: &D,
    request: &ScenarioRequest,
    expectation: &Expectation,
    observer: &O,
) -> ContentVerificationResult
where
    D: Dispatch + ?Sized,
    O: ScenarioObserver + ?Sized,
{
    let spec = match build_request(request) {
        Ok(spec) => spec,
        Err(message) => return ContentVerificationResult::failure(message),
    };
    observer.on_dispatch(spec.method, &spec.url);

    let envelope = match dispatcher.dispatch(&spec).await {
        Ok(envelope) => envelope,
        Err(err) => {
            return ContentVerificationResult::failure(format!("transport failure: {err}"));
        }
    };
    if !envelope.is_successful {
        return ContentVerificationResult::failure(format!(
            "request failed: {}",
            envelope.status_line()
        ));
    }

    let page = match parse_entity_page(&envelope.raw_body) {
        Ok(page) => page,
        Err(err) => {
            return ContentVerificationResult::failure(format!("response parsing failed: {err}"));
        }
    };

    let mut result = ContentVerificationResult::success();
    if let Some(expected_count) = expectation.count {
        result.append(verify_count(&page.entities, expected_count));
    }
    if let Some(expected_entities) = &expectation.entities {
        result.append(verify(&page.entities, expected_entities));
    }
    result
}

/// Builds the normalized request spec from a scenario description.
fn build_request(request: &ScenarioRequest) -> Result<RequestSpec, String> {
    let mut spec = RequestSpec::new(request.method, request.path.clone(), request.auth.clone());
    if let Some(page) = &request.page {
        for (name, value) in page.to_pairs() {
            spec = spec.with_query(name, value);
        }
    }
    for (name, value) in &request.query {
        spec = spec.with_query(name.clone(), value.clone());
    }
    for (name, value) in &request.headers {
        spec = spec.with_header(name.clone(), value.clone());
    }
    if let Some(body) = &request.body {
        let document = body
            .to_json()
            .map_err(|err| format!("request body serialization failed: {err}"))?;
        spec = spec.with_body(document);
    }
    Ok(spec)
}
