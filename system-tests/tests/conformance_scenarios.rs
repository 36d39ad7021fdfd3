// system-tests/tests/conformance_scenarios.rs
// ============================================================================
// Module: Conformance Scenarios Suite
// Description: End-to-end scenarios against the stub analytical API.
// Purpose: Exercise login, dispatch, paging, search, and verification
// over real HTTP.
// Dependencies: helpers, cube-conformance-client, cube-conformance-core,
// cube-conformance-harness, tokio
// ============================================================================

//! ## Overview
//! End-to-end scenarios against the stub analytical API.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - The stub API is the only network dependency; everything binds loopback.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use cube_conformance_client::AuthSelector;
use cube_conformance_client::Method;
use cube_conformance_client::PageQuery;
use cube_conformance_client::PasswordLoginSource;
use cube_conformance_client::RequestDispatcher;
use cube_conformance_client::RoleId;
use cube_conformance_client::TargetConfig;
use cube_conformance_client::TokenRegistry;
use cube_conformance_core::Condition;
use cube_conformance_core::EntityRecord;
use cube_conformance_core::FilterNode;
use cube_conformance_core::ScalarValue;
use cube_conformance_core::SimpleKind;
use cube_conformance_harness::Expectation;
use cube_conformance_harness::ScenarioBody;
use cube_conformance_harness::ScenarioRequest;
use cube_conformance_harness::run_scenario;
use helpers::readiness::wait_for_api_ready;
use helpers::stub_api::STUB_API_VERSION;
use helpers::stub_api::STUB_CREDENTIALS;
use helpers::stub_api::StubApiHandle;
use helpers::stub_api::spawn_stub_api;
use helpers::timeouts::resolve_timeout;

const ELEMENTS_PATH: &str = "api/dimensions/city/elements";
const SEARCH_PATH: &str = "api/dimensions/city/elements/search";

/// Builds a validated target configuration pointing at the stub.
fn stub_config(stub: &StubApiHandle) -> TargetConfig {
    let mut document = format!(
        "base_url = \"{}\"\napi_version = \"{STUB_API_VERSION}\"\nlogin_path = \"/api/login\"\n",
        stub.base_url()
    );
    for (role, username, password) in STUB_CREDENTIALS {
        document.push_str(&format!(
            "\n[[credentials]]\nrole = \"{role}\"\nusername = \"{username}\"\npassword = \"{password}\"\n"
        ));
    }
    TargetConfig::from_toml_str(&document)
        .and_then(TargetConfig::apply_env_override)
        .expect("stub configuration must validate")
}

/// Builds a dispatcher with a fresh token registry over the stub.
fn stub_dispatcher(stub: &StubApiHandle) -> RequestDispatcher {
    let config = stub_config(stub);
    let registry =
        Arc::new(TokenRegistry::new(Arc::new(PasswordLoginSource::new(config.clone()))));
    RequestDispatcher::new(config, registry)
}

async fn spawn_ready_stub() -> StubApiHandle {
    let stub = spawn_stub_api().await.expect("stub api must start");
    wait_for_api_ready(stub.addr(), resolve_timeout(Duration::from_secs(10)))
        .await
        .expect("stub api must become ready");
    stub
}

fn moscow_fixture() -> EntityRecord {
    EntityRecord::new("4", "Moscow")
        .with_path(vec!["Europe".to_string(), "Russia".to_string()])
        .with_attribute("population", ScalarValue::Int(4_000_000))
}

#[tokio::test(flavor = "multi_thread")]
async fn anonymous_listing_is_rejected() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(Method::Get, ELEMENTS_PATH, AuthSelector::Anonymous);

    let result = run_scenario(&dispatcher, &request, &Expectation::count(1)).await;
    assert!(!result.is_success(), "anonymous listing must be rejected");
    assert_eq!(result.message(), "request failed: 401 Unauthorized");
}

#[tokio::test(flavor = "multi_thread")]
async fn fabricated_token_is_rejected() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(
        Method::Get,
        ELEMENTS_PATH,
        AuthSelector::Raw("not-a-real-credential".to_string()),
    );

    let result = run_scenario(&dispatcher, &request, &Expectation::count(1)).await;
    assert!(!result.is_success(), "fabricated token must be rejected");
    assert_eq!(result.message(), "request failed: 401 Unauthorized");
}

#[tokio::test(flavor = "multi_thread")]
async fn id_search_verifies_across_value_representations() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    // The filter carries a numeric id and the stub renders a numeric id and
    // float population; the fixture uses a string id and integer population.
    let request = ScenarioRequest::new(
        Method::Post,
        SEARCH_PATH,
        AuthSelector::Role(RoleId::new("admin")),
    )
    .with_body(ScenarioBody::Search(FilterNode::simple(
        ScalarValue::Int(4),
        SimpleKind::Id,
        Condition::Equals,
    )));
    let expectation = Expectation::entities(vec![moscow_fixture()]).with_count(1);

    let result = run_scenario(&dispatcher, &request, &expectation).await;
    assert!(result.is_success(), "unexpected failure: {}", result.message());
}

#[tokio::test(flavor = "multi_thread")]
async fn id_search_accepts_textual_filter_value() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(
        Method::Post,
        SEARCH_PATH,
        AuthSelector::Role(RoleId::new("admin")),
    )
    .with_body(ScenarioBody::Search(FilterNode::simple(
        ScalarValue::Text("4".to_string()),
        SimpleKind::Id,
        Condition::Equals,
    )));
    let expectation = Expectation::entities(vec![moscow_fixture()]).with_count(1);

    let result = run_scenario(&dispatcher, &request, &expectation).await;
    assert!(result.is_success(), "unexpected failure: {}", result.message());
}

#[tokio::test(flavor = "multi_thread")]
async fn paging_beyond_seeded_elements_yields_empty_page() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(
        Method::Get,
        ELEMENTS_PATH,
        AuthSelector::Role(RoleId::new("reader")),
    )
    .with_page(PageQuery {
        limit: Some(5),
        skip: Some(17),
        get_all: None,
    });

    let result = run_scenario(&dispatcher, &request, &Expectation::count(0)).await;
    assert!(result.is_success(), "unexpected failure: {}", result.message());
}

#[tokio::test(flavor = "multi_thread")]
async fn paged_window_returns_expected_slice() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(
        Method::Get,
        ELEMENTS_PATH,
        AuthSelector::Role(RoleId::new("reader")),
    )
    .with_page(PageQuery {
        limit: Some(2),
        skip: Some(3),
        get_all: None,
    });
    let expectation = Expectation::entities(vec![
        moscow_fixture(),
        EntityRecord::new("5", "Delhi"),
    ])
    .with_count(2);

    let result = run_scenario(&dispatcher, &request, &expectation).await;
    assert!(result.is_success(), "unexpected failure: {}", result.message());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_all_returns_every_seeded_element() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);
    let request = ScenarioRequest::new(
        Method::Get,
        ELEMENTS_PATH,
        AuthSelector::Role(RoleId::new("reader")),
    )
    .with_page(PageQuery {
        limit: None,
        skip: None,
        get_all: Some(true),
    });

    let result = run_scenario(&dispatcher, &request, &Expectation::count(16)).await;
    assert!(result.is_success(), "unexpected failure: {}", result.message());
}

#[tokio::test(flavor = "multi_thread")]
async fn transcript_records_every_dispatch_in_order() {
    let stub = spawn_ready_stub().await;
    let dispatcher = stub_dispatcher(&stub);

    let rejected = ScenarioRequest::new(Method::Get, ELEMENTS_PATH, AuthSelector::Anonymous);
    let accepted = ScenarioRequest::new(
        Method::Get,
        ELEMENTS_PATH,
        AuthSelector::Role(RoleId::new("reader")),
    )
    .with_page(PageQuery {
        limit: None,
        skip: None,
        get_all: Some(true),
    });

    let first = run_scenario(&dispatcher, &rejected, &Expectation::default()).await;
    assert!(!first.is_success(), "anonymous listing must be rejected");
    let second = run_scenario(&dispatcher, &accepted, &Expectation::count(16)).await;
    assert!(second.is_success(), "unexpected failure: {}", second.message());

    let transcript = dispatcher.transcript();
    assert_eq!(transcript.len(), 2, "one entry per dispatch");
    assert_eq!(transcript[0].sequence, 0);
    assert_eq!(transcript[0].status, Some(401));
    assert_eq!(transcript[1].sequence, 1);
    assert_eq!(transcript[1].status, Some(200));
    assert!(transcript[1].url.contains("/api/dimensions/city/elements"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_target_reports_transport_failure() {
    let stub = spawn_ready_stub().await;
    let config = stub_config(&stub);
    drop(stub);

    let registry =
        Arc::new(TokenRegistry::new(Arc::new(PasswordLoginSource::new(config.clone()))));
    let dispatcher = RequestDispatcher::new(config, registry);
    let request = ScenarioRequest::new(Method::Get, ELEMENTS_PATH, AuthSelector::Anonymous);

    let result = run_scenario(&dispatcher, &request, &Expectation::default()).await;
    assert!(!result.is_success(), "dispatch against a closed port must fail");
    assert!(
        result.message().starts_with("transport failure:"),
        "message classifies the failure: {}",
        result.message()
    );
}
