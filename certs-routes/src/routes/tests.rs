//! Contract tests for the verification endpoint: status codes, verdict bodies and the
//! cross-origin headers every response has to carry.
use crate::cors::{ALLOWED_HEADERS, CorsPolicy};
use crate::routes::{self, VERIFY_PATH};
use crate::state::CertAppState;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::{Method, StatusCode};
use axum_test::{TestResponse, TestServer};
use certs_core::CertificationRepository;
use certs_core::model::{
    CertificationId, FOUND_MESSAGE, ID_REQUIRED_MESSAGE, INVALID_BODY_MESSAGE,
    LOOKUP_ERROR_MESSAGE, NOT_FOUND_MESSAGE,
};
use certs_core::result::{RepoError, RepoResult};
use error_stack::IntoReport;
use mockall::{automock, predicate};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

#[allow(dead_code)]
#[derive(Debug, Clone)]
struct CertRepo;

#[automock]
impl CertificationRepository for CertRepo {
    async fn exists(&self, _id: CertificationId) -> RepoResult<bool> {
        unreachable!()
    }
}

fn id(raw: &str) -> CertificationId {
    CertificationId::new(raw).expect("non-empty id")
}

fn init_test_server_with(repo: MockCertRepo, cors: CorsPolicy) -> TestServer {
    let app_state = CertAppState::new_without_metrics(Arc::new(repo), cors);

    TestServer::new(routes::build(app_state)).expect("creation of test server")
}

fn init_test_server(repo: MockCertRepo) -> TestServer {
    init_test_server_with(repo, CorsPolicy::permissive())
}

async fn run_verify(repo: MockCertRepo, body: Value) -> TestResponse {
    init_test_server(repo).post(VERIFY_PATH).json(&body).await
}

fn assert_cors_headers(response: &TestResponse) {
    assert_eq!("*", response.header(ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(ALLOWED_HEADERS, response.header(ACCESS_CONTROL_ALLOW_HEADERS));
}

#[tokio::test]
async fn existing_certification_is_verified() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .with(predicate::eq(id("ABC123")))
        .once()
        .returning(|_| Ok(true));

    let response = run_verify(repo, json!({ "certificationId": "ABC123" })).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "verified": true, "message": FOUND_MESSAGE }));
}

#[tokio::test]
async fn unknown_certification_is_not_verified_but_ok() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .with(predicate::eq(id("UNKNOWN")))
        .once()
        .returning(|_| Ok(false));

    let response = run_verify(repo, json!({ "certificationId": "UNKNOWN" })).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "verified": false, "message": NOT_FOUND_MESSAGE }));
}

#[rstest]
#[case::empty(json!({ "certificationId": "" }))]
#[case::missing(json!({}))]
#[case::null(json!({ "certificationId": null }))]
#[case::other_fields_only(json!({ "holder": "someone", "issued": "2024-01-01" }))]
#[tokio::test]
async fn missing_certification_id_is_bad_request(#[case] body: Value) {
    // no expectations, the store must not be consulted
    let repo = MockCertRepo::new();

    let response = run_verify(repo, body).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "verified": false, "message": ID_REQUIRED_MESSAGE }));
}

#[rstest]
#[case::number(json!({ "certificationId": 42 }))]
#[case::array(json!(["ABC123"]))]
#[case::string(json!("ABC123"))]
#[tokio::test]
async fn wrongly_shaped_body_is_bad_request(#[case] body: Value) {
    let repo = MockCertRepo::new();

    let response = run_verify(repo, body).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "verified": false, "message": INVALID_BODY_MESSAGE }));
}

#[rstest]
#[case::array_holding_id(json!(["ABC123"]))]
#[case::nested_array(json!([["ABC123"]]))]
#[tokio::test]
async fn array_body_is_not_read_as_a_request(#[case] body: Value) {
    // a store that would verify anything, so only the shape check can produce a 400
    let mut repo = MockCertRepo::new();
    repo.expect_exists().returning(|_| Ok(true));

    let response = run_verify(repo, body).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "verified": false, "message": INVALID_BODY_MESSAGE }));
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let repo = MockCertRepo::new();

    let response = init_test_server(repo)
        .post(VERIFY_PATH)
        .text("certificationId=ABC123")
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "verified": false, "message": INVALID_BODY_MESSAGE }));
}

#[tokio::test]
async fn json_body_without_json_content_type_is_accepted() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists().once().returning(|_| Ok(true));

    let response = init_test_server(repo)
        .post(VERIFY_PATH)
        .text(r#"{"certificationId":"ABC123"}"#)
        .await;

    response.assert_status_ok();
}

#[rstest]
#[case::known_id("ABC123")]
#[case::unknown_id("UNKNOWN")]
#[tokio::test]
async fn store_error_is_internal_server_error(#[case] certification_id: &'static str) {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .once()
        .returning(|_| Err(RepoError::Lookup.into_report()));

    let response = run_verify(repo, json!({ "certificationId": certification_id })).await;

    response.assert_status_internal_server_error();
    response.assert_json(&json!({ "verified": false, "message": LOOKUP_ERROR_MESSAGE }));
}

#[tokio::test]
async fn id_is_passed_to_store_unchanged() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .with(predicate::eq(id("  abc123 ")))
        .once()
        .returning(|_| Ok(false));

    run_verify(repo, json!({ "certificationId": "  abc123 " }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn repeated_verification_gives_same_verdict() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .with(predicate::eq(id("ABC123")))
        .times(2)
        .returning(|_| Ok(true));

    let server = init_test_server(repo);
    let body = json!({ "certificationId": "ABC123" });

    let first = server.post(VERIFY_PATH).json(&body).await;
    let second = server.post(VERIFY_PATH).json(&body).await;

    assert_eq!(first.status_code(), second.status_code());
    assert_eq!(first.json::<Value>(), second.json::<Value>());
}

#[tokio::test]
async fn preflight_is_answered_without_touching_the_store() {
    let repo = MockCertRepo::new();

    let response = init_test_server(repo)
        .method(Method::OPTIONS, VERIFY_PATH)
        .await;

    response.assert_status_ok();
    assert!(response.as_bytes().is_empty());
    assert_cors_headers(&response);
}

#[tokio::test]
async fn preflight_on_unknown_path_is_answered() {
    let response = init_test_server(MockCertRepo::new())
        .method(Method::OPTIONS, "/somewhere-else")
        .await;

    response.assert_status_ok();
    assert_cors_headers(&response);
}

#[tokio::test]
async fn verified_response_has_cors_headers() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists().returning(|_| Ok(true));

    let response = run_verify(repo, json!({ "certificationId": "ABC123" })).await;

    assert_cors_headers(&response);
}

#[tokio::test]
async fn bad_request_response_has_cors_headers() {
    let response = run_verify(MockCertRepo::new(), json!({ "certificationId": "" })).await;

    response.assert_status_bad_request();
    assert_cors_headers(&response);
}

#[tokio::test]
async fn internal_error_response_has_cors_headers() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists()
        .returning(|_| Err(RepoError::Connection.into_report()));

    let response = run_verify(repo, json!({ "certificationId": "ABC123" })).await;

    response.assert_status_internal_server_error();
    assert_cors_headers(&response);
}

#[tokio::test]
async fn configured_origin_is_sent() {
    let mut repo = MockCertRepo::new();
    repo.expect_exists().returning(|_| Ok(false));
    let cors = CorsPolicy::with_origin("https://verify.example.com").expect("valid origin");

    let response = init_test_server_with(repo, cors)
        .post(VERIFY_PATH)
        .json(&json!({ "certificationId": "ABC123" }))
        .await;

    assert_eq!(
        "https://verify.example.com",
        response.header(ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn get_is_not_allowed_on_verify() {
    let response = init_test_server(MockCertRepo::new()).get(VERIFY_PATH).await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(&response);
}

#[tokio::test]
async fn metrics_disabled_is_service_unavailable() {
    let response = init_test_server(MockCertRepo::new()).get("/metrics").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn openapi_document_describes_verify_endpoint() {
    let response = init_test_server(MockCertRepo::new())
        .get("/api-docs/openapi.json")
        .await;

    response.assert_status_ok();
    let doc = response.json::<Value>();
    assert!(doc["paths"][VERIFY_PATH]["post"].is_object());
}
