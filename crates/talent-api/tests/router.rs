//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use talent_api::{create_router, ApiConfig, AppState};
use talent_i18n::{LanguageDetector, TranslationConfig, TranslationOrchestrator, TranslationProvider};
use talent_store::{RetryConfig, StoreClient, StoreConfig};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JWT_SECRET: &str = "router-test-secret";

// =============================================================================
// Test Helpers
// =============================================================================

fn config() -> ApiConfig {
    ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        max_batch_size: 3,
        ..Default::default()
    }
}

fn store(url: &str) -> StoreClient {
    StoreClient::new(StoreConfig::new(url, "service-key").with_retry(RetryConfig::none())).unwrap()
}

/// Router without translation backends and a store nobody listens on.
fn offline_app() -> Router {
    let orchestrator = TranslationOrchestrator::new(
        Arc::new(LanguageDetector::new()),
        Arc::new(TranslationProvider::unconfigured()),
    );
    let state = AppState::new(config(), store("http://127.0.0.1:9"), Arc::new(orchestrator));
    create_router(state, None)
}

fn app_with_store(server: &MockServer) -> Router {
    let orchestrator = TranslationOrchestrator::new(
        Arc::new(LanguageDetector::new()),
        Arc::new(TranslationProvider::unconfigured()),
    );
    let state = AppState::new(config(), store(&server.uri()), Arc::new(orchestrator));
    create_router(state, None)
}

fn bearer(auth_id: &str) -> String {
    let claims = json!({
        "sub": auth_id,
        "email": "priya@example.com",
        "aud": "authenticated",
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn profile_row(id: Uuid) -> Value {
    json!({
        "id": id,
        "auth_id": "auth-1",
        "role": "talent",
        "full_name": "Priya Raman",
        "email": "priya@example.com",
        "professional_summary": "நான் ஒரு மென்பொருள் உருவாக்குநர்",
        "professional_summary_source_language": "ta",
        "professional_summary_translations": {
            "en": "I am a software developer",
            "ta": "நான் ஒரு மென்பொருள் உருவாக்குநர்"
        },
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

// =============================================================================
// Multilingual
// =============================================================================

#[tokio::test]
async fn test_languages_lists_six() {
    let (status, body) = send(offline_app(), get("/api/multilingual/languages")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_languages"], 6);
    assert_eq!(body["supported_languages"]["te"], "Telugu");
}

#[tokio::test]
async fn test_detect_tamil() {
    let request = post_json(
        "/api/multilingual/detect",
        json!({"text": "நான் ஒரு மென்பொருள் உருவாக்குநர்"}),
    );
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language_code"], "ta");
    assert_eq!(body["language_name"], "Tamil");
    assert!(body["confidence_score"].as_f64().unwrap() >= 0.5);
}

#[tokio::test]
async fn test_detect_blank_text_is_rejected() {
    let request = post_json("/api/multilingual/detect", json!({"text": "   "}));
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Text is required"));
}

#[tokio::test]
async fn test_translate_without_backends_returns_identity() {
    let text = "मैं एक सॉफ्टवेयर डेवलपर हूं";
    let request = post_json("/api/multilingual/translate", json!({"text": text}));
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source_language"], "hi");
    assert_eq!(body["translations"], json!({"hi": text}));
    assert_eq!(body["available_languages"].as_object().unwrap().len(), 6);
}

#[tokio::test]
async fn test_translate_rejects_unknown_source() {
    let request = post_json(
        "/api/multilingual/translate",
        json!({"text": "hello", "source_language": "xx"}),
    );
    let (status, _) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translate_fans_out_through_google() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"translations": [{"translatedText": "வணக்கம்"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let translation = TranslationConfig {
        google_api_key: Some("google-key".to_string()),
        google_api_url: server.uri(),
        pacing: Duration::ZERO,
        ..Default::default()
    };
    let orchestrator = TranslationOrchestrator::from_config(&translation).unwrap();
    let state = AppState::new(config(), store("http://127.0.0.1:9"), Arc::new(orchestrator));
    let app = create_router(state, None);

    let request = post_json(
        "/api/multilingual/translate",
        json!({"text": "hello", "source_language": "en", "target_languages": ["ta", "zz"]}),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translations"], json!({"en": "hello", "ta": "வணக்கம்"}));
}

#[tokio::test]
async fn test_batch_keeps_blank_entries() {
    let request = post_json(
        "/api/multilingual/batch-translate",
        json!({"texts": ["", "Looking for a remote role"]}),
    );
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_processed"], 2);
    assert_eq!(body["results"][0]["index"], 0);
    assert_eq!(body["results"][0]["source_language"], "unknown");
    assert_eq!(body["results"][0]["translations"], json!({}));
    assert_eq!(body["results"][1]["source_language"], "en");
}

#[tokio::test]
async fn test_batch_limits() {
    let empty = post_json("/api/multilingual/batch-translate", json!({"texts": []}));
    let (status, _) = send(offline_app(), empty).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_many = post_json(
        "/api/multilingual/batch-translate",
        json!({"texts": ["a", "b", "c", "d"]}),
    );
    let (status, _) = send(offline_app(), too_many).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Operational
// =============================================================================

#[tokio::test]
async fn test_health_sets_security_headers() {
    let response = offline_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_update_requires_token() {
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(json!({"location": "Chennai"}).to_string()))
        .unwrap();
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].as_str().unwrap().contains("Authorization"));
}

#[tokio::test]
async fn test_search_requires_query() {
    let (status, _) = send(offline_app(), get("/api/users/search?q=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_with_localized_summary() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", format!("eq.{id}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(id)])))
        .mount(&server)
        .await;

    let (status, body) = send(
        app_with_store(&server),
        get(&format!("/api/users/{id}?lang=hi")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["full_name"], "Priya Raman");
    // No Hindi entry, so English is served.
    assert_eq!(body["localized_summary"], "I am a software developer");
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, body) = send(
        app_with_store(&server),
        get(&format!("/api/users/{}", Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Not found: User not found");
}

#[tokio::test]
async fn test_create_user_stores_summary_language() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    let summary = "நான் ஒரு மென்பொருள் உருவாக்குநர்";

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("email", "eq.priya@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(body_partial_json(json!({
            "email": "priya@example.com",
            "professional_summary_source_language": "ta",
            "professional_summary_translations": {"ta": summary}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([profile_row(id)])))
        .expect(1)
        .mount(&server)
        .await;

    let request = post_json(
        "/api/users",
        json!({
            "role": "talent",
            "full_name": "Priya Raman",
            "email": "Priya@Example.com",
            "professional_summary": summary
        }),
    );
    let (status, body) = send(app_with_store(&server), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["id"], id.to_string());
}

#[tokio::test]
async fn test_talent_cannot_update_someone_else() {
    let server = MockServer::start().await;
    let caller_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("auth_id", "eq.auth-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row(caller_id)])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .header("authorization", bearer("auth-1"))
        .header("content-type", "application/json")
        .body(Body::from(json!({"location": "Madurai"}).to_string()))
        .unwrap();
    let (status, _) = send(app_with_store(&server), request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_saved_job_requires_reference() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/saved-jobs")
        .header("authorization", bearer("auth-1"))
        .header("content-type", "application/json")
        .body(Body::from(json!({"notes": "later"}).to_string()))
        .unwrap();
    let (status, body) = send(offline_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("job_id or internship_id"));
}
