//! HTTP-level tests for the translation backends and the provider chain.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use talent_i18n::{
    DeepLBackend, DegradeReason, GoogleTranslateBackend, LanguageDetector, TranslateOutcome,
    TranslationBackend, TranslationConfig, TranslationOrchestrator, TranslationProvider,
};
use talent_models::LanguageCode;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn google_body(text: &str) -> serde_json::Value {
    json!({ "data": { "translations": [ { "translatedText": text } ] } })
}

fn google(server: &MockServer) -> GoogleTranslateBackend {
    GoogleTranslateBackend::new(reqwest::Client::new(), "test-key".into(), server.uri())
}

fn deepl(server: &MockServer) -> DeepLBackend {
    DeepLBackend::new(
        reqwest::Client::new(),
        "auth-key:fx".into(),
        format!("{}/v2/translate", server.uri()),
    )
}

#[tokio::test]
async fn test_google_backend_sends_codes_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("key", "test-key"))
        .and(body_string_contains("\"target\":\"ta\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_body("வேலை")))
        .expect(1)
        .mount(&server)
        .await;

    let translated = google(&server)
        .translate("job", LanguageCode::En, LanguageCode::Ta)
        .await
        .unwrap();
    assert_eq!(translated, "வேலை");
}

#[tokio::test]
async fn test_google_backend_surfaces_http_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = google(&server)
        .translate("job", LanguageCode::En, LanguageCode::Hi)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("403"));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_deepl_backend_uses_auth_header_and_upper_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key auth-key:fx"))
        .and(body_string_contains("target_lang=HI"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "translations": [ { "text": "काम" } ] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let translated = deepl(&server)
        .translate("work", LanguageCode::En, LanguageCode::Hi)
        .await
        .unwrap();
    assert_eq!(translated, "काम");
}

#[tokio::test]
async fn test_provider_falls_back_from_google_to_deepl() {
    let google_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&google_server)
        .await;

    let deepl_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "translations": [ { "text": "काम" } ] })),
        )
        .expect(1)
        .mount(&deepl_server)
        .await;

    let config = TranslationConfig {
        google_api_key: Some("test-key".into()),
        google_api_url: google_server.uri(),
        deepl_auth_key: Some("auth-key:fx".into()),
        deepl_api_url: format!("{}/v2/translate", deepl_server.uri()),
        ..Default::default()
    };
    let provider = TranslationProvider::from_config(&config).unwrap();

    let outcome = provider
        .try_translate("work", LanguageCode::En, LanguageCode::Hi)
        .await;
    assert_eq!(
        outcome,
        TranslateOutcome::Translated {
            text: "काम".to_string(),
            backend: "deepl"
        }
    );
}

#[tokio::test]
async fn test_provider_times_out_slow_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(google_body("late"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let backend: Arc<dyn TranslationBackend> = Arc::new(google(&server));
    let provider = TranslationProvider::new(vec![backend], Duration::from_millis(100));

    let outcome = provider
        .try_translate("job", LanguageCode::En, LanguageCode::Ml)
        .await;
    assert_eq!(
        outcome,
        TranslateOutcome::Degraded {
            reason: DegradeReason::TimedOut
        }
    );
    assert_eq!(
        provider.translate("job", LanguageCode::En, LanguageCode::Ml).await,
        "job"
    );
}

#[tokio::test]
async fn test_orchestrator_builds_full_map_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_body("translated")))
        .expect(5)
        .mount(&server)
        .await;

    let backend: Arc<dyn TranslationBackend> = Arc::new(google(&server));
    let provider = TranslationProvider::new(vec![backend], Duration::from_secs(5));
    let orchestrator =
        TranslationOrchestrator::new(Arc::new(LanguageDetector::new()), Arc::new(provider))
            .with_pacing(Duration::ZERO);

    let (source, map) = orchestrator
        .detect_and_translate("Experienced software developer")
        .await;

    assert_eq!(source, LanguageCode::En);
    assert_eq!(map.len(), 6);
    assert_eq!(map.get(LanguageCode::En), Some("Experienced software developer"));
    assert_eq!(map.get(LanguageCode::Bn), Some("translated"));
}

#[tokio::test]
async fn test_orchestrator_with_deepl_only_covers_hindi() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "translations": [ { "text": "काम" } ] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend: Arc<dyn TranslationBackend> = Arc::new(deepl(&server));
    let provider = TranslationProvider::new(vec![backend], Duration::from_secs(5));
    let orchestrator =
        TranslationOrchestrator::new(Arc::new(LanguageDetector::new()), Arc::new(provider))
            .with_pacing(Duration::ZERO);

    let map = orchestrator
        .translate_to_all("work", Some(LanguageCode::En))
        .await;

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(LanguageCode::Hi), Some("काम"));
}
