//! Language detection and translation endpoints.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use talent_i18n::{BatchTranslation, TranslationOrchestrator};
use talent_models::{ConfidenceTier, LanguageCode, TranslationMap};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::metrics::record_texts_processed;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub language_code: LanguageCode,
    pub language_name: &'static str,
    pub confidence: ConfidenceTier,
    pub confidence_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub target_languages: Vec<String>,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub source_language: LanguageCode,
    pub translations: TranslationMap,
    pub available_languages: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Deserialize)]
pub struct BatchTranslateRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub target_languages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchTranslateResponse {
    pub results: Vec<BatchTranslation>,
    pub total_processed: usize,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub supported_languages: BTreeMap<&'static str, &'static str>,
    pub total_languages: usize,
}

/// Resolve requested target codes, skipping unsupported ones.
///
/// An empty request means every language. A non-empty request in which
/// nothing is supported is rejected.
fn resolve_targets(requested: &[String]) -> ApiResult<Vec<LanguageCode>> {
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let targets: Vec<LanguageCode> = requested
        .iter()
        .filter_map(|code| LanguageCode::parse(code))
        .collect();

    if targets.is_empty() {
        return Err(ApiError::bad_request(format!(
            "No supported target languages in {:?}",
            requested
        )));
    }
    if targets.len() < requested.len() {
        debug!(requested = ?requested, "Skipping unsupported target languages");
    }
    Ok(targets)
}

/// POST /api/multilingual/detect
pub async fn detect_language(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> ApiResult<Json<DetectResponse>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let detection = state.orchestrator.detect(text);
    record_texts_processed("detect", 1);

    Ok(Json(DetectResponse {
        language_code: detection.language,
        language_name: detection.language.display_name(),
        confidence: detection.tier(),
        confidence_score: detection.confidence,
    }))
}

/// POST /api/multilingual/translate
pub async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let declared = request
        .source_language
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());
    let source = match declared {
        Some(code) => LanguageCode::parse(code)
            .ok_or_else(|| ApiError::bad_request(format!("Unsupported source language: {}", code)))?,
        None => state.orchestrator.detector().detect(text),
    };

    let targets = resolve_targets(&request.target_languages)?;
    let translations = state
        .orchestrator
        .translate_to(text, &targets, Some(source))
        .await;

    record_texts_processed("translate", 1);
    info!(
        source = %source,
        translated = translations.len(),
        "Translated text"
    );

    Ok(Json(TranslateResponse {
        source_language: source,
        translations,
        available_languages: TranslationOrchestrator::supported_languages(),
    }))
}

/// POST /api/multilingual/batch-translate
pub async fn batch_translate(
    State(state): State<AppState>,
    Json(request): Json<BatchTranslateRequest>,
) -> ApiResult<Json<BatchTranslateResponse>> {
    if request.texts.is_empty() {
        return Err(ApiError::bad_request("Texts array is required"));
    }
    if request.texts.len() > state.config.max_batch_size {
        return Err(ApiError::bad_request(format!(
            "At most {} texts per batch",
            state.config.max_batch_size
        )));
    }

    let targets = resolve_targets(&request.target_languages)?;
    let results = state
        .orchestrator
        .batch_translate(&request.texts, &targets)
        .await;

    record_texts_processed("batch_translate", results.len());
    info!(texts = results.len(), "Batch translation finished");

    Ok(Json(BatchTranslateResponse {
        total_processed: results.len(),
        results,
    }))
}

/// GET /api/multilingual/languages
pub async fn supported_languages() -> Json<LanguagesResponse> {
    let supported_languages = TranslationOrchestrator::supported_languages();
    Json(LanguagesResponse {
        total_languages: supported_languages.len(),
        supported_languages,
    })
}
