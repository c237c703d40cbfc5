//! DeepL (v2 REST) backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use talent_models::LanguageCode;

use super::TranslationBackend;
use crate::error::{TranslationError, TranslationResult};

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

/// DeepL covers only English and Hindi among the supported languages.
pub struct DeepLBackend {
    http: Client,
    auth_key: String,
    api_url: String,
}

impl DeepLBackend {
    pub fn new(http: Client, auth_key: String, api_url: String) -> Self {
        Self {
            http,
            auth_key,
            api_url,
        }
    }

    fn handles(lang: LanguageCode) -> bool {
        matches!(lang, LanguageCode::En | LanguageCode::Hi)
    }

    fn source_code(lang: LanguageCode) -> &'static str {
        match lang {
            LanguageCode::Hi => "HI",
            _ => "EN",
        }
    }

    // Plain "EN" is deprecated as a target.
    fn target_code(lang: LanguageCode) -> &'static str {
        match lang {
            LanguageCode::Hi => "HI",
            _ => "EN-US",
        }
    }
}

#[async_trait]
impl TranslationBackend for DeepLBackend {
    fn name(&self) -> &'static str {
        "deepl"
    }

    fn supports(&self, source: LanguageCode, target: LanguageCode) -> bool {
        Self::handles(source) && Self::handles(target)
    }

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> TranslationResult<String> {
        if !self.supports(source, target) {
            return Err(TranslationError::UnsupportedPair {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        let params = [
            ("text", text),
            ("source_lang", Self::source_code(source)),
            ("target_lang", Self::target_code(target)),
        ];

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::from_http_status(status.as_u16(), body));
        }

        let parsed: TranslateResponse = response.json().await?;
        parsed
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslationError::InvalidResponse("no translations returned".to_string()))
    }
}
