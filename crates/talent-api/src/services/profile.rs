//! Profile service: sanitizes profile input and keeps the translated
//! professional summary in step with the original text.

use std::sync::Arc;

use talent_i18n::TranslationOrchestrator;
use talent_models::{NewUser, SummaryTranslation, UserProfile, UserUpdate};
use talent_store::UserRepository;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::security::{normalize_email, sanitize_name, sanitize_optional};

#[derive(Clone)]
pub struct ProfileService {
    orchestrator: Arc<TranslationOrchestrator>,
    users: UserRepository,
}

impl ProfileService {
    pub fn new(orchestrator: Arc<TranslationOrchestrator>, users: UserRepository) -> Self {
        Self { orchestrator, users }
    }

    /// Detect and fan out a summary. Blank summaries produce nothing.
    pub async fn translate_summary(&self, summary: Option<&str>) -> Option<SummaryTranslation> {
        let summary = summary.filter(|s| !s.trim().is_empty())?;
        let (source, translations) = self.orchestrator.detect_and_translate(summary).await;
        debug!(
            source = %source,
            languages = translations.len(),
            "Translated professional summary"
        );
        Some(SummaryTranslation {
            professional_summary_source_language: source,
            professional_summary_translations: translations,
        })
    }

    /// Validate, sanitize and store a new profile.
    pub async fn create(&self, mut user: NewUser, auth_id: Option<&str>) -> ApiResult<UserProfile> {
        user.full_name = sanitize_name(&user.full_name);
        user.email = normalize_email(&user.email);
        user.professional_summary = sanitize_optional(user.professional_summary.as_deref());
        user.validate()?;

        let summary = self
            .translate_summary(user.professional_summary.as_deref())
            .await;
        let profile = self.users.create(&user, auth_id, summary.as_ref()).await?;

        info!(user_id = %profile.id, "Profile created");
        Ok(profile)
    }

    /// Apply a partial update; `None` when the profile does not exist.
    pub async fn update(&self, id: Uuid, mut update: UserUpdate) -> ApiResult<Option<UserProfile>> {
        if let Some(name) = update.full_name.as_deref() {
            update.full_name = Some(sanitize_name(name));
        }
        if update.professional_summary.is_some() {
            // An explicit empty summary clears the column.
            update.professional_summary = Some(
                sanitize_optional(update.professional_summary.as_deref()).unwrap_or_default(),
            );
        }
        update.validate()?;

        if update.is_empty() {
            return Err(ApiError::bad_request("No fields to update"));
        }

        let summary = self
            .translate_summary(update.professional_summary.as_deref())
            .await;
        Ok(self.users.update(id, &update, summary.as_ref()).await?)
    }
}
