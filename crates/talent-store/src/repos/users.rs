//! User profile repository.

use chrono::Utc;
use serde::Serialize;
use talent_models::{NewUser, SummaryTranslation, TalentFilter, UserProfile, UserRole, UserUpdate};
use tracing::info;
use uuid::Uuid;

use super::clamp_limit;
use crate::client::StoreClient;
use crate::error::{StoreError, StoreResult};
use crate::query::{ilike_condition, Query};

const TABLE: &str = "users";

#[derive(Serialize)]
struct NewUserRow<'a> {
    #[serde(flatten)]
    user: &'a NewUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth_id: Option<&'a str>,
    #[serde(flatten)]
    summary: Option<&'a SummaryTranslation>,
}

#[derive(Serialize)]
struct UserUpdateRow<'a> {
    #[serde(flatten)]
    update: &'a UserUpdate,
    #[serde(flatten)]
    summary: Option<&'a SummaryTranslation>,
    updated_at: chrono::DateTime<Utc>,
}

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: StoreClient,
}

impl UserRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Insert a profile. Fails with `Conflict` if the email is taken.
    pub async fn create(
        &self,
        user: &NewUser,
        auth_id: Option<&str>,
        summary: Option<&SummaryTranslation>,
    ) -> StoreResult<UserProfile> {
        if self.get_by_email(&user.email).await?.is_some() {
            return Err(StoreError::Conflict(format!(
                "user with email {} already exists",
                user.email
            )));
        }

        let row = NewUserRow {
            user,
            auth_id,
            summary,
        };
        let profile: UserProfile = self.client.insert(TABLE, &row).await?;
        info!(user_id = %profile.id, role = %profile.role, "Created user profile");
        Ok(profile)
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        self.client.select_one(TABLE, &Query::by("id", id)).await
    }

    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<UserProfile>> {
        self.client
            .select_one(TABLE, &Query::by("email", email.trim().to_lowercase()))
            .await
    }

    pub async fn get_by_auth_id(&self, auth_id: &str) -> StoreResult<Option<UserProfile>> {
        self.client
            .select_one(TABLE, &Query::by("auth_id", auth_id))
            .await
    }

    /// Apply a partial update; `None` when the profile does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        update: &UserUpdate,
        summary: Option<&SummaryTranslation>,
    ) -> StoreResult<Option<UserProfile>> {
        let mut row = serde_json::to_value(UserUpdateRow {
            update,
            summary,
            updated_at: Utc::now(),
        })?;
        // A cleared summary takes its translations with it.
        let cleared = update
            .professional_summary
            .as_deref()
            .is_some_and(|s| s.trim().is_empty());
        if cleared && summary.is_none() {
            if let Some(fields) = row.as_object_mut() {
                fields.insert("professional_summary_source_language".into(), serde_json::Value::Null);
                fields.insert("professional_summary_translations".into(), serde_json::Value::Null);
            }
        }

        let rows: Vec<UserProfile> = self
            .client
            .update(TABLE, &Query::by("id", id), &row)
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Remove a profile; `false` when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let removed = self.client.delete(TABLE, &Query::by("id", id)).await?;
        if removed > 0 {
            info!(user_id = %id, "Deleted user profile");
        }
        Ok(removed > 0)
    }

    /// Talent directory with optional filters.
    pub async fn list_talents(&self, filter: &TalentFilter, limit: Option<u32>) -> StoreResult<Vec<UserProfile>> {
        let mut query = Query::by("role", UserRole::Talent);

        let skills = filter.skill_list();
        if !skills.is_empty() {
            query = query.overlaps("skills", &skills);
        }
        if let Some(location) = non_blank(&filter.location) {
            query = query.ilike("location", location);
        }
        if let Some(level) = non_blank(&filter.experience_level) {
            query = query.eq("experience_level", level);
        }
        if let Some(availability) = non_blank(&filter.availability) {
            query = query.eq("availability", availability);
        }

        let query = query.order("created_at", false).limit(clamp_limit(limit));
        self.client.select(TABLE, &query).await
    }

    /// Name or email search, optionally within one role.
    pub async fn search(&self, term: &str, role: Option<UserRole>, limit: Option<u32>) -> StoreResult<Vec<UserProfile>> {
        let mut query = Query::new().or(&[
            ilike_condition("full_name", term),
            ilike_condition("email", term),
        ]);
        if let Some(role) = role {
            query = query.eq("role", role);
        }
        self.client
            .select(TABLE, &query.limit(clamp_limit(limit)))
            .await
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
