//! User profile models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ModelError;
use crate::language::{LanguageCode, TranslationMap};

/// Role of an account on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Talent,
    Recruiter,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Talent => "talent",
            UserRole::Recruiter => "recruiter",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "talent" => Ok(UserRole::Talent),
            "recruiter" => Ok(UserRole::Recruiter),
            "admin" => Ok(UserRole::Admin),
            other => Err(ModelError::unknown("role", other)),
        }
    }
}

/// A stored user profile row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<String>,
    pub role: UserRole,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub professional_summary: Option<String>,
    #[serde(default)]
    pub professional_summary_source_language: Option<LanguageCode>,
    #[serde(default)]
    pub professional_summary_translations: Option<TranslationMap>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_availability")]
    pub availability: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferred_work_type: Vec<String>,
    #[serde(default)]
    pub education: Option<serde_json::Value>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub portfolio_website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Professional summary in the reader's language, if one is stored.
    pub fn localized_summary(&self, preferred: LanguageCode) -> Option<&str> {
        self.professional_summary_translations
            .as_ref()
            .and_then(|map| map.preferred(preferred))
            .or(self.professional_summary.as_deref())
    }
}

fn default_availability() -> String {
    "full-time".to_string()
}

fn default_work_type() -> Vec<String> {
    vec!["remote".to_string()]
}

/// Payload for creating a profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct NewUser {
    pub role: UserRole,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000))]
    pub professional_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 80))]
    pub years_of_experience: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_availability")]
    pub availability: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_work_type")]
    pub preferred_work_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<serde_json::Value>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub portfolio_website: Option<String>,
}

impl NewUser {
    /// Minimal profile with every optional field left empty.
    pub fn new(role: UserRole, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role,
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            location: None,
            professional_summary: None,
            experience_level: None,
            current_position: None,
            years_of_experience: 0,
            hourly_rate: None,
            availability: default_availability(),
            skills: Vec::new(),
            preferred_work_type: default_work_type(),
            education: None,
            certifications: Vec::new(),
            linkedin_url: None,
            github_url: None,
            portfolio_website: None,
        }
    }
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000))]
    pub professional_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 80))]
    pub years_of_experience: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_work_type: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub portfolio_website: Option<String>,
}

impl UserUpdate {
    /// True when the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_object().map(|o| o.is_empty()))
            .unwrap_or(true)
    }
}

/// Detected language and translations of a profile summary, stored as two
/// columns next to the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryTranslation {
    pub professional_summary_source_language: LanguageCode,
    pub professional_summary_translations: TranslationMap,
}

/// Filters for the talent directory.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TalentFilter {
    /// Comma-separated skill list.
    pub skills: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub availability: Option<String>,
}

impl TalentFilter {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .map(crate::posting::split_csv)
            .unwrap_or_default()
    }
}
