//! Job and internship application models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};

/// Kind of opportunity an application or bookmark refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Internship,
    Freelance,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Internship => "internship",
            JobType::Freelance => "freelance",
        }
    }

    /// Infer the job type from which reference is present.
    pub fn infer(internship_id: Option<Uuid>) -> Self {
        if internship_id.is_some() {
            JobType::Internship
        } else {
            JobType::Freelance
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewing,
    Shortlisted,
    Rejected,
    Accepted,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// No further transitions happen from these states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Accepted | ApplicationStatus::Withdrawn
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored application row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Application {
    pub id: Uuid,
    pub talent_id: Uuid,
    #[serde(default)]
    pub job_id: Option<Uuid>,
    #[serde(default)]
    pub internship_id: Option<Uuid>,
    pub job_type: JobType,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub application_data: serde_json::Value,
    #[serde(default)]
    pub recruiter_notes: Option<String>,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for submitting an application.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NewApplication {
    pub talent_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internship_id: Option<Uuid>,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default = "empty_object")]
    pub application_data: serde_json::Value,
}

impl NewApplication {
    /// Exactly one target reference must be set, and it must match `job_type`.
    pub fn check_target(&self) -> ModelResult<()> {
        match (self.job_type, self.job_id, self.internship_id) {
            (JobType::Internship, None, Some(_)) | (JobType::Freelance, Some(_), None) => Ok(()),
            (_, Some(_), Some(_)) => Err(ModelError::InvalidReference(
                "set either job_id or internship_id, not both".to_string(),
            )),
            (JobType::Internship, _, None) => Err(ModelError::InvalidReference(
                "internship applications require internship_id".to_string(),
            )),
            (JobType::Freelance, None, _) => Err(ModelError::InvalidReference(
                "freelance applications require job_id".to_string(),
            )),
        }
    }
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

/// Partial application update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ApplicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_notes: Option<String>,
}

impl ApplicationUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.cover_letter.is_none()
            && self.resume_url.is_none()
            && self.portfolio_url.is_none()
            && self.application_data.is_none()
            && self.recruiter_notes.is_none()
    }

    /// Fields only a recruiter (or admin) may change.
    pub fn touches_recruiter_fields(&self) -> bool {
        self.recruiter_notes.is_some()
            || matches!(
                self.status,
                Some(s) if s != ApplicationStatus::Withdrawn
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(job_type: JobType, job: bool, internship: bool) -> NewApplication {
        NewApplication {
            talent_id: Uuid::new_v4(),
            job_id: job.then(Uuid::new_v4),
            internship_id: internship.then(Uuid::new_v4),
            job_type,
            cover_letter: None,
            resume_url: None,
            portfolio_url: None,
            application_data: empty_object(),
        }
    }

    #[test]
    fn test_check_target() {
        assert!(application(JobType::Internship, false, true).check_target().is_ok());
        assert!(application(JobType::Freelance, true, false).check_target().is_ok());
        assert!(application(JobType::Internship, true, false).check_target().is_err());
        assert!(application(JobType::Freelance, true, true).check_target().is_err());
        assert!(application(JobType::Freelance, false, false).check_target().is_err());
    }

    #[test]
    fn test_recruiter_fields() {
        let withdraw = ApplicationUpdate {
            status: Some(ApplicationStatus::Withdrawn),
            ..Default::default()
        };
        assert!(!withdraw.touches_recruiter_fields());

        let shortlist = ApplicationUpdate {
            status: Some(ApplicationStatus::Shortlisted),
            ..Default::default()
        };
        assert!(shortlist.touches_recruiter_fields());
        assert!(ApplicationUpdate::default().is_empty());
    }

    #[test]
    fn test_status_terminal() {
        assert!(ApplicationStatus::Accepted.is_terminal());
        assert!(!ApplicationStatus::Reviewing.is_terminal());
        assert_eq!(JobType::infer(Some(Uuid::nil())), JobType::Internship);
        assert_eq!(JobType::infer(None), JobType::Freelance);
    }
}
