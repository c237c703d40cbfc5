//! Internship and freelance job postings.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Whether a posting still accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    #[default]
    Open,
    Closed,
}

impl PostingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostingStatus::Open => "open",
            PostingStatus::Closed => "closed",
        }
    }
}

/// Budget model of a freelance job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    #[default]
    Fixed,
    Hourly,
}

impl BudgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetType::Fixed => "fixed",
            BudgetType::Hourly => "hourly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stipend: Option<String>,
    #[serde(default)]
    pub status: PostingStatus,
    #[serde(default)]
    pub recruiter_id: Option<Uuid>,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct NewInternship {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    /// Filled in from the authenticated recruiter, never from the body.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FreelanceJob {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub budget_type: BudgetType,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: PostingStatus,
    #[serde(default)]
    pub recruiter_id: Option<Uuid>,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[validate(schema(function = "validate_budget"))]
pub struct NewFreelanceJob {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub budget_type: BudgetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub budget_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub budget_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<Uuid>,
}

fn validate_budget(job: &NewFreelanceJob) -> Result<(), validator::ValidationError> {
    match (job.budget_min, job.budget_max) {
        (Some(min), Some(max)) if min > max => {
            Err(validator::ValidationError::new("budget_min_exceeds_max"))
        }
        _ => Ok(()),
    }
}

/// Filters for internship listings.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InternshipFilter {
    pub location: Option<String>,
    /// Comma-separated skill list.
    pub skills: Option<String>,
    pub company: Option<String>,
    pub limit: Option<u32>,
}

/// Filters for freelance job listings.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FreelanceFilter {
    pub category: Option<String>,
    pub budget_type: Option<BudgetType>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub skills: Option<String>,
    pub limit: Option<u32>,
}

/// Split a comma-separated query value into trimmed, non-empty items.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_validation() {
        let mut job = NewFreelanceJob {
            title: "Landing page".to_string(),
            category: None,
            budget_type: BudgetType::Fixed,
            budget_min: Some(500.0),
            budget_max: Some(100.0),
            location: None,
            skills: vec![],
            description: None,
            recruiter_id: None,
        };
        assert!(job.validate().is_err());

        job.budget_max = Some(1000.0);
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_recruiter_id_not_taken_from_body() {
        let json = serde_json::json!({
            "title": "Data intern",
            "company": "Acme",
            "recruiter_id": "00000000-0000-0000-0000-000000000001"
        });
        let internship: NewInternship = serde_json::from_value(json).unwrap();
        assert!(internship.recruiter_id.is_none());
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("rust, go ,,sql"), vec!["rust", "go", "sql"]);
        assert!(split_csv(" , ").is_empty());
    }
}
