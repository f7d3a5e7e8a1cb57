use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStatus, Education};

/// Boundary check shared by every typed request body.
pub trait ValidatedPayload {
    fn validate(&self) -> Result<(), PayloadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct PayloadError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl PayloadError {
    const fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), PayloadError> {
    if value.trim().is_empty() {
        Err(PayloadError::new(field, "must not be blank"))
    } else {
        Ok(())
    }
}

pub(crate) fn check_window(start: NaiveDate, end: NaiveDate) -> Result<(), PayloadError> {
    if end < start {
        Err(PayloadError::new("end_date", "must not precede start_date"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobpostCreateRequest {
    pub title: String,
    pub category: String,
    pub career: String,
    #[serde(default)]
    pub education: Option<Education>,
    pub location: String,
    #[serde(default)]
    pub salary: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl ValidatedPayload for JobpostCreateRequest {
    fn validate(&self) -> Result<(), PayloadError> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;
        require_text("location", &self.location)?;
        check_window(self.start_date, self.end_date)
    }
}

/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobpostUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub career: Option<String>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<u32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ValidatedPayload for JobpostUpdateRequest {
    fn validate(&self) -> Result<(), PayloadError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            check_window(start, end)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub representative_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ValidatedPayload for CompanyUpdateRequest {
    fn validate(&self) -> Result<(), PayloadError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(contact) = &self.contact {
            require_text("contact", contact)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStatusRequest {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
}

/// Uploaded job posting document as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
