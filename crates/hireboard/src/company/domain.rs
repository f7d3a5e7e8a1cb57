use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::requests::{CompanyUpdateRequest, JobpostCreateRequest, JobpostUpdateRequest};

/// Identifier wrapper for company accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub u64);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobpostId(pub u64);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

/// Company account row. The email doubles as the login key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub email: String,
    pub name: String,
    pub contact: String,
    pub registration_number: String,
    pub address: String,
    pub representative_name: String,
    pub url: Option<String>,
}

impl Company {
    /// Email and registration number are fixed at sign-up and never touched here.
    pub fn apply_update(&mut self, update: CompanyUpdateRequest) {
        let CompanyUpdateRequest {
            name,
            contact,
            address,
            representative_name,
            url,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(contact) = contact {
            self.contact = contact;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(representative_name) = representative_name {
            self.representative_name = representative_name;
        }
        if let Some(url) = url {
            self.url = if url.trim().is_empty() { None } else { Some(url) };
        }
    }
}

/// Lifecycle marker for a posting. `Discard` is the soft-delete state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobpostStatus {
    Active,
    Discard,
}

impl JobpostStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobpostStatus::Active => "ACTIVE",
            JobpostStatus::Discard => "DISCARD",
        }
    }
}

/// Posting content shared by drafts and stored rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobpostContent {
    pub title: String,
    pub category: String,
    pub career: String,
    pub education: Option<Education>,
    pub location: String,
    pub salary: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
}

/// A posting that has not been assigned an id by the repository yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobpostDraft {
    pub company_id: CompanyId,
    pub content: JobpostContent,
    pub document_path: Option<String>,
    pub status: JobpostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobpostDraft {
    pub fn new(
        company: &Company,
        request: JobpostCreateRequest,
        document_path: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let JobpostCreateRequest {
            title,
            category,
            career,
            education,
            location,
            salary,
            start_date,
            end_date,
            description,
        } = request;

        Self {
            company_id: company.id,
            content: JobpostContent {
                title,
                category,
                career,
                education,
                location,
                salary,
                start_date,
                end_date,
                description,
            },
            document_path,
            status: JobpostStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_jobpost(self, id: JobpostId) -> Jobpost {
        Jobpost {
            id,
            company_id: self.company_id,
            content: self.content,
            document_path: self.document_path,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jobpost {
    pub id: JobpostId,
    pub company_id: CompanyId,
    pub content: JobpostContent,
    pub document_path: Option<String>,
    pub status: JobpostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Jobpost {
    pub fn is_owned_by(&self, company: &Company) -> bool {
        self.company_id == company.id
    }

    /// Field-level update: anything absent from the request is left untouched.
    pub fn apply_update(&mut self, update: JobpostUpdateRequest, now: DateTime<Utc>) {
        let JobpostUpdateRequest {
            title,
            category,
            career,
            education,
            location,
            salary,
            start_date,
            end_date,
            description,
        } = update;
        let content = &mut self.content;

        if let Some(title) = title {
            content.title = title;
        }
        if let Some(category) = category {
            content.category = category;
        }
        if let Some(career) = career {
            content.career = career;
        }
        if let Some(education) = education {
            content.education = Some(education);
        }
        if let Some(location) = location {
            content.location = location;
        }
        if let Some(salary) = salary {
            content.salary = Some(salary);
        }
        if let Some(start_date) = start_date {
            content.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            content.end_date = end_date;
        }
        if let Some(description) = description {
            content.description = description;
        }
        self.updated_at = now;
    }

    pub fn replace_document(&mut self, path: String, now: DateTime<Utc>) -> Option<String> {
        self.updated_at = now;
        self.document_path.replace(path)
    }

    /// Returns `false` without touching the row when the post is already discarded.
    pub fn discard(&mut self, now: DateTime<Utc>) -> bool {
        match self.status {
            JobpostStatus::Discard => false,
            JobpostStatus::Active => {
                self.status = JobpostStatus::Discard;
                self.updated_at = now;
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Highest completed education level reported by an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Education {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl Education {
    pub const fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "high school",
            Education::Associate => "associate degree",
            Education::Bachelor => "bachelor's degree",
            Education::Master => "master's degree",
            Education::Doctorate => "doctorate",
        }
    }
}

/// Applicant details captured when the application was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub email: String,
    pub birth_year: i32,
    pub gender: Gender,
    pub education: Education,
}

/// Review workflow state. Companies may move an application to any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub jobpost_id: JobpostId,
    pub applicant: Applicant,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    pub fn update_status(&mut self, status: ApplicationStatus) -> ApplicationStatus {
        std::mem::replace(&mut self.status, status)
    }
}
