use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Company, CompanyId, Jobpost, JobpostId,
    JobpostStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobpostSummaryView {
    pub jobpost_id: JobpostId,
    pub title: String,
    pub category: String,
    pub status: JobpostStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<&Jobpost> for JobpostSummaryView {
    fn from(post: &Jobpost) -> Self {
        Self {
            jobpost_id: post.id,
            title: post.content.title.clone(),
            category: post.content.category.clone(),
            status: post.status,
            start_date: post.content.start_date,
            end_date: post.content.end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobpostDetailView {
    pub jobpost_id: JobpostId,
    pub company_id: CompanyId,
    pub title: String,
    pub category: String,
    pub career: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,
    pub status: JobpostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Jobpost> for JobpostDetailView {
    fn from(post: &Jobpost) -> Self {
        let content = &post.content;
        Self {
            jobpost_id: post.id,
            company_id: post.company_id,
            title: content.title.clone(),
            category: content.category.clone(),
            career: content.career.clone(),
            education: content.education.map(|level| level.label().to_string()),
            location: content.location.clone(),
            salary: content.salary,
            start_date: content.start_date,
            end_date: content.end_date,
            description: content.description.clone(),
            document_path: post.document_path.clone(),
            status: post.status,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInfoView {
    pub application_id: ApplicationId,
    pub jobpost_id: JobpostId,
    pub jobpost_title: String,
    pub applicant_name: String,
    pub applicant_email: String,
    pub birth_year: i32,
    pub gender: String,
    pub education: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl ApplicantInfoView {
    pub fn new(application: &Application, jobpost_title: &str) -> Self {
        let applicant = &application.applicant;
        Self {
            application_id: application.id,
            jobpost_id: application.jobpost_id,
            jobpost_title: jobpost_title.to_string(),
            applicant_name: applicant.name.clone(),
            applicant_email: applicant.email.clone(),
            birth_year: applicant.birth_year,
            gender: applicant.gender.label().to_string(),
            education: applicant.education.label().to_string(),
            status: application.status,
            applied_at: application.applied_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfileView {
    pub company_id: CompanyId,
    pub email: String,
    pub name: String,
    pub contact: String,
    pub registration_number: String,
    pub address: String,
    pub representative_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&Company> for CompanyProfileView {
    fn from(company: &Company) -> Self {
        Self {
            company_id: company.id,
            email: company.email.clone(),
            name: company.name.clone(),
            contact: company.contact.clone(),
            registration_number: company.registration_number.clone(),
            address: company.address.clone(),
            representative_name: company.representative_name.clone(),
            url: company.url.clone(),
        }
    }
}

/// Four independent applicant histograms keyed by display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantStatistics {
    pub age: BTreeMap<String, usize>,
    pub gender: BTreeMap<String, usize>,
    pub education: BTreeMap<String, usize>,
    pub jobpost_title: BTreeMap<String, usize>,
}

impl ApplicantStatistics {
    /// Every row lands in exactly one age bucket, so an empty age map means no applicants.
    pub fn has_applicants(&self) -> bool {
        !self.age.is_empty()
    }

    pub fn total(&self) -> usize {
        self.age.values().sum()
    }
}
