use super::domain::{
    Application, ApplicationId, Company, CompanyId, Education, Gender, Jobpost, JobpostDraft,
    JobpostId,
};

/// Company account lookups keyed by login email.
pub trait CompanyRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<Company>, RepositoryError>;
    fn save(&self, company: Company) -> Result<Company, RepositoryError>;
}

/// Job posting storage. `insert` assigns the id, `save` overwrites an existing row.
pub trait JobpostRepository: Send + Sync {
    fn find_by_id(&self, id: JobpostId) -> Result<Option<Jobpost>, RepositoryError>;
    fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Jobpost>, RepositoryError>;
    fn insert(&self, draft: JobpostDraft) -> Result<Jobpost, RepositoryError>;
    fn save(&self, jobpost: Jobpost) -> Result<Jobpost, RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Application>, RepositoryError>;
    /// Applicant demographics joined with the posting title, one row per application
    /// to any posting owned by `company_id`.
    fn stats_rows_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<ApplicantStatsRow>, RepositoryError>;
    fn save(&self, application: Application) -> Result<Application, RepositoryError>;
}

/// Projection row feeding the applicant histograms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantStatsRow {
    pub birth_year: i32,
    pub gender: Gender,
    pub education: Education,
    pub jobpost_title: String,
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
