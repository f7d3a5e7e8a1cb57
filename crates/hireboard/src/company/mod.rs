//! Company-side hiring desk: job posting lifecycle, applicant statistics and review
//! status changes, and the company's own profile.
//!
//! Every operation starts from the authenticated company email. The email must resolve
//! to a stored company, and postings or applications addressed by id must belong to it.

pub mod applicants;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod jobposts;
pub mod profile;
pub mod repository;
pub mod requests;
pub mod router;
pub mod statistics;
pub mod storage;
pub mod views;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use applicants::ApplicantService;
pub use domain::{
    Applicant, Application, ApplicationId, ApplicationStatus, Company, CompanyId, Education,
    Gender, Jobpost, JobpostContent, JobpostDraft, JobpostId, JobpostStatus,
};
pub use envelope::ApiResponse;
pub use error::{CatalogEntry, CompanyServiceError};
pub use jobposts::JobpostService;
pub use profile::CompanyProfileService;
pub use repository::{
    ApplicantStatsRow, ApplicationRepository, CompanyRepository, JobpostRepository,
    RepositoryError,
};
pub use requests::{
    ApplicationStatusRequest, CompanyUpdateRequest, DocumentUpload, JobpostCreateRequest,
    JobpostUpdateRequest, PayloadError, ValidatedPayload,
};
pub use router::{company_router, CompanyPrincipal, PRINCIPAL_HEADER};
pub use statistics::AgeBracket;
pub use storage::{DocumentStore, FsDocumentStore, StorageError};
pub use views::{
    ApplicantInfoView, ApplicantStatistics, CompanyProfileView, JobpostDetailView,
    JobpostSummaryView,
};

/// The three company services sharing one repository and document store.
pub struct CompanyServices<R, D> {
    pub jobposts: JobpostService<R, D>,
    pub applicants: ApplicantService<R>,
    pub profile: CompanyProfileService<R>,
}

impl<R, D> CompanyServices<R, D>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    pub fn new(repository: Arc<R>, documents: Arc<D>) -> Self {
        Self {
            jobposts: JobpostService::new(repository.clone(), documents),
            applicants: ApplicantService::new(repository.clone()),
            profile: CompanyProfileService::new(repository),
        }
    }
}

pub(crate) fn resolve_company<R>(repository: &R, email: &str) -> Result<Company, CompanyServiceError>
where
    R: CompanyRepository + ?Sized,
{
    repository
        .find_by_email(email.trim())?
        .ok_or(CompanyServiceError::NotFoundUser)
}
