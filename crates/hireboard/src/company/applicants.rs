use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Local};
use tracing::{info, warn};

use super::domain::{CompanyId, JobpostId};
use super::error::CompanyServiceError;
use super::repository::{ApplicationRepository, CompanyRepository, JobpostRepository};
use super::requests::ApplicationStatusRequest;
use super::resolve_company;
use super::statistics::aggregate;
use super::views::{ApplicantInfoView, ApplicantStatistics};

/// Applicant statistics, listing and review status changes for a company.
pub struct ApplicantService<R> {
    repository: Arc<R>,
}

impl<R> ApplicantService<R>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Histograms as of the current local year. Zero applicants yields four empty maps.
    pub fn statistics_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<ApplicantStatistics, CompanyServiceError> {
        self.statistics_as_of(company_id, Local::now().year())
    }

    pub fn statistics_as_of(
        &self,
        company_id: CompanyId,
        current_year: i32,
    ) -> Result<ApplicantStatistics, CompanyServiceError> {
        let rows = self.repository.stats_rows_for_company(company_id)?;
        Ok(aggregate(&rows, current_year))
    }

    pub fn statistics_for(
        &self,
        company_email: &str,
    ) -> Result<ApplicantStatistics, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), company_email)?;
        self.statistics_for_company(company.id)
    }

    /// Applications submitted to the caller's own postings, oldest id first.
    pub fn list_applicants(
        &self,
        company_email: &str,
    ) -> Result<Vec<ApplicantInfoView>, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), company_email)?;
        let titles = self.posting_titles(company.id)?;

        let mut applicants: Vec<ApplicantInfoView> = ApplicationRepository::find_all(
            self.repository.as_ref(),
        )?
        .iter()
        .filter_map(|application| {
            titles
                .get(&application.jobpost_id)
                .map(|title| ApplicantInfoView::new(application, title))
        })
        .collect();
        applicants.sort_by_key(|view| view.application_id);

        Ok(applicants)
    }

    /// Any requested status is accepted; there is no transition matrix.
    pub fn change_application_status(
        &self,
        company_email: &str,
        request: ApplicationStatusRequest,
    ) -> Result<(), CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), company_email)?;
        let mut application =
            ApplicationRepository::find_by_id(self.repository.as_ref(), request.application_id)?
                .ok_or(CompanyServiceError::NotFoundApplication)?;

        let owns_posting =
            JobpostRepository::find_by_id(self.repository.as_ref(), application.jobpost_id)?
                .is_some_and(|post| post.company_id == company.id);
        if !owns_posting {
            warn!(
                company_id = company.id.0,
                application_id = request.application_id.0,
                "application status change requested by a company that does not own the posting"
            );
            return Err(CompanyServiceError::AccessDenied);
        }

        let previous = application.update_status(request.status);
        ApplicationRepository::save(self.repository.as_ref(), application)?;

        info!(
            company_id = company.id.0,
            application_id = request.application_id.0,
            from = previous.label(),
            to = request.status.label(),
            "application status changed"
        );
        Ok(())
    }

    fn posting_titles(
        &self,
        company_id: CompanyId,
    ) -> Result<HashMap<JobpostId, String>, CompanyServiceError> {
        Ok(self
            .repository
            .find_by_company(company_id)?
            .into_iter()
            .map(|post| (post.id, post.content.title))
            .collect())
    }
}
