use std::sync::Arc;

use tracing::info;

use super::error::CompanyServiceError;
use super::repository::CompanyRepository;
use super::requests::{CompanyUpdateRequest, ValidatedPayload};
use super::resolve_company;
use super::views::CompanyProfileView;

pub struct CompanyProfileService<R> {
    repository: Arc<R>,
}

impl<R> CompanyProfileService<R>
where
    R: CompanyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn profile(&self, company_email: &str) -> Result<CompanyProfileView, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), company_email)?;
        Ok(CompanyProfileView::from(&company))
    }

    pub fn update_profile(
        &self,
        company_email: &str,
        request: CompanyUpdateRequest,
    ) -> Result<CompanyProfileView, CompanyServiceError> {
        let mut company = resolve_company(self.repository.as_ref(), company_email)?;
        request.validate()?;

        company.apply_update(request);
        let stored = self.repository.save(company)?;

        info!(company_id = stored.id.0, "company profile updated");
        Ok(CompanyProfileView::from(&stored))
    }
}
