use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{error, info, warn};

use super::domain::{Company, Jobpost, JobpostDraft, JobpostId};
use super::error::CompanyServiceError;
use super::repository::{CompanyRepository, JobpostRepository};
use super::requests::{
    check_window, DocumentUpload, JobpostCreateRequest, JobpostUpdateRequest, ValidatedPayload,
};
use super::resolve_company;
use super::storage::{document_name, DocumentStore};
use super::views::{JobpostDetailView, JobpostSummaryView};

/// Job posting lifecycle: create, read, update and soft delete.
pub struct JobpostService<R, D> {
    repository: Arc<R>,
    documents: Arc<D>,
}

impl<R, D> JobpostService<R, D>
where
    R: CompanyRepository + JobpostRepository + 'static,
    D: DocumentStore + 'static,
{
    pub fn new(repository: Arc<R>, documents: Arc<D>) -> Self {
        Self {
            repository,
            documents,
        }
    }

    pub fn create_jobpost(
        &self,
        owner_email: &str,
        request: JobpostCreateRequest,
        document: Option<DocumentUpload>,
    ) -> Result<JobpostDetailView, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), owner_email)?;
        request.validate()?;

        let document_path = match document {
            Some(upload) => Some(self.store_document(&company, &upload)?),
            None => None,
        };

        let draft = JobpostDraft::new(&company, request, document_path, Utc::now());
        let stored = JobpostRepository::insert(self.repository.as_ref(), draft)?;

        info!(
            company_id = company.id.0,
            jobpost_id = stored.id.0,
            "job posting created"
        );
        Ok(JobpostDetailView::from(&stored))
    }

    pub fn list_jobposts(
        &self,
        owner_email: &str,
    ) -> Result<Vec<JobpostSummaryView>, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), owner_email)?;
        let posts = self.repository.find_by_company(company.id)?;
        Ok(posts.iter().map(JobpostSummaryView::from).collect())
    }

    pub fn jobpost_detail(
        &self,
        owner_email: &str,
        post_id: JobpostId,
    ) -> Result<JobpostDetailView, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), owner_email)?;
        let post = self.owned_post(&company, post_id)?;
        Ok(JobpostDetailView::from(&post))
    }

    /// The post is resolved before any document is written, so a missing post never
    /// leaves a stray file behind.
    pub fn update_jobpost(
        &self,
        owner_email: &str,
        post_id: JobpostId,
        request: JobpostUpdateRequest,
        document: Option<DocumentUpload>,
    ) -> Result<JobpostDetailView, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), owner_email)?;
        let mut post = self.owned_post(&company, post_id)?;
        request.validate()?;

        let now = Utc::now();
        post.apply_update(request, now);
        check_window(post.content.start_date, post.content.end_date)?;

        let replaced = match document {
            Some(upload) => {
                let path = self.store_document(&company, &upload)?;
                post.replace_document(path, now)
            }
            None => None,
        };

        let stored = JobpostRepository::save(self.repository.as_ref(), post)?;

        if let Some(previous) = replaced {
            self.release_document(&company, &stored, &previous);
        }

        Ok(JobpostDetailView::from(&stored))
    }

    /// Soft delete: flips the status to `Discard`. There is no hard delete.
    pub fn discard_jobpost(
        &self,
        owner_email: &str,
        post_id: JobpostId,
    ) -> Result<JobpostDetailView, CompanyServiceError> {
        let company = resolve_company(self.repository.as_ref(), owner_email)?;
        let mut post = self.owned_post(&company, post_id)?;

        if !post.discard(Utc::now()) {
            return Err(CompanyServiceError::AlreadyDiscarded);
        }

        let stored = JobpostRepository::save(self.repository.as_ref(), post)?;
        info!(
            company_id = company.id.0,
            jobpost_id = stored.id.0,
            "job posting discarded"
        );
        Ok(JobpostDetailView::from(&stored))
    }

    fn owned_post(
        &self,
        company: &Company,
        post_id: JobpostId,
    ) -> Result<Jobpost, CompanyServiceError> {
        let post = JobpostRepository::find_by_id(self.repository.as_ref(), post_id)?
            .ok_or(CompanyServiceError::NotFoundPost)?;

        if !post.is_owned_by(company) {
            warn!(
                company_id = company.id.0,
                jobpost_id = post_id.0,
                "job posting requested by a company that does not own it"
            );
            return Err(CompanyServiceError::AccessDenied);
        }

        Ok(post)
    }

    /// Best-effort removal of a replaced document. A path still held by any of the
    /// company's postings, the updated one included, is kept.
    fn release_document(&self, company: &Company, updated: &Jobpost, previous: &str) {
        let still_referenced = match self.repository.find_by_company(company.id) {
            Ok(posts) => posts
                .iter()
                .any(|post| post.document_path.as_deref() == Some(previous)),
            Err(err) => {
                warn!(jobpost_id = updated.id.0, %err, "could not check document references");
                true
            }
        };
        if still_referenced {
            return;
        }

        if let Err(err) = self.documents.remove(previous) {
            warn!(jobpost_id = updated.id.0, %err, "failed to remove replaced document");
        }
    }

    fn store_document(
        &self,
        company: &Company,
        upload: &DocumentUpload,
    ) -> Result<String, CompanyServiceError> {
        let name = document_name(&company.name, upload, Local::now());
        self.documents.store(&name, &upload.bytes).map_err(|err| {
            error!(file_name = %upload.file_name, %err, "failed to store job posting document");
            CompanyServiceError::from(err)
        })
    }
}
