use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::company::domain::{
    Applicant, Application, ApplicationId, ApplicationStatus, Company, CompanyId, Education,
    Gender, Jobpost, JobpostDraft, JobpostId,
};
use crate::company::repository::{
    ApplicantStatsRow, ApplicationRepository, CompanyRepository, JobpostRepository,
    RepositoryError,
};
use crate::company::requests::{DocumentUpload, JobpostCreateRequest};
use crate::company::storage::{candidate_name, DocumentStore, StorageError};
use crate::company::CompanyServices;

pub(super) const ACME_EMAIL: &str = "a@x.com";
pub(super) const BETA_EMAIL: &str = "b@y.com";

pub(super) fn acme() -> Company {
    Company {
        id: CompanyId(1),
        email: ACME_EMAIL.to_string(),
        name: "Acme".to_string(),
        contact: "02-555-0100".to_string(),
        registration_number: "120-81-00001".to_string(),
        address: "1 Teheran-ro, Seoul".to_string(),
        representative_name: "Kim Minji".to_string(),
        url: Some("https://acme.example".to_string()),
    }
}

pub(super) fn beta() -> Company {
    Company {
        id: CompanyId(2),
        email: BETA_EMAIL.to_string(),
        name: "Beta Labs".to_string(),
        contact: "031-555-0199".to_string(),
        registration_number: "214-86-00002".to_string(),
        address: "22 Pangyo-ro, Seongnam".to_string(),
        representative_name: "Park Jisoo".to_string(),
        url: None,
    }
}

pub(super) fn create_request(title: &str) -> JobpostCreateRequest {
    JobpostCreateRequest {
        title: title.to_string(),
        category: "Backend".to_string(),
        career: "3+ years".to_string(),
        education: Some(Education::Bachelor),
        location: "Seoul".to_string(),
        salary: Some(52_000),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid"),
        description: "Own the hiring desk services".to_string(),
    }
}

pub(super) fn pdf(file_name: &str) -> DocumentUpload {
    DocumentUpload {
        file_name: file_name.to_string(),
        bytes: b"%PDF-1.7 posting".to_vec(),
    }
}

pub(super) fn application(
    id: u64,
    jobpost_id: JobpostId,
    birth_year: i32,
    gender: Gender,
    education: Education,
) -> Application {
    Application {
        id: ApplicationId(id),
        jobpost_id,
        applicant: Applicant {
            name: format!("Applicant {id}"),
            email: format!("applicant{id}@example.com"),
            birth_year,
            gender,
            education,
        },
        status: ApplicationStatus::Submitted,
        applied_at: Utc
            .with_ymd_and_hms(2025, 3, 2, 10, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Store seeded with the Acme and Beta Labs accounts.
pub(super) fn build_services() -> (
    CompanyServices<MemoryStore, MemoryDocuments>,
    Arc<MemoryStore>,
    Arc<MemoryDocuments>,
) {
    let store = Arc::new(MemoryStore::with_companies([acme(), beta()]));
    let documents = Arc::new(MemoryDocuments::default());
    let services = CompanyServices::new(store.clone(), documents.clone());
    (services, store, documents)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    companies: Mutex<BTreeMap<CompanyId, Company>>,
    jobposts: Mutex<BTreeMap<JobpostId, Jobpost>>,
    applications: Mutex<BTreeMap<ApplicationId, Application>>,
    jobpost_sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn with_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.companies.lock().expect("company mutex poisoned");
            for company in companies {
                guard.insert(company.id, company);
            }
        }
        store
    }

    pub(super) fn add_application(&self, application: Application) {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .insert(application.id, application);
    }

    pub(super) fn jobpost(&self, id: JobpostId) -> Option<Jobpost> {
        self.jobposts
            .lock()
            .expect("jobpost mutex poisoned")
            .get(&id)
            .cloned()
    }

    pub(super) fn application(&self, id: ApplicationId) -> Option<Application> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .get(&id)
            .cloned()
    }
}

impl CompanyRepository for MemoryStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.values().find(|company| company.email == email).cloned())
    }

    fn save(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut guard = self.companies.lock().expect("company mutex poisoned");
        guard.insert(company.id, company.clone());
        Ok(company)
    }
}

impl JobpostRepository for MemoryStore {
    fn find_by_id(&self, id: JobpostId) -> Result<Option<Jobpost>, RepositoryError> {
        Ok(self.jobpost(id))
    }

    fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Jobpost>, RepositoryError> {
        let guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        Ok(guard
            .values()
            .filter(|post| post.company_id == company_id)
            .cloned()
            .collect())
    }

    fn insert(&self, draft: JobpostDraft) -> Result<Jobpost, RepositoryError> {
        let id = JobpostId(self.jobpost_sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let post = draft.into_jobpost(id);
        let mut guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        guard.insert(id, post.clone());
        Ok(post)
    }

    fn save(&self, jobpost: Jobpost) -> Result<Jobpost, RepositoryError> {
        let mut guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        if !guard.contains_key(&jobpost.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(jobpost.id, jobpost.clone());
        Ok(jobpost)
    }
}

impl ApplicationRepository for MemoryStore {
    fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(self.application(id))
    }

    fn find_all(&self) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn stats_rows_for_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<ApplicantStatsRow>, RepositoryError> {
        let posts = self.jobposts.lock().expect("jobpost mutex poisoned");
        let applications = self.applications.lock().expect("application mutex poisoned");
        Ok(applications
            .values()
            .filter_map(|application| {
                posts
                    .get(&application.jobpost_id)
                    .filter(|post| post.company_id == company_id)
                    .map(|post| ApplicantStatsRow {
                        birth_year: application.applicant.birth_year,
                        gender: application.applicant.gender,
                        education: application.applicant.education,
                        jobpost_title: post.content.title.clone(),
                    })
            })
            .collect())
    }

    fn save(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        guard.insert(application.id, application.clone());
        Ok(application)
    }
}

/// Records writes and removals instead of touching the filesystem.
#[derive(Debug, Default)]
pub(super) struct MemoryDocuments {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    removed: Mutex<Vec<String>>,
}

impl MemoryDocuments {
    pub(super) fn stored(&self) -> Vec<String> {
        self.files
            .lock()
            .expect("document mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }

    pub(super) fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("document mutex poisoned").clone()
    }

    pub(super) fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .expect("document mutex poisoned")
            .get(path)
            .cloned()
    }
}

impl DocumentStore for MemoryDocuments {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let mut files = self.files.lock().expect("document mutex poisoned");
        let path = (0..)
            .map(|attempt| format!("memory/{}", candidate_name(name, attempt)))
            .find(|path| !files.contains_key(path))
            .expect("free document name");
        files.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .expect("document mutex poisoned")
            .remove(path);
        self.removed
            .lock()
            .expect("document mutex poisoned")
            .push(path.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub(super) struct FailingDocuments;

impl DocumentStore for FailingDocuments {
    fn store(&self, name: &str, _bytes: &[u8]) -> Result<String, StorageError> {
        Err(StorageError::Write {
            name: name.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        Err(StorageError::Remove {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }
}

/// Accepts writes but refuses every removal.
#[derive(Debug, Default)]
pub(super) struct UndeletableDocuments {
    inner: MemoryDocuments,
}

impl UndeletableDocuments {
    pub(super) fn stored(&self) -> Vec<String> {
        self.inner.stored()
    }
}

impl DocumentStore for UndeletableDocuments {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        self.inner.store(name, bytes)
    }

    fn remove(&self, path: &str) -> Result<(), StorageError> {
        Err(StorageError::Remove {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "file is locked"),
        })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
