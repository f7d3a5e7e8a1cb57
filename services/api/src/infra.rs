use chrono::{TimeZone, Utc};
use hireboard::company::{
    Applicant, ApplicantStatsRow, Application, ApplicationId, ApplicationRepository,
    ApplicationStatus, Company, CompanyId, CompanyRepository, Education, Gender, Jobpost,
    JobpostDraft, JobpostId, JobpostRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const DEMO_COMPANY_EMAIL: &str = "hr@acme.example";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store backing the company, posting and application tables.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    companies: Arc<Mutex<HashMap<CompanyId, Company>>>,
    jobposts: Arc<Mutex<HashMap<JobpostId, Jobpost>>>,
    applications: Arc<Mutex<HashMap<ApplicationId, Application>>>,
    jobpost_sequence: Arc<AtomicU64>,
}

impl InMemoryStore {
    pub(crate) fn add_company(&self, company: Company) {
        let mut guard = self.companies.lock().expect("company mutex poisoned");
        guard.insert(company.id, company);
    }

    pub(crate) fn add_application(&self, application: Application) {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        guard.insert(application.id, application);
    }
}

impl CompanyRepository for InMemoryStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Company>, RepositoryError> {
        let guard = self.companies.lock().expect("company mutex poisoned");
        Ok(guard.values().find(|company| company.email == email).cloned())
    }

    fn save(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut guard = self.companies.lock().expect("company mutex poisoned");
        if !guard.contains_key(&company.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(company.id, company.clone());
        Ok(company)
    }
}

impl JobpostRepository for InMemoryStore {
    fn find_by_id(&self, id: JobpostId) -> Result<Option<Jobpost>, RepositoryError> {
        let guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_company(&self, company_id: CompanyId) -> Result<Vec<Jobpost>, RepositoryError> {
        let guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        let mut posts: Vec<Jobpost> = guard
            .values()
            .filter(|post| post.company_id == company_id)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.id);
        Ok(posts)
    }

    fn insert(&self, draft: JobpostDraft) -> Result<Jobpost, RepositoryError> {
        let id = JobpostId(self.jobpost_sequence.fetch_add(1, Ordering::Relaxed) + 1);
        let post = draft.into_jobpost(id);
        let mut guard = self.jobposts.lock().expect("jobpost mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
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

impl ApplicationRepository for InMemoryStore {
    fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.get(&id).cloned())
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
                let post = posts.get(&application.jobpost_id)?;
                (post.company_id == company_id).then(|| ApplicantStatsRow {
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
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id, application.clone());
        Ok(application)
    }
}

pub(crate) fn demo_company() -> Company {
    Company {
        id: CompanyId(1),
        email: DEMO_COMPANY_EMAIL.to_string(),
        name: "Acme Robotics".to_string(),
        contact: "02-555-0100".to_string(),
        registration_number: "120-81-00001".to_string(),
        address: "1 Teheran-ro, Gangnam-gu, Seoul".to_string(),
        representative_name: "Kim Minji".to_string(),
        url: Some("https://acme.example".to_string()),
    }
}

/// Store holding the demo company and nothing else.
pub(crate) fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::default();
    store.add_company(demo_company());
    store
}

/// Demo applicants for a posting; ids continue from `first_id`.
pub(crate) fn seed_applications(store: &InMemoryStore, jobpost_id: JobpostId, first_id: u64) {
    let applicants = [
        ("Lee Seojun", 1998, Gender::Male, Education::Bachelor),
        ("Jung Hayoon", 1991, Gender::Female, Education::Master),
        ("Han Doyun", 1984, Gender::Male, Education::Associate),
        ("Yoon Jiwoo", 2006, Gender::Female, Education::HighSchool),
    ];

    for (offset, (name, birth_year, gender, education)) in applicants.into_iter().enumerate() {
        let id = first_id + offset as u64;
        let applied_at = Utc
            .with_ymd_and_hms(2025, 3, 2 + offset as u32, 9, 30, 0)
            .single()
            .unwrap_or_else(Utc::now);
        store.add_application(Application {
            id: ApplicationId(id),
            jobpost_id,
            applicant: Applicant {
                name: name.to_string(),
                email: format!("applicant{id}@mail.example"),
                birth_year,
                gender,
                education,
            },
            status: ApplicationStatus::Submitted,
            applied_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_resolves_demo_company() {
        let store = seeded_store();
        let company = store
            .find_by_email(DEMO_COMPANY_EMAIL)
            .expect("lookup succeeds")
            .expect("company seeded");
        assert_eq!(company.name, "Acme Robotics");
    }

    #[test]
    fn saving_unknown_rows_is_not_found() {
        let store = InMemoryStore::default();
        assert!(matches!(
            CompanyRepository::save(&store, demo_company()),
            Err(RepositoryError::NotFound)
        ));
    }
}
