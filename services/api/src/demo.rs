use crate::infra::{demo_company, seed_applications, seeded_store, DEMO_COMPANY_EMAIL};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use hireboard::company::{
    ApplicantStatistics, ApplicationId, ApplicationStatus, ApplicationStatusRequest,
    CompanyServiceError, CompanyServices, DocumentUpload, Education, FsDocumentStore,
    JobpostCreateRequest,
};
use hireboard::error::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Title of the posting created by the demo.
    #[arg(long, default_value = "Backend Engineer")]
    pub(crate) title: String,
    /// Optional file attached to the posting as its document.
    #[arg(long)]
    pub(crate) document: Option<PathBuf>,
    /// Directory uploaded documents are written to. Defaults to a temp directory.
    #[arg(long)]
    pub(crate) document_root: Option<PathBuf>,
    /// Reference year for applicant age brackets (defaults to the current year).
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Leave the posting active at the end of the walkthrough.
    #[arg(long)]
    pub(crate) keep_active: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        title,
        document,
        document_root,
        year,
        keep_active,
    } = args;

    let document_root =
        document_root.unwrap_or_else(|| std::env::temp_dir().join("hireboard-demo"));
    let store = Arc::new(seeded_store());
    let services = CompanyServices::new(
        store.clone(),
        Arc::new(FsDocumentStore::new(document_root.clone())),
    );
    let company = demo_company();

    println!("Hiring desk demo for {} <{}>", company.name, company.email);

    let upload = match document {
        Some(path) => {
            let bytes = std::fs::read(&path)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(DocumentUpload { file_name, bytes })
        }
        None => None,
    };

    let today = Local::now().date_naive();
    let created = services.jobposts.create_jobpost(
        DEMO_COMPANY_EMAIL,
        demo_request(&title, today),
        upload,
    )?;
    println!(
        "\nCreated posting {} \"{}\" ({} -> {}) status {}",
        created.jobpost_id.0,
        created.title,
        created.start_date,
        created.end_date,
        created.status.label()
    );
    match &created.document_path {
        Some(path) => println!("  Document stored at {path}"),
        None => println!(
            "  No document attached (uploads go to {})",
            document_root.display()
        ),
    }

    let empty = services.applicants.statistics_for(DEMO_COMPANY_EMAIL)?;
    if !empty.has_applicants() {
        println!("\nApplicant statistics: no applicants yet");
    }

    seed_applications(&store, created.jobpost_id, 1);

    let statistics = match year {
        Some(year) => services.applicants.statistics_as_of(company.id, year)?,
        None => services.applicants.statistics_for(DEMO_COMPANY_EMAIL)?,
    };
    render_statistics(&statistics);

    let applicants = services.applicants.list_applicants(DEMO_COMPANY_EMAIL)?;
    println!("\nApplicants");
    for applicant in &applicants {
        println!(
            "- #{} {} ({}, born {}, {}) -> {}",
            applicant.application_id.0,
            applicant.applicant_name,
            applicant.gender,
            applicant.birth_year,
            applicant.education,
            applicant.status.label()
        );
    }

    if let Some(first) = applicants.first() {
        services.applicants.change_application_status(
            DEMO_COMPANY_EMAIL,
            ApplicationStatusRequest {
                application_id: first.application_id,
                status: ApplicationStatus::UnderReview,
            },
        )?;
        println!(
            "\nMoved application #{} to {}",
            first.application_id.0,
            ApplicationStatus::UnderReview.label()
        );
    }

    match services.applicants.change_application_status(
        DEMO_COMPANY_EMAIL,
        ApplicationStatusRequest {
            application_id: ApplicationId(999),
            status: ApplicationStatus::Accepted,
        },
    ) {
        Err(err) => println!("  Unknown application rejected: {}", err.catalog().code),
        Ok(()) => println!("  Unknown application unexpectedly accepted"),
    }

    if keep_active {
        return Ok(());
    }

    let discarded = services
        .jobposts
        .discard_jobpost(DEMO_COMPANY_EMAIL, created.jobpost_id)?;
    println!(
        "\nDiscarded posting {} -> status {}",
        discarded.jobpost_id.0,
        discarded.status.label()
    );

    match services
        .jobposts
        .discard_jobpost(DEMO_COMPANY_EMAIL, created.jobpost_id)
    {
        Err(CompanyServiceError::AlreadyDiscarded) => {
            println!("  Second discard rejected: posting already discarded")
        }
        Err(err) => return Err(err.into()),
        Ok(_) => println!("  Second discard unexpectedly succeeded"),
    }

    let listed = services.jobposts.list_jobposts(DEMO_COMPANY_EMAIL)?;
    println!("\nPostings on file: {}", listed.len());
    for post in &listed {
        println!("- {} {} [{}]", post.jobpost_id.0, post.title, post.status.label());
    }

    Ok(())
}

fn demo_request(title: &str, today: NaiveDate) -> JobpostCreateRequest {
    JobpostCreateRequest {
        title: title.to_string(),
        category: "Engineering".to_string(),
        career: "3+ years".to_string(),
        education: Some(Education::Bachelor),
        location: "Seoul".to_string(),
        salary: Some(60_000),
        start_date: today,
        end_date: today + Duration::days(30),
        description: "Build and operate the services behind our hiring desk.".to_string(),
    }
}

fn render_statistics(statistics: &ApplicantStatistics) {
    println!("\nApplicant statistics ({} applicants)", statistics.total());
    render_histogram("Age", &statistics.age);
    render_histogram("Gender", &statistics.gender);
    render_histogram("Education", &statistics.education);
    render_histogram("Posting", &statistics.jobpost_title);
}

fn render_histogram(label: &str, buckets: &BTreeMap<String, usize>) {
    println!("{label}");
    for (bucket, count) in buckets {
        println!("  - {bucket}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_request_spans_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let request = demo_request("Data Engineer", today);
        assert_eq!(request.title, "Data Engineer");
        assert_eq!(request.end_date - request.start_date, Duration::days(30));
    }

    #[test]
    fn demo_runs_end_to_end_without_document() {
        let root = tempfile::tempdir().expect("temp dir");
        let args = DemoArgs {
            title: "Platform Engineer".to_string(),
            document_root: Some(root.path().to_path_buf()),
            year: Some(2025),
            ..DemoArgs::default()
        };
        run_demo(args).expect("demo completes");
    }
}
