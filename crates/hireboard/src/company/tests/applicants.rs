use super::common::*;
use crate::company::domain::{ApplicationId, ApplicationStatus, Education, Gender, JobpostId};
use crate::company::error::CompanyServiceError;
use crate::company::requests::ApplicationStatusRequest;

const YEAR: i32 = 2025;

/// Acme posts "Engineer" (id 1) and "Designer" (id 2); Beta posts "Researcher" (id 3).
fn seeded() -> (
    crate::company::CompanyServices<MemoryStore, MemoryDocuments>,
    std::sync::Arc<MemoryStore>,
) {
    let (services, store, _) = build_services();
    for (email, title) in [
        (ACME_EMAIL, "Engineer"),
        (ACME_EMAIL, "Designer"),
        (BETA_EMAIL, "Researcher"),
    ] {
        services
            .jobposts
            .create_jobpost(email, create_request(title), None)
            .expect("seed post");
    }

    store.add_application(application(1, JobpostId(1), YEAR - 51, Gender::Male, Education::Master));
    store.add_application(application(2, JobpostId(1), YEAR - 50, Gender::Female, Education::Bachelor));
    store.add_application(application(3, JobpostId(2), YEAR - 24, Gender::Female, Education::Bachelor));
    store.add_application(application(4, JobpostId(3), YEAR - 33, Gender::Male, Education::Doctorate));
    (services, store)
}

#[test]
fn statistics_cover_only_the_company_postings() {
    let (services, _) = seeded();

    let stats = services
        .applicants
        .statistics_as_of(acme().id, YEAR)
        .expect("statistics build");

    assert_eq!(stats.total(), 3);
    assert_eq!(stats.age.get("50s+"), Some(&1));
    assert_eq!(stats.age.get("40s"), Some(&1));
    assert_eq!(stats.age.get("20s"), Some(&1));
    assert_eq!(stats.gender.get("female"), Some(&2));
    assert_eq!(stats.gender.get("male"), Some(&1));
    assert_eq!(stats.education.get("bachelor's degree"), Some(&2));
    assert_eq!(stats.education.get("doctorate"), None);
    assert_eq!(stats.jobpost_title.get("Engineer"), Some(&2));
    assert_eq!(stats.jobpost_title.get("Designer"), Some(&1));
    assert_eq!(stats.jobpost_title.get("Researcher"), None);
}

#[test]
fn statistics_for_company_without_applicants_are_empty() {
    let (services, _, _) = build_services();
    let stats = services
        .applicants
        .statistics_for(BETA_EMAIL)
        .expect("statistics build");

    assert!(!stats.has_applicants());
    assert!(stats.gender.is_empty());
    assert!(stats.education.is_empty());
    assert!(stats.jobpost_title.is_empty());
}

#[test]
fn statistics_for_unknown_email_is_not_found_user() {
    let (services, _) = seeded();
    assert!(matches!(
        services.applicants.statistics_for("ghost@nowhere.com"),
        Err(CompanyServiceError::NotFoundUser)
    ));
}

#[test]
fn applicant_list_is_limited_to_own_postings() {
    let (services, _) = seeded();

    let acme_list = services
        .applicants
        .list_applicants(ACME_EMAIL)
        .expect("list builds");
    let ids: Vec<u64> = acme_list.iter().map(|view| view.application_id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(acme_list[2].jobpost_title, "Designer");
    assert_eq!(acme_list[0].gender, "male");
    assert_eq!(acme_list[0].status, ApplicationStatus::Submitted);

    let beta_list = services
        .applicants
        .list_applicants(BETA_EMAIL)
        .expect("list builds");
    assert_eq!(beta_list.len(), 1);
    assert_eq!(beta_list[0].jobpost_title, "Researcher");
}

#[test]
fn change_status_accepts_any_target_state() {
    let (services, store) = seeded();

    for status in [
        ApplicationStatus::Accepted,
        ApplicationStatus::Submitted,
        ApplicationStatus::Rejected,
    ] {
        services
            .applicants
            .change_application_status(
                ACME_EMAIL,
                ApplicationStatusRequest {
                    application_id: ApplicationId(2),
                    status,
                },
            )
            .expect("status change succeeds");
        assert_eq!(
            store.application(ApplicationId(2)).expect("stored").status,
            status
        );
    }
}

#[test]
fn change_status_reports_missing_records() {
    let (services, _) = seeded();
    let request = ApplicationStatusRequest {
        application_id: ApplicationId(99),
        status: ApplicationStatus::UnderReview,
    };

    assert!(matches!(
        services
            .applicants
            .change_application_status("ghost@nowhere.com", request),
        Err(CompanyServiceError::NotFoundUser)
    ));
    assert!(matches!(
        services
            .applicants
            .change_application_status(ACME_EMAIL, request),
        Err(CompanyServiceError::NotFoundApplication)
    ));
}

#[test]
fn change_status_on_foreign_application_is_denied() {
    let (services, store) = seeded();

    let result = services.applicants.change_application_status(
        BETA_EMAIL,
        ApplicationStatusRequest {
            application_id: ApplicationId(1),
            status: ApplicationStatus::Rejected,
        },
    );

    assert!(matches!(result, Err(CompanyServiceError::AccessDenied)));
    assert_eq!(
        store.application(ApplicationId(1)).expect("stored").status,
        ApplicationStatus::Submitted
    );
}
