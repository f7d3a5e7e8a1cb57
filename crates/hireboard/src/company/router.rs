use std::sync::Arc;

use axum::{
    async_trait,
    extract::{DefaultBodyLimit, FromRequestParts, Multipart, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::de::DeserializeOwned;

use super::domain::JobpostId;
use super::envelope::ApiResponse;
use super::error::CompanyServiceError;
use super::repository::{ApplicationRepository, CompanyRepository, JobpostRepository};
use super::requests::{
    ApplicationStatusRequest, CompanyUpdateRequest, DocumentUpload, JobpostCreateRequest,
    JobpostUpdateRequest, ValidatedPayload,
};
use super::storage::DocumentStore;
use super::views::{ApplicantInfoView, CompanyProfileView, JobpostDetailView, JobpostSummaryView};
use super::CompanyServices;

/// Header carrying the company email forwarded by the authentication gateway.
pub const PRINCIPAL_HEADER: &str = "x-company-email";

const REQUEST_PART: &str = "request";
const DOCUMENT_PART: &str = "document";
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

type Services<R, D> = State<Arc<CompanyServices<R, D>>>;

/// Authenticated company identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyPrincipal(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CompanyPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CompanyPrincipal(value.to_string()))
            .ok_or_else(|| {
                ApiResponse::<()>::failure(
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    "missing authenticated company principal",
                )
                .into_response()
            })
    }
}

/// Router builder exposing the company endpoints.
pub fn company_router<R, D>(services: Arc<CompanyServices<R, D>>) -> Router
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    Router::new()
        .route(
            "/company/jobposts",
            get(list_jobposts_handler::<R, D>).post(create_jobpost_handler::<R, D>),
        )
        .route(
            "/company/jobposts/:post_id",
            get(jobpost_detail_handler::<R, D>)
                .put(update_jobpost_handler::<R, D>)
                .delete(discard_jobpost_handler::<R, D>),
        )
        .route(
            "/company/applications",
            get(list_applicants_handler::<R, D>),
        )
        .route(
            "/company/applications/statistics",
            get(statistics_handler::<R, D>),
        )
        .route(
            "/company/applications/status",
            patch(application_status_handler::<R, D>),
        )
        .route(
            "/company/profile",
            get(profile_handler::<R, D>).put(update_profile_handler::<R, D>),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(services)
}

fn invalid<E: std::fmt::Display>(err: E) -> CompanyServiceError {
    CompanyServiceError::InvalidRequest(err.to_string())
}

/// Reads the `request` JSON part and the optional `document` file part.
pub(crate) async fn read_jobpost_form<T>(
    mut multipart: Multipart,
) -> Result<(T, Option<DocumentUpload>), CompanyServiceError>
where
    T: DeserializeOwned + ValidatedPayload,
{
    let mut request = None;
    let mut document = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(REQUEST_PART) => {
                let bytes = field.bytes().await.map_err(invalid)?;
                let payload: T = serde_json::from_slice(&bytes)
                    .map_err(|err| invalid(format!("{REQUEST_PART}: {err}")))?;
                request = Some(payload);
            }
            Some(DOCUMENT_PART) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid)?;
                if !bytes.is_empty() {
                    document = Some(DocumentUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let request: T =
        request.ok_or_else(|| invalid(format!("missing '{REQUEST_PART}' part")))?;
    request.validate()?;
    Ok((request, document))
}

pub(crate) async fn create_jobpost_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    multipart: Multipart,
) -> Result<ApiResponse<JobpostDetailView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let (request, document) = read_jobpost_form::<JobpostCreateRequest>(multipart).await?;
    let view = services
        .jobposts
        .create_jobpost(&email, request, document)?;
    Ok(ApiResponse::ok(view, "job posting created"))
}

pub(crate) async fn list_jobposts_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
) -> Result<ApiResponse<Vec<JobpostSummaryView>>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let posts = services.jobposts.list_jobposts(&email)?;
    Ok(ApiResponse::ok(posts, "job postings listed"))
}

pub(crate) async fn jobpost_detail_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    Path(post_id): Path<u64>,
) -> Result<ApiResponse<JobpostDetailView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let view = services
        .jobposts
        .jobpost_detail(&email, JobpostId(post_id))?;
    Ok(ApiResponse::ok(view, "job posting loaded"))
}

pub(crate) async fn update_jobpost_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    Path(post_id): Path<u64>,
    multipart: Multipart,
) -> Result<ApiResponse<JobpostDetailView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let (request, document) = read_jobpost_form::<JobpostUpdateRequest>(multipart).await?;
    let view = services
        .jobposts
        .update_jobpost(&email, JobpostId(post_id), request, document)?;
    Ok(ApiResponse::ok(view, "job posting updated"))
}

pub(crate) async fn discard_jobpost_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    Path(post_id): Path<u64>,
) -> Result<ApiResponse<JobpostDetailView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let view = services
        .jobposts
        .discard_jobpost(&email, JobpostId(post_id))?;
    Ok(ApiResponse::ok(view, "job posting discarded"))
}

/// No applicants is reported as a non-success body, not as an error status.
pub(crate) async fn statistics_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
) -> Result<Response, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let statistics = services.applicants.statistics_for(&email)?;
    if !statistics.has_applicants() {
        return Ok(ApiResponse::empty("NO_APPLICANTS", "no applicants yet").into_response());
    }
    Ok(ApiResponse::ok(statistics, "applicant statistics").into_response())
}

pub(crate) async fn list_applicants_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
) -> Result<ApiResponse<Vec<ApplicantInfoView>>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let applicants = services.applicants.list_applicants(&email)?;
    Ok(ApiResponse::ok(applicants, "applicants listed"))
}

pub(crate) async fn application_status_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    Json(request): Json<ApplicationStatusRequest>,
) -> Result<ApiResponse<()>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    services
        .applicants
        .change_application_status(&email, request)?;
    Ok(ApiResponse::done("application status changed"))
}

pub(crate) async fn profile_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
) -> Result<ApiResponse<CompanyProfileView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let view = services.profile.profile(&email)?;
    Ok(ApiResponse::ok(view, "company profile loaded"))
}

pub(crate) async fn update_profile_handler<R, D>(
    State(services): Services<R, D>,
    CompanyPrincipal(email): CompanyPrincipal,
    Json(request): Json<CompanyUpdateRequest>,
) -> Result<ApiResponse<CompanyProfileView>, CompanyServiceError>
where
    R: CompanyRepository + JobpostRepository + ApplicationRepository + 'static,
    D: DocumentStore + 'static,
{
    let view = services.profile.update_profile(&email, request)?;
    Ok(ApiResponse::ok(view, "company profile updated"))
}
