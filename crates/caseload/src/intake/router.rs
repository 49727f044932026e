use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{DocumentId, UploadedFile};
use super::service::{IntakeService, IntakeServiceError};
use super::session::SessionError;
use super::store::StoreError;

#[derive(Debug, Deserialize, Serialize)]
pub struct SignInRequest {
    pub caseworker: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FileBatchRequest {
    pub files: Vec<UploadedFile>,
}

/// Router builder exposing the intake store to the rendering layer.
pub fn intake_router(service: Arc<IntakeService>) -> Router {
    Router::new()
        .route(
            "/api/v1/session",
            get(session_handler)
                .post(sign_in_handler)
                .delete(sign_out_handler),
        )
        .route("/api/v1/intake", get(snapshot_handler))
        .route("/api/v1/intake/applicants", post(add_applicant_handler))
        .route(
            "/api/v1/intake/applicants/current",
            delete(delete_applicant_handler),
        )
        .route("/api/v1/intake/cursor/next", post(select_next_handler))
        .route(
            "/api/v1/intake/cursor/previous",
            post(select_previous_handler),
        )
        .route("/api/v1/intake/documents", post(add_document_handler))
        .route(
            "/api/v1/intake/documents/:document_id",
            delete(delete_document_handler),
        )
        .route(
            "/api/v1/intake/documents/:document_id/files",
            post(add_files_handler),
        )
        .route(
            "/api/v1/intake/documents/:document_id/files/:file_index",
            delete(remove_file_handler),
        )
        .with_state(service)
}

pub(crate) async fn session_handler(State(service): State<Arc<IntakeService>>) -> Response {
    respond(service.session(), StatusCode::OK)
}

pub(crate) async fn sign_in_handler(
    State(service): State<Arc<IntakeService>>,
    axum::Json(request): axum::Json<SignInRequest>,
) -> Response {
    respond(service.sign_in(&request.caseworker), StatusCode::OK)
}

pub(crate) async fn sign_out_handler(State(service): State<Arc<IntakeService>>) -> Response {
    respond(service.sign_out(), StatusCode::OK)
}

pub(crate) async fn snapshot_handler(State(service): State<Arc<IntakeService>>) -> Response {
    respond(service.snapshot(), StatusCode::OK)
}

pub(crate) async fn add_applicant_handler(
    State(service): State<Arc<IntakeService>>,
    axum::Json(request): axum::Json<NameRequest>,
) -> Response {
    respond(service.add_applicant(&request.name), StatusCode::CREATED)
}

pub(crate) async fn delete_applicant_handler(
    State(service): State<Arc<IntakeService>>,
) -> Response {
    respond(service.delete_applicant(), StatusCode::OK)
}

pub(crate) async fn select_next_handler(State(service): State<Arc<IntakeService>>) -> Response {
    respond(service.select_next(), StatusCode::OK)
}

pub(crate) async fn select_previous_handler(
    State(service): State<Arc<IntakeService>>,
) -> Response {
    respond(service.select_previous(), StatusCode::OK)
}

pub(crate) async fn add_document_handler(
    State(service): State<Arc<IntakeService>>,
    axum::Json(request): axum::Json<NameRequest>,
) -> Response {
    respond(service.add_document(&request.name), StatusCode::CREATED)
}

pub(crate) async fn delete_document_handler(
    State(service): State<Arc<IntakeService>>,
    Path(document_id): Path<String>,
) -> Response {
    respond(
        service.delete_document(&DocumentId(document_id)),
        StatusCode::OK,
    )
}

pub(crate) async fn add_files_handler(
    State(service): State<Arc<IntakeService>>,
    Path(document_id): Path<String>,
    axum::Json(request): axum::Json<FileBatchRequest>,
) -> Response {
    respond(
        service.add_files(&DocumentId(document_id), request.files),
        StatusCode::OK,
    )
}

pub(crate) async fn remove_file_handler(
    State(service): State<Arc<IntakeService>>,
    Path((document_id, file_index)): Path<(String, usize)>,
) -> Response {
    respond(
        service.remove_file(&DocumentId(document_id), file_index),
        StatusCode::OK,
    )
}

fn respond<T: Serialize>(result: Result<T, IntakeServiceError>, success: StatusCode) -> Response {
    match result {
        Ok(view) => (success, axum::Json(view)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (error_status(&error), axum::Json(payload)).into_response()
        }
    }
}

pub(crate) fn error_status(error: &IntakeServiceError) -> StatusCode {
    match error {
        IntakeServiceError::Session(SessionError::SignedOut) => StatusCode::UNAUTHORIZED,
        IntakeServiceError::Session(SessionError::InvalidCaseworker) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        IntakeServiceError::Store(StoreError::Validation { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        IntakeServiceError::Store(StoreError::NoSelection) => StatusCode::CONFLICT,
        IntakeServiceError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
        IntakeServiceError::Store(StoreError::Index { .. }) => StatusCode::BAD_REQUEST,
        IntakeServiceError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        IntakeServiceError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
