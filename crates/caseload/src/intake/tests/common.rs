use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::intake::domain::{DocumentId, UploadedFile};
use crate::intake::store::ApplicantDocumentStore;
use crate::intake::{intake_router, IntakeService};

pub(super) fn store_with(names: &[&str]) -> ApplicantDocumentStore {
    let mut store = ApplicantDocumentStore::new();
    for name in names {
        store.add_applicant(*name).expect("valid applicant name");
    }
    store
}

pub(super) fn scan(name: &str) -> UploadedFile {
    UploadedFile::new(name, format!("blob://uploads/{name}"))
}

pub(super) fn document_named(store: &mut ApplicantDocumentStore, name: &str) -> DocumentId {
    store.add_document(name).expect("document added").id
}

pub(super) fn signed_in_service() -> IntakeService {
    let service = IntakeService::default();
    service.sign_in("Dana").expect("caseworker signs in");
    service
}

pub(super) fn router_with_service(service: IntakeService) -> axum::Router {
    intake_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
