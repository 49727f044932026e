//! Applicant intake: the caseworker's working set of applicants, their named documents,
//! and the files uploaded into each document, navigated through a single cursor.

pub mod domain;
pub mod router;
pub mod service;
pub mod session;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantId, Caseworker, Document, DocumentId, FileHandle, UploadedFile,
};
pub use router::intake_router;
pub use service::{IntakeService, IntakeServiceError, DEFAULT_MAX_UPLOAD_BATCH};
pub use session::{SessionError, SessionGate};
pub use store::{ApplicantDocumentStore, StoreError};
pub use views::{IntakeSnapshot, NavigationView, SessionView};
