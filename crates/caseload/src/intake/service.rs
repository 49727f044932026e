use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::domain::{DocumentId, UploadedFile};
use super::session::{SessionError, SessionGate};
use super::store::{ApplicantDocumentStore, StoreError};
use super::views::{IntakeSnapshot, SessionView};

/// Largest number of files accepted in one upload when no limit is configured.
pub const DEFAULT_MAX_UPLOAD_BATCH: usize = 50;

/// Service serializing every caller through a single lock around the session-gated store.
///
/// Each mutating call answers with a fresh snapshot so the rendering layer can redraw
/// without holding references into the store.
pub struct IntakeService {
    gate: Mutex<SessionGate>,
    max_upload_batch: usize,
}

impl Default for IntakeService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BATCH)
    }
}

impl IntakeService {
    pub fn new(max_upload_batch: usize) -> Self {
        Self::with_gate(SessionGate::new(), max_upload_batch)
    }

    pub fn with_gate(gate: SessionGate, max_upload_batch: usize) -> Self {
        Self {
            gate: Mutex::new(gate),
            max_upload_batch,
        }
    }

    pub fn max_upload_batch(&self) -> usize {
        self.max_upload_batch
    }

    pub fn sign_in(&self, caseworker: &str) -> Result<SessionView, IntakeServiceError> {
        let mut gate = self.lock()?;
        gate.sign_in(caseworker).map_err(|err| {
            warn!(error = %err, "sign-in rejected");
            err
        })?;
        info!(caseworker, "caseworker signed in");
        Ok(SessionView::capture(&gate))
    }

    pub fn sign_out(&self) -> Result<SessionView, IntakeServiceError> {
        let mut gate = self.lock()?;
        if let Some(caseworker) = gate.sign_out() {
            info!(caseworker = %caseworker.name, "caseworker signed out");
        }
        Ok(SessionView::capture(&gate))
    }

    pub fn session(&self) -> Result<SessionView, IntakeServiceError> {
        let gate = self.lock()?;
        Ok(SessionView::capture(&gate))
    }

    pub fn snapshot(&self) -> Result<IntakeSnapshot, IntakeServiceError> {
        let gate = self.lock()?;
        let store = gate.store()?;
        Ok(IntakeSnapshot::capture(store))
    }

    pub fn add_applicant(&self, name: &str) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("add_applicant", |store| {
            let applicant = store.add_applicant(name)?;
            info!(applicant_id = %applicant.id, "applicant added");
            Ok(())
        })
    }

    pub fn delete_applicant(&self) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("delete_applicant", |store| {
            let applicant = store.delete_applicant()?;
            info!(
                applicant_id = %applicant.id,
                remaining = store.applicants().len(),
                "applicant deleted"
            );
            Ok(())
        })
    }

    pub fn add_document(&self, name: &str) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("add_document", |store| {
            let document = store.add_document(name)?;
            info!(document_id = %document.id, "document added");
            Ok(())
        })
    }

    pub fn delete_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("delete_document", |store| {
            let document = store.delete_document(document_id)?;
            info!(document_id = %document.id, files = document.files.len(), "document deleted");
            Ok(())
        })
    }

    /// Attach a batch delivered by the file source. Oversized batches are refused whole.
    pub fn add_files(
        &self,
        document_id: &DocumentId,
        files: Vec<UploadedFile>,
    ) -> Result<IntakeSnapshot, IntakeServiceError> {
        let limit = self.max_upload_batch;
        self.mutate("add_files", |store| {
            let added = files.len();
            if added > limit {
                return Err(IntakeServiceError::BatchTooLarge { size: added, limit });
            }
            let total = store.add_files(document_id, files)?;
            info!(%document_id, added, total, "files attached");
            Ok(())
        })
    }

    pub fn remove_file(
        &self,
        document_id: &DocumentId,
        file_index: usize,
    ) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("remove_file", |store| {
            let file = store.remove_file(document_id, file_index)?;
            info!(%document_id, file_index, file = %file.name, "file removed");
            Ok(())
        })
    }

    pub fn select_next(&self) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("select_next", |store| {
            let cursor = store.select_next();
            debug!(?cursor, "cursor advanced");
            Ok(())
        })
    }

    pub fn select_previous(&self) -> Result<IntakeSnapshot, IntakeServiceError> {
        self.mutate("select_previous", |store| {
            let cursor = store.select_previous();
            debug!(?cursor, "cursor retreated");
            Ok(())
        })
    }

    fn mutate<F>(
        &self,
        operation: &'static str,
        apply: F,
    ) -> Result<IntakeSnapshot, IntakeServiceError>
    where
        F: FnOnce(&mut ApplicantDocumentStore) -> Result<(), IntakeServiceError>,
    {
        let mut gate = self.lock()?;
        let store = gate.store_mut().map_err(|err| {
            warn!(operation, error = %err, "operation rejected");
            err
        })?;
        apply(&mut *store).map_err(|err| {
            warn!(operation, error = %err, "operation rejected");
            err
        })?;
        Ok(IntakeSnapshot::capture(store))
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionGate>, IntakeServiceError> {
        self.gate.lock().map_err(|_| IntakeServiceError::Poisoned)
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("upload batch of {size} files exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
    #[error("intake state unavailable after a panic in another caller")]
    Poisoned,
}
