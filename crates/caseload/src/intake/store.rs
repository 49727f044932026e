use std::collections::HashMap;

use super::domain::{is_blank, Applicant, ApplicantId, Document, DocumentId, UploadedFile};

/// Error enumeration for rejected store operations. A failed call never mutates the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{field} must not be blank")]
    Validation { field: &'static str },
    #[error("no applicant is selected")]
    NoSelection,
    #[error("document {document_id} not found for the selected applicant")]
    NotFound { document_id: DocumentId },
    #[error("file index {index} is out of range for document {document_id} ({len} files)")]
    Index {
        document_id: DocumentId,
        index: usize,
        len: usize,
    },
}

/// Monotonic id source. Values are never handed out twice by the same store.
#[derive(Debug, Clone)]
struct IdSequence {
    applicants: u64,
    documents: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            applicants: 1,
            documents: 1,
        }
    }
}

impl IdSequence {
    fn next_applicant(&mut self) -> ApplicantId {
        let id = self.applicants;
        self.applicants += 1;
        ApplicantId(format!("applicant-{id:06}"))
    }

    fn next_document(&mut self) -> DocumentId {
        let id = self.documents;
        self.documents += 1;
        DocumentId(format!("document-{id:06}"))
    }
}

/// Working set of applicants, their documents and uploaded files, plus the selection cursor.
///
/// Document operations always act on the applicant under the cursor. The cursor is
/// `None` exactly when there are no applicants.
#[derive(Debug, Clone, Default)]
pub struct ApplicantDocumentStore {
    applicants: Vec<Applicant>,
    documents: HashMap<ApplicantId, Vec<Document>>,
    cursor: Option<usize>,
    sequence: IdSequence,
}

impl ApplicantDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_applicant(&self) -> Option<&Applicant> {
        self.cursor.and_then(|index| self.applicants.get(index))
    }

    /// Documents of the selected applicant, empty when nothing has been recorded yet.
    pub fn documents_for_current(&self) -> &[Document] {
        self.current_applicant()
            .and_then(|applicant| self.documents_for(&applicant.id))
            .unwrap_or(&[])
    }

    /// Raw document map lookup. `None` means the applicant never had a document added
    /// (or has been deleted).
    pub fn documents_for(&self, applicant_id: &ApplicantId) -> Option<&[Document]> {
        self.documents.get(applicant_id).map(Vec::as_slice)
    }

    /// Append an applicant and move the cursor onto it.
    pub fn add_applicant(&mut self, name: impl Into<String>) -> Result<Applicant, StoreError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(StoreError::Validation {
                field: "applicant name",
            });
        }

        let applicant = Applicant {
            id: self.sequence.next_applicant(),
            name,
        };

        let index = self.applicants.len();
        self.applicants.push(applicant.clone());
        self.cursor = Some(index);
        Ok(applicant)
    }

    /// Remove the selected applicant together with its documents, then select the first
    /// remaining applicant.
    pub fn delete_applicant(&mut self) -> Result<Applicant, StoreError> {
        let index = self.selected_index()?;

        let removed = self.applicants.remove(index);
        self.documents.remove(&removed.id);
        self.cursor = if self.applicants.is_empty() {
            None
        } else {
            Some(0)
        };
        Ok(removed)
    }

    pub fn add_document(&mut self, name: impl Into<String>) -> Result<Document, StoreError> {
        let applicant_id = self.selected_id()?;
        let name = name.into();
        if is_blank(&name) {
            return Err(StoreError::Validation {
                field: "document name",
            });
        }

        let document = Document {
            id: self.sequence.next_document(),
            name,
            files: Vec::new(),
        };

        self.documents
            .entry(applicant_id)
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    /// Remove a document owned by the selected applicant. The applicant's map entry stays
    /// in place even when it becomes empty.
    pub fn delete_document(&mut self, document_id: &DocumentId) -> Result<Document, StoreError> {
        let applicant_id = self.selected_id()?;
        let documents = self
            .documents
            .get_mut(&applicant_id)
            .ok_or_else(|| not_found(document_id))?;
        let position = documents
            .iter()
            .position(|document| &document.id == document_id)
            .ok_or_else(|| not_found(document_id))?;

        Ok(documents.remove(position))
    }

    /// Append files to a document in the order given. Returns the new file count.
    pub fn add_files<I>(
        &mut self,
        document_id: &DocumentId,
        files: I,
    ) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = UploadedFile>,
    {
        let document = self.selected_document_mut(document_id)?;
        document.files.extend(files);
        Ok(document.files.len())
    }

    pub fn remove_file(
        &mut self,
        document_id: &DocumentId,
        file_index: usize,
    ) -> Result<UploadedFile, StoreError> {
        let document = self.selected_document_mut(document_id)?;
        let len = document.files.len();
        if file_index >= len {
            return Err(StoreError::Index {
                document_id: document_id.clone(),
                index: file_index,
                len,
            });
        }

        Ok(document.files.remove(file_index))
    }

    /// Move the cursor forward; stays put on the last applicant.
    pub fn select_next(&mut self) -> Option<usize> {
        if let Some(index) = self.cursor {
            if index + 1 < self.applicants.len() {
                self.cursor = Some(index + 1);
            }
        }
        self.cursor
    }

    /// Move the cursor back; stays put on the first applicant.
    pub fn select_previous(&mut self) -> Option<usize> {
        if let Some(index) = self.cursor {
            if index > 0 {
                self.cursor = Some(index - 1);
            }
        }
        self.cursor
    }

    pub fn can_select_next(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.applicants.len())
    }

    pub fn can_select_previous(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    fn selected_index(&self) -> Result<usize, StoreError> {
        self.cursor
            .filter(|index| *index < self.applicants.len())
            .ok_or(StoreError::NoSelection)
    }

    fn selected_id(&self) -> Result<ApplicantId, StoreError> {
        let index = self.selected_index()?;
        Ok(self.applicants[index].id.clone())
    }

    fn selected_document_mut(
        &mut self,
        document_id: &DocumentId,
    ) -> Result<&mut Document, StoreError> {
        let applicant_id = self.selected_id()?;
        self.documents
            .get_mut(&applicant_id)
            .and_then(|documents| {
                documents
                    .iter_mut()
                    .find(|document| &document.id == document_id)
            })
            .ok_or_else(|| not_found(document_id))
    }
}

fn not_found(document_id: &DocumentId) -> StoreError {
    StoreError::NotFound {
        document_id: document_id.clone(),
    }
}
