use serde::Serialize;

use super::domain::{Applicant, Document};
use super::session::SessionGate;
use super::store::ApplicantDocumentStore;

/// Read-only picture of the working set handed to the rendering layer after each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeSnapshot {
    pub applicants: Vec<Applicant>,
    pub cursor: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_applicant: Option<Applicant>,
    pub documents: Vec<Document>,
    pub navigation: NavigationView,
}

/// Prev/next availability. Navigation is only offered once there is more than one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    pub visible: bool,
    pub can_select_previous: bool,
    pub can_select_next: bool,
}

impl IntakeSnapshot {
    pub fn capture(store: &ApplicantDocumentStore) -> Self {
        Self {
            applicants: store.applicants().to_vec(),
            cursor: store.cursor(),
            current_applicant: store.current_applicant().cloned(),
            documents: store.documents_for_current().to_vec(),
            navigation: NavigationView {
                visible: store.applicants().len() > 1,
                can_select_previous: store.can_select_previous(),
                can_select_next: store.can_select_next(),
            },
        }
    }

    pub fn file_count(&self) -> usize {
        self.documents
            .iter()
            .map(|document| document.files.len())
            .sum()
    }
}

/// Session status as exposed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caseworker: Option<String>,
}

impl SessionView {
    pub fn capture(gate: &SessionGate) -> Self {
        Self {
            active: gate.is_active(),
            caseworker: gate.caseworker().map(|caseworker| caseworker.name.clone()),
        }
    }
}
