use super::domain::{is_blank, Caseworker};
use super::store::ApplicantDocumentStore;

/// Error raised when the store is reached without an active caseworker session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no caseworker is signed in")]
    SignedOut,
    #[error("caseworker name must not be blank")]
    InvalidCaseworker,
}

/// Gate between the identity provider's signed-in/signed-out signal and the working set.
///
/// The store is created on the first sign-in and kept for the life of the gate, so a
/// caseworker who signs out and back in finds the same applicants. While signed out the
/// store is unreachable.
#[derive(Debug, Default)]
pub struct SessionGate {
    caseworker: Option<Caseworker>,
    store: Option<ApplicantDocumentStore>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a present/absent transition reported by the identity provider.
    pub fn observe(&mut self, caseworker: Option<Caseworker>) -> Result<(), SessionError> {
        match caseworker {
            Some(caseworker) => self.sign_in(caseworker.name).map(|_| ()),
            None => {
                self.sign_out();
                Ok(())
            }
        }
    }

    pub fn sign_in(&mut self, name: impl Into<String>) -> Result<&Caseworker, SessionError> {
        let name = name.into();
        if is_blank(&name) {
            return Err(SessionError::InvalidCaseworker);
        }

        self.store.get_or_insert_with(ApplicantDocumentStore::new);
        let caseworker = self.caseworker.insert(Caseworker { name });
        Ok(&*caseworker)
    }

    pub fn sign_out(&mut self) -> Option<Caseworker> {
        self.caseworker.take()
    }

    pub fn caseworker(&self) -> Option<&Caseworker> {
        self.caseworker.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.caseworker.is_some()
    }

    pub fn store(&self) -> Result<&ApplicantDocumentStore, SessionError> {
        if !self.is_active() {
            return Err(SessionError::SignedOut);
        }
        self.store.as_ref().ok_or(SessionError::SignedOut)
    }

    pub fn store_mut(&mut self) -> Result<&mut ApplicantDocumentStore, SessionError> {
        if !self.is_active() {
            return Err(SessionError::SignedOut);
        }
        self.store.as_mut().ok_or(SessionError::SignedOut)
    }
}
