use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadRecord};

/// Lead log abstraction (spreadsheet, database, or in-memory in tests).
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    /// Most recently logged first.
    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound channel for high-match alerts (WhatsApp, e-mail, ...).
pub trait LeadNotifier: Send + Sync {
    fn notify(&self, alert: LeadAlert) -> Result<(), NotifierError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadAlert {
    pub lead_id: LeadId,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("notification channel not configured")]
    NotConfigured,
    #[error("notification transport failed: {0}")]
    Transport(String),
}
