//! Lead log and high-match alerts built on top of the scoring engine.

pub mod domain;
pub mod export;
pub mod insights;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LeadId, LeadRecord, LeadStatus, LeadView, SheetRow};
pub use export::{write_sheet, ExportError};
pub use repository::{
    LeadAlert, LeadNotifier, LeadRepository, NotifierError, RepositoryError,
};
pub use router::jobs_router;
pub use service::{alert_message, AlertOutcome, LeadService, LeadServiceError};
