use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use jobbot::workflows::jobs::leads::{
    LeadAlert, LeadId, LeadNotifier, LeadRecord, LeadRepository, NotifierError, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Lead log kept in insertion order; stands in for the tracking spreadsheet.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<Vec<LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|stored| stored.lead_id == record.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard
            .iter_mut()
            .find(|stored| stored.lead_id == record.lead_id)
        {
            Some(stored) => {
                *stored = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|stored| &stored.lead_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Collects alerts and logs them; no external channel is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadNotifier {
    alerts: Arc<Mutex<Vec<LeadAlert>>>,
}

impl LeadNotifier for InMemoryLeadNotifier {
    fn notify(&self, alert: LeadAlert) -> Result<(), NotifierError> {
        tracing::info!(lead_id = %alert.lead_id.0, message = %alert.message, "alert queued");
        let mut guard = self.alerts.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryLeadNotifier {
    pub(crate) fn alerts(&self) -> Vec<LeadAlert> {
        self.alerts.lock().expect("alert mutex poisoned").clone()
    }
}
