use chrono::NaiveDate;
use fas_core::assistance::{
    ApplicantService, ApplicationService, EligibilityEngine, InMemoryStore, SchemeService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The three assistance services wired over one shared store.
pub(crate) struct AssistanceServices {
    pub(crate) applicants: Arc<ApplicantService<InMemoryStore>>,
    pub(crate) schemes: Arc<SchemeService<InMemoryStore, InMemoryStore>>,
    pub(crate) applications: Arc<ApplicationService<InMemoryStore, InMemoryStore, InMemoryStore>>,
}

impl AssistanceServices {
    pub(crate) fn in_memory(engine: EligibilityEngine) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            applicants: Arc::new(ApplicantService::new(store.clone())),
            schemes: Arc::new(SchemeService::new(
                store.clone(),
                store.clone(),
                engine.clone(),
            )),
            applications: Arc::new(ApplicationService::new(
                store.clone(),
                store.clone(),
                store,
                engine,
            )),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
