use caseload::config::IntakeConfig;
use caseload::intake::IntakeService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn intake_service(config: &IntakeConfig) -> Arc<IntakeService> {
    Arc::new(IntakeService::new(config.max_upload_batch))
}
