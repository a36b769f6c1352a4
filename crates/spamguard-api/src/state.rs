//! Shared application state

use metrics_exporter_prometheus::PrometheusHandle;
use spamguard_classifiers::SpamClassifier;
use std::sync::Arc;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Classifier, loaded once before the listener binds
    pub classifier: Arc<SpamClassifier>,

    /// Renders the Prometheus exposition for `/metrics`
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(classifier: SpamClassifier, metrics_handle: PrometheusHandle) -> Self {
        Self {
            classifier: Arc::new(classifier),
            metrics_handle,
        }
    }
}
