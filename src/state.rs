use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::mpsc;

use crate::application::services::RedirectService;
use crate::config::Config;
use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::LinkStore;
use crate::web::ResponseComposer;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub redirect_service: Arc<RedirectService>,
    pub composer: Arc<ResponseComposer>,
    pub store: Arc<dyn LinkStore>,
    pub access_sender: mpsc::Sender<AccessEvent>,
    /// Renders the Prometheus exposition; `None` when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn LinkStore>,
        access_sender: mpsc::Sender<AccessEvent>,
    ) -> Self {
        let redirect_service = RedirectService::from_config(&config, store.clone());
        let composer = ResponseComposer::from_config(&config);

        Self {
            config: Arc::new(config),
            redirect_service: Arc::new(redirect_service),
            composer: Arc::new(composer),
            store,
            access_sender,
            metrics: None,
        }
    }

    /// Attaches the handle of the installed Prometheus recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
