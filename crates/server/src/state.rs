//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use chitti_agent::{PipelineSettings, ResponseComposer, TranslationPipeline};
use chitti_config::Settings;
use chitti_persistence::{create_usage_store, QuotaTracker};
use chitti_text_processing::{create_translator, IndicRomanizer};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub pipeline: Arc<TranslationPipeline>,
    pub composer: Arc<ResponseComposer>,
    /// Same tracker the pipeline records into
    pub quota: Arc<QuotaTracker>,
    /// Present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        config: Settings,
        pipeline: Arc<TranslationPipeline>,
        quota: Arc<QuotaTracker>,
    ) -> Self {
        let composer = Arc::new(ResponseComposer::from_settings(&config));
        Self {
            config: Arc::new(config),
            pipeline,
            composer,
            quota,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Wire the configured providers and ledger store
    pub async fn from_settings(config: Settings) -> Result<Self, ServerError> {
        let translator = create_translator(&config.translation)?;
        let llm = chitti_llm::create_backend(&config.llm)?;
        let romanizer = Arc::new(IndicRomanizer::new());

        let store = create_usage_store(&config.persistence).await?;
        let quota = Arc::new(QuotaTracker::new(store, config.quota.character_limit));

        tracing::info!(
            translator = translator.name(),
            model = llm.model_name(),
            ledger = quota.backend_name(),
            limit = quota.limit(),
            "Initialized pipeline services"
        );

        let pipeline = Arc::new(TranslationPipeline::new(
            PipelineSettings::from_settings(&config),
            translator,
            llm,
            romanizer,
            quota.clone(),
        ));

        Ok(Self::new(config, pipeline, quota))
    }
}
