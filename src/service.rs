use std::sync::Arc;

use uuid::Uuid;

use crate::{
    aggregator::aggregate,
    error::{HeadshotError, Result},
    imaging::ImagePreprocessor,
    logger,
    models::{GenerateAllRequest, GenerateAllResponse, StyleInfo},
    orchestrator::{GenerationObserver, GenerationOrchestrator, ImageGenerator},
    styles::StyleCatalog,
};

/// Request-level pipeline: validate, normalize, resolve prompts, generate,
/// aggregate.
#[derive(Clone)]
pub struct HeadshotService {
    preprocessor: ImagePreprocessor,
    catalog: Arc<StyleCatalog>,
    orchestrator: GenerationOrchestrator,
}

impl HeadshotService {
    pub fn new(generator: Arc<dyn ImageGenerator>, catalog: StyleCatalog) -> Self {
        Self {
            preprocessor: ImagePreprocessor::default(),
            catalog: Arc::new(catalog),
            orchestrator: GenerationOrchestrator::new(generator),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: ImagePreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn GenerationObserver>) -> Self {
        self.orchestrator = self.orchestrator.with_observer(observer);
        self
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    pub fn styles(&self) -> Vec<StyleInfo> {
        self.catalog.describe()
    }

    pub async fn generate_all(&self, request: GenerateAllRequest) -> Result<GenerateAllResponse> {
        let image_data = request
            .image_data
            .filter(|data| !data.trim().is_empty())
            .ok_or(HeadshotError::MissingInput)?;
        let overrides = request.prompts.ok_or(HeadshotError::MissingInput)?;

        let request_id = Uuid::new_v4().simple().to_string();
        let mut timer = logger::timer(&format!("generate-all [req:{}]", request_id));

        let preprocessor = self.preprocessor;
        let normalized =
            tokio::task::spawn_blocking(move || preprocessor.process_payload(&image_data))
                .await
                .map_err(|e| HeadshotError::Unexpected(format!("preprocessing task failed: {}", e)))??;

        log::info!(
            "[req:{}] Normalized upload to {}x{} ({} bytes)",
            request_id,
            normalized.width,
            normalized.height,
            normalized.bytes.len()
        );

        let prompts = self.catalog.resolve(&overrides);
        let batch = self
            .orchestrator
            .generate_all(&request_id, &normalized, &prompts)
            .await;

        let response = aggregate(&batch, &normalized);
        timer.stop();
        Ok(response)
    }
}
