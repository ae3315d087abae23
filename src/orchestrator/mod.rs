pub mod observer;
pub mod traits;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    models::{GeneratedImage, ImageGenerationRequest, NormalizedImage, StyleId},
    styles::ResolvedPrompts,
};

pub use observer::LogObserver;
pub use traits::{GenerationEvent, GenerationObserver, ImageGenerator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The remote answered but carried no image part.
    NoImage,
    /// The remote call failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOutcome {
    Generated(GeneratedImage),
    Fallback(FallbackReason),
}

impl StyleOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, StyleOutcome::Generated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleResult {
    pub style: StyleId,
    pub outcome: StyleOutcome,
}

#[derive(Debug, Clone)]
pub struct GenerationBatch {
    pub request_id: String,
    pub results: Vec<StyleResult>,
    pub duration: Duration,
}

impl GenerationBatch {
    pub fn generated_count(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome.is_generated())
            .count()
    }

    pub fn fallback_count(&self) -> usize {
        self.results.len() - self.generated_count()
    }
}

/// Runs one remote generation per style, one at a time, and never lets a
/// single style's failure abort the batch.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    generator: Arc<dyn ImageGenerator>,
    observer: Arc<dyn GenerationObserver>,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn GenerationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn generate_all(
        &self,
        request_id: &str,
        image: &NormalizedImage,
        prompts: &ResolvedPrompts,
    ) -> GenerationBatch {
        let batch_start = Instant::now();
        self.observer.on_event(&GenerationEvent::BatchStarted {
            request_id: request_id.to_string(),
            styles: prompts.len(),
        });

        let mut results = Vec::with_capacity(prompts.len());
        for (style, prompt) in prompts.iter() {
            let outcome = self.generate_style(request_id, style, prompt, image).await;
            results.push(StyleResult { style, outcome });
        }

        let batch = GenerationBatch {
            request_id: request_id.to_string(),
            results,
            duration: batch_start.elapsed(),
        };

        self.observer.on_event(&GenerationEvent::BatchFinished {
            request_id: request_id.to_string(),
            generated: batch.generated_count(),
            fallbacks: batch.fallback_count(),
            duration_ms: batch.duration.as_millis() as u64,
        });

        batch
    }

    async fn generate_style(
        &self,
        request_id: &str,
        style: StyleId,
        prompt: &str,
        image: &NormalizedImage,
    ) -> StyleOutcome {
        self.observer.on_event(&GenerationEvent::StyleStarted {
            request_id: request_id.to_string(),
            style,
        });

        let start = Instant::now();
        let request = ImageGenerationRequest::from_normalized(prompt, image);

        match self.generator.generate(&request).await {
            Ok(Some(generated)) => {
                self.observer.on_event(&GenerationEvent::StyleGenerated {
                    request_id: request_id.to_string(),
                    style,
                    duration_ms: start.elapsed().as_millis() as u64,
                });
                StyleOutcome::Generated(generated)
            }
            Ok(None) => {
                self.observer.on_event(&GenerationEvent::StyleNoImage {
                    request_id: request_id.to_string(),
                    style,
                });
                StyleOutcome::Fallback(FallbackReason::NoImage)
            }
            Err(e) => {
                let error = e.to_string();
                self.observer.on_event(&GenerationEvent::StyleFailed {
                    request_id: request_id.to_string(),
                    style,
                    error: error.clone(),
                });
                StyleOutcome::Fallback(FallbackReason::Failed(error))
            }
        }
    }
}
