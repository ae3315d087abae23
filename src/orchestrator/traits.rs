use crate::{
    error::Result,
    models::{GeneratedImage, ImageGenerationRequest, StyleId},
};
use async_trait::async_trait;

/// The remote "prompt + reference image → image" capability.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// `Ok(None)` when the remote answered without an image.
    async fn generate(&self, request: &ImageGenerationRequest) -> Result<Option<GeneratedImage>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    BatchStarted {
        request_id: String,
        styles: usize,
    },
    StyleStarted {
        request_id: String,
        style: StyleId,
    },
    StyleGenerated {
        request_id: String,
        style: StyleId,
        duration_ms: u64,
    },
    StyleNoImage {
        request_id: String,
        style: StyleId,
    },
    StyleFailed {
        request_id: String,
        style: StyleId,
        error: String,
    },
    BatchFinished {
        request_id: String,
        generated: usize,
        fallbacks: usize,
        duration_ms: u64,
    },
}

/// Sink for orchestration events.
pub trait GenerationObserver: Send + Sync {
    fn on_event(&self, event: &GenerationEvent);
}
