use super::traits::{GenerationEvent, GenerationObserver};

/// Writes orchestration events through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl GenerationObserver for LogObserver {
    fn on_event(&self, event: &GenerationEvent) {
        match event {
            GenerationEvent::BatchStarted { request_id, styles } => {
                log::info!("🎨 [req:{}] Generating {} styles", request_id, styles);
            }
            GenerationEvent::StyleStarted { request_id, style } => {
                log::info!("[req:{}] Generating {}...", request_id, style);
            }
            GenerationEvent::StyleGenerated {
                request_id,
                style,
                duration_ms,
            } => {
                log::info!(
                    "✅ [req:{}] Successfully generated {} [{}ms]",
                    request_id,
                    style,
                    duration_ms
                );
            }
            GenerationEvent::StyleNoImage { request_id, style } => {
                log::warn!(
                    "[req:{}] No image generated for {}, using fallback",
                    request_id,
                    style
                );
            }
            GenerationEvent::StyleFailed {
                request_id,
                style,
                error,
            } => {
                log::error!("[req:{}] Error generating {}: {}", request_id, style, error);
            }
            GenerationEvent::BatchFinished {
                request_id,
                generated,
                fallbacks,
                duration_ms,
            } => {
                log::info!(
                    "🏁 [req:{}] Batch finished: {} generated, {} fallback [{}ms]",
                    request_id,
                    generated,
                    fallbacks,
                    duration_ms
                );
            }
        }
    }
}
