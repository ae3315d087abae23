use std::collections::BTreeMap;

use crate::{
    models::{GenerateAllResponse, NormalizedImage, StyleId},
    orchestrator::{GenerationBatch, StyleOutcome},
};

/// Builds the `{ success, generatedImages }` envelope. Fallback styles carry
/// the normalized upload; the batch is successful once every style was tried.
pub fn aggregate(batch: &GenerationBatch, fallback: &NormalizedImage) -> GenerateAllResponse {
    let fallback_uri = fallback.data_uri();

    let generated_images: BTreeMap<StyleId, String> = batch
        .results
        .iter()
        .map(|result| {
            let uri = match &result.outcome {
                StyleOutcome::Generated(image) => image.data_uri(),
                StyleOutcome::Fallback(_) => fallback_uri.clone(),
            };
            (result.style, uri)
        })
        .collect();

    GenerateAllResponse {
        success: true,
        generated_images,
    }
}
