use crate::{
    error::{HeadshotError, Result},
    gemini::{error_from_response, Endpoint},
    models::{GeminiRequest, GeminiResponse, GeneratedImage, ImageGenerationRequest},
    orchestrator::ImageGenerator,
};
use async_trait::async_trait;

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    model: String,
}

impl ImageClient {
    pub(crate) fn new(http: reqwest::Client, endpoint: Endpoint, model: String) -> Self {
        Self {
            http,
            endpoint,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.base_url, self.model
        )
    }

    /// Sends one prompt + reference image. `Ok(None)` means the model answered
    /// without an image part.
    pub async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Option<GeneratedImage>> {
        let payload = GeminiRequest::from_generation_request(request);

        log::debug!(
            "Invoking {} with {} prompt chars and a {} reference",
            self.model,
            request.prompt.len(),
            request.mime_type
        );

        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.endpoint.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HeadshotError::RemoteGeneration(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| HeadshotError::RemoteGeneration(format!("failed to read body: {}", e)))?;

        parse_generate_response(&body)
    }
}

pub(crate) fn parse_generate_response(body: &str) -> Result<Option<GeneratedImage>> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| HeadshotError::RemoteGeneration(format!("malformed response: {}", e)))?;

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(HeadshotError::RemoteGeneration(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
    {
        if reason != "STOP" {
            log::debug!("Gemini finished with reason {}", reason);
        }
    }

    Ok(response.first_image())
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: &ImageGenerationRequest) -> Result<Option<GeneratedImage>> {
        ImageClient::generate(self, request).await
    }
}
