pub mod image_client;
pub mod model_client;

use crate::{
    config::GeminiConfig,
    error::{HeadshotError, Result},
};

pub use image_client::ImageClient;
pub use model_client::ModelClient;

const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
    model_client: ModelClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HeadshotError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = Endpoint {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        };

        Ok(Self {
            image_client: ImageClient::new(http.clone(), endpoint.clone(), config.model),
            model_client: ModelClient::new(http, endpoint),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn models(&self) -> &ModelClient {
        &self.model_client
    }
}

/// Base URL and credential shared by every Gemini sub-client.
#[derive(Clone)]
pub(crate) struct Endpoint {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Turns a non-2xx Gemini response into an error, keeping the body short.
pub(crate) async fn error_from_response(response: reqwest::Response) -> HeadshotError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    HeadshotError::RemoteGeneration(format!(
        "Gemini returned {}: {}",
        status.as_u16(),
        truncate(&body, MAX_ERROR_BODY_CHARS)
    ))
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let result = GeminiClient::new(GeminiConfig::new());
        assert!(matches!(result, Err(HeadshotError::Config(_))));
    }

    #[test]
    fn test_client_builds_with_key() {
        let config = GeminiConfig::new()
            .with_api_key("test-key")
            .with_base_url("http://localhost:9999/v1beta/");
        let client = GeminiClient::new(config).unwrap();
        assert_eq!(client.image().model(), "gemini-2.5-flash-image");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("  short  ", 10), "short");
        assert_eq!(truncate("ééééé", 3), "ééé…");
    }

    #[test]
    fn test_endpoint_debug_redacts_key() {
        let endpoint = Endpoint {
            base_url: "https://example.test".into(),
            api_key: "secret".into(),
        };
        assert!(!format!("{:?}", endpoint).contains("secret"));
    }
}
