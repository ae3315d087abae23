use crate::{
    error::Result,
    gemini::{error_from_response, Endpoint},
    models::{ModelInfo, ModelList},
};

#[derive(Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl ModelClient {
    pub(crate) fn new(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    /// Every model visible to the configured key, following pagination.
    pub async fn list(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.endpoint.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(&url)
                .header("x-goog-api-key", &self.endpoint.api_key);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            let page: ModelList = response.json().await?;
            models.extend(page.models);

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        log::debug!("Listed {} models", models.len());
        Ok(models)
    }
}
