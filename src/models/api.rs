use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::style::StyleId;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAllRequest {
    pub image_data: Option<String>,
    pub prompts: Option<HashMap<String, String>>,
}

impl GenerateAllRequest {
    pub fn new(image_data: impl Into<String>) -> Self {
        Self {
            image_data: Some(image_data.into()),
            prompts: Some(HashMap::new()),
        }
    }

    pub fn with_prompt(mut self, style: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.prompts
            .get_or_insert_with(HashMap::new)
            .insert(style.into(), prompt.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAllResponse {
    pub success: bool,
    pub generated_images: BTreeMap<StyleId, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleInfo {
    pub id: StyleId,
    pub name: String,
    pub prompt: String,
}
