use serde::{Deserialize, Serialize};

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Formats `data:<mime>;base64,<data>`.
pub fn to_data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Preprocessed upload. This is the only image form sent to the model and the
/// value every style falls back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub base64: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

impl NormalizedImage {
    pub fn data_uri(&self) -> String {
        to_data_uri(self.mime_type, &self.base64)
    }
}

#[derive(Debug, Clone)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub image_base64: String,
    pub mime_type: String,
}

impl ImageGenerationRequest {
    pub fn from_normalized(prompt: impl Into<String>, image: &NormalizedImage) -> Self {
        Self {
            prompt: prompt.into(),
            image_base64: image.base64.clone(),
            mime_type: image.mime_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String, // Base64 encoded
}

impl GeneratedImage {
    pub fn data_uri(&self) -> String {
        to_data_uri(&self.mime_type, &self.data)
    }
}

// Gemini generateContent wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiRequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GeminiRequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub response_modalities: Vec<String>,
}

impl GeminiRequest {
    pub fn from_generation_request(request: &ImageGenerationRequest) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiRequestPart::Text {
                        text: request.prompt.clone(),
                    },
                    GeminiRequestPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type: Some(request.mime_type.clone()),
                            data: request.image_base64.clone(),
                        },
                    },
                ],
            }],
            generation_config: GeminiGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GeminiResponse {
    /// First inline image of the first candidate, if the model returned one.
    pub fn first_image(self) -> Option<GeneratedImage> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.inline_data)
            .map(|inline| GeneratedImage {
                mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
                data: inline.data,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized() -> NormalizedImage {
        NormalizedImage {
            bytes: vec![1, 2, 3],
            base64: "AQID".to_string(),
            width: 1,
            height: 1,
            mime_type: JPEG_MIME_TYPE,
        }
    }

    #[test]
    fn test_request_payload_shape() {
        let request = ImageGenerationRequest::from_normalized("make it formal", &normalized());
        let payload = serde_json::to_value(GeminiRequest::from_generation_request(&request)).unwrap();

        let parts = &payload["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "make it formal");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "AQID");
        assert_eq!(
            payload["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn test_first_image_skips_text_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your headshot"},
                {"inlineData":{"mimeType":"image/png","data":"iVBOR"}}
            ]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();

        let image = response.first_image().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBOR");
    }

    #[test]
    fn test_first_image_absent_when_text_only() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"I can't do that"}]}}]}"#,
        )
        .unwrap();
        assert!(response.first_image().is_none());

        let empty: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.first_image().is_none());
    }

    #[test]
    fn test_normalized_data_uri() {
        assert_eq!(normalized().data_uri(), "data:image/jpeg;base64,AQID");
    }
}
