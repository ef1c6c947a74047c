//! Generated image models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dream::DreamId;

/// Longest prompt (and negative prompt) the generator accepts.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Body of `POST /api/images/generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub dream_id: DreamId,
    pub negative_prompt: Option<String>,
}

/// Result of a generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: i64,
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    /// Remote URL or `data:image/...;base64,` payload
    pub image_url: String,
    pub model: String,
    #[serde(default)]
    pub analysis: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An image listed inside a dream detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamImage {
    pub id: i64,
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    pub image_url: String,
    pub model_name: String,
    #[serde(default)]
    pub analysis: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An entry of `GET /api/images/my-images`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub id: i64,
    pub user_id: i64,
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    pub image_url: String,
    pub model_name: String,
    #[serde(default)]
    pub analysis: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_null_negative_prompt() {
        let request = ImageRequest {
            prompt: "a lighthouse in the fog".to_string(),
            dream_id: DreamId::new(3),
            negative_prompt: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "prompt": "a lighthouse in the fog",
                "dream_id": 3,
                "negative_prompt": null,
            })
        );
    }

    #[test]
    fn generated_image_tolerates_missing_analysis() {
        let payload = r#"{
            "id": 11,
            "prompt": "p",
            "negative_prompt": null,
            "image_url": "data:image/png;base64,AAAA",
            "model": "stabilityai/stable-diffusion-xl-base-1.0",
            "created_at": "2024-05-01T08:30:00Z"
        }"#;
        let image: GeneratedImage = serde_json::from_str(payload).unwrap();
        assert!(image.analysis.is_none());
        assert_eq!(image.model, "stabilityai/stable-diffusion-xl-base-1.0");
    }
}
