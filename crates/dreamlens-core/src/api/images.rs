//! Image endpoints under `/api/images`.

use std::future::Future;

use super::{send_json, ApiError, ApiResult, DreamlensClient};
use crate::auth::SessionPersistence;
use crate::models::{GeneratedImage, ImageRequest, StoredImage, MAX_PROMPT_CHARS};

pub trait ImageGenerator: Send + Sync {
    /// Runs one generation for `request.dream_id`. No retry, no streaming.
    fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> impl Future<Output = ApiResult<GeneratedImage>> + Send;
}

impl<S: SessionPersistence> ImageGenerator for DreamlensClient<S> {
    async fn generate_image(&self, request: &ImageRequest) -> ApiResult<GeneratedImage> {
        validate_image_request(request)?;
        tracing::info!("Generating image for dream {}", request.dream_id);
        let request = self.authorized(
            self.client
                .post(self.url("/api/images/generate"))
                .json(request),
        )?;
        send_json(request).await
    }
}

impl<S: SessionPersistence> DreamlensClient<S> {
    /// Lists the signed-in user's most recent images.
    pub async fn my_images(&self, limit: u32) -> ApiResult<Vec<StoredImage>> {
        let request = self.authorized(
            self.client
                .get(self.url("/api/images/my-images"))
                .query(&[("limit", limit.to_string())]),
        )?;
        send_json(request).await
    }
}

fn validate_image_request(request: &ImageRequest) -> ApiResult<()> {
    let prompt_len = request.prompt.trim().chars().count();
    if prompt_len == 0 {
        return Err(ApiError::Validation("Prompt must not be empty".to_string()));
    }
    if prompt_len > MAX_PROMPT_CHARS {
        return Err(ApiError::Validation(format!(
            "Prompt must be at most {MAX_PROMPT_CHARS} characters"
        )));
    }
    if request
        .negative_prompt
        .as_deref()
        .is_some_and(|negative| negative.chars().count() > MAX_PROMPT_CHARS)
    {
        return Err(ApiError::Validation(format!(
            "Negative prompt must be at most {MAX_PROMPT_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DreamId;

    fn request(prompt: &str) -> ImageRequest {
        ImageRequest {
            prompt: prompt.to_string(),
            dream_id: DreamId::new(1),
            negative_prompt: None,
        }
    }

    #[test]
    fn validate_rejects_blank_and_oversized_prompts() {
        assert!(validate_image_request(&request("a red door")).is_ok());
        assert!(matches!(
            validate_image_request(&request("   ")),
            Err(ApiError::Validation(_))
        ));
        assert!(validate_image_request(&request(&"x".repeat(MAX_PROMPT_CHARS + 1))).is_err());
    }

    #[test]
    fn validate_rejects_oversized_negative_prompt() {
        let mut request = request("a red door");
        request.negative_prompt = Some("y".repeat(MAX_PROMPT_CHARS + 1));
        assert!(validate_image_request(&request).is_err());
    }
}
