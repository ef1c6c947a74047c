//! Analyze-dream workflow: turn a free-text prompt into an illustrated dream.

use crate::api::{DreamStore, ImageGenerator};
use crate::error::{Error, Result};
use crate::models::{DreamId, GeneratedImage, ImageRequest, MAX_PROMPT_CHARS};
use crate::sync::DreamSynchronizer;
use crate::util::{normalize_text_option, truncate_with_ellipsis};

/// Characters of the prompt kept when it becomes a dream title.
pub const PROMPT_TITLE_CHARS: usize = 50;

/// Title derived from a prompt: its first 50 characters, plus `...` when cut.
pub fn title_from_prompt(prompt: &str) -> String {
    truncate_with_ellipsis(prompt, PROMPT_TITLE_CHARS)
}

/// A generated image and the dream it was attached to.
#[derive(Debug, Clone)]
pub struct DreamIllustration {
    pub dream_id: DreamId,
    pub image: GeneratedImage,
}

impl<S: DreamStore + ImageGenerator> DreamSynchronizer<S> {
    /// Generates an image for the current dream, creating one when nothing is
    /// selected.
    ///
    /// A dream still carrying the default title is renamed after the prompt.
    /// The first page is reloaded afterwards so image counts are fresh; a
    /// failed reload is logged and does not fail the call.
    pub async fn analyze_dream(
        &self,
        prompt: &str,
        negative_prompt: Option<String>,
    ) -> Result<DreamIllustration> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::InvalidInput(
                "Describe your dream before analyzing it".to_string(),
            ));
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(Error::InvalidInput(format!(
                "Prompt must be at most {MAX_PROMPT_CHARS} characters"
            )));
        }

        let title = title_from_prompt(prompt);
        let dream = match self.current() {
            Some(dream) => dream,
            None => self.create_dream(&title).await?,
        };

        let request = ImageRequest {
            prompt: prompt.to_string(),
            dream_id: dream.id,
            negative_prompt: normalize_text_option(negative_prompt),
        };
        let image = self.store().generate_image(&request).await?;
        tracing::info!("Generated image {} for dream {}", image.id, dream.id);

        if dream.has_default_title() {
            self.rename(dream.id, &title).await?;
        }

        if let Err(error) = self.load_first_page().await {
            tracing::warn!("Failed to refresh dreams after generation: {}", error);
        }
        Ok(DreamIllustration {
            dream_id: dream.id,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{DreamId, DEFAULT_DREAM_TITLE};
    use crate::sync::fake::FakeStore;

    #[test]
    fn title_from_prompt_truncates_long_prompts() {
        assert_eq!(title_from_prompt("  Flying  "), "Flying");
        let long = "a".repeat(60);
        assert_eq!(title_from_prompt(&long), format!("{}...", "a".repeat(50)));
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_locally() {
        let sync = DreamSynchronizer::new(FakeStore::with_dreams(1), 10);
        let result = sync.analyze_dream("   ", None).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(sync.store().generated().is_empty());
        assert_eq!(sync.store().mutation_calls(), 0);
    }

    #[tokio::test]
    async fn creates_dream_when_none_selected() {
        let sync = DreamSynchronizer::new(FakeStore::with_dreams(0), 10);
        sync.load_first_page().await.unwrap();

        let prompt = "I was walking through a forest of glass trees under a violet moon";
        let illustrated = sync.analyze_dream(prompt, None).await.unwrap();
        assert_eq!(illustrated.image.prompt, prompt);

        let dreams = sync.dreams();
        assert_eq!(dreams.len(), 1);
        assert_eq!(dreams[0].title, title_from_prompt(prompt));
        assert!(dreams[0].title.ends_with("..."));
        assert_eq!(dreams[0].image_count, 1);
        assert_eq!(illustrated.dream_id, dreams[0].id);
    }

    #[tokio::test]
    async fn reports_created_dream_pushed_off_first_page() {
        let store = FakeStore::with_dreams(2);
        store.set_pinned(1, true);
        store.set_pinned(2, true);
        let sync = DreamSynchronizer::new(store, 2);

        let illustrated = sync.analyze_dream("Red door", None).await.unwrap();
        assert_eq!(illustrated.dream_id, DreamId::new(3));
        let generated = sync.store().generated();
        assert_eq!(generated[0].dream_id, DreamId::new(3));
        assert_eq!(sync.current().map(|d| d.id), Some(DreamId::new(2)));
    }

    #[tokio::test]
    async fn renames_default_titled_current_dream() {
        let store = FakeStore::with_dreams(2);
        store.set_title(2, DEFAULT_DREAM_TITLE);
        let sync = DreamSynchronizer::new(store, 10);
        sync.load_first_page().await.unwrap();
        assert_eq!(sync.current().map(|d| d.id.get()), Some(2));

        sync.analyze_dream("Falling stairs", Some("  ".to_string()))
            .await
            .unwrap();

        let generated = sync.store().generated();
        let request = &generated[0];
        assert_eq!(request.dream_id, DreamId::new(2));
        assert_eq!(request.negative_prompt, None);
        assert_eq!(
            sync.store().remote_title(DreamId::new(2)).as_deref(),
            Some("Falling stairs")
        );
        assert_eq!(sync.current().map(|d| d.image_count), Some(1));
    }

    #[tokio::test]
    async fn keeps_custom_title() {
        let sync = DreamSynchronizer::new(FakeStore::with_dreams(2), 10);
        sync.load_first_page().await.unwrap();

        sync.analyze_dream("Ocean of ink", None).await.unwrap();
        assert_eq!(
            sync.store().remote_title(DreamId::new(2)).as_deref(),
            Some("Dream 2")
        );
    }
}
