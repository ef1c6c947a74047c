//! Dream list synchronizer.
//!
//! Keeps a paginated, locally ordered view of the signed-in user's dreams in
//! step with the backend. Local state changes only after the backend confirms
//! an operation, and every list fetch carries a generation ticket so a result
//! that lands after [`DreamSynchronizer::reset`] is dropped instead of leaking
//! the previous account's dreams into the list. Mutations are only discarded
//! across a reset; a reload running alongside them does not swallow them.

#[cfg(test)]
pub(crate) mod fake;
mod list;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use list::{DreamList, FetchTicket, PageCursor, PageOutcome};

use crate::api::DreamStore;
use crate::config::MAX_PAGE_SIZE;
use crate::error::{Error, Result};
use crate::identity::IdentityTransition;
use crate::models::{
    AllDreamsDeleted, DreamId, DreamSummary, DreamUpdate, NewDream, DEFAULT_DREAM_TITLE,
    MAX_TITLE_CHARS,
};

pub struct DreamSynchronizer<S> {
    store: S,
    page_size: u32,
    state: Mutex<DreamList>,
}

impl<S: DreamStore> DreamSynchronizer<S> {
    pub fn new(store: S, page_size: u32) -> Self {
        Self {
            store,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            state: Mutex::new(DreamList::default()),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    fn state(&self) -> MutexGuard<'_, DreamList> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cloned view of the list for rendering.
    pub fn snapshot(&self) -> DreamList {
        self.state().clone()
    }

    pub fn dreams(&self) -> Vec<DreamSummary> {
        self.state().dreams().to_vec()
    }

    pub fn current(&self) -> Option<DreamSummary> {
        self.state().current().cloned()
    }

    pub fn select(&self, id: DreamId) -> bool {
        self.state().select(id)
    }

    /// Clears the list and invalidates in-flight fetches.
    pub fn reset(&self) {
        tracing::debug!("Resetting dream list");
        self.state().reset();
    }

    /// Fetches page 1 and replaces the list with it.
    pub async fn load_first_page(&self) -> Result<PageOutcome> {
        let ticket = self.state().begin_first_page();
        self.fetch(ticket).await
    }

    /// Fetches the page after the cursor and appends it.
    ///
    /// Returns [`PageOutcome::Skipped`] without a network call when another
    /// fetch is running or the backend reported no further pages.
    pub async fn load_next_page(&self) -> Result<PageOutcome> {
        let Some(ticket) = self.state().begin_next_page() else {
            return Ok(PageOutcome::Skipped);
        };
        self.fetch(ticket).await
    }

    async fn fetch(&self, ticket: FetchTicket) -> Result<PageOutcome> {
        tracing::debug!(
            "Loading dream page {} (generation {})",
            ticket.page,
            ticket.generation
        );
        match self.store.list_dreams(ticket.page, self.page_size).await {
            Ok(page) => {
                let outcome = self.state().finish_fetch(ticket, page);
                if outcome == PageOutcome::Stale {
                    tracing::debug!("Discarded stale dream page {}", ticket.page);
                }
                Ok(outcome)
            }
            Err(error) => {
                self.state().abort_fetch(ticket);
                Err(error.into())
            }
        }
    }

    /// Finds a dream by id, loading further pages until it shows up.
    pub async fn locate(&self, id: DreamId) -> Result<Option<DreamSummary>> {
        if !self.state().is_initialized() {
            self.load_first_page().await?;
        }
        loop {
            if let Some(dream) = self.state().get(id).cloned() {
                return Ok(Some(dream));
            }
            match self.load_next_page().await? {
                PageOutcome::Loaded { .. } => {}
                PageOutcome::Skipped | PageOutcome::Stale => return Ok(None),
            }
        }
    }

    /// Creates a dream and makes it current. A blank title becomes
    /// [`DEFAULT_DREAM_TITLE`].
    pub async fn create_dream(&self, title: &str) -> Result<DreamSummary> {
        let title = title.trim();
        let title = if title.is_empty() {
            DEFAULT_DREAM_TITLE
        } else {
            validate_title(title)?
        };

        let epoch = self.state().epoch();
        let created = self.store.create_dream(&NewDream::titled(title)).await?;
        let mut state = self.state();
        if state.is_current_epoch(epoch) {
            state.insert_created(created.clone());
        }
        tracing::info!("Created dream {} '{}'", created.id, created.title);
        Ok(created)
    }

    /// Renames a dream, keeping its position in the list.
    pub async fn rename(&self, id: DreamId, title: &str) -> Result<DreamSummary> {
        let title = validate_title(title.trim())?;

        let epoch = self.state().epoch();
        let updated = self
            .store
            .update_dream(id, &DreamUpdate::title(title))
            .await?;
        let mut state = self.state();
        if state.is_current_epoch(epoch) {
            state.replace(updated.clone());
        }
        Ok(updated)
    }

    /// Flips the pinned flag of a listed dream and re-sorts the list.
    pub async fn toggle_pin(&self, id: DreamId) -> Result<DreamSummary> {
        let (epoch, is_pinned) = {
            let state = self.state();
            let dream = state.get(id).ok_or(Error::NotFound(id))?;
            (state.epoch(), dream.is_pinned)
        };

        let updated = self
            .store
            .update_dream(id, &DreamUpdate::pinned(!is_pinned))
            .await?;
        let mut state = self.state();
        if state.is_current_epoch(epoch) {
            state.replace_and_sort(updated.clone());
        }
        tracing::debug!("Dream {} pinned: {}", id, updated.is_pinned);
        Ok(updated)
    }

    pub async fn delete(&self, id: DreamId) -> Result<()> {
        let epoch = self.state().epoch();
        self.store.delete_dream(id).await?;
        let mut state = self.state();
        if state.is_current_epoch(epoch) {
            state.remove(id);
        }
        tracing::info!("Deleted dream {}", id);
        Ok(())
    }

    /// Deletes every dream of the signed-in user.
    pub async fn delete_all(&self) -> Result<AllDreamsDeleted> {
        let epoch = self.state().epoch();
        let deleted = self.store.delete_all_dreams().await?;
        let mut state = self.state();
        if state.is_current_epoch(epoch) {
            state.clear_all();
        }
        tracing::info!(
            "Deleted {} dreams and {} images",
            deleted.dreams_deleted,
            deleted.images_deleted
        );
        Ok(deleted)
    }

    /// Reacts to sign-in and sign-out.
    pub async fn on_identity_change(&self, transition: IdentityTransition) -> Result<()> {
        self.reset();
        if transition == IdentityTransition::Authenticated {
            self.load_first_page().await?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<&str> {
    if title.is_empty() {
        return Err(Error::InvalidInput("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title)
}
