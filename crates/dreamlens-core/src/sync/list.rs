//! Local dream list state: ordered summaries, page cursor, selection, and
//! the bookkeeping that keeps late responses out.
//!
//! Two counters are kept. The fetch generation advances on every reset,
//! page-1 reload and bulk delete, and tags page tickets. The epoch advances
//! only on reset and tags mutations, so a confirmed rename or delete is not
//! lost just because a reload overlapped it.

use crate::models::{sort_dreams, DreamId, DreamPage, DreamSummary};

/// Last loaded page (1-indexed) and whether the backend reported more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: u32,
    pub has_more: bool,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: true,
        }
    }
}

/// Permission to run one list fetch, tagged with the generation it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub page: u32,
}

/// What happened to a page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// Page applied to the list
    Loaded { received: usize, has_more: bool },
    /// Another fetch was running, nothing was loaded yet, or no pages remain
    Skipped,
    /// The list was reset, reloaded or cleared while the request was in
    /// flight; result dropped
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct DreamList {
    dreams: Vec<DreamSummary>,
    cursor: PageCursor,
    selected: Option<DreamId>,
    generation: u64,
    epoch: u64,
    in_flight: Option<u64>,
    initialized: bool,
}

impl DreamList {
    pub fn dreams(&self) -> &[DreamSummary] {
        &self.dreams
    }

    pub const fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Counter captured by mutations; only [`DreamList::reset`] moves it.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub const fn is_current_epoch(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// False until a first page has loaded since the last reset.
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn len(&self) -> usize {
        self.dreams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dreams.is_empty()
    }

    pub fn get(&self, id: DreamId) -> Option<&DreamSummary> {
        self.dreams.iter().find(|dream| dream.id == id)
    }

    pub const fn selected(&self) -> Option<DreamId> {
        self.selected
    }

    /// The dream targeted by the next image generation.
    pub fn current(&self) -> Option<&DreamSummary> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Selects a listed dream; returns `false` and keeps the old selection
    /// when `id` is not in the list.
    pub fn select(&mut self, id: DreamId) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Empties the list and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.dreams.clear();
        self.cursor = PageCursor::default();
        self.selected = None;
        self.generation += 1;
        self.epoch += 1;
        self.in_flight = None;
        self.initialized = false;
    }

    /// Starts a page-1 load. Always granted; any fetch already running is
    /// superseded and its result will come back stale.
    pub fn begin_first_page(&mut self) -> FetchTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        FetchTicket {
            generation: self.generation,
            page: 1,
        }
    }

    /// Starts a next-page load unless a fetch is running, nothing has been
    /// loaded yet, or the backend reported no further pages.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() || !self.initialized || !self.cursor.has_more {
            return None;
        }
        self.in_flight = Some(self.generation);
        Some(FetchTicket {
            generation: self.generation,
            page: self.cursor.page + 1,
        })
    }

    /// Applies a fetched page. Page 1 replaces the list wholesale, later pages
    /// append in arrival order.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, page: DreamPage) -> PageOutcome {
        if !self.is_current(ticket.generation) {
            return PageOutcome::Stale;
        }
        self.in_flight = None;

        let received = page.data.len();
        let has_more = page.pagination.has_next;
        if ticket.page == 1 {
            self.dreams = page.data;
            self.initialized = true;
            if self.current().is_none() {
                self.selected = self.dreams.first().map(|dream| dream.id);
            }
        } else {
            self.dreams.extend(page.data);
        }
        self.cursor = PageCursor {
            page: ticket.page,
            has_more,
        };

        PageOutcome::Loaded { received, has_more }
    }

    /// Releases the in-flight guard after a failed fetch; cursor and list are
    /// left as they were so the call can be retried.
    pub fn abort_fetch(&mut self, ticket: FetchTicket) {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
    }

    /// Prepends a freshly created dream and makes it current.
    pub fn insert_created(&mut self, dream: DreamSummary) {
        self.selected = Some(dream.id);
        self.dreams.insert(0, dream);
    }

    /// Replaces the entry with the same id in place. Returns `false` when the
    /// dream is not listed.
    pub fn replace(&mut self, dream: DreamSummary) -> bool {
        match self.dreams.iter_mut().find(|entry| entry.id == dream.id) {
            Some(entry) => {
                *entry = dream;
                true
            }
            None => false,
        }
    }

    /// Replaces the entry and restores pinned-first, newest-first order.
    pub fn replace_and_sort(&mut self, dream: DreamSummary) -> bool {
        let replaced = self.replace(dream);
        if replaced {
            sort_dreams(&mut self.dreams);
        }
        replaced
    }

    /// Removes a dream; a removed selection falls back to the new first entry.
    pub fn remove(&mut self, id: DreamId) -> bool {
        let before = self.dreams.len();
        self.dreams.retain(|dream| dream.id != id);
        let removed = self.dreams.len() != before;
        if self.selected == Some(id) {
            self.selected = self.dreams.first().map(|dream| dream.id);
        }
        removed
    }

    /// Drops every dream after a confirmed bulk delete. Nothing remains
    /// remotely, so no further pages are expected and any fetch still running
    /// comes back stale.
    pub fn clear_all(&mut self) {
        self.dreams.clear();
        self.selected = None;
        self.cursor = PageCursor {
            page: 1,
            has_more: false,
        };
        self.generation += 1;
        self.in_flight = None;
        self.initialized = true;
    }
}
