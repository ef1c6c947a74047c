//! In-memory backend used by synchronizer and workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Notify;

use crate::api::{ApiError, ApiResult, DreamStore, ImageGenerator};
use crate::models::{
    sort_dreams, AllDreamsDeleted, DreamId, DreamPage, DreamSummary, DreamUpdate, GeneratedImage,
    ImageRequest, NewDream, PageMeta,
};

/// Holds calls until the test releases them.
#[derive(Default)]
pub struct FetchGate {
    pub started: Notify,
    pub release: Notify,
}

#[derive(Default)]
struct Remote {
    dreams: Vec<DreamSummary>,
    next_id: i64,
    images: i64,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    remote: Arc<Mutex<Remote>>,
    list_calls: Arc<AtomicUsize>,
    mutation_calls: Arc<AtomicUsize>,
    generated: Arc<Mutex<Vec<ImageRequest>>>,
    fail_lists: Arc<Mutex<bool>>,
    gate: Option<Arc<FetchGate>>,
    mutation_gate: Option<Arc<FetchGate>>,
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

pub fn summary(id: i64) -> DreamSummary {
    let created_at = base_time() + Duration::minutes(id);
    DreamSummary {
        id: DreamId::new(id),
        user_id: 1,
        title: format!("Dream {id}"),
        description: None,
        is_pinned: false,
        is_archived: false,
        created_at,
        updated_at: created_at,
        image_count: 0,
    }
}

impl FakeStore {
    /// Seeds `count` dreams; higher ids are newer, so the first page holds
    /// the highest ids.
    pub fn with_dreams(count: i64) -> Self {
        let store = Self::default();
        {
            let mut remote = store.remote.lock().unwrap();
            remote.dreams = (1..=count).map(summary).collect();
            sort_dreams(&mut remote.dreams);
            remote.next_id = count + 1;
        }
        store
    }

    #[must_use]
    pub fn gated(mut self, gate: Arc<FetchGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Holds creates, updates and deletes before they touch the remote.
    #[must_use]
    pub fn gated_mutations(mut self, gate: Arc<FetchGate>) -> Self {
        self.mutation_gate = Some(gate);
        self
    }

    async fn mutate(&self) {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.mutation_gate {
            gate.started.notify_one();
            gate.release.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
    }

    pub fn set_title(&self, id: i64, title: &str) {
        let mut remote = self.remote.lock().unwrap();
        if let Some(dream) = remote.dreams.iter_mut().find(|d| d.id.get() == id) {
            dream.title = title.to_string();
        }
    }

    pub fn set_pinned(&self, id: i64, pinned: bool) {
        let mut remote = self.remote.lock().unwrap();
        if let Some(dream) = remote.dreams.iter_mut().find(|d| d.id.get() == id) {
            dream.is_pinned = pinned;
        }
        sort_dreams(&mut remote.dreams);
    }

    pub fn fail_lists(&self, fail: bool) {
        *self.fail_lists.lock().unwrap() = fail;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub fn generated(&self) -> Vec<ImageRequest> {
        self.generated.lock().unwrap().clone()
    }

    pub fn remote_title(&self, id: DreamId) -> Option<String> {
        let remote = self.remote.lock().unwrap();
        remote
            .dreams
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.title.clone())
    }

    fn page(&self, page: u32, limit: u32) -> DreamPage {
        let remote = self.remote.lock().unwrap();
        let total = remote.dreams.len();
        let start = ((page - 1) * limit) as usize;
        let data = remote
            .dreams
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect::<Vec<_>>();
        let total_pages = total.div_ceil(limit as usize) as u32;
        DreamPage {
            data,
            pagination: PageMeta {
                total: total as u64,
                page,
                limit,
                total_pages,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        }
    }
}

impl DreamStore for FakeStore {
    async fn list_dreams(&self, page: u32, limit: u32) -> ApiResult<DreamPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
        if *self.fail_lists.lock().unwrap() {
            return Err(ApiError::Server("HTTP 503".to_string()));
        }
        Ok(self.page(page, limit))
    }

    async fn create_dream(&self, dream: &NewDream) -> ApiResult<DreamSummary> {
        self.mutate().await;
        let mut remote = self.remote.lock().unwrap();
        let mut created = summary(remote.next_id);
        remote.next_id += 1;
        created.title = dream.title.clone();
        created.description = dream.description.clone();
        remote.dreams.push(created.clone());
        sort_dreams(&mut remote.dreams);
        Ok(created)
    }

    async fn update_dream(&self, id: DreamId, update: &DreamUpdate) -> ApiResult<DreamSummary> {
        self.mutate().await;
        let mut remote = self.remote.lock().unwrap();
        let dream = remote
            .dreams
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound("Dream not found".to_string()))?;
        if let Some(title) = &update.title {
            dream.title.clone_from(title);
        }
        if let Some(is_pinned) = update.is_pinned {
            dream.is_pinned = is_pinned;
        }
        let updated = dream.clone();
        sort_dreams(&mut remote.dreams);
        Ok(updated)
    }

    async fn delete_dream(&self, id: DreamId) -> ApiResult<()> {
        self.mutate().await;
        let mut remote = self.remote.lock().unwrap();
        let before = remote.dreams.len();
        remote.dreams.retain(|d| d.id != id);
        if remote.dreams.len() == before {
            return Err(ApiError::NotFound("Dream not found".to_string()));
        }
        Ok(())
    }

    async fn delete_all_dreams(&self) -> ApiResult<AllDreamsDeleted> {
        self.mutate().await;
        let mut remote = self.remote.lock().unwrap();
        let dreams_deleted = remote.dreams.len() as u64;
        remote.dreams.clear();
        let images_deleted = std::mem::take(&mut remote.images) as u64;
        Ok(AllDreamsDeleted {
            message: None,
            dreams_deleted,
            images_deleted,
        })
    }
}

impl ImageGenerator for FakeStore {
    async fn generate_image(&self, request: &ImageRequest) -> ApiResult<GeneratedImage> {
        tokio::task::yield_now().await;
        self.generated.lock().unwrap().push(request.clone());
        let mut remote = self.remote.lock().unwrap();
        remote.images += 1;
        let id = remote.images;
        if let Some(dream) = remote.dreams.iter_mut().find(|d| d.id == request.dream_id) {
            dream.image_count += 1;
        }
        Ok(GeneratedImage {
            id,
            prompt: request.prompt.clone(),
            negative_prompt: request.negative_prompt.clone(),
            image_url: format!("https://img.example/{id}.png"),
            model: "fake-diffusion".to_string(),
            analysis: Some("Water often stands for emotion.".to_string()),
            created_at: base_time(),
        })
    }
}
