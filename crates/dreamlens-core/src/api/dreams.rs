//! Dream endpoints under `/api/dreams`.

use std::future::Future;

use super::{send_empty, send_json, ApiResult, DreamlensClient};
use crate::auth::SessionPersistence;
use crate::models::{
    AllDreamsDeleted, DreamDetail, DreamId, DreamPage, DreamSummary, DreamUpdate, NewDream,
};

/// Archived dreams stay hidden from the list.
pub const INCLUDE_ARCHIVED: bool = false;

/// Remote operations the dream list synchronizer depends on.
pub trait DreamStore: Send + Sync {
    /// Fetches one page (1-indexed) of the signed-in user's dreams.
    fn list_dreams(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = ApiResult<DreamPage>> + Send;

    fn create_dream(
        &self,
        dream: &NewDream,
    ) -> impl Future<Output = ApiResult<DreamSummary>> + Send;

    fn update_dream(
        &self,
        id: DreamId,
        update: &DreamUpdate,
    ) -> impl Future<Output = ApiResult<DreamSummary>> + Send;

    fn delete_dream(&self, id: DreamId) -> impl Future<Output = ApiResult<()>> + Send;

    fn delete_all_dreams(&self) -> impl Future<Output = ApiResult<AllDreamsDeleted>> + Send;
}

impl<S: SessionPersistence> DreamStore for DreamlensClient<S> {
    async fn list_dreams(&self, page: u32, limit: u32) -> ApiResult<DreamPage> {
        tracing::debug!("Fetching dreams page {} (limit {})", page, limit);
        let request = self.authorized(self.client.get(self.url("/api/dreams/")).query(&[
            ("include_archived", INCLUDE_ARCHIVED.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ]))?;
        send_json(request).await
    }

    async fn create_dream(&self, dream: &NewDream) -> ApiResult<DreamSummary> {
        let request = self.authorized(self.client.post(self.url("/api/dreams/")).json(dream))?;
        send_json(request).await
    }

    async fn update_dream(&self, id: DreamId, update: &DreamUpdate) -> ApiResult<DreamSummary> {
        let request = self.authorized(
            self.client
                .put(self.url(&format!("/api/dreams/{id}/")))
                .json(update),
        )?;
        send_json(request).await
    }

    async fn delete_dream(&self, id: DreamId) -> ApiResult<()> {
        let request =
            self.authorized(self.client.delete(self.url(&format!("/api/dreams/{id}/"))))?;
        send_empty(request).await
    }

    async fn delete_all_dreams(&self) -> ApiResult<AllDreamsDeleted> {
        let request = self.authorized(self.client.delete(self.url("/api/dreams/all")))?;
        send_json(request).await
    }
}

impl<S: SessionPersistence> DreamlensClient<S> {
    /// Fetches a dream together with all of its images.
    pub async fn dream_detail(&self, id: DreamId) -> ApiResult<DreamDetail> {
        let request =
            self.authorized(self.client.get(self.url(&format!("/api/dreams/{id}/"))))?;
        send_json(request).await
    }
}
