//! Dream model

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::image::DreamImage;

/// Title given to dreams created without one.
pub const DEFAULT_DREAM_TITLE: &str = "New dream";

/// Longest title the backend accepts.
pub const MAX_TITLE_CHARS: usize = 255;

/// Backend-assigned dream identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DreamId(i64);

impl DreamId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DreamId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A dream as it appears in the paginated list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamSummary {
    pub id: DreamId,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of generated images in this dream
    #[serde(default)]
    pub image_count: u32,
}

impl DreamSummary {
    /// Whether the title is still the placeholder given at creation.
    #[must_use]
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_DREAM_TITLE
    }
}

/// A dream with all of its generated images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamDetail {
    pub id: DreamId,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<DreamImage>,
}

/// Body of `POST /api/dreams/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDream {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewDream {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// Partial update for `PUT /api/dreams/{id}/`; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DreamUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl DreamUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pinned(is_pinned: bool) -> Self {
        Self {
            is_pinned: Some(is_pinned),
            ..Self::default()
        }
    }
}

/// Pagination metadata returned with every list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of `GET /api/dreams/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamPage {
    pub data: Vec<DreamSummary>,
    pub pagination: PageMeta,
}

/// Response of `DELETE /api/dreams/all`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllDreamsDeleted {
    #[serde(default)]
    pub message: Option<String>,
    pub dreams_deleted: u64,
    pub images_deleted: u64,
}

/// List ordering: pinned first, then newest first.
pub fn recency_order(a: &DreamSummary, b: &DreamSummary) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort under [`recency_order`].
pub fn sort_dreams(dreams: &mut [DreamSummary]) {
    dreams.sort_by(recency_order);
}
