//! Data models for Dreamlens

mod dream;
mod image;
mod user;

pub use dream::{
    recency_order, sort_dreams, AllDreamsDeleted, DreamDetail, DreamId, DreamPage, DreamSummary,
    DreamUpdate, NewDream, PageMeta, DEFAULT_DREAM_TITLE, MAX_TITLE_CHARS,
};
pub use image::{DreamImage, GeneratedImage, ImageRequest, StoredImage, MAX_PROMPT_CHARS};
pub use user::{AccountDeleted, Credentials, Registration, User};
