//! dreamlens-core - Core library for Dreamlens
//!
//! This crate contains the shared models, the REST client for the Dreamlens
//! backend, session handling, and the dream list synchronizer used by every
//! Dreamlens front end.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod sync;
pub mod util;
pub mod workflow;

pub use api::{ApiError, DreamStore, DreamlensClient, ImageGenerator};
pub use auth::{AuthSession, MemorySessionStore, SessionPersistence};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use identity::{IdentityGate, IdentityTransition};
pub use models::{DreamId, DreamSummary};
pub use sync::{DreamSynchronizer, PageOutcome};
pub use workflow::DreamIllustration;
