//! Client configuration.
//!
//! Provides a `ClientConfig` shared by every front end to discover the
//! Dreamlens API endpoint and the list page size.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_BASE_URL_ENV: &str = "DREAMLENS_API_BASE_URL";
const PAGE_SIZE_ENV: &str = "DREAMLENS_PAGE_SIZE";
const TIMEOUT_SECS_ENV: &str = "DREAMLENS_TIMEOUT_SECS";

/// Resolved connection settings for the Dreamlens API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Builds a config for `api_base_url` with default paging and timeout.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url.into())?,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Reads `DREAMLENS_API_BASE_URL`, `DREAMLENS_PAGE_SIZE` and
    /// `DREAMLENS_TIMEOUT_SECS`.
    ///
    /// Returns `Ok(None)` when no base URL is set in the environment.
    pub fn from_env() -> Result<Option<Self>> {
        let Some(base_url) = normalize_text_option(std::env::var(API_BASE_URL_ENV).ok()) else {
            return Ok(None);
        };
        let mut config = Self::new(base_url)?;
        if let Some(raw) = normalize_text_option(std::env::var(PAGE_SIZE_ENV).ok()) {
            config = config.with_page_size(parse_number(&raw, PAGE_SIZE_ENV)?);
        }
        if let Some(raw) = normalize_text_option(std::env::var(TIMEOUT_SECS_ENV).ok()) {
            config.timeout_secs = parse_number(&raw, TIMEOUT_SECS_ENV)?;
        }
        Ok(Some(config))
    }

    /// Sets the page size, clamped to what the backend accepts (1..=50).
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trims, strips trailing slashes and requires an `http(s)://` scheme.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(&base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

fn parse_number<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Config(format!("{name} must be a positive number, got '{raw}'")))
}
