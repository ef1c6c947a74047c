use chrono::{DateTime, Utc};
use dreamlens_core::config::ClientConfig;
use dreamlens_core::models::DreamSummary;
use dreamlens_core::util::truncate_with_ellipsis;
use dreamlens_core::{DreamSynchronizer, DreamlensClient};
use serde::Serialize;

use crate::auth::SessionStore;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

pub type Client = DreamlensClient<SessionStore>;

/// A resolved profile with a client bound to its stored session.
pub struct Session {
    pub profile_name: String,
    pub profile: CliProfile,
    pub page_size: u32,
    pub client: Client,
}

pub fn open_session(global_profile: Option<&str>) -> Result<Session, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let profile = config.profile(&profile_name).cloned().unwrap_or_default();
    let client_config = resolve_client_config(&profile_name, &profile)?;
    tracing::debug!(
        "Using profile '{}' against {}",
        profile_name,
        client_config.api_base_url
    );

    let client = DreamlensClient::new(&client_config, SessionStore::for_profile(&profile_name))?;
    Ok(Session {
        profile_name,
        profile,
        page_size: client_config.page_size,
        client,
    })
}

pub fn open_synchronizer(
    global_profile: Option<&str>,
) -> Result<DreamSynchronizer<Client>, CliError> {
    let session = open_session(global_profile)?;
    Ok(DreamSynchronizer::new(session.client, session.page_size))
}

/// Profile values win; the environment fills in what the profile lacks.
pub fn resolve_client_config(
    profile_name: &str,
    profile: &CliProfile,
) -> Result<ClientConfig, CliError> {
    let from_env = ClientConfig::from_env()?;
    let mut config = match (profile.api_base_url(), &from_env) {
        (Some(url), _) => ClientConfig::new(url)?,
        (None, Some(config)) => config.clone(),
        (None, None) => return Err(CliError::NotConfigured(profile_name.to_string())),
    };
    if let Some(env_config) = from_env {
        config = config
            .with_page_size(env_config.page_size)
            .with_timeout_secs(env_config.timeout_secs);
    }
    if let Some(page_size) = profile.page_size {
        config = config.with_page_size(page_size);
    }
    Ok(config)
}

/// Joins positional words into one trimmed string, `None` when blank.
pub fn join_words(parts: &[String]) -> Option<String> {
    let joined = parts.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn require_confirmation(confirmed: bool, action: &'static str) -> Result<(), CliError> {
    if confirmed {
        Ok(())
    } else {
        Err(CliError::ConfirmationRequired(action))
    }
}

#[derive(Debug, Serialize)]
pub struct DreamListItem {
    pub id: i64,
    pub title: String,
    pub is_pinned: bool,
    pub image_count: u32,
    pub created_at: String,
    pub relative_time: String,
}

pub fn dream_to_list_item(dream: &DreamSummary, now: DateTime<Utc>) -> DreamListItem {
    DreamListItem {
        id: dream.id.get(),
        title: dream.title.clone(),
        is_pinned: dream.is_pinned,
        image_count: dream.image_count,
        created_at: dream.created_at.to_rfc3339(),
        relative_time: format_relative_time(dream.created_at, now),
    }
}

pub fn format_dream_lines(dreams: &[DreamSummary], now: DateTime<Utc>) -> Vec<String> {
    dreams
        .iter()
        .map(|dream| {
            let marker = if dream.is_pinned { "*" } else { " " };
            let title = truncate_with_ellipsis(&dream.title, 40);
            let images = match dream.image_count {
                0 => String::new(),
                1 => "1 image".to_string(),
                count => format!("{count} images"),
            };
            let relative_time = format_relative_time(dream.created_at, now);
            let line = format!(
                "{marker} {:>6}  {title:<43}  {relative_time:<10}  {images}",
                dream.id.get()
            );
            line.trim_end().to_string()
        })
        .collect()
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}
