use std::env;

use dreamlens_core::config::{normalize_base_url, MAX_PAGE_SIZE};
use dreamlens_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

const API_BASE_URL_ENV: &str = "DREAMLENS_API_BASE_URL";

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            page_size,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url,
            page_size,
            no_activate,
        ),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    page_size: Option<u32>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let existing_profile = config.profile(&profile_name).cloned().unwrap_or_default();

    let merged_api_base_url = resolve_api_base_url(
        normalize_text_option(api_base_url),
        normalize_text_option(env::var(API_BASE_URL_ENV).ok()),
        existing_profile.api_base_url(),
    )?;
    let merged_page_size = page_size
        .map(validate_page_size)
        .transpose()?
        .or(existing_profile.page_size);

    let profile = config.profile_mut_or_default(&profile_name);
    profile.api_base_url = merged_api_base_url;
    profile.page_size = merged_page_size;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let has_base_url = config
        .profile(&profile_name)
        .and_then(|profile| profile.api_base_url())
        .is_some();
    if has_base_url {
        println!(
            "Profile '{profile_name}' is ready. Run `dreamlens auth login --identifier <email-or-username> --password <password>`."
        );
    } else {
        println!("Profile '{profile_name}' is missing: api_base_url");
    }

    Ok(())
}

/// Explicit flag, then environment, then the value already stored.
pub fn resolve_api_base_url(
    explicit: Option<String>,
    from_env: Option<String>,
    existing: Option<String>,
) -> Result<Option<String>, CliError> {
    explicit
        .or(from_env)
        .or(existing)
        .map(|url| normalize_base_url(&url).map_err(CliError::from))
        .transpose()
}

pub fn validate_page_size(page_size: u32) -> Result<u32, CliError> {
    if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        Ok(page_size)
    } else {
        Err(CliError::Config(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )))
    }
}
