use dreamlens_core::auth::{capture_oauth_callback, SessionPersistence};
use dreamlens_core::models::{Credentials, Registration};
use dreamlens_core::util::normalize_text_option;

use crate::auth::SessionStore;
use crate::cli::AuthCommands;
use crate::commands::common::{open_session, require_confirmation};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        AuthCommands::Register {
            email,
            username,
            password,
            full_name,
        } => {
            let session = open_session(global_profile)?;
            let user = session
                .client
                .register(&Registration {
                    email,
                    username,
                    password,
                    full_name: normalize_text_option(full_name),
                })
                .await?;
            println!(
                "Registered '{}' <{}>. Run `dreamlens auth login --identifier {}` to sign in.",
                user.username, user.email, user.username
            );
            Ok(())
        }
        AuthCommands::Login {
            identifier,
            password,
        } => {
            let session = open_session(global_profile)?;
            let identifier = normalize_text_option(identifier)
                .or_else(|| session.profile.remembered_identifier())
                .ok_or_else(|| {
                    CliError::Config("--identifier is required for the first login".to_string())
                })?;

            session
                .client
                .login(&Credentials {
                    identifier: identifier.clone(),
                    password,
                })
                .await?;
            let user = session.client.current_user().await?;
            remember_identifier(&session.profile_name, &identifier)?;

            println!(
                "Signed in profile '{}' as {} <{}>",
                session.profile_name, user.username, user.email
            );
            Ok(())
        }
        AuthCommands::Callback { url } => {
            let session = open_session(global_profile)?;
            let captured = capture_oauth_callback(&url)?;
            match session.client.accept_oauth_callback(&captured).await? {
                Some(user) => println!(
                    "Signed in profile '{}' as {} via {}",
                    session.profile_name, user.username, user.auth_provider
                ),
                None => println!("No OAuth parameters found in {}", captured.clean_url),
            }
            Ok(())
        }
        AuthCommands::Status => {
            let session = open_session(global_profile)?;
            if !session.client.has_session()? {
                println!("Profile '{}' is not signed in.", session.profile_name);
                return Ok(());
            }

            match session.client.restore_user().await? {
                Some(user) => println!(
                    "Profile '{}' is signed in as {} <{}> ({} account)",
                    session.profile_name, user.username, user.email, user.auth_provider
                ),
                None => println!(
                    "Profile '{}' session expired and was cleared. Sign in again.",
                    session.profile_name
                ),
            }
            Ok(())
        }
        AuthCommands::Logout => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = config.resolve_profile_name(global_profile);
            SessionStore::for_profile(&profile_name).clear_session()?;
            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
        AuthCommands::DeleteAccount { password, yes } => {
            require_confirmation(yes, "delete the account")?;

            let session = open_session(global_profile)?;
            let user = session.client.current_user().await?;
            if user.is_local() && password.is_none() {
                return Err(CliError::Config(
                    "--password is required to delete a local account".to_string(),
                ));
            }

            let deleted = session.client.delete_account(password.as_deref()).await?;
            println!(
                "Deleted account '{}' ({} dreams, {} orphaned images)",
                user.username, deleted.dreams_deleted, deleted.orphaned_images_deleted
            );
            Ok(())
        }
    }
}

fn remember_identifier(profile_name: &str, identifier: &str) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    config.profile_mut_or_default(profile_name).remembered_identifier =
        Some(identifier.to_string());
    config.save().map_err(CliError::Config)?;
    Ok(())
}
