//! Dreamlens CLI - journal your dreams and illustrate them from the terminal.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;

use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::auth_cmd::run_auth;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::{run_delete, run_delete_all};
use crate::commands::generate::run_generate;
use crate::commands::images::run_images;
use crate::commands::list::run_list;
use crate::commands::new::run_new;
use crate::commands::pin::run_pin;
use crate::commands::rename::run_rename;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "dreamlens=info".parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::List { pages, all, json } => run_list(pages, all, json, profile).await?,
        Commands::New { title } => run_new(&title, profile).await?,
        Commands::Show { id, json } => run_show(id, json, profile).await?,
        Commands::Rename { id, title } => run_rename(id, &title, profile).await?,
        Commands::Pin { id } => run_pin(id, profile).await?,
        Commands::Delete { id } => run_delete(id, profile).await?,
        Commands::DeleteAll { yes } => run_delete_all(yes, profile).await?,
        Commands::Generate {
            dream,
            new,
            negative,
            output,
            prompt,
        } => {
            run_generate(dream, new, negative, output.as_deref(), &prompt, profile).await?;
        }
        Commands::Images { limit, json } => run_images(limit, json, profile).await?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Auth { command } => run_auth(command, profile).await?,
    }

    Ok(())
}
