use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dreamlens_core::DreamId;

#[derive(Parser)]
#[command(name = "dreamlens")]
#[command(about = "Journal your dreams and illustrate them from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (API endpoint and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your dreams, pinned first
    List {
        /// Number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,
        /// Load every page
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new dream
    #[command(alias = "add")]
    New {
        /// Dream title (defaults to "New dream")
        title: Vec<String>,
    },
    /// Show a dream with its images
    Show {
        /// Dream ID
        id: DreamId,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a dream
    Rename {
        /// Dream ID
        id: DreamId,
        /// New title
        #[arg(required = true)]
        title: Vec<String>,
    },
    /// Pin or unpin a dream
    Pin {
        /// Dream ID
        id: DreamId,
    },
    /// Delete a dream and its images
    Delete {
        /// Dream ID
        id: DreamId,
    },
    /// Delete every dream of the signed-in account
    DeleteAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Illustrate a dream from a prompt
    #[command(alias = "analyze")]
    Generate {
        /// Dream to illustrate (defaults to the most recent one)
        #[arg(long, value_name = "ID", conflicts_with = "new")]
        dream: Option<DreamId>,
        /// Always start a new dream titled after the prompt
        #[arg(long)]
        new: bool,
        /// Things the image should avoid
        #[arg(long, value_name = "TEXT")]
        negative: Option<String>,
        /// Save the generated image to this path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Dream description used as the prompt
        prompt: Vec<String>,
    },
    /// List your most recent images
    Images {
        /// Number of images to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, sign out and manage the account
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Dreamlens API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Dreams fetched per page (1-50)
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create a local account
    Register {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        #[arg(long, value_name = "NAME")]
        full_name: Option<String>,
    },
    /// Sign in with email or username and store the session in the keychain
    Login {
        /// Email or username (defaults to the last one used)
        #[arg(long, value_name = "EMAIL_OR_USERNAME")]
        identifier: Option<String>,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Finish an OAuth sign-in from the redirect URL
    Callback {
        /// Full redirect URL including `token` and `login` parameters
        url: String,
    },
    /// Show auth status for profile
    Status,
    /// Logout profile and clear stored session
    Logout,
    /// Permanently delete the account and all of its dreams
    DeleteAccount {
        /// Account password (local accounts only)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}
