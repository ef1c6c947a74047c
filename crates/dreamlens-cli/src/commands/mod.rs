pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod generate;
pub mod images;
pub mod list;
pub mod new;
pub mod pin;
pub mod rename;
pub mod show;
