use dreamlens_core::DreamId;

use crate::commands::common::{format_timestamp, open_session};
use crate::commands::generate::describe_image_url;
use crate::error::CliError;

pub async fn run_show(
    id: DreamId,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let session = open_session(global_profile)?;
    let dream = session.client.dream_detail(id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&dream)?);
        return Ok(());
    }

    let pinned = if dream.is_pinned { " (pinned)" } else { "" };
    println!("{}  {}{}", dream.id, dream.title, pinned);
    println!("Created {}", format_timestamp(dream.created_at));
    if let Some(description) = dream.description.as_deref() {
        println!();
        println!("{description}");
    }

    if dream.images.is_empty() {
        println!();
        println!(
            "No images yet. Run `dreamlens generate --dream {}` to add one.",
            dream.id
        );
    }
    for image in &dream.images {
        println!();
        println!(
            "#{}  {}  [{}]",
            image.id,
            format_timestamp(image.created_at),
            image.model_name
        );
        println!("  Prompt: {}", image.prompt);
        if let Some(negative) = image.negative_prompt.as_deref() {
            println!("  Avoid: {negative}");
        }
        println!("  Image: {}", describe_image_url(&image.image_url));
        if let Some(analysis) = image.analysis.as_deref() {
            println!("  Analysis: {analysis}");
        }
    }
    Ok(())
}
