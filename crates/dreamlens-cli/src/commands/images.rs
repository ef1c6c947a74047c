use crate::commands::common::{format_timestamp, open_session};
use crate::commands::generate::describe_image_url;
use crate::error::CliError;

pub async fn run_images(
    limit: u32,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let session = open_session(global_profile)?;
    let images = session.client.my_images(limit).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    if images.is_empty() {
        println!("No images yet.");
    }
    for image in &images {
        println!(
            "#{:<6} {}  {}",
            image.id,
            format_timestamp(image.created_at),
            describe_image_url(&image.image_url)
        );
        println!("        {}", image.prompt);
    }
    Ok(())
}
