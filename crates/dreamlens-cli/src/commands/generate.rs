use std::path::Path;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use dreamlens_core::util::is_http_url;
use dreamlens_core::DreamId;

use crate::commands::common::{join_words, open_synchronizer};
use crate::error::CliError;

/// Inline image payload split out of a `data:` URL.
#[derive(Debug, PartialEq, Eq)]
pub struct InlineImage<'a> {
    pub media_type: &'a str,
    pub base64: &'a str,
}

pub fn parse_data_url(url: &str) -> Option<InlineImage<'_>> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    Some(InlineImage {
        media_type: if media_type.is_empty() {
            "application/octet-stream"
        } else {
            media_type
        },
        base64: payload,
    })
}

/// Short, printable form of an image URL; inline payloads are summarized.
pub fn describe_image_url(url: &str) -> String {
    match parse_data_url(url) {
        Some(inline) => format!(
            "inline {} (~{} KB)",
            inline.media_type,
            inline.base64.len() * 3 / 4 / 1024
        ),
        None => url.to_string(),
    }
}

pub fn decode_inline_image(url: &str) -> Result<Vec<u8>, CliError> {
    let inline = parse_data_url(url)
        .ok_or_else(|| CliError::ImageDownload("not a base64 data URL".to_string()))?;
    BASE64_STANDARD
        .decode(inline.base64.trim())
        .map_err(|error| CliError::ImageDownload(error.to_string()))
}

async fn fetch_image_bytes(url: &str) -> Result<Vec<u8>, CliError> {
    if parse_data_url(url).is_some() {
        return decode_inline_image(url);
    }
    if !is_http_url(url) {
        return Err(CliError::ImageDownload(format!(
            "unsupported image URL: {url}"
        )));
    }

    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|error| CliError::ImageDownload(error.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|error| CliError::ImageDownload(error.to_string()))?;
    Ok(bytes.to_vec())
}

pub async fn run_generate(
    dream: Option<DreamId>,
    start_new: bool,
    negative: Option<String>,
    output: Option<&Path>,
    prompt_parts: &[String],
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let prompt = join_words(prompt_parts).ok_or(CliError::EmptyPrompt)?;
    let sync = open_synchronizer(global_profile)?;

    if let Some(id) = dream {
        if sync.locate(id).await?.is_none() {
            return Err(CliError::DreamNotFound(id));
        }
        sync.select(id);
    } else if !start_new {
        // Most recent dream becomes current, same as opening the journal.
        sync.load_first_page().await?;
    }

    println!("Generating image...");
    let illustrated = sync.analyze_dream(&prompt, negative).await?;
    let image = &illustrated.image;
    println!(
        "Dream {}: image #{} ({})",
        illustrated.dream_id, image.id, image.model
    );
    println!("{}", describe_image_url(&image.image_url));
    if let Some(analysis) = image.analysis.as_deref() {
        println!();
        println!("{analysis}");
    }

    if let Some(path) = output {
        let bytes = fetch_image_bytes(&image.image_url).await?;
        std::fs::write(path, bytes)?;
        println!("Saved image to {}", path.display());
    }
    Ok(())
}
