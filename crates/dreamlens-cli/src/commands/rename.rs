use dreamlens_core::DreamId;

use crate::commands::common::{join_words, open_synchronizer};
use crate::error::CliError;

pub async fn run_rename(
    id: DreamId,
    title_parts: &[String],
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let sync = open_synchronizer(global_profile)?;
    let title = join_words(title_parts).unwrap_or_default();
    let dream = sync.rename(id, &title).await?;

    println!("{}  {}", dream.id, dream.title);
    Ok(())
}
