use dreamlens_core::DreamId;

use crate::commands::common::open_synchronizer;
use crate::error::CliError;

pub async fn run_pin(id: DreamId, global_profile: Option<&str>) -> Result<(), CliError> {
    let sync = open_synchronizer(global_profile)?;
    if sync.locate(id).await?.is_none() {
        return Err(CliError::DreamNotFound(id));
    }

    let dream = sync.toggle_pin(id).await?;
    let state = if dream.is_pinned { "Pinned" } else { "Unpinned" };
    println!("{state} {}  {}", dream.id, dream.title);
    Ok(())
}
