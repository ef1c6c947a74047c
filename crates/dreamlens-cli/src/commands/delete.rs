use dreamlens_core::DreamId;

use crate::commands::common::{open_synchronizer, require_confirmation};
use crate::error::CliError;

pub async fn run_delete(id: DreamId, global_profile: Option<&str>) -> Result<(), CliError> {
    let sync = open_synchronizer(global_profile)?;
    sync.delete(id).await?;
    println!("{id}");
    Ok(())
}

pub async fn run_delete_all(confirmed: bool, global_profile: Option<&str>) -> Result<(), CliError> {
    require_confirmation(confirmed, "delete every dream")?;

    let sync = open_synchronizer(global_profile)?;
    let deleted = sync.delete_all().await?;
    println!(
        "Deleted {} dreams and {} images",
        deleted.dreams_deleted, deleted.images_deleted
    );
    Ok(())
}
