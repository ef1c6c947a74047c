use chrono::Utc;
use dreamlens_core::PageOutcome;

use crate::commands::common::{
    dream_to_list_item, format_dream_lines, open_synchronizer, DreamListItem,
};
use crate::error::CliError;

pub async fn run_list(
    pages: usize,
    all: bool,
    as_json: bool,
    global_profile: Option<&str>,
) -> Result<(), CliError> {
    let sync = open_synchronizer(global_profile)?;
    sync.load_first_page().await?;

    let mut loaded = 1;
    while all || loaded < pages {
        match sync.load_next_page().await? {
            PageOutcome::Loaded { .. } => loaded += 1,
            PageOutcome::Skipped | PageOutcome::Stale => break,
        }
    }

    let snapshot = sync.snapshot();
    let now = Utc::now();
    if as_json {
        let json_items = snapshot
            .dreams()
            .iter()
            .map(|dream| dream_to_list_item(dream, now))
            .collect::<Vec<DreamListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No dreams yet. Start one with `dreamlens new` or `dreamlens generate`.");
        return Ok(());
    }
    for line in format_dream_lines(snapshot.dreams(), now) {
        println!("{line}");
    }
    if snapshot.cursor().has_more {
        println!(
            "Showing {} dreams. Use --pages or --all to load more.",
            snapshot.len()
        );
    }
    Ok(())
}
