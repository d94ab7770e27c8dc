use owo_colors::OwoColorize;

use crate::display::format_date_for_display;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::SnapshotStore;
use crate::types::Resource;

/// Show which snapshots exist, how fresh they are and how big they got
pub fn cmd_cache_status() -> Result<()> {
    let store = SnapshotStore::open_default();
    let mut found = 0;
    for resource in Resource::ALL {
        match store.status_for(*resource) {
            Some((saved_at, count, size)) => {
                found += 1;
                println!(
                    "{:14} {:>5} records  {:>8} bytes  saved {}",
                    resource.to_string().cyan(),
                    count,
                    size,
                    format_date_for_display(&saved_at)
                );
            }
            None => println!("{:14} {}", resource.to_string().cyan(), "no snapshot".dimmed()),
        }
    }
    if found == 0 {
        println!("cache is empty ({})", store.root().display());
    }
    Ok(())
}

pub fn cmd_cache_clear() -> Result<()> {
    let store = SnapshotStore::open_default();
    let removed = store.clear()?;
    Notifier::new(false).success(format!("removed {} snapshot file(s)", removed));
    Ok(())
}

pub fn cmd_cache_path() -> Result<()> {
    println!("{}", SnapshotStore::open_default().root().display());
    Ok(())
}
