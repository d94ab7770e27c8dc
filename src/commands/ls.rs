use crate::api::{ListQuery, ResourceClient};
use crate::config::Config;
use crate::display::{format_date_for_display, records_to_json, render_table};
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::query::{FilterCriteria, SortField, sort_records_by};
use crate::store::{LoadOutcome, SnapshotStore, Syncer, shared};
use crate::types::Resource;
use crate::with_resource;

/// List a resource collection, filtered and optionally sorted.
///
/// The criteria go to the server as query parameters and are re-applied
/// client-side to the returned page. `--cached` skips the network and
/// reads the snapshot (or the built-in defaults).
#[allow(clippy::too_many_arguments)]
pub async fn cmd_ls(
    resource: Resource,
    criteria: FilterCriteria,
    sort: Option<SortField>,
    page: Option<u32>,
    limit: Option<u32>,
    json: bool,
    cached: bool,
) -> Result<()> {
    with_resource!(resource, run_ls(criteria, sort, page, limit, json, cached))
}

async fn run_ls<T: Entity>(
    criteria: FilterCriteria,
    sort: Option<SortField>,
    page: Option<u32>,
    limit: Option<u32>,
    json: bool,
    cached: bool,
) -> Result<()> {
    let notifier = Notifier::new(false);
    let snapshots = SnapshotStore::open_default();
    let state = shared::<T>();

    if cached {
        match snapshots.load::<T>() {
            LoadOutcome::Snapshot { items, saved_at } => {
                notifier.info(format!(
                    "showing cached snapshot from {}",
                    format_date_for_display(&saved_at)
                ));
                state.write().load_local(items);
            }
            LoadOutcome::Seeded { items, reason } => {
                notifier.warn(format!("substituting built-in defaults: {}", reason));
                state.write().load_local(items);
            }
        }
    } else {
        let config = Config::load()?;
        let transport = super::require_transport(&config)?;
        let client = ResourceClient::<T>::new(transport);
        let syncer = Syncer::new(client, state.clone(), snapshots, notifier.clone());
        let query = ListQuery {
            page,
            limit,
            criteria: criteria.clone(),
        };
        syncer.refresh(&query).await?;
    }

    let guard = state.read();
    let mut records: Vec<T> = criteria
        .apply(guard.items())
        .into_iter()
        .cloned()
        .collect();
    let server_total = guard.pagination().total;
    drop(guard);

    if let Some(field) = sort {
        sort_records_by(&mut records, field);
    }

    let view: Vec<&T> = records.iter().collect();
    if json {
        println!("{}", records_to_json(&view)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("no {} found", T::RESOURCE);
        return Ok(());
    }

    println!("{}", render_table(&view));
    println!("{} of {} {}", view.len(), server_total.max(view.len() as u64), T::RESOURCE);
    Ok(())
}
