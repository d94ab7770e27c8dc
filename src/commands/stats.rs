use crate::api::{ListQuery, ResourceClient};
use crate::config::Config;
use crate::display::render_stats;
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::query::FilterCriteria;
use crate::stats;
use crate::store::{LoadOutcome, SnapshotStore, Syncer, shared};
use crate::types::Resource;
use crate::with_resource;

/// Summary statistics over the (filtered) collection
pub async fn cmd_stats(
    resource: Resource,
    criteria: FilterCriteria,
    json: bool,
    cached: bool,
) -> Result<()> {
    with_resource!(resource, run_stats(criteria, json, cached))
}

async fn run_stats<T: Entity>(criteria: FilterCriteria, json: bool, cached: bool) -> Result<()> {
    let notifier = Notifier::new(false);
    let snapshots = SnapshotStore::open_default();
    let state = shared::<T>();

    if cached {
        match snapshots.load::<T>() {
            LoadOutcome::Snapshot { items, .. } => state.write().load_local(items),
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
            criteria: criteria.clone(),
            ..Default::default()
        };
        syncer.refresh(&query).await?;
    }

    let guard = state.read();
    let view = criteria.apply(guard.items());
    let stats = stats::collect(&view);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_stats(T::RESOURCE, &stats));
    }
    Ok(())
}
