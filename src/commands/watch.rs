use std::time::Duration;

use crate::api::{ListQuery, ResourceClient};
use crate::config::Config;
use crate::display::render_table;
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::query::FilterCriteria;
use crate::store::{ListState, SnapshotStore, Syncer, shared};
use crate::types::Resource;
use crate::with_resource;

/// Follow a resource with auto-refresh until interrupted.
///
/// Each applied refresh reprints the filtered table. The polling task is
/// stopped (not leaked) on Ctrl-C.
pub async fn cmd_watch(
    resource: Resource,
    criteria: FilterCriteria,
    interval: Option<u64>,
    limit: Option<u32>,
) -> Result<()> {
    with_resource!(resource, run_watch(criteria, interval, limit))
}

async fn run_watch<T: Entity>(
    criteria: FilterCriteria,
    interval: Option<u64>,
    limit: Option<u32>,
) -> Result<()> {
    let config = Config::load()?;
    let transport = super::require_transport(&config)?;
    let client = ResourceClient::<T>::new(transport);
    let snapshots = SnapshotStore::open_default();
    let notifier = Notifier::new(false);
    let state = shared::<T>();
    let syncer = Syncer::new(client, state, snapshots, notifier.clone());

    let query = ListQuery {
        page: None,
        limit,
        criteria: criteria.clone(),
    };
    let period = Duration::from_secs(interval.unwrap_or(config.poll.interval).max(1));

    // First paint before the first tick
    syncer.refresh(&query).await?;
    print_view(&syncer.state().read(), &criteria);
    notifier.info(format!(
        "watching {} every {}s, Ctrl-C to stop",
        T::RESOURCE,
        period.as_secs()
    ));

    let view_criteria = criteria.clone();
    let refresh = syncer.spawn_auto_refresh(period, query, move |state| {
        print_view(state, &view_criteria);
    });

    tokio::signal::ctrl_c().await?;
    refresh.stop().await;
    notifier.info("auto-refresh stopped");
    Ok(())
}

fn print_view<T: Entity>(state: &ListState<T>, criteria: &FilterCriteria) {
    let view = criteria.apply(state.items());
    if view.is_empty() {
        println!("no {} found", T::RESOURCE);
    } else {
        println!("{}", render_table(&view));
    }
}
