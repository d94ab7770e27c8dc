use crate::api::ResourceClient;
use crate::config::Config;
use crate::display::format_record_line;
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::{SnapshotStore, Syncer, shared, update_record};
use crate::types::Resource;
use crate::with_resource;

/// Replace a record wholesale. The payload is a full record; fields are
/// not deep-merged.
pub async fn cmd_set(resource: Resource, id: String, data: String) -> Result<()> {
    with_resource!(resource, run_set(id, data))
}

async fn run_set<T: Entity>(id: String, data: String) -> Result<()> {
    let mut record: T = serde_json::from_str(&data)?;
    record.set_id(id);

    let config = Config::load()?;
    let transport = super::require_transport(&config)?;
    let client = ResourceClient::<T>::new(transport);
    let snapshots = SnapshotStore::open_default();
    let state = shared::<T>();
    let notifier = Notifier::new(false);

    // Populate the page so the local splice has something to replace
    let syncer = Syncer::new(client.clone(), state.clone(), snapshots.clone(), notifier.clone());
    syncer.refresh(&Default::default()).await?;

    let updated = update_record(&client, &state, &snapshots, record).await?;
    notifier.success(format!("updated {} {}", T::RESOURCE.singular(), updated.id()));
    println!("{}", format_record_line(&updated));
    Ok(())
}
