use crate::api::ResourceClient;
use crate::config::Config;
use crate::display::format_record_line;
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::{SnapshotStore, create_record, shared};
use crate::types::Resource;
use crate::with_resource;

/// Create a record from its JSON representation.
///
/// Validation runs client-side before anything is sent; an id is
/// generated when the payload leaves it out.
pub async fn cmd_create(resource: Resource, data: String) -> Result<()> {
    with_resource!(resource, run_create(data))
}

async fn run_create<T: Entity>(data: String) -> Result<()> {
    let record: T = serde_json::from_str(&data)?;

    let config = Config::load()?;
    let transport = super::require_transport(&config)?;
    let client = ResourceClient::<T>::new(transport);
    let snapshots = SnapshotStore::open_default();
    let state = shared::<T>();
    let notifier = Notifier::new(false);

    let created = create_record(&client, &state, &snapshots, record).await?;
    notifier.success(format!("created {} {}", T::RESOURCE.singular(), created.id()));
    println!("{}", format_record_line(&created));
    Ok(())
}
