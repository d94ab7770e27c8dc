use crate::api::ResourceClient;
use crate::config::Config;
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::{SnapshotStore, Syncer, bulk_delete, delete_record, shared};
use crate::types::Resource;
use crate::with_resource;

/// Delete one or more records, with confirmation.
///
/// Bulk deletes run through the guardrail: when any selected record is
/// delete-protected (High-severity audit events) the whole batch is
/// refused.
pub async fn cmd_rm(resource: Resource, ids: Vec<String>, yes: bool) -> Result<()> {
    with_resource!(resource, run_rm(ids, yes))
}

async fn run_rm<T: Entity>(ids: Vec<String>, yes: bool) -> Result<()> {
    let notifier = Notifier::new(false);
    let prompt = if ids.len() == 1 {
        format!("delete {} '{}'?", T::RESOURCE.singular(), ids[0])
    } else {
        format!("delete {} {}?", ids.len(), T::RESOURCE)
    };
    if !super::confirm(&prompt, yes)? {
        notifier.info("aborted, nothing deleted");
        return Ok(());
    }

    let config = Config::load()?;
    let transport = super::require_transport(&config)?;
    let client = ResourceClient::<T>::new(transport);
    let snapshots = SnapshotStore::open_default();
    let state = shared::<T>();

    // Load the collection first so the delete guard can inspect the
    // selected records
    let syncer = Syncer::new(client.clone(), state.clone(), snapshots.clone(), notifier.clone());
    syncer.refresh(&Default::default()).await?;

    if ids.len() == 1 {
        match delete_record(&client, &state, &snapshots, &ids[0]).await? {
            Some(_) => notifier.success(format!("deleted {} {}", T::RESOURCE.singular(), ids[0])),
            None => notifier.info(format!(
                "{} {} was not present; nothing to delete",
                T::RESOURCE.singular(),
                ids[0]
            )),
        }
        return Ok(());
    }

    let removed = bulk_delete(&client, &state, &snapshots, &ids).await?;
    notifier.success(format!("deleted {} {}", removed, T::RESOURCE));
    Ok(())
}
