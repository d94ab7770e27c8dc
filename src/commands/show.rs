use crate::api::ResourceClient;
use crate::config::Config;
use crate::display::{records_to_json, render_detail};
use crate::entity::Entity;
use crate::error::Result;
use crate::types::Resource;
use crate::with_resource;

/// Display one record in detail
pub async fn cmd_show(resource: Resource, id: String, json: bool) -> Result<()> {
    with_resource!(resource, run_show(id, json))
}

async fn run_show<T: Entity>(id: String, json: bool) -> Result<()> {
    let config = Config::load()?;
    let transport = super::require_transport(&config)?;
    let client = ResourceClient::<T>::new(transport);

    let record = client.fetch(&id).await?;
    if json {
        println!("{}", records_to_json(&[&record])?);
    } else {
        print!("{}", render_detail(&record));
    }
    Ok(())
}
