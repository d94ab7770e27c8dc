pub mod api;
pub mod commands;
pub mod config;
pub mod display;
pub mod entity;
pub mod error;
pub mod macros;
pub mod notify;
pub mod query;
pub mod stats;
pub mod store;
pub mod types;

pub use api::{ApiTransport, Envelope, ListQuery, ResourceClient, RestClient};
pub use config::Config;
pub use entity::Entity;
pub use error::{MedideskError, Result};
pub use notify::Notifier;
pub use query::{FilterCriteria, SortField};
pub use stats::ResourceStats;
pub use store::{ListState, SnapshotStore, Syncer};
pub use types::{Pagination, Resource, VALID_RESOURCES};
