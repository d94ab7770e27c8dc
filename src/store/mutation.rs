//! Local mutations: create, update, delete.
//!
//! Each mutation validates, talks to the remote first, then splices the
//! in-memory collection and mirrors the full collection to the snapshot
//! cache. On a remote failure nothing local changes.

use uuid::Uuid;

use crate::api::ResourceClient;
use crate::entity::Entity;
use crate::error::{MedideskError, Result};
use crate::store::snapshot::SnapshotStore;
use crate::store::state::SharedList;

fn mirror<T: Entity>(state: &SharedList<T>, snapshots: &SnapshotStore) -> Result<()> {
    let items = state.read().clone_items();
    snapshots.save(&items)
}

/// Create a record, assigning a fresh UUID when the caller left the id
/// empty. Returns the canonical record (the server's copy when it
/// returns one).
pub async fn create_record<T: Entity>(
    client: &ResourceClient<T>,
    state: &SharedList<T>,
    snapshots: &SnapshotStore,
    mut record: T,
) -> Result<T> {
    record.validate()?;
    if record.id().is_empty() {
        record.set_id(Uuid::new_v4().to_string());
    }
    let created = client.create(&record).await?;
    state.write().insert(created.clone());
    mirror(state, snapshots)?;
    Ok(created)
}

/// Replace a record wholesale by identity
pub async fn update_record<T: Entity>(
    client: &ResourceClient<T>,
    state: &SharedList<T>,
    snapshots: &SnapshotStore,
    record: T,
) -> Result<T> {
    record.validate()?;
    if record.id().is_empty() {
        return Err(MedideskError::InvalidInput(
            "update requires a record id".to_string(),
        ));
    }
    let updated = client.update(&record).await?;
    let mut guard = state.write();
    if !guard.replace(updated.clone()) {
        // Not in the current page; keep memory consistent by appending
        guard.insert(updated.clone());
    }
    drop(guard);
    mirror(state, snapshots)?;
    Ok(updated)
}

/// Delete one record by identity. Deleting an id the collection does not
/// hold still issues the remote delete and is a local no-op.
pub async fn delete_record<T: Entity>(
    client: &ResourceClient<T>,
    state: &SharedList<T>,
    snapshots: &SnapshotStore,
    id: &str,
) -> Result<Option<T>> {
    client.delete(id).await?;
    let removed = state.write().remove(id);
    mirror(state, snapshots)?;
    Ok(removed)
}

/// Bulk delete with the audit guardrail: if any selected record is
/// delete-protected the whole batch is refused and nothing changes,
/// locally or remotely.
pub async fn bulk_delete<T: Entity>(
    client: &ResourceClient<T>,
    state: &SharedList<T>,
    snapshots: &SnapshotStore,
    ids: &[String],
) -> Result<usize> {
    let protected = {
        let guard = state.read();
        ids.iter()
            .filter(|id| {
                guard
                    .get(id)
                    .map(|record| record.delete_protected())
                    .unwrap_or(false)
            })
            .count()
    };
    if protected > 0 {
        return Err(MedideskError::GuardedDelete(protected));
    }

    let mut removed = 0;
    for id in ids {
        client.delete(id).await?;
        if state.write().remove(id).is_some() {
            removed += 1;
        }
    }
    mirror(state, snapshots)?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiTransport, Envelope};
    use crate::entity::{AuditEvent, Severity, StaffUser};
    use crate::store::state;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Transport that answers every call with an empty-success envelope
    /// and records how many writes it saw
    #[derive(Default)]
    struct CountingTransport {
        writes: Mutex<usize>,
    }

    impl CountingTransport {
        fn write_count(&self) -> usize {
            *self.writes.lock()
        }
    }

    #[async_trait]
    impl ApiTransport for CountingTransport {
        async fn get(&self, _path: &str, _query: &[(String, String)]) -> crate::error::Result<Envelope> {
            Ok(Envelope::default())
        }

        async fn post(&self, _path: &str, _body: serde_json::Value) -> crate::error::Result<Envelope> {
            *self.writes.lock() += 1;
            Ok(Envelope::default())
        }

        async fn put(&self, _path: &str, _body: serde_json::Value) -> crate::error::Result<Envelope> {
            *self.writes.lock() += 1;
            Ok(Envelope::default())
        }

        async fn delete(&self, _path: &str) -> crate::error::Result<Envelope> {
            *self.writes.lock() += 1;
            Ok(Envelope::default())
        }
    }

    fn harness<T: Entity>() -> (
        TempDir,
        Arc<CountingTransport>,
        ResourceClient<T>,
        crate::store::state::SharedList<T>,
        SnapshotStore,
    ) {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(CountingTransport::default());
        let transport_dyn: Arc<dyn ApiTransport> = transport.clone();
        let client = ResourceClient::new(transport_dyn);
        let snapshots = SnapshotStore::open_at(dir.path().join("cache"));
        (dir, transport, client, state::shared(), snapshots)
    }

    fn event(id: &str, severity: Severity) -> AuditEvent {
        AuditEvent {
            id: id.to_string(),
            action: "delete".to_string(),
            module: "billing".to_string(),
            performed_by: "Alice Smith".to_string(),
            severity,
            timestamp: "2026-01-01T00:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_dir, _transport, client, state, snapshots) = harness::<StaffUser>();
        let record = StaffUser {
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        };

        let created = create_record(&client, &state, &snapshots, record)
            .await
            .unwrap();

        assert!(!created.id.is_empty(), "id must be generated");
        let guard = state.read();
        assert_eq!(guard.len(), 1);
        assert_eq!(guard.items()[0].name, "Dr. Test");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_record() {
        let (_dir, transport, client, state, snapshots) = harness::<StaffUser>();
        let record = StaffUser {
            name: "Dr. Test".to_string(),
            email: "broken".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        };

        assert!(
            create_record(&client, &state, &snapshots, record)
                .await
                .is_err()
        );
        assert_eq!(state.read().len(), 0);
        assert_eq!(transport.write_count(), 0, "invalid record must not be sent");
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let (_dir, _transport, client, state, snapshots) = harness::<StaffUser>();
        let removed = delete_record(&client, &state, &snapshots, "missing")
            .await
            .unwrap();
        assert!(removed.is_none());
        assert_eq!(state.read().len(), 0);
    }

    #[tokio::test]
    async fn test_guarded_bulk_delete_refuses_high_severity() {
        let (_dir, transport, client, state, snapshots) = harness::<AuditEvent>();
        {
            let mut guard = state.write();
            guard.insert(event("a-1", Severity::Low));
            guard.insert(event("a-2", Severity::High));
            guard.insert(event("a-3", Severity::Medium));
        }

        let ids = vec!["a-1".to_string(), "a-2".to_string()];
        let result = bulk_delete(&client, &state, &snapshots, &ids).await;

        assert!(matches!(result, Err(MedideskError::GuardedDelete(1))));
        assert_eq!(state.read().len(), 3, "collection must be unchanged");
        assert_eq!(transport.write_count(), 0, "no remote delete may be issued");
    }

    #[tokio::test]
    async fn test_bulk_delete_without_protected_records() {
        let (_dir, _transport, client, state, snapshots) = harness::<AuditEvent>();
        {
            let mut guard = state.write();
            guard.insert(event("a-1", Severity::Low));
            guard.insert(event("a-2", Severity::Medium));
        }

        let ids = vec!["a-1".to_string(), "a-2".to_string()];
        let removed = bulk_delete(&client, &state, &snapshots, &ids).await.unwrap();

        assert_eq!(removed, 2);
        assert!(state.read().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let (_dir, _transport, client, state, snapshots) = harness::<StaffUser>();
        let record = StaffUser {
            id: "u-1".to_string(),
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        };
        state.write().insert(record.clone());

        let mut updated = record;
        updated.role = "Surgeon".to_string();
        update_record(&client, &state, &snapshots, updated)
            .await
            .unwrap();

        assert_eq!(state.read().get("u-1").unwrap().role, "Surgeon");
        assert_eq!(state.read().len(), 1);
    }
}
