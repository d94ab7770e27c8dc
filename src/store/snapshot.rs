//! Versioned snapshot cache.
//!
//! Each resource's collection is mirrored to
//! `.medidesk/cache/<key>.json` after every successful sync and every
//! local mutation. Unlike the unversioned blobs the browser client kept
//! in local storage, the envelope carries a schema version, a save
//! timestamp and a blake3 checksum, so a corrupt or incompatible file is
//! detected instead of silently deserialized. Writes are last-write-wins
//! across processes; there is no cross-process lock.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{MedideskError, Result};
use crate::types::{CACHE_DIR, Resource};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    schema_version: u32,
    saved_at: String,
    checksum: String,
    items: serde_json::Value,
}

/// How a load was satisfied
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// A usable snapshot was found
    Snapshot { items: Vec<T>, saved_at: String },
    /// No usable snapshot; the built-in seed dataset was substituted
    Seeded { items: Vec<T>, reason: String },
}

impl<T> LoadOutcome<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            LoadOutcome::Snapshot { items, .. } => items,
            LoadOutcome::Seeded { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Store rooted in the working directory's `.medidesk/cache`
    pub fn open_default() -> Self {
        SnapshotStore {
            root: PathBuf::from(CACHE_DIR),
        }
    }

    pub fn open_at(root: impl Into<PathBuf>) -> Self {
        SnapshotStore { root: root.into() }
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        self.root.join(format!("{}.json", resource.cache_key()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serialize the full collection, overwriting any previous snapshot
    pub fn save<T: Entity>(&self, items: &[T]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let payload = serde_json::to_value(items)?;
        let serialized = serde_json::to_string(&payload)?;
        let envelope = SnapshotEnvelope {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            saved_at: jiff::Timestamp::now().to_string(),
            checksum: blake3::hash(serialized.as_bytes()).to_hex().to_string(),
            items: payload,
        };
        let path = self.path_for(T::RESOURCE);
        fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;
        tracing::debug!(path = %path.display(), count = items.len(), "snapshot written");
        Ok(())
    }

    /// Load the snapshot for a resource, falling back to the seed
    /// dataset when the file is missing, unreadable, version-skewed or
    /// fails its checksum.
    pub fn load<T: Entity>(&self) -> LoadOutcome<T> {
        let path = self.path_for(T::RESOURCE);
        match self.try_load::<T>(&path) {
            Ok(outcome) => outcome,
            Err(e) => LoadOutcome::Seeded {
                items: T::seed(),
                reason: e.to_string(),
            },
        }
    }

    fn try_load<T: Entity>(&self, path: &Path) -> Result<LoadOutcome<T>> {
        if !path.exists() {
            return Ok(LoadOutcome::Seeded {
                items: T::seed(),
                reason: "no snapshot on disk".to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let envelope: SnapshotEnvelope = serde_json::from_str(&content)?;
        if envelope.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(MedideskError::Snapshot(format!(
                "schema version {} (expected {})",
                envelope.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }
        let serialized = serde_json::to_string(&envelope.items)?;
        let checksum = blake3::hash(serialized.as_bytes()).to_hex().to_string();
        if checksum != envelope.checksum {
            return Err(MedideskError::Snapshot("checksum mismatch".to_string()));
        }
        let items: Vec<T> = serde_json::from_value(envelope.items)?;
        Ok(LoadOutcome::Snapshot {
            items,
            saved_at: envelope.saved_at,
        })
    }

    /// Inspect a resource's snapshot without deserializing the records
    pub fn status_for(&self, resource: Resource) -> Option<(String, usize, u64)> {
        let path = self.path_for(resource);
        let content = fs::read_to_string(&path).ok()?;
        let size = content.len() as u64;
        let envelope: SnapshotEnvelope = serde_json::from_str(&content).ok()?;
        let count = envelope.items.as_array().map(|a| a.len()).unwrap_or(0);
        Some((envelope.saved_at, count, size))
    }

    /// Delete every snapshot file. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for resource in Resource::ALL {
            let path = self.path_for(*resource);
            if path.exists() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{StaffUser, WardAllocation};
    use tempfile::TempDir;

    fn store() -> (TempDir, SnapshotStore) {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::open_at(dir.path().join("cache"));
        (dir, store)
    }

    #[test]
    fn test_roundtrip_is_deep_equal() {
        let (_dir, store) = store();
        let users = vec![
            StaffUser {
                id: "u-1".to_string(),
                name: "Dr. Test".to_string(),
                email: "t@h.com".to_string(),
                role: "Doctor".to_string(),
                ..Default::default()
            },
            StaffUser {
                id: "u-2".to_string(),
                name: "Nurse Joy".to_string(),
                email: "joy@h.com".to_string(),
                role: "Nurse".to_string(),
                ..Default::default()
            },
        ];
        store.save(&users).unwrap();

        match store.load::<StaffUser>() {
            LoadOutcome::Snapshot { items, .. } => {
                assert_eq!(items.len(), users.len());
                for (a, b) in items.iter().zip(users.iter()) {
                    assert_eq!(
                        serde_json::to_value(a).unwrap(),
                        serde_json::to_value(b).unwrap()
                    );
                }
            }
            LoadOutcome::Seeded { reason, .. } => panic!("expected snapshot, seeded: {}", reason),
        }
    }

    #[test]
    fn test_missing_snapshot_seeds() {
        let (_dir, store) = store();
        match store.load::<WardAllocation>() {
            LoadOutcome::Seeded { items, .. } => assert_eq!(items.len(), 3),
            LoadOutcome::Snapshot { .. } => panic!("expected seed fallback"),
        }
    }

    #[test]
    fn test_corrupt_snapshot_seeds() {
        let (_dir, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.path_for(Resource::Users), "{not json").unwrap();
        match store.load::<StaffUser>() {
            LoadOutcome::Seeded { items, .. } => assert_eq!(items.len(), StaffUser::seed().len()),
            LoadOutcome::Snapshot { .. } => panic!("expected seed fallback"),
        }
    }

    #[test]
    fn test_tampered_snapshot_fails_checksum() {
        let (_dir, store) = store();
        let users = vec![StaffUser {
            id: "u-1".to_string(),
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        }];
        store.save(&users).unwrap();

        let path = store.path_for(Resource::Users);
        let tampered = fs::read_to_string(&path)
            .unwrap()
            .replace("Dr. Test", "Dr. Evil");
        fs::write(&path, tampered).unwrap();

        match store.load::<StaffUser>() {
            LoadOutcome::Seeded { reason, .. } => assert!(reason.contains("checksum")),
            LoadOutcome::Snapshot { .. } => panic!("tampered snapshot must not load"),
        }
    }

    #[test]
    fn test_clear_removes_files() {
        let (_dir, store) = store();
        store.save::<StaffUser>(&StaffUser::seed()).unwrap();
        assert_eq!(store.clear().unwrap(), 1);
        assert_eq!(store.clear().unwrap(), 0);
    }
}
