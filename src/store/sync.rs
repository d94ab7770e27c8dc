//! Fetch-and-replace synchronization against the resource API.
//!
//! A refresh replaces the whole collection; nothing is merged. Each
//! fetch takes a sequence number before the request goes out, and the
//! list state discards any response that resolves after a newer one has
//! already been applied. Auto-refresh re-runs the same fetch on a fixed
//! interval until its handle is stopped or dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::api::{ListQuery, ResourceClient};
use crate::entity::Entity;
use crate::error::Result;
use crate::notify::Notifier;
use crate::store::snapshot::SnapshotStore;
use crate::store::state::{ListState, SharedList};

#[derive(Clone)]
pub struct Syncer<T: Entity> {
    client: ResourceClient<T>,
    state: SharedList<T>,
    snapshots: SnapshotStore,
    notifier: Notifier,
    seq: Arc<AtomicU64>,
}

impl<T: Entity> Syncer<T> {
    pub fn new(
        client: ResourceClient<T>,
        state: SharedList<T>,
        snapshots: SnapshotStore,
        notifier: Notifier,
    ) -> Self {
        Syncer {
            client,
            state,
            snapshots,
            notifier,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn state(&self) -> SharedList<T> {
        Arc::clone(&self.state)
    }

    /// One fetch-and-replace cycle. On failure the previous collection
    /// stays in place; nothing was optimistically changed during a read.
    pub async fn refresh(&self, query: &ListQuery) -> Result<usize> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let (records, total) = self.client.list(query).await?;
        let count = records.len();

        let applied =
            self.state
                .write()
                .apply_snapshot(seq, records, total, query.page, query.limit);
        if applied {
            let items = self.state.read().clone_items();
            if let Err(e) = self.snapshots.save(&items) {
                // Memory is already up to date; a failed mirror write
                // only costs the offline fallback
                self.notifier.warn(format!("snapshot write failed: {}", e));
            }
            self.notifier.clear_once(Self::poll_error_key());
        }
        tracing::debug!(seq, count, applied, resource = %T::RESOURCE, "refresh");
        Ok(count)
    }

    fn poll_error_key() -> &'static str {
        T::RESOURCE.api_path()
    }

    /// Start the auto-refresh polling task.
    ///
    /// `on_refresh` runs after every applied refresh with the updated
    /// state. Stopping (or dropping) the returned handle cancels the
    /// task; a handle must never outlive its screen.
    pub fn spawn_auto_refresh(
        &self,
        period: Duration,
        query: ListQuery,
        on_refresh: impl Fn(&ListState<T>) + Send + Sync + 'static,
    ) -> AutoRefresh {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let syncer = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match syncer.refresh(&query).await {
                            Ok(count) => {
                                syncer.notifier.info(format!(
                                    "auto-refresh: {} {} loaded",
                                    count,
                                    T::RESOURCE
                                ));
                                on_refresh(&syncer.state.read());
                            }
                            Err(e) => {
                                syncer.notifier.error_once(
                                    Self::poll_error_key(),
                                    format!("auto-refresh failed: {}", e),
                                );
                            }
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });
        AutoRefresh {
            stop: stop_tx,
            handle: Some(handle),
        }
    }
}

/// Handle for a running auto-refresh task.
///
/// Dropping the handle aborts the task, so an abandoned watcher cannot
/// keep writing to state nobody reads.
pub struct AutoRefresh {
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl AutoRefresh {
    /// Stop polling and wait for the task to wind down
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
