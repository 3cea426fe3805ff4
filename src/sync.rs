use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::err::StoreError;
use crate::record::AlumniRecord;
use crate::store::AlumniStore;

/// Shared cell holding the latest complete snapshot.
///
/// Publishing replaces the whole value; readers always observe either the old
/// or the new list, never a partial update. The inner `Arc` keeps a snapshot
/// alive for readers that obtained it before a replacement.
#[derive(Clone, Default)]
pub struct SnapshotCell {
    inner: Arc<RwLock<Arc<Vec<AlumniRecord>>>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot. Cheap: clones an `Arc`, not the records.
    pub fn load(&self) -> Arc<Vec<AlumniRecord>> {
        Arc::clone(&self.inner.read().expect("Failed to lock the snapshot"))
    }

    pub(crate) fn publish(&self, records: Vec<AlumniRecord>) {
        let mut guard = self.inner.write().expect("Failed to lock the snapshot");
        *guard = Arc::new(records);
    }
}

/// Polls the store on a fixed interval and publishes each completed fetch
/// into a [`SnapshotCell`]. The first fetch runs immediately on spawn.
pub struct SyncScheduler {
    refresh: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    pub fn spawn(store: AlumniStore, cell: SnapshotCell, period: Duration) -> Self {
        Self::spawn_with(cell, period, move || {
            let store = store.clone();
            async move { store.get_all().await }
        })
    }

    fn spawn_with<F, Fut>(cell: SnapshotCell, period: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<AlumniRecord>, StoreError>> + Send,
    {
        let refresh = Arc::new(Notify::new());
        let notify = Arc::clone(&refresh);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = notify.notified() => {}
                }
                // the loop awaits each fetch before taking the next tick, so
                // at most one fetch is ever in flight
                match fetch().await {
                    Ok(records) => cell.publish(records),
                    Err(err) => {
                        log::warn!("snapshot refresh failed, retrying next tick: {}", err);
                    }
                }
            }
        });

        Self { refresh, handle }
    }

    /// Requests an early refresh. A fetch already in flight is not duplicated;
    /// the request collapses into the loop's next iteration.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
