use std::sync::Arc;

use crate::config::DirectoryConfig;
use crate::err::StoreError;
use crate::filter::{self, FilterSpec};
use crate::record::{AlumniRecord, NewAlumniRecord};
use crate::stats::DirectoryStats;
use crate::store::AlumniStore;
use crate::sync::{SnapshotCell, SyncScheduler};

/// Owned context tying the store, the published snapshot and the scheduler
/// together. Every alumni view shares this one component.
///
/// A `Directory` starts uninitialized; every data operation before a
/// successful [`Directory::init`] fails with [`StoreError::Uninitialized`]
/// rather than silently doing nothing.
pub struct Directory {
    config: DirectoryConfig,
    store: Option<AlumniStore>,
    snapshot: SnapshotCell,
    scheduler: Option<SyncScheduler>,
}

impl Directory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config,
            store: None,
            snapshot: SnapshotCell::new(),
            scheduler: None,
        }
    }

    /// Opens the store, performs the initial load and starts the poll loop.
    /// A failure here is fatal for the session; the directory stays
    /// uninitialized and the caller must not proceed to data operations.
    pub async fn init(&mut self) -> Result<(), StoreError> {
        let store = AlumniStore::open(&self.config.db_path).await?;
        self.snapshot.publish(store.get_all().await?);
        self.scheduler = Some(SyncScheduler::spawn(
            store.clone(),
            self.snapshot.clone(),
            self.config.poll_interval,
        ));
        self.store = Some(store);
        Ok(())
    }

    fn store(&self) -> Result<&AlumniStore, StoreError> {
        self.store.as_ref().ok_or(StoreError::Uninitialized)
    }

    /// Persists a new record and refreshes the snapshot so the write is
    /// visible to the next read. Returns the assigned id.
    pub async fn create_alumnus(&self, record: &NewAlumniRecord) -> Result<i64, StoreError> {
        let id = self.store()?.insert(record).await?;
        log::info!("alumni record added: {}", record.name);
        self.reload().await?;
        Ok(id)
    }

    /// Re-stamps and replaces an existing record, then refreshes the snapshot.
    pub async fn update_alumnus(
        &self,
        id: i64,
        record: &NewAlumniRecord,
    ) -> Result<(), StoreError> {
        self.store()?.update(id, record).await?;
        self.reload().await
    }

    /// Removes a record, then refreshes the snapshot. Its id is never reused.
    pub async fn delete_alumnus(&self, id: i64) -> Result<(), StoreError> {
        self.store()?.delete(id).await?;
        self.reload().await
    }

    /// Explicit fetch-and-publish, independent of the poll interval.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let records = self.store()?.get_all().await?;
        self.snapshot.publish(records);
        Ok(())
    }

    /// The current snapshot, most recently touched record first.
    pub fn snapshot(&self) -> Result<Arc<Vec<AlumniRecord>>, StoreError> {
        self.store()?;
        Ok(self.snapshot.load())
    }

    /// The subset of the current snapshot matching `spec`, in snapshot order.
    pub fn filter(&self, spec: &FilterSpec) -> Result<Vec<AlumniRecord>, StoreError> {
        Ok(filter::filter_records(&self.snapshot()?, spec))
    }

    /// Aggregate statistics over the current snapshot.
    pub fn stats(&self) -> Result<DirectoryStats, StoreError> {
        Ok(DirectoryStats::compute(
            &self.snapshot()?,
            self.config.recent_limit,
        ))
    }

    /// Distinct graduation years in the current snapshot, newest first.
    pub fn year_options(&self) -> Result<Vec<i64>, StoreError> {
        Ok(filter::year_options(&self.snapshot()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MentorFilter;
    use std::time::Duration;
    use tempfile::tempdir;

    fn test_config(dir: &tempfile::TempDir) -> DirectoryConfig {
        DirectoryConfig {
            db_path: dir.path().join("alumni.db"),
            poll_interval: Duration::from_secs(60),
            ..DirectoryConfig::default()
        }
    }

    fn sample(name: &str, grad_year: Option<i64>, is_mentor: bool) -> NewAlumniRecord {
        NewAlumniRecord {
            name: name.to_string(),
            grad_year,
            field: "Design".to_string(),
            is_mentor,
            ..NewAlumniRecord::default()
        }
    }

    #[tokio::test]
    async fn test_operations_before_init_fail() {
        let dir = tempdir().unwrap();
        let directory = Directory::new(test_config(&dir));

        assert!(matches!(
            directory.create_alumnus(&sample("A", None, false)).await,
            Err(StoreError::Uninitialized)
        ));
        assert!(matches!(directory.reload().await, Err(StoreError::Uninitialized)));
        assert!(matches!(directory.snapshot(), Err(StoreError::Uninitialized)));
        assert!(matches!(
            directory.filter(&FilterSpec::default()),
            Err(StoreError::Uninitialized)
        ));
        assert!(matches!(directory.stats(), Err(StoreError::Uninitialized)));
    }

    #[tokio::test]
    async fn test_create_is_visible_to_next_snapshot() {
        let dir = tempdir().unwrap();
        let mut directory = Directory::new(test_config(&dir));
        directory.init().await.unwrap();

        let id = directory
            .create_alumnus(&sample("Ada", Some(2020), true))
            .await
            .unwrap();

        let snapshot = directory.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
        assert!(snapshot[0].is_mentor);
    }

    #[tokio::test]
    async fn test_filter_and_stats_read_the_same_snapshot() {
        let dir = tempdir().unwrap();
        let mut directory = Directory::new(test_config(&dir));
        directory.init().await.unwrap();

        directory
            .create_alumnus(&sample("Ada", Some(2020), true))
            .await
            .unwrap();
        directory
            .create_alumnus(&sample("Grace", Some(2020), false))
            .await
            .unwrap();

        let mentors = directory
            .filter(&FilterSpec {
                mentor: MentorFilter::MentorOnly,
                ..FilterSpec::default()
            })
            .unwrap();
        assert_eq!(mentors.len(), 1);
        assert_eq!(mentors[0].name, "Ada");

        let stats = directory.stats().unwrap();
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.mentor_count, 1);
        assert_eq!(stats.median_year, Some(2020));
        assert_eq!(stats.year_coverage.by_year[0].mentors, 1);
        assert_eq!(stats.year_coverage.by_year[0].total, 2);

        assert_eq!(directory.year_options().unwrap(), vec![2020]);
    }

    #[tokio::test]
    async fn test_update_and_delete_refresh_the_snapshot() {
        let dir = tempdir().unwrap();
        let mut directory = Directory::new(test_config(&dir));
        directory.init().await.unwrap();

        let id = directory
            .create_alumnus(&sample("Ada", Some(2020), false))
            .await
            .unwrap();
        directory
            .update_alumnus(id, &sample("Ada", Some(2021), true))
            .await
            .unwrap();
        assert_eq!(directory.snapshot().unwrap()[0].grad_year, Some(2021));

        directory.delete_alumnus(id).await.unwrap();
        assert!(directory.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_failure_leaves_directory_unusable() {
        let dir = tempdir().unwrap();
        // a directory path cannot be opened as a database file
        let config = DirectoryConfig {
            db_path: dir.path().to_path_buf(),
            ..DirectoryConfig::default()
        };
        let mut directory = Directory::new(config);
        assert!(matches!(
            directory.init().await,
            Err(StoreError::Initialization(_))
        ));
        assert!(matches!(directory.snapshot(), Err(StoreError::Uninitialized)));
    }
}
