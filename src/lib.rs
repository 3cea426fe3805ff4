//! Local-first alumni directory core.
//!
//! One shared component behind every alumni view: a versioned SQLite store of
//! [`AlumniRecord`]s, pure filter and aggregation engines over an immutable
//! snapshot, and a polling scheduler that keeps the snapshot fresh. Rendering
//! front ends stay outside; they call [`Directory`] with plain records and
//! filter specs and receive plain data back.

mod config;
mod directory;
mod err;
mod filter;
mod logging;
mod record;
mod stats;
mod store;
mod sync;

pub use config::DirectoryConfig;
pub use directory::Directory;
pub use err::StoreError;
pub use filter::{filter_records, year_options, FilterSpec, MentorFilter, YearFilter};
pub use log::LevelFilter;
pub use logging::init as init_logging;
pub use record::{AlumniRecord, NewAlumniRecord};
pub use stats::{
    discipline_ranking, median_grad_year, mentor_coverage, recent_activity, DirectoryStats,
    DisciplineShare, MentorCoverage, YearCoverage, DEFAULT_RECENT_LIMIT, UNSPECIFIED_DISCIPLINE,
};
pub use store::AlumniStore;
pub use sync::{SnapshotCell, SyncScheduler};
