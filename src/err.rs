/// Error taxonomy for the alumni store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// the database could not be opened or migrated; fatal for the session
    #[error("failed to initialize the database: {0}")]
    Initialization(String),
    /// a data operation ran before initialization completed
    #[error("database not initialized")]
    Uninitialized,
    /// the engine rejected a create/update/delete
    #[error("failed to write record: {0}")]
    Write(#[source] sqlx::Error),
    /// the engine rejected a read
    #[error("failed to read records: {0}")]
    Read(#[source] sqlx::Error),
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Initialization(err.to_string())
    }
}
