mod row;

use std::path::Path;

use sqlx::{Pool, Sqlite, SqlitePool};
use time::OffsetDateTime;

use crate::err::StoreError;
use crate::record::{AlumniRecord, NewAlumniRecord};
use row::{encode_mentor_flag, AlumniRow};

/// Durable, id-addressed store of alumni records over a SQLite pool.
///
/// A value of this type only exists after the schema migrations have run, so
/// every method can assume the collection and its indexes are in place.
#[derive(Clone)]
pub struct AlumniStore {
    pool: Pool<Sqlite>,
}

impl AlumniStore {
    /// Opens (creating if necessary) the database file and applies pending
    /// migrations. Any failure here is fatal for the session.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        // create the data directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Initialization(format!("Failed to create data directory: {}", e))
            })?;
        }

        // test if the database file exists
        if !path.exists() {
            // create the database file if it doesn't exist
            std::fs::File::create(path).map_err(|e| {
                StoreError::Initialization(format!("Failed to create database file: {}", e))
            })?;
        }

        // connect the database
        let url = format!("sqlite://{}", path.to_string_lossy());
        let pool = SqlitePool::connect(&url).await.map_err(|e| {
            StoreError::Initialization(format!("Failed to connect to the database: {}", e))
        })?;

        // use the migration feature of sqlx to create the table and indexes
        sqlx::migrate!("./migrations").run(&pool).await?;

        log::info!("alumni store ready at {}", path.display());
        Ok(Self { pool })
    }

    /// Persists a new record, assigning its id and stamping `last_update`.
    /// Returns the newly assigned id.
    pub async fn insert(&self, record: &NewAlumniRecord) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r"INSERT INTO alumni_records
                ( name, grad_year, field, company, contact_email, mobile_number, linkedin_profile, is_mentor, last_update )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        )
        .bind(record.name.as_str())
        .bind(record.grad_year)
        .bind(record.field.as_str())
        .bind(record.company.as_str())
        .bind(record.contact_email.as_str())
        .bind(record.mobile_number.as_str())
        .bind(record.linkedin_profile.as_deref())
        .bind(encode_mentor_flag(record.is_mentor))
        .bind(now_epoch_ms())
        .execute(&self.pool)
        .await
        .map_err(StoreError::Write)?;

        Ok(result.last_insert_rowid())
    }

    /// Returns every record, most recently touched first. Records sharing a
    /// `last_update` stamp come back in reverse insertion order. This ordering
    /// is the store-level contract every consumer relies on.
    pub async fn get_all(&self) -> Result<Vec<AlumniRecord>, StoreError> {
        let rows: Vec<AlumniRow> =
            sqlx::query_as(r"SELECT * FROM alumni_records ORDER BY last_update DESC, id DESC;")
                .fetch_all(&self.pool)
                .await
                .map_err(StoreError::Read)?;

        Ok(rows.into_iter().map(AlumniRecord::from).collect())
    }

    /// Replaces the caller-supplied fields of an existing record and re-stamps
    /// `last_update`. Unknown ids are a write error.
    pub async fn update(&self, id: i64, record: &NewAlumniRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"UPDATE alumni_records
                SET name = ?1, grad_year = ?2, field = ?3, company = ?4,
                    contact_email = ?5, mobile_number = ?6, linkedin_profile = ?7,
                    is_mentor = ?8, last_update = ?9
                WHERE id = ?10;",
        )
        .bind(record.name.as_str())
        .bind(record.grad_year)
        .bind(record.field.as_str())
        .bind(record.company.as_str())
        .bind(record.contact_email.as_str())
        .bind(record.mobile_number.as_str())
        .bind(record.linkedin_profile.as_deref())
        .bind(encode_mentor_flag(record.is_mentor))
        .bind(now_epoch_ms())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Write(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    /// Removes a record. The engine never reuses its id afterwards.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(r"DELETE FROM alumni_records WHERE id = ?1;")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Write)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Write(sqlx::Error::RowNotFound));
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
