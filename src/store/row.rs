use serde::Serialize;

use crate::record::AlumniRecord;

/// Persistence-layer shape of an alumni record.
///
/// `is_mentor` is kept as a 0/1 integer here so the secondary index stays
/// queryable; it is decoded to a genuine boolean before leaving the store.
#[derive(sqlx::FromRow, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRow {
    pub id: i64,
    pub name: String,
    pub grad_year: Option<i64>,
    pub field: String,
    pub company: String,
    pub contact_email: String,
    pub mobile_number: String,
    pub linkedin_profile: Option<String>,
    pub is_mentor: i64,
    pub last_update: i64,
}

impl From<AlumniRow> for AlumniRecord {
    fn from(row: AlumniRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            grad_year: row.grad_year,
            field: row.field,
            company: row.company,
            contact_email: row.contact_email,
            mobile_number: row.mobile_number,
            linkedin_profile: row.linkedin_profile,
            is_mentor: row.is_mentor == 1,
            last_update: row.last_update,
        }
    }
}

/// Encodes the logical mentor flag for storage.
pub fn encode_mentor_flag(is_mentor: bool) -> i64 {
    if is_mentor {
        1
    } else {
        0
    }
}
