use serde::{Deserialize, Serialize};

/// A persisted alumni record as handed to collaborators.
///
/// `id` and `last_update` are assigned by the store; callers never supply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    pub id: i64,
    pub name: String,
    pub grad_year: Option<i64>,
    pub field: String,
    pub company: String,
    pub contact_email: String,
    pub mobile_number: String,
    pub linkedin_profile: Option<String>,
    pub is_mentor: bool,
    /// Epoch milliseconds of the most recent successful write.
    pub last_update: i64,
}

/// Caller-supplied record fields for create/update; the store fills in the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlumniRecord {
    pub name: String,
    pub grad_year: Option<i64>,
    pub field: String,
    pub company: String,
    pub contact_email: String,
    pub mobile_number: String,
    pub linkedin_profile: Option<String>,
    pub is_mentor: bool,
}

impl NewAlumniRecord {
    pub fn new(name: String, grad_year: Option<i64>, field: String, company: String) -> Self {
        Self {
            name,
            grad_year,
            field,
            company,
            ..Self::default()
        }
    }
}
