use serde::{Deserialize, Serialize};

use crate::record::AlumniRecord;

/// Mentor clause of a filter: keep everyone, mentors only, or non-mentors only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentorFilter {
    #[default]
    #[serde(rename = "all")]
    Any,
    #[serde(rename = "mentor")]
    MentorOnly,
    #[serde(rename = "non-mentor")]
    NonMentorOnly,
}

/// Year clause of a filter: any year, or an exact graduation-year match.
///
/// On the wire this accepts a JSON number, a numeric string, the string
/// `"all"`, or null, since year selectors hand their value over as a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum YearFilter {
    #[default]
    Any,
    Exact(i64),
}

impl<'de> Deserialize<'de> for YearFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(Self::Any),
            Some(Raw::Number(year)) => Ok(Self::Exact(year)),
            Some(Raw::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
                    Ok(Self::Any)
                } else {
                    trimmed.parse().map(Self::Exact).map_err(|_| {
                        serde::de::Error::custom(format!("invalid year filter: {}", text))
                    })
                }
            }
        }
    }
}

/// Composite filter over a snapshot. The three clauses are independent and
/// AND-combined; the default spec matches every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub text: String,
    #[serde(rename = "mentorMode")]
    pub mentor: MentorFilter,
    pub year: YearFilter,
}

/// Narrows a snapshot to the records matching `spec`, preserving the input
/// (recency) order. Pure: the same snapshot and spec always yield the same
/// result.
pub fn filter_records(snapshot: &[AlumniRecord], spec: &FilterSpec) -> Vec<AlumniRecord> {
    let needle = spec.text.trim().to_lowercase();

    snapshot
        .iter()
        .filter(|record| matches_text(record, &needle))
        .filter(|record| match spec.mentor {
            MentorFilter::Any => true,
            MentorFilter::MentorOnly => record.is_mentor,
            MentorFilter::NonMentorOnly => !record.is_mentor,
        })
        .filter(|record| match spec.year {
            YearFilter::Any => true,
            YearFilter::Exact(year) => record.grad_year == Some(year),
        })
        .cloned()
        .collect()
}

/// Distinct graduation years present in the snapshot, newest first. Used by
/// collaborators to populate a year selector.
pub fn year_options(snapshot: &[AlumniRecord]) -> Vec<i64> {
    let mut years: Vec<i64> = snapshot.iter().filter_map(|r| r.grad_year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

fn matches_text(record: &AlumniRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack = [
        record.name.as_str(),
        record.company.as_str(),
        record.field.as_str(),
        record.contact_email.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase();

    haystack.contains(needle)
}
