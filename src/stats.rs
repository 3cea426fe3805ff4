use serde::Serialize;

use crate::record::AlumniRecord;

/// Bound used by the statistics bundle for the recent-activity list.
pub const DEFAULT_RECENT_LIMIT: usize = 6;

/// Label assigned to records whose discipline is empty after trimming.
pub const UNSPECIFIED_DISCIPLINE: &str = "Not specified";

/// Mentor coverage for one graduation-year bucket. `year` is `None` for the
/// bucket of records with no graduation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCoverage {
    pub year: Option<i64>,
    pub total: usize,
    pub mentors: usize,
    pub percent: u32,
}

/// Per-year mentor coverage plus the overall covered/total summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorCoverage {
    pub by_year: Vec<YearCoverage>,
    /// Distinct year buckets with at least one mentor.
    pub covered_years: usize,
    pub total_years: usize,
}

/// One entry of the discipline frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineShare {
    pub field: String,
    pub count: usize,
    /// Share of all records, rounded to the nearest integer percent.
    pub percent: u32,
}

/// Aggregate statistics bundle handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_count: usize,
    pub mentor_count: usize,
    pub median_year: Option<i64>,
    pub year_coverage: MentorCoverage,
    pub discipline_ranking: Vec<DisciplineShare>,
    pub recent_activity: Vec<AlumniRecord>,
}

impl DirectoryStats {
    /// Computes every statistic from one snapshot. Absence of data is a
    /// steady state, never an error: an empty snapshot yields zero counts,
    /// no median and empty lists.
    pub fn compute(snapshot: &[AlumniRecord], recent_limit: usize) -> Self {
        Self {
            total_count: snapshot.len(),
            mentor_count: snapshot.iter().filter(|r| r.is_mentor).count(),
            median_year: median_grad_year(snapshot),
            year_coverage: mentor_coverage(snapshot),
            discipline_ranking: discipline_ranking(snapshot),
            recent_activity: recent_activity(snapshot, recent_limit),
        }
    }
}

/// Median of all present graduation years. Even counts round the average of
/// the two middle values to the nearest year.
pub fn median_grad_year(snapshot: &[AlumniRecord]) -> Option<i64> {
    let mut years: Vec<i64> = snapshot.iter().filter_map(|r| r.grad_year).collect();
    if years.is_empty() {
        return None;
    }
    years.sort_unstable();

    let mid = years.len() / 2;
    if years.len() % 2 == 0 {
        Some(((years[mid - 1] + years[mid]) as f64 / 2.0).round() as i64)
    } else {
        Some(years[mid])
    }
}

/// Groups the snapshot by graduation year and reports mentor coverage per
/// bucket, newest year first with the unknown bucket sorted as year zero.
/// Buckets only exist for years that actually appear.
pub fn mentor_coverage(snapshot: &[AlumniRecord]) -> MentorCoverage {
    let mut buckets: Vec<(Option<i64>, usize, usize)> = Vec::new();
    for record in snapshot {
        let entry = match buckets.iter_mut().find(|(year, _, _)| *year == record.grad_year) {
            Some(entry) => entry,
            None => {
                buckets.push((record.grad_year, 0, 0));
                buckets.last_mut().unwrap()
            }
        };
        entry.1 += 1;
        if record.is_mentor {
            entry.2 += 1;
        }
    }

    buckets.sort_by(|a, b| b.0.unwrap_or(0).cmp(&a.0.unwrap_or(0)));

    let covered_years = buckets.iter().filter(|(_, _, mentors)| *mentors > 0).count();
    let total_years = buckets.len();
    let by_year = buckets
        .into_iter()
        .map(|(year, total, mentors)| YearCoverage {
            year,
            total,
            mentors,
            percent: percent(mentors, total),
        })
        .collect();

    MentorCoverage {
        by_year,
        covered_years,
        total_years,
    }
}

/// Frequency ranking of trimmed disciplines, descending by count. The sort is
/// stable, so disciplines with equal counts keep first-seen order.
pub fn discipline_ranking(snapshot: &[AlumniRecord]) -> Vec<DisciplineShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in snapshot {
        let label = match record.field.trim() {
            "" => UNSPECIFIED_DISCIPLINE,
            trimmed => trimmed,
        };
        match counts.iter_mut().find(|(field, _)| field == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = snapshot.len();
    counts
        .into_iter()
        .map(|(field, count)| DisciplineShare {
            field,
            count,
            percent: percent(count, total),
        })
        .collect()
}

/// The `limit` most recently touched records, most recent first. Ties on
/// `last_update` fall back to reverse insertion order, matching the store.
pub fn recent_activity(snapshot: &[AlumniRecord], limit: usize) -> Vec<AlumniRecord> {
    let mut recent: Vec<AlumniRecord> = snapshot.to_vec();
    recent.sort_by(|a, b| {
        b.last_update
            .cmp(&a.last_update)
            .then(b.id.cmp(&a.id))
    });
    recent.truncate(limit);
    recent
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 100) as f64 / whole as f64).round() as u32
}
