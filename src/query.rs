use crate::record::{
    Record, CREATED, ISSUE_TYPE, PRIMARY_CONTACT, SERVICE, SEVERITY, SR_NUMBER, STATUS, UPDATED,
};
use serde::{Deserialize, Serialize};

/// Columns scanned by free-text search.
pub const SEARCH_FIELDS: [&str; 8] = [
    SR_NUMBER,
    SERVICE,
    ISSUE_TYPE,
    STATUS,
    SEVERITY,
    CREATED,
    UPDATED,
    PRIMARY_CONTACT,
];

/// Exact-match filters; `None` or empty means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub service: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, r: &Record) -> bool {
        criterion_matches(self.service.as_deref(), r.service())
            && criterion_matches(self.status.as_deref(), r.status())
            && criterion_matches(self.severity.as_deref(), r.severity())
    }

    pub fn is_empty(&self) -> bool {
        [&self.service, &self.status, &self.severity]
            .iter()
            .all(|c| c.as_deref().map_or(true, str::is_empty))
    }
}

fn criterion_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(w) if !w.is_empty() => actual == w,
        _ => true,
    }
}

pub fn apply_filters<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| criteria.matches(r)).collect()
}

pub fn apply_search<'a, I>(records: I, term: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    apply_search_in(records, term, &SEARCH_FIELDS[..])
}

/// Keeps records where the lower-cased `term` occurs in any of `fields`.
/// A blank term keeps everything. The service and creation-date columns are
/// read through their aliases.
pub fn apply_search_in<'a, I, S>(records: I, term: &str, fields: &[S]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
    S: AsRef<str>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|r| {
            fields.iter().any(|f| {
                let value = match f.as_ref() {
                    SERVICE => r.service(),
                    CREATED => r.created(),
                    other => r.value(other),
                };
                value.to_lowercase().contains(&needle)
            })
        })
        .collect()
}

/// Filters first, then searches within the filtered rows.
pub fn filter_and_search<'a, I>(records: I, criteria: &FilterCriteria, term: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    apply_search(apply_filters(records, criteria), term)
}
