use crate::dates::{parse_flexible_on, CanonicalInstant};
use crate::fields::{collate, group_counts, group_counts_any, CountMap};
use crate::record::{Record, RecordSet, SERVICE_KEYS, STATUS, UPDATED};
use crate::schema;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Status substrings (case-insensitive) that mark a ticket as closed.
pub const CLOSED_TOKENS: [&str; 4] = ["closed", "close requested", "resolved", "fechado"];

pub const MONTH_LABELS: [&str; 13] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ", "S/ DATA",
];
/// Index of the bucket for records without a parseable creation date.
pub const NO_DATE: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiSummary {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    /// Most frequent service; `None` without records or without a service column.
    pub top_category: Option<String>,
}

impl KpiSummary {
    pub fn top_label(&self) -> &str {
        self.top_category.as_deref().unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthHistogram {
    pub year: i32,
    pub buckets: [usize; 13],
}

impl MonthHistogram {
    pub fn month(&self, month0: usize) -> usize {
        self.buckets.get(month0).copied().unwrap_or(0)
    }

    pub fn no_date(&self) -> usize {
        self.buckets[NO_DATE]
    }

    /// Sum of all thirteen buckets, the no-date one included.
    pub fn total(&self) -> usize {
        self.buckets.iter().sum()
    }

    /// Buckets by descending count, ties in calendar order.
    pub fn ranking(&self) -> Vec<RankedItem> {
        let total = self.total();
        let mut idx: Vec<usize> = (0..self.buckets.len()).collect();
        idx.sort_by(|&a, &b| self.buckets[b].cmp(&self.buckets[a]).then(a.cmp(&b)));
        idx.into_iter()
            .map(|i| RankedItem {
                label: MONTH_LABELS[i].to_string(),
                count: self.buckets[i],
                percentage: percentage(self.buckets[i], total),
            })
            .collect()
    }

    /// Busiest bucket, `None` when nothing was counted.
    pub fn peak(&self) -> Option<RankedItem> {
        self.ranking().into_iter().next().filter(|r| r.count > 0)
    }
}

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

pub fn is_closed_status(status: &str) -> bool {
    let st = status.to_lowercase();
    CLOSED_TOKENS.iter().any(|t| st.contains(t))
}

pub fn kpi_summary<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();
    let total = records.len();
    // exported value, not the translated one
    let closed = records
        .iter()
        .filter(|r| is_closed_status(r.original(STATUS).unwrap_or_default()))
        .count();

    let has_service = records.iter().any(|r| r.first_present(SERVICE_KEYS).is_some());
    let top_category = if has_service {
        group_counts_any(records.iter().copied(), SERVICE_KEYS)
            .max_first_seen()
            .map(|c| c.name.clone())
    } else {
        None
    };

    KpiSummary { total, open: total - closed, closed, top_category }
}

pub fn month_histogram<'a, I>(records: I, year: i32) -> MonthHistogram
where
    I: IntoIterator<Item = &'a Record>,
{
    month_histogram_on(records, year, Local::now().date_naive())
}

/// Buckets records by creation month of `year`.
///
/// Unparseable creation dates land in the no-date bucket. Parseable dates
/// from any other year are left out of every bucket.
pub fn month_histogram_on<'a, I>(records: I, year: i32, today: NaiveDate) -> MonthHistogram
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buckets = [0usize; 13];
    let mut other_years = 0usize;
    for r in records {
        match parse_flexible_on(r.created(), today) {
            None => buckets[NO_DATE] += 1,
            Some(dt) if dt.year() == year => buckets[dt.month0() as usize] += 1,
            Some(_) => other_years += 1,
        }
    }
    if other_years > 0 {
        tracing::debug!(year, excluded = other_years, "records outside target year left out of histogram");
    }
    MonthHistogram { year, buckets }
}

/// The `n` largest entries, ties by label, with percentages of the whole map.
pub fn top_n(counts: &CountMap, n: usize) -> Vec<RankedItem> {
    let total = counts.total();
    let mut items: Vec<_> = counts.iter().collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| collate(&a.name, &b.name)));
    items
        .into_iter()
        .take(n)
        .map(|c| RankedItem {
            label: c.name.clone(),
            count: c.count,
            percentage: percentage(c.count, total),
        })
        .collect()
}

/// Full ranked breakdown of `field`. Every known category appears, at zero
/// when absent from `records`; observed values outside the list are kept too.
pub fn category_breakdown<'a, I>(records: I, field: &str, known: Option<&[String]>) -> Vec<RankedItem>
where
    I: IntoIterator<Item = &'a Record>,
{
    let observed = group_counts(records, field);
    let mut merged = CountMap::new();
    for k in known.unwrap_or_default() {
        merged.add(k, observed.get(k));
    }
    for item in observed.iter() {
        if !merged.contains(&item.name) {
            merged.add(&item.name, item.count);
        }
    }
    top_n(&merged, merged.len())
}

pub fn latest_generated_timestamp(set: &RecordSet) -> Option<CanonicalInstant> {
    latest_generated_timestamp_on(set, Local::now().date_naive())
}

/// Most recent generation timestamp in the set, falling back to the latest
/// update timestamp when the generation column is absent or unparseable.
pub fn latest_generated_timestamp_on(set: &RecordSet, today: NaiveDate) -> Option<CanonicalInstant> {
    let latest = |field: &str| {
        set.iter()
            .filter_map(|r| parse_flexible_on(r.value(field), today))
            .max()
    };
    schema::generation_column(set.headers())
        .and_then(latest)
        .or_else(|| latest(UPDATED))
}

/// Last non-empty raw value of the generation column.
pub fn generated_label(set: &RecordSet) -> Option<String> {
    let col = schema::generation_column(set.headers())?;
    set.iter()
        .rev()
        .map(|r| r.value(col).trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
