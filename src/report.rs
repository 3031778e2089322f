use crate::aggregate::{
    self, category_breakdown, kpi_summary, month_histogram_on, top_n, KpiSummary, MonthHistogram,
    RankedItem,
};
use crate::dates::CanonicalInstant;
use crate::error::Result;
use crate::fields::{group_counts, group_counts_any, unique_values, CountMap};
use crate::record::{Record, RecordSet, ISSUE_TYPE, SERVICE_KEYS, SEVERITY, STATUS};
use crate::schema;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the main dashboard page draws for one filter/search state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Rows in the loaded set, before filtering.
    pub total_records: usize,
    pub kpi: KpiSummary,
    pub by_service: CountMap,
    pub by_severity: CountMap,
    pub months: MonthHistogram,
    pub month_ranking: Vec<RankedItem>,
    pub issue_types: Vec<RankedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<CanonicalInstant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_label: Option<String>,
}

/// A top-N page: one ranked column over the whole set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub column: String,
    pub total: usize,
    pub distinct: usize,
    pub top: Vec<RankedItem>,
}

impl RankingReport {
    pub fn leader(&self) -> Option<&RankedItem> {
        self.top.first()
    }
}

/// Choices for the filter drop-downs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub services: Vec<String>,
    pub statuses: Vec<String>,
    pub severities: Vec<String>,
}

pub fn build_dashboard(
    set: &RecordSet,
    filtered: &[&Record],
    master_issue_types: &[String],
    year: i32,
    today: NaiveDate,
) -> DashboardReport {
    let months = month_histogram_on(filtered.iter().copied(), year, today);
    let known = (!master_issue_types.is_empty()).then_some(master_issue_types);
    DashboardReport {
        total_records: set.len(),
        kpi: kpi_summary(filtered.iter().copied()),
        by_service: group_counts_any(filtered.iter().copied(), SERVICE_KEYS),
        by_severity: group_counts(filtered.iter().copied(), SEVERITY),
        month_ranking: months.ranking(),
        months,
        issue_types: category_breakdown(filtered.iter().copied(), ISSUE_TYPE, known),
        generated_at: aggregate::latest_generated_timestamp_on(set, today),
        generated_label: aggregate::generated_label(set),
    }
}

/// Ranks the first present column of `candidates` over the whole set.
pub fn build_ranking(set: &RecordSet, candidates: &[&str], n: usize) -> Result<RankingReport> {
    let column = schema::require_column(set.headers(), candidates)?;
    let counts = group_counts(set, column);
    Ok(RankingReport {
        column: column.to_string(),
        total: set.len(),
        distinct: counts.len(),
        top: top_n(&counts, n),
    })
}

pub fn filter_options(set: &RecordSet) -> FilterOptions {
    let services = match schema::resolve_column(set.headers(), SERVICE_KEYS) {
        Some(col) => unique_values(set, col),
        None => Vec::new(),
    };
    FilterOptions {
        services,
        statuses: unique_values(set, STATUS),
        severities: unique_values(set, SEVERITY),
    }
}
