use crate::config::DashboardConfig;
use crate::error::Result;
use crate::fields::unique_values;
use crate::parser;
use crate::query::{apply_filters, apply_search_in, FilterCriteria, SEARCH_FIELDS};
use crate::record::{Record, RecordSet, ISSUE_TYPE, NOT_INFORMED, PRIMARY_CONTACT, SERVICE_KEYS};
use crate::report::{self, DashboardReport, FilterOptions, RankingReport};
use crate::schema;
use crate::translate;
use chrono::{Local, NaiveDate};

/// Holds the currently loaded record set. Every view recomputes from it;
/// a reload replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    config: DashboardConfig,
    records: RecordSet,
    master_issue_types: Vec<String>,
}

impl DashboardSession {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config, records: RecordSet::default(), master_issue_types: Vec::new() }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Issue types seen in the full load; the issue chart always lists them.
    pub fn master_issue_types(&self) -> &[String] {
        &self.master_issue_types
    }

    /// Tokenizes `text` and swaps it in as the current set. Returns the
    /// number of records loaded.
    pub fn load(&mut self, text: &str) -> usize {
        let set = parser::parse_with(text, self.config.delimiter);
        self.replace(set)
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let set = parser::parse_bytes(bytes, self.config.delimiter)?;
        Ok(self.replace(set))
    }

    fn replace(&mut self, mut set: RecordSet) -> usize {
        if self.config.translate {
            translate::translate_records(&mut set);
        }

        if !self.records.headers().is_empty() {
            let before = schema::fingerprint_headers(self.records.headers());
            let after = schema::fingerprint_headers(set.headers());
            for change in schema::diff_fingerprints(&before, &after) {
                tracing::info!(?change, "CSV header changed since previous load");
            }
        }
        let missing = schema::missing_expected(set.headers());
        if !missing.is_empty() && !set.headers().is_empty() {
            tracing::warn!(?missing, "expected columns absent from CSV header");
        }

        let mut master = unique_values(&set, ISSUE_TYPE);
        if master.is_empty() {
            master.push(NOT_INFORMED.to_string());
        }

        tracing::info!(records = set.len(), columns = set.headers().len(), "loaded SR data");
        self.master_issue_types = master;
        self.records = set;
        self.records.len()
    }

    pub fn filter_options(&self) -> FilterOptions {
        report::filter_options(&self.records)
    }

    /// Filter-then-search over the current set.
    pub fn select(&self, criteria: &FilterCriteria, term: &str) -> Vec<&Record> {
        let filtered = apply_filters(&self.records, criteria);
        match &self.config.search_fields {
            Some(fields) => apply_search_in(filtered, term, fields.as_slice()),
            None => apply_search_in(filtered, term, &SEARCH_FIELDS[..]),
        }
    }

    pub fn view(&self, criteria: &FilterCriteria, term: &str) -> DashboardReport {
        self.view_on(criteria, term, Local::now().date_naive())
    }

    /// [`view`](Self::view) with an explicit date for `Today`/`Yesterday` labels.
    pub fn view_on(&self, criteria: &FilterCriteria, term: &str, today: NaiveDate) -> DashboardReport {
        let selected = self.select(criteria, term);
        tracing::debug!(selected = selected.len(), total = self.records.len(), "building dashboard view");
        report::build_dashboard(
            &self.records,
            &selected,
            &self.master_issue_types,
            self.config.target_year,
            today,
        )
    }

    pub fn top_contacts(&self) -> Result<RankingReport> {
        report::build_ranking(&self.records, &[PRIMARY_CONTACT], self.config.top_n)
    }

    pub fn top_services(&self) -> Result<RankingReport> {
        report::build_ranking(&self.records, SERVICE_KEYS, self.config.top_n)
    }
}
