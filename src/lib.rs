pub mod error;
pub mod record;
pub mod parser;
pub mod dates;
pub mod fields;
pub mod aggregate;
pub mod query;
pub mod schema;
pub mod translate;
pub mod config;
pub mod report;
pub mod session;
pub mod logging;

pub use aggregate::{
    category_breakdown, kpi_summary, latest_generated_timestamp, latest_generated_timestamp_on, month_histogram,
    top_n, KpiSummary, MonthHistogram, RankedItem,
};
pub use config::DashboardConfig;
pub use dates::{parse_flexible, CanonicalInstant};
pub use error::{DashboardError, Result};
pub use fields::{group_counts, unique_values, CountItem, CountMap};
pub use parser::{parse as load, DelimiterMode};
pub use query::{filter_and_search, FilterCriteria};
pub use record::{Record, RecordSet};
pub use session::DashboardSession;
