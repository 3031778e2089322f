use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

/// A normalized local date-time. Absence (`None`) stands for "unparseable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalInstant(NaiveDateTime);

impl CanonicalInstant {
    pub fn new(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month, 0 = January.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// `dd/mm/yyyy, HH:MM`
    pub fn format_br(&self) -> String {
        self.0.format("%d/%m/%Y, %H:%M").to_string()
    }
}

static RE_TODAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^today\s+(\d{1,2}):(\d{2})\s*(AM|PM)$").unwrap()
});

static RE_YESTERDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^yesterday\s+(\d{1,2}):(\d{2})\s*(AM|PM)$").unwrap()
});

// 05/03/2025, 5-3-25, 05/03/2025 14:30, 05/03/2025T14:30:15
static RE_NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})([/\-])(\d{1,2})[/\-](\d{2,4})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2}))?)?$").unwrap()
});

static RE_YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

// matched against the input prefixed with "1 "
const MONTH_YEAR_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%d %b, %Y", "%d %B, %Y"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%B %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%a %b %d %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a, %d %b %Y",
    "%a %b %d %Y",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
];

/// Parses a ticket timestamp using today's local date for relative labels.
pub fn parse_flexible(raw: &str) -> Option<CanonicalInstant> {
    parse_flexible_on(raw, Local::now().date_naive())
}

/// Parses a ticket timestamp; `today` anchors `Today`/`Yesterday` labels.
///
/// First match wins: relative labels, then general date formats (month-first
/// for ambiguous numeric dates), then an explicit day-first `D/M/Y` pattern.
pub fn parse_flexible_on(raw: &str, today: NaiveDate) -> Option<CanonicalInstant> {
    let trimmed = raw.trim();
    let s = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let s = s.strip_suffix('"').unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }

    if let Some(c) = RE_TODAY.captures(s) {
        return relative(today, &c);
    }
    if let Some(c) = RE_YESTERDAY.captures(s) {
        return relative(today.pred_opt()?, &c);
    }

    parse_general(s)
        .or_else(|| parse_day_first(s))
        .map(CanonicalInstant)
}

fn relative(day: NaiveDate, c: &Captures) -> Option<CanonicalInstant> {
    let mut hour: i64 = c[1].parse().ok()?;
    let minute: i64 = c[2].parse().ok()?;
    let pm = c[3].eq_ignore_ascii_case("PM");
    if pm && hour < 12 {
        hour += 12;
    }
    if !pm && hour == 12 {
        hour = 0;
    }
    let fields = [day.month() as i64, day.day() as i64, hour, minute, 0];
    rolled_datetime(day.year(), fields).map(CanonicalInstant)
}

/// Formats a general-purpose date parser accepts: RFC 3339/2822, ISO,
/// English month names, bare years and month-first numeric dates.
fn parse_general(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for f in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, f) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
    }
    for f in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, f) {
            if plausible_year(ndt.year()) {
                return Some(ndt);
            }
        }
    }
    for f in NAIVE_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, f) {
            if plausible_year(d.year()) {
                return d.and_hms_opt(0, 0, 0);
            }
        }
    }
    parse_partial(s).or_else(|| parse_month_first(s))
}

// `%Y` happily reads "25" as year 25; short years go through the numeric paths.
fn plausible_year(year: i32) -> bool {
    year >= 1000
}

/// `2025` and `Nov 2025`: the first day of the year or month.
fn parse_partial(s: &str) -> Option<NaiveDateTime> {
    if RE_YEAR_ONLY.is_match(s) {
        return NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1)?.and_hms_opt(0, 0, 0);
    }
    let padded = format!("1 {s}");
    MONTH_YEAR_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&padded, f).ok())
        .filter(|d| plausible_year(d.year()))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `M/D/Y` or `M-D-Y`; only calendar-valid readings are accepted.
fn parse_month_first(s: &str) -> Option<NaiveDateTime> {
    let c = RE_NUMERIC_DATE.captures(s)?;
    let month: u32 = c[1].parse().ok()?;
    let day: u32 = c[3].parse().ok()?;
    let year = match c[4].parse::<i32>().ok()? {
        y @ 0..=49 if c[4].len() == 2 => 2000 + y,
        y @ 50..=99 if c[4].len() == 2 => 1900 + y,
        y => y,
    };
    let time = NaiveTime::from_hms_opt(
        group_or_zero(&c, 5)?,
        group_or_zero(&c, 6)?,
        group_or_zero(&c, 7)?,
    )?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(time))
}

/// `D/M/Y` or `D-M-Y`. Out-of-range components carry over into the next
/// unit, so `31/02/2025` lands on 3 March.
fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    let c = RE_NUMERIC_DATE.captures(s)?;
    let day: i64 = c[1].parse().ok()?;
    let month: i64 = c[3].parse().ok()?;
    let mut year: i32 = c[4].parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    let fields = [
        month,
        day,
        i64::from(group_or_zero(&c, 5)?),
        i64::from(group_or_zero(&c, 6)?),
        i64::from(group_or_zero(&c, 7)?),
    ];
    rolled_datetime(year, fields)
}

fn group_or_zero(c: &Captures, i: usize) -> Option<u32> {
    match c.get(i) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

/// Builds a date-time from `[month, day, hour, minute, second]` (month and
/// day one-based), letting each component overflow into the next larger one.
fn rolled_datetime(year: i32, [month, day, hour, minute, second]: [i64; 5]) -> Option<NaiveDateTime> {
    let months = i64::from(year) * 12 + month - 1;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    let offset = TimeDelta::try_days(day - 1)?
        .checked_add(&TimeDelta::try_hours(hour)?)?
        .checked_add(&TimeDelta::try_minutes(minute)?)?
        .checked_add(&TimeDelta::try_seconds(second)?)?;
    first.and_hms_opt(0, 0, 0)?.checked_add_signed(offset)
}
