use chrono::NaiveDate;
use sr_dashboard::dates::{parse_flexible, parse_flexible_on};

#[test]
fn relative_labels_follow_the_anchor_date() {
    let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let y = parse_flexible_on("Yesterday 3:07 PM", jan1).unwrap();
    assert_eq!((y.year(), y.month0(), y.day(), y.hour(), y.minute()), (2025, 11, 31, 15, 7));
    assert_eq!(parse_flexible_on("Today 3:07 PM", jan1).unwrap().format_br(), "01/01/2026, 15:07");
}

#[test]
fn day_first_is_the_fallback_for_ambiguous_exports() {
    let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    // US order wins whenever both readings are valid
    let us = parse_flexible_on("04/07/2025", d).unwrap();
    assert_eq!((us.month0(), us.day()), (3, 7));
    let br = parse_flexible_on("13/07/2025 08:15", d).unwrap();
    assert_eq!((br.month0(), br.day(), br.hour()), (6, 13, 8));
    let short = parse_flexible_on("04/07/25", d).unwrap();
    assert_eq!((short.year(), short.month0(), short.day()), (2025, 3, 7));
    let short_br = parse_flexible_on("24/07/25", d).unwrap();
    assert_eq!((short_br.year(), short_br.month0(), short_br.day()), (2025, 6, 24));
}

#[test]
fn parsing_is_deterministic_for_absolute_inputs() {
    for input in ["2025-05-06T07:08:09", "Jun 2, 2025 10:00 AM", "31-01-2024", "garbage"] {
        assert_eq!(parse_flexible(input), parse_flexible(input));
    }
    let rolled = parse_flexible("30/02/2025").unwrap();
    assert_eq!((rolled.month0(), rolled.day()), (2, 2));
}
