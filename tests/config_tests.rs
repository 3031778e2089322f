use sr_dashboard::config::DashboardConfig;
use sr_dashboard::parser::DelimiterMode;
use sr_dashboard::DashboardError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn config_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
delimiter = "comma"
target_year = 2024
top_n = 5
translate = true
search_fields = ["Contato Primário", "Status"]
"#
    )
    .unwrap();

    let cfg = DashboardConfig::from_file(file.path()).unwrap();
    assert_eq!(cfg.delimiter, DelimiterMode::Comma);
    assert_eq!(cfg.target_year, 2024);
    assert_eq!(cfg.top_n, 5);
    assert!(cfg.translate);
    assert_eq!(cfg.search_fields.as_deref().map(|f| f.len()), Some(2));
}

#[test]
fn defaults_apply_to_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let cfg = DashboardConfig::from_file(file.path()).unwrap();
    assert_eq!(cfg, DashboardConfig::default());
    assert_eq!(cfg.delimiter, DelimiterMode::Auto);
    assert_eq!(cfg.target_year, 2025);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DashboardConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, DashboardError::Io(_)));
}

#[test]
fn out_of_range_year_is_rejected() {
    let err = DashboardConfig::from_toml_str("target_year = 1900").unwrap_err();
    assert!(err.to_string().contains("target_year"));
    let err = DashboardConfig::from_toml_str("search_fields = [\" \"]").unwrap_err();
    assert!(matches!(err, DashboardError::Config { .. }));
}

#[test]
fn unknown_delimiter_mode_fails_to_parse() {
    let err = DashboardConfig::from_toml_str("delimiter = \"tab\"").unwrap_err();
    assert!(matches!(err, DashboardError::Config { .. }));
}
