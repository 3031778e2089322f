use sr_dashboard::parser::{self, DelimiterMode};
use sr_dashboard::DashboardError;

#[test]
fn semicolon_export_is_detected() {
    let text = "Servico;Status;Data\nOracle APEX in Cloud;Open;05/03/2025\nOIC;Closed;\n";
    let set = sr_dashboard::load(text);
    assert_eq!(set.delimiter(), Some(';'));
    assert_eq!(set.headers(), &["Servico", "Status", "Data"]);
    assert_eq!(set.len(), 2);
    let first = &set.records()[0];
    assert_eq!(first.fields().count(), 3);
    assert_eq!(first.value("Servico"), "Oracle APEX in Cloud");
    assert_eq!(first.value("Data"), "05/03/2025");
    assert_eq!(set.records()[1].value("Data"), "");
}

#[test]
fn quoted_commas_stay_in_one_field() {
    let text = "Número SR,Serviço,Contato Primário\n3-1,\"Oracle Fusion, Assets\",\"Silva, Ana\"\n";
    let set = parser::parse_with(text, DelimiterMode::Comma);
    let r = &set.records()[0];
    assert_eq!(r.value("Serviço"), "Oracle Fusion, Assets");
    assert_eq!(r.value("Contato Primário"), "Silva, Ana");
    assert_eq!(r.service(), "Oracle Fusion, Assets");
}

#[test]
fn bom_crlf_and_blank_lines_are_tolerated() {
    let text = "\u{FEFF}Serviço,Status\r\n\r\nA,Open\r\n   \r\n,\r\nB,Closed\r\n";
    let set = sr_dashboard::load(text);
    assert_eq!(set.headers(), &["Serviço", "Status"]);
    // the all-empty "," row is dropped too
    let services: Vec<&str> = set.iter().map(|r| r.value("Serviço")).collect();
    assert_eq!(services, vec!["A", "B"]);
    assert_eq!(set.records()[0].line_number, 3);
    assert_eq!(set.records()[1].line_number, 6);
}

#[test]
fn short_rows_are_padded_and_extra_cells_ignored() {
    let set = sr_dashboard::load("a,b,c\n1\n1,2,3,4\n");
    assert_eq!(set.records()[0].value("b"), "");
    assert_eq!(set.records()[0].get("c"), Some(""));
    assert_eq!(set.records()[1].value("c"), "3");
    assert_eq!(set.records()[1].fields().count(), 3);
}

#[test]
fn single_column_header_yields_empty_set_in_auto_mode() {
    let set = sr_dashboard::load("Status\nOpen\nClosed\n");
    assert!(set.is_empty());
    assert!(set.headers().is_empty());
    assert_eq!(set.delimiter(), None);

    let forced = parser::parse_with("Status\nOpen\nClosed\n", DelimiterMode::Comma);
    assert_eq!(forced.len(), 2);
    assert_eq!(forced.delimiter(), Some(','));
}

#[test]
fn empty_input_is_an_empty_set() {
    assert!(sr_dashboard::load("").is_empty());
    assert!(sr_dashboard::load("\n\n \n").is_empty());
}

#[test]
fn parse_is_idempotent() {
    let text = "Número SR;Serviço;Status\n1;\"A;B\";Open\n2;C;Closed\n";
    assert_eq!(sr_dashboard::load(text), sr_dashboard::load(text));
}

#[test]
fn plain_rows_round_trip() {
    let text = "Número SR,Serviço,Status,Severidade\n3-100,Oracle Integration 3,Work In Progress,2-Significant\n";
    let set = sr_dashboard::load(text);
    let original = &set.records()[0];
    let line = set
        .headers()
        .iter()
        .map(|h| original.value(h))
        .collect::<Vec<_>>()
        .join(",");
    let rebuilt = sr_dashboard::load(&format!("{}\n{}\n", set.headers().join(","), line));
    assert_eq!(rebuilt.records()[0].fields().collect::<Vec<_>>(), original.fields().collect::<Vec<_>>());
}

#[test]
fn detect_delimiter_prefers_most_columns_then_candidate_order() {
    assert_eq!(parser::detect_delimiter("a;b;c,d"), Some(';'));
    assert_eq!(parser::detect_delimiter("a|b\tc"), Some('\t'));
    assert_eq!(parser::detect_delimiter("a,b;c"), Some(','));
    assert_eq!(parser::detect_delimiter("abc"), None);
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let err = parser::parse_bytes(b"Servico,Status\n\xff\xfe,Open\n", DelimiterMode::Auto).unwrap_err();
    assert!(matches!(err, DashboardError::Decode(_)));

    let ok = parser::parse_bytes("Serviço,Status\nA,Open\n".as_bytes(), DelimiterMode::Auto).unwrap();
    assert_eq!(ok.len(), 1);
}
