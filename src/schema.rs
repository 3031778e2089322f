use crate::error::{DashboardError, Result};
use crate::record::{CREATED_KEYS, ISSUE_TYPE, PRIMARY_CONTACT, SERVICE_KEYS, SEVERITY, SR_NUMBER, STATUS};
use std::collections::BTreeMap;

/// Header name -> zero-based position.
pub type Fingerprint = BTreeMap<String, usize>;

/// Logical columns the dashboard reads, each with its accepted spellings.
pub const EXPECTED_COLUMNS: &[&[&str]] = &[
    &[SR_NUMBER],
    SERVICE_KEYS,
    &[ISSUE_TYPE],
    &[STATUS],
    &[SEVERITY],
    CREATED_KEYS,
    &[PRIMARY_CONTACT],
];

// compared after normalize_header
const GENERATION_NAMES: [&str; 2] = ["gerado em", "atualizado em"];
const GENERATION_LITERAL: &str = "GeradoEm";

pub fn fingerprint_headers(headers: &[String]) -> Fingerprint {
    headers.iter().enumerate().map(|(i, h)| (h.clone(), i)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    ColumnAdded { column: String, position: usize },
    ColumnRemoved { column: String, position: usize },
    ColumnMoved { column: String, from: usize, to: usize },
}

pub fn diff_fingerprints(before: &Fingerprint, after: &Fingerprint) -> Vec<SchemaChange> {
    let mut changes = Vec::new();

    for (column, &b_pos) in before.iter() {
        match after.get(column) {
            None => changes.push(SchemaChange::ColumnRemoved { column: column.clone(), position: b_pos }),
            Some(&a_pos) if a_pos != b_pos => changes.push(SchemaChange::ColumnMoved {
                column: column.clone(),
                from: b_pos,
                to: a_pos,
            }),
            _ => {}
        }
    }

    for (column, &a_pos) in after.iter() {
        if !before.contains_key(column) {
            changes.push(SchemaChange::ColumnAdded { column: column.clone(), position: a_pos });
        }
    }

    changes
}

/// Lower-case, collapse whitespace, treat `_` as a space.
pub fn normalize_header(s: &str) -> String {
    s.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First of `candidates` present verbatim in `headers`.
pub fn resolve_column<'a>(headers: &[String], candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|c| headers.iter().any(|h| h == c))
}

pub fn require_column<'a>(headers: &[String], candidates: &[&'a str]) -> Result<&'a str> {
    resolve_column(headers, candidates).ok_or_else(|| DashboardError::MissingColumn {
        column: candidates.join("/"),
    })
}

/// Header holding the export's generation timestamp, matched loosely.
pub fn generation_column(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .find(|h| {
            let n = normalize_header(h);
            GENERATION_NAMES.contains(&n.as_str())
        })
        .or_else(|| headers.iter().find(|h| h.as_str() == GENERATION_LITERAL))
        .map(String::as_str)
}

/// Expected logical columns with none of their spellings in `headers`.
pub fn missing_expected(headers: &[String]) -> Vec<String> {
    EXPECTED_COLUMNS
        .iter()
        .filter(|keys| resolve_column(headers, keys).is_none())
        .map(|keys| keys.join("/"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_folds_case_space_and_underscore() {
        assert_eq!(normalize_header("  Gerado_em "), "gerado em");
        assert_eq!(normalize_header("ATUALIZADO    EM"), "atualizado em");
    }

    #[test]
    fn generation_column_matches_loosely() {
        let h = headers(&["Número SR", "Atualizado_dt", "Gerado_Em"]);
        assert_eq!(generation_column(&h), Some("Gerado_Em"));
        let h = headers(&["GeradoEm"]);
        assert_eq!(generation_column(&h), Some("GeradoEm"));
        let h = headers(&["Atualizado_dt"]);
        assert_eq!(generation_column(&h), None);
    }

    #[test]
    fn require_reports_all_spellings() {
        let h = headers(&["Status"]);
        let err = require_column(&h, SERVICE_KEYS).unwrap_err();
        assert!(err.to_string().contains("Serviço/Servico"));
        let h = headers(&["Servico"]);
        assert_eq!(require_column(&h, SERVICE_KEYS).unwrap(), "Servico");
    }
}
