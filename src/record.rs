use serde::Serialize;
use std::collections::BTreeMap;

pub const SR_NUMBER: &str = "Número SR";
pub const SERVICE: &str = "Serviço";
pub const SERVICE_ASCII: &str = "Servico";
pub const ISSUE_TYPE: &str = "Issue Type";
pub const STATUS: &str = "Status";
pub const SEVERITY: &str = "Severidade";
pub const CREATED: &str = "Criado_dt";
pub const UPDATED: &str = "Atualizado_dt";
pub const PRIMARY_CONTACT: &str = "Contato Primário";

/// Service column spellings, in lookup order.
pub const SERVICE_KEYS: &[&str] = &[SERVICE, SERVICE_ASCII];
/// Creation-date columns; the first populated one wins per record.
pub const CREATED_KEYS: &[&str] = &[CREATED, "Created Date", "Created", "Creation Date"];

/// Placeholder used when a grouped field is empty.
pub const NOT_INFORMED: &str = "Não informado";

/// One CSV data row: header name -> trimmed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub line_number: usize,
    fields: BTreeMap<String, String>,
    #[serde(skip)]
    originals: BTreeMap<String, String>,
}

impl Record {
    pub fn new(line_number: usize, fields: BTreeMap<String, String>) -> Self {
        Self { line_number, fields, originals: BTreeMap::new() }
    }

    /// Value of `field`, or `None` when the column does not exist.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of `field`, empty when the column does not exist.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Value of the first column in `keys` that exists on this record.
    pub fn first_present(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// Value of the first column in `keys` holding a non-empty value.
    pub fn first_populated(&self, keys: &[&str]) -> &str {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.trim().is_empty())
            .unwrap_or("")
    }

    pub fn service(&self) -> &str {
        self.first_present(SERVICE_KEYS).unwrap_or("")
    }

    pub fn status(&self) -> &str {
        self.value(STATUS)
    }

    pub fn severity(&self) -> &str {
        self.value(SEVERITY)
    }

    pub fn created(&self) -> &str {
        self.first_populated(CREATED_KEYS)
    }

    /// Rewrites an existing field, remembering the first value it held.
    /// Returns false when the column does not exist.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let Some(current) = self.fields.get_mut(field) else { return false };
        if !self.originals.contains_key(field) {
            self.originals.insert(field.to_string(), current.clone());
        }
        *current = value.into();
        true
    }

    /// Value the field held at load time, before any rewrite.
    pub fn original(&self, field: &str) -> Option<&str> {
        self.originals
            .get(field)
            .map(String::as_str)
            .or_else(|| self.get(field))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }
}

/// All records of one load, in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    headers: Vec<String>,
    delimiter: Option<char>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(headers: Vec<String>, delimiter: Option<char>, records: Vec<Record>) -> Self {
        Self { headers, delimiter, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Delimiter the tokenizer settled on; `None` for an empty input.
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        let fields = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Record::new(2, fields)
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let r = rec(&[("Status", "Open")]);
        assert_eq!(r.get("Severidade"), None);
        assert_eq!(r.value("Severidade"), "");
        assert_eq!(r.status(), "Open");
    }

    #[test]
    fn service_falls_back_to_ascii_spelling() {
        let r = rec(&[("Servico", "HCM")]);
        assert_eq!(r.service(), "HCM");
        let r = rec(&[("Serviço", "ERP"), ("Servico", "HCM")]);
        assert_eq!(r.service(), "ERP");
    }

    #[test]
    fn created_skips_empty_candidates() {
        let r = rec(&[("Criado_dt", ""), ("Created", "Nov 19, 2025")]);
        assert_eq!(r.created(), "Nov 19, 2025");
    }

    #[test]
    fn set_keeps_first_original() {
        let mut r = rec(&[("Status", "closed")]);
        assert!(r.set("Status", "Fechado"));
        assert!(r.set("Status", "Encerrado"));
        assert_eq!(r.status(), "Encerrado");
        assert_eq!(r.original("Status"), Some("closed"));
        assert!(!r.set("Severidade", "x"));
    }
}
