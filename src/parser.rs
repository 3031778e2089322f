use crate::error::Result;
use crate::record::{Record, RecordSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BOM: char = '\u{FEFF}';

/// Delimiters tried by auto-detection, in tie-break order.
pub const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterMode {
    /// Always split on `,`.
    Comma,
    /// Pick whichever candidate yields the most header fields.
    #[default]
    Auto,
}

pub fn parse(text: &str) -> RecordSet {
    parse_with(text, DelimiterMode::Auto)
}

/// Decodes raw bytes before tokenizing. Undecodable input is the only
/// failure a load can have.
pub fn parse_bytes(bytes: &[u8], mode: DelimiterMode) -> Result<RecordSet> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        tracing::warn!(valid_up_to = e.valid_up_to(), "CSV input is not valid UTF-8");
        e
    })?;
    Ok(parse_with(text, mode))
}

/// Tokenizes CSV text into records.
///
/// Blank lines are skipped, the first remaining line is the header. Splitting
/// honours double-quoted spans but does not understand `""` escapes or
/// quoted fields spanning lines.
pub fn parse_with(text: &str, mode: DelimiterMode) -> RecordSet {
    let mut lines = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .filter(|(_, l)| !is_blank_line(l));

    let Some((_, header_line)) = lines.next() else {
        tracing::debug!("CSV input has no non-blank lines");
        return RecordSet::default();
    };
    let header_line = header_line.trim_start().trim_start_matches(BOM);

    let delimiter = match mode {
        DelimiterMode::Comma => ',',
        DelimiterMode::Auto => match detect_delimiter(header_line) {
            Some(d) => d,
            None => {
                tracing::debug!(header = header_line, "no delimiter yields more than one column");
                return RecordSet::default();
            }
        },
    };

    let mut headers: Vec<String> = split_quoted(header_line, delimiter)
        .into_iter()
        .map(clean_field)
        .collect();
    if let Some(first) = headers.first_mut() {
        *first = first.trim_start_matches(BOM).trim().to_string();
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (idx, line) in lines {
        let cols = split_quoted(line, delimiter);
        let mut fields = BTreeMap::new();
        for (j, key) in headers.iter().enumerate() {
            let value = cols.get(j).map(|c| clean_field(c)).unwrap_or_default();
            fields.insert(key.clone(), value);
        }
        let record = Record::new(idx + 1, fields);
        if record.is_blank() {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    tracing::debug!(
        delimiter = ?delimiter,
        columns = headers.len(),
        records = records.len(),
        skipped_empty = skipped,
        "parsed CSV"
    );
    RecordSet::new(headers, Some(delimiter), records)
}

/// Chooses the candidate delimiter giving the most header fields. `None`
/// when every candidate leaves the header as a single field.
pub fn detect_delimiter(header: &str) -> Option<char> {
    let mut best = None;
    let mut max_cols = 1usize;
    for d in CANDIDATE_DELIMITERS {
        let cols = header.split(d).count();
        if cols > max_cols {
            max_cols = cols;
            best = Some(d);
        }
    }
    best
}

/// Splits on `delimiter` except where an odd number of `"` precede it.
pub fn split_quoted(line: &str, delimiter: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in line.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            out.push(&line[start..i]);
            start = i + ch.len_utf8();
        }
    }
    out.push(&line[start..]);
    out
}

fn clean_field(raw: &str) -> String {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_string()
}

fn is_blank_line(line: &str) -> bool {
    line.chars().all(|c| c.is_whitespace() || c == BOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_quoted_delimiters() {
        let cols = split_quoted(r#"1,"Oracle, Inc",Open"#, ',');
        assert_eq!(cols, vec!["1", r#""Oracle, Inc""#, "Open"]);
    }

    #[test]
    fn split_unbalanced_quote_swallows_rest() {
        let cols = split_quoted(r#"a,"b,c"#, ',');
        assert_eq!(cols, vec!["a", r#""b,c"#]);
    }

    #[test]
    fn detect_prefers_most_columns() {
        assert_eq!(detect_delimiter("a;b;c"), Some(';'));
        assert_eq!(detect_delimiter("a\tb\tc\td"), Some('\t'));
        assert_eq!(detect_delimiter("a|b"), Some('|'));
        assert_eq!(detect_delimiter("single"), None);
    }

    #[test]
    fn detect_ties_go_to_declaration_order() {
        assert_eq!(detect_delimiter("a,b;c"), Some(','));
        assert_eq!(detect_delimiter("a;b|c"), Some(';'));
    }

    #[test]
    fn clean_strips_one_quote_each_side_then_trims() {
        assert_eq!(clean_field(r#""  x  ""#), "x");
        assert_eq!(clean_field(r#"""x"""#), r#""x""#);
        assert_eq!(clean_field("\""), "");
    }
}
