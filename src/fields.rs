use crate::record::{Record, NOT_INFORMED};
use itertools::Itertools;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountItem {
    pub name: String,
    pub count: usize,
}

/// Value -> count, keeping the order in which values were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    items: Vec<CountItem>,
    index: HashMap<String, usize>,
}

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, n: usize) {
        match self.index.get(key) {
            Some(&i) => self.items[i].count += n,
            None => {
                self.index.insert(key.to_string(), self.items.len());
                self.items.push(CountItem { name: key.to_string(), count: n });
            }
        }
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map(|&i| self.items[i].count).unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> usize {
        self.items.iter().map(|c| c.count).sum()
    }

    pub fn items(&self) -> &[CountItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountItem> {
        self.items.iter()
    }

    /// Highest count; on ties the value seen first wins.
    pub fn max_first_seen(&self) -> Option<&CountItem> {
        let mut best: Option<&CountItem> = None;
        for item in &self.items {
            if item.count > best.map(|b| b.count).unwrap_or(0) {
                best = Some(item);
            }
        }
        best
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<K: AsRef<str>> FromIterator<(K, usize)> for CountMap {
    fn from_iter<T: IntoIterator<Item = (K, usize)>>(iter: T) -> Self {
        let mut map = CountMap::new();
        for (k, n) in iter {
            map.add(k.as_ref(), n);
        }
        map
    }
}

/// Counts trimmed values of `field`; empty or missing values count under
/// [`NOT_INFORMED`].
pub fn group_counts<'a, I>(records: I, field: &str) -> CountMap
where
    I: IntoIterator<Item = &'a Record>,
{
    group_counts_any(records, &[field])
}

/// Like [`group_counts`], reading the first column of `keys` each record has.
pub fn group_counts_any<'a, I>(records: I, keys: &[&str]) -> CountMap
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut map = CountMap::new();
    for r in records {
        let v = r.first_present(keys).unwrap_or("").trim();
        map.increment(if v.is_empty() { NOT_INFORMED } else { v });
    }
    map
}

/// Distinct non-empty trimmed values of `field`, in pt-BR collation order.
pub fn unique_values<'a, I>(records: I, field: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|r| r.value(field).trim())
        .filter(|v| !v.is_empty())
        .unique()
        .sorted_by(|a, b| collate(a, b))
        .map(str::to_string)
        .collect()
}

/// Approximates pt-BR collation: base letters first, then accents, then
/// case with lower-case before upper-case.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| b.cmp(a))
}

fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_map_keeps_first_seen_order() {
        let mut m = CountMap::new();
        for k in ["b", "a", "b", "c"] {
            m.increment(k);
        }
        let names: Vec<&str> = m.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(m.get("b"), 2);
        assert_eq!(m.get("zzz"), 0);
        assert_eq!(m.total(), 4);
    }

    #[test]
    fn max_prefers_earliest_on_tie() {
        let m: CountMap = vec![("x", 2), ("y", 3), ("z", 3)].into_iter().collect();
        assert_eq!(m.max_first_seen().map(|c| c.name.as_str()), Some("y"));
        assert!(CountMap::new().max_first_seen().is_none());
    }

    #[test]
    fn collation_ignores_case_and_accents_at_first_level() {
        let mut v = vec!["Zeta", "ábaco", "Abacate", "abaco", "Éden", "bola"];
        v.sort_by(|a, b| collate(a, b));
        assert_eq!(v, vec!["Abacate", "abaco", "ábaco", "bola", "Éden", "Zeta"]);
    }

    #[test]
    fn collation_puts_lower_case_first() {
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("A", "A"), Ordering::Equal);
    }
}
