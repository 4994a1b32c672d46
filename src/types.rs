use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::enums::ConfidenceBand;
use crate::error::Diagnostic;

// ─── Field tree ─────────────────────────────────────────────────────────────

/// A node of a field tree: either a leaf string or a nested group.
///
/// Groups carry the date triples, the address, and the medical-institution
/// block. Serialized untagged, so a tree reads and writes as plain JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Group(FieldTree),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> FieldValue {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&FieldTree> {
        match self {
            FieldValue::Group(g) => Some(g),
            FieldValue::Text(_) => None,
        }
    }

    /// Number of leaves under this node. A group counts its leaves, never itself.
    pub fn leaf_count(&self) -> usize {
        match self {
            FieldValue::Text(_) => 1,
            FieldValue::Group(g) => g.total_leaves(),
        }
    }

    /// Number of non-empty leaves under this node.
    pub fn filled_count(&self) -> usize {
        match self {
            FieldValue::Text(s) => usize::from(!s.is_empty()),
            FieldValue::Group(g) => g.filled_leaves(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<FieldTree> for FieldValue {
    fn from(g: FieldTree) -> Self {
        FieldValue::Group(g)
    }
}

/// Mapping from field name to value or sub-group.
///
/// Keys come from the form schema; the validator never invents one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTree {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(key)
    }

    /// Text of a leaf, or `None` when absent or a group.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn get_group(&self, key: &str) -> Option<&FieldTree> {
        self.get(key).and_then(FieldValue::as_group)
    }

    /// True when `key` is a non-empty leaf.
    pub fn is_filled(&self, key: &str) -> bool {
        self.get_text(key).is_some_and(|s| !s.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn total_leaves(&self) -> usize {
        self.fields.values().map(FieldValue::leaf_count).sum()
    }

    pub fn filled_leaves(&self) -> usize {
        self.fields.values().map(FieldValue::filled_count).sum()
    }

    /// Every leaf as `(dotted path, value)`, depth-first in key order.
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_leaves(self, "", &mut out);
        out
    }

    /// Look up a leaf by dotted path, e.g. `address.city`.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                return current.get_text(segment);
            }
            current = current.get_group(segment)?;
        }
        None
    }
}

fn collect_leaves<'a>(tree: &'a FieldTree, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    for (key, value) in tree.iter() {
        let path = join_path(prefix, key);
        match value {
            FieldValue::Text(s) => out.push((path, s.as_str())),
            FieldValue::Group(g) => collect_leaves(g, &path, out),
        }
    }
}

/// Join a parent path and a key with a dot, or return the key at the root.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FieldTree {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldTree {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ─── Diagnostics ────────────────────────────────────────────────────────────

/// Field path → diagnostic, at most one per path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: BTreeMap<String, Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, replacing any earlier one on the same path.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            path = %diagnostic.path,
            kind = ?diagnostic.kind,
            message = %diagnostic.message,
            "field diagnostic"
        );
        self.entries.insert(diagnostic.path.clone(), diagnostic);
    }

    pub fn get(&self, path: &str) -> Option<&Diagnostic> {
        self.entries.get(path)
    }

    /// Message recorded for `path`, if any.
    pub fn message(&self, path: &str) -> Option<&str> {
        self.get(path).map(|d| d.message.as_str())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.values()
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Reserved key carrying the confidence in the flat message map.
pub const OVERALL_CONFIDENCE_KEY: &str = "_overall_confidence";
/// Reserved key carrying `filled/total` in the flat message map.
pub const FILLED_FIELDS_KEY: &str = "_filled_fields";

/// Fill statistics and the derived confidence score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub filled: usize,
    pub total: usize,
    pub confidence: f64,
}

impl Summary {
    /// Band of the score as displayed, i.e. after rounding to two decimals.
    pub fn band(&self) -> ConfidenceBand {
        let shown = self.confidence_text().parse().unwrap_or(self.confidence);
        ConfidenceBand::from_score(shown)
    }

    /// Confidence with two decimals, e.g. `"0.85"`.
    pub fn confidence_text(&self) -> String {
        format!("{:.2}", self.confidence)
    }

    /// `"filled/total"`.
    pub fn filled_text(&self) -> String {
        format!("{}/{}", self.filled, self.total)
    }
}

/// Output of one validation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Copy of the input with corrected values.
    pub normalized: FieldTree,
    pub diagnostics: Diagnostics,
    pub summary: Summary,
}

impl ValidationReport {
    /// Flat path → message map with the two reserved summary keys added,
    /// the shape the presentation layer consumes.
    pub fn message_map(&self) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = self
            .diagnostics
            .iter()
            .map(|d| (d.path.clone(), d.message.clone()))
            .collect();
        map.insert(
            OVERALL_CONFIDENCE_KEY.to_string(),
            self.summary.confidence_text(),
        );
        map.insert(FILLED_FIELDS_KEY.to_string(), self.summary.filled_text());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldTree {
        let date: FieldTree = [("day", "1"), ("month", ""), ("year", "2020")]
            .into_iter()
            .collect();
        let mut tree = FieldTree::new();
        tree.insert("firstName", "Dana");
        tree.insert("lastName", "");
        tree.insert("dateOfInjury", date);
        tree
    }

    #[test]
    fn groups_contribute_their_leaves() {
        let tree = sample();
        assert_eq!(tree.total_leaves(), 5);
        assert_eq!(tree.filled_leaves(), 3);
    }

    #[test]
    fn empty_group_contributes_nothing() {
        let mut tree = FieldTree::new();
        tree.insert("address", FieldTree::new());
        assert_eq!(tree.total_leaves(), 0);
    }

    #[test]
    fn leaves_use_dotted_paths() {
        let tree = sample();
        let paths: Vec<String> = tree.leaves().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "dateOfInjury.day",
                "dateOfInjury.month",
                "dateOfInjury.year",
                "firstName",
                "lastName",
            ]
        );
    }

    #[test]
    fn text_at_walks_groups() {
        let tree = sample();
        assert_eq!(tree.text_at("dateOfInjury.year"), Some("2020"));
        assert_eq!(tree.text_at("firstName"), Some("Dana"));
        assert_eq!(tree.text_at("dateOfInjury"), None);
        assert_eq!(tree.text_at("missing.path"), None);
    }

    #[test]
    fn untagged_json_shape() {
        let tree = sample();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["dateOfInjury"]["year"], "2020");
        let back: FieldTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn band_follows_the_displayed_score() {
        let summary = Summary {
            filled: 23,
            total: 33,
            confidence: 23.0 / 33.0,
        };
        assert_eq!(summary.confidence_text(), "0.70");
        assert_eq!(summary.band(), ConfidenceBand::High);

        let low = Summary {
            filled: 0,
            total: 1,
            confidence: 0.394,
        };
        assert_eq!(low.band(), ConfidenceBand::Low);
    }
}
