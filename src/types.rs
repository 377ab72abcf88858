//! Core data types for the sales analysis pipeline

use chrono::{DateTime, Local};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single spreadsheet cell value.
///
/// Marketplace exports are loosely typed, so a cell is whatever the source
/// sheet contained: text, a number, a boolean, or nothing. Serializes to the
/// natural JSON scalar (`null` for empty) so a row sample can be sent to the
/// analysis endpoint as plain JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Empty,
}

impl CellValue {
    /// Best-effort numeric reading. Text that parses as a number counts;
    /// everything else is zero.
    pub fn number_or_zero(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse().unwrap_or(0.0),
            CellValue::Bool(_) | CellValue::Empty => 0.0,
        }
    }

    /// Textual rendering for display and headers.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// One data row: an ordered mapping from column header to cell value.
///
/// Key order follows the source column order and is preserved through
/// serialization, so an exported sheet lays its columns out the way the
/// uploaded file did. Field names are not normalized; marketplace exports
/// disagree on casing (`Produk` vs `produk`), so lookups go through
/// [`RowRecord::get_any`] with the variants the caller tolerates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: CellValue) {
        self.fields.push((key.into(), value));
    }

    /// Exact-name lookup.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// First hit among several name variants, tried in order.
    pub fn get_any(&self, keys: &[&str]) -> Option<&CellValue> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Numeric field under any of the given names; absent fields are zero.
    pub fn number_or_zero(&self, keys: &[&str]) -> f64 {
        self.get_any(keys).map_or(0.0, CellValue::number_or_zero)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RowRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = RowRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column header to cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = RowRecord::new();
                while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
                    record.push(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// The result of one analysis run: what the user uploaded, what the analyst
/// model said about it, and when. This is the unit appended to history and
/// the unit the report exporter consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub platform: String,
    /// HTML-flavored narrative as returned by the analysis endpoint.
    pub narrative: String,
    pub created_at: DateTime<Local>,
    pub rows: Vec<RowRecord>,
}

impl AnalysisReport {
    pub fn new(platform: impl Into<String>, narrative: impl Into<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            platform: platform.into(),
            narrative: narrative.into(),
            created_at: Local::now(),
            rows,
        }
    }
}
