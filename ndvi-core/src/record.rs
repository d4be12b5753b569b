//! Feature records and attribute access.
//!
//! A vector-layer attribute table is delivered as rows of loosely typed
//! scalar values addressed by field name. Numeric interpretation happens
//! here, at the edge of the pipeline, so that malformed rows can be
//! dropped without failing the run.

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Header column that assigns a row to a layer in multi-layer tables.
pub const LAYER_COLUMN: &str = "layer";

/// Field names used to pull an NDVI observation out of a feature row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub ndvi: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        FieldNames {
            ndvi: "median_ndvi".to_string(),
            year: "year".to_string(),
            month: "month".to_string(),
            day: "day".to_string(),
        }
    }
}

/// Loosely typed attribute map for a single feature row.
///
/// Values stay as text until a consumer asks for a typed view via
/// [`parse_field`](Self::parse_field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttributes {
    fields: HashMap<String, String>,
}

impl FeatureAttributes {
    pub fn new() -> Self {
        FeatureAttributes::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw text value of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Parse a field as `T`. `None` when the field is missing or the
    /// value does not parse.
    pub fn parse_field<T: FromStr>(&self, name: &str) -> Option<T> {
        self.field(name).and_then(|s| s.trim().parse().ok())
    }

    /// Iterate (field, value) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FeatureAttributes {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut attrs = FeatureAttributes::new();
        for (field, value) in pairs {
            attrs.insert(field, value);
        }
        attrs
    }
}

/// One NDVI observation pulled out of a feature row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdviRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub ndvi: f64,
}

impl NdviRecord {
    /// Extract a record from a feature row using the given field names.
    ///
    /// Returns `None` when any of the four fields is missing or fails to
    /// parse; the caller drops the row.
    pub fn from_attributes(attrs: &FeatureAttributes, fields: &FieldNames) -> Option<NdviRecord> {
        let year: i32 = attrs.parse_field(&fields.year)?;
        let month: u32 = attrs.parse_field(&fields.month)?;
        let day: u32 = attrs.parse_field(&fields.day)?;
        let ndvi: f64 = attrs.parse_field(&fields.ndvi)?;
        Some(NdviRecord {
            year,
            month,
            day,
            ndvi,
        })
    }

    /// NDVI is physically meaningful in (0, 1]: non-positive readings are
    /// noise or water masking, values above 1 are sensor saturation.
    pub fn has_valid_ndvi(&self) -> bool {
        self.ndvi > 0.0 && self.ndvi <= 1.0
    }
}

/// Parse a headed attribute-table CSV into per-layer feature rows.
///
/// The column named [`LAYER_COLUMN`] (case-insensitive) assigns each row
/// to a layer; every other column becomes a named attribute with its
/// header spelling preserved. Rows are returned in delivery order.
pub fn parse_attribute_table(csv_data: &str) -> anyhow::Result<Vec<(String, FeatureAttributes)>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let layer_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(LAYER_COLUMN))
        .ok_or_else(|| anyhow::anyhow!("attribute table has no '{}' column", LAYER_COLUMN))?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let layer = match record.get(layer_col) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => continue,
        };
        let mut attrs = FeatureAttributes::new();
        for (i, header) in headers.iter().enumerate() {
            if i == layer_col {
                continue;
            }
            if let Some(value) = record.get(i) {
                attrs.insert(header.trim(), value.trim());
            }
        }
        rows.push((layer, attrs));
    }
    Ok(rows)
}
