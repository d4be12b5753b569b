//! Query result model structs for the layer registry.

use serde::Serialize;

/// Layer metadata for selection lists and chart labels.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LayerInfo {
    /// Registry name of the layer (e.g. "se_kanha_table").
    pub name: String,
    /// Where the layer came from (imagery product, survey, loader).
    pub source: String,
    /// Reserve or region the layer covers, empty when unknown.
    pub region: String,
    /// Number of feature rows registered under this layer.
    pub feature_count: i64,
}
