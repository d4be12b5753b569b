//! Typed query methods for retrieving layers and features from the registry.
//!
//! Feature rows come back as loosely typed attribute maps in delivery
//! order; numeric interpretation belongs to the consuming pipeline.

use crate::models::LayerInfo;
use crate::Database;
use ndvi_core::record::FeatureAttributes;
use rusqlite::params;

impl Database {
    /// Get all registered layers, ordered by name.
    pub fn query_layers(&self) -> anyhow::Result<Vec<LayerInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT l.name, l.source, COALESCE(l.region, ''),
                    (SELECT COUNT(DISTINCT feature_id)
                     FROM features f WHERE f.layer_name = l.name)
             FROM layers l
             ORDER BY l.name",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LayerInfo {
                    name: row.get(0)?,
                    source: row.get(1)?,
                    region: row.get(2)?,
                    feature_count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_layers returned {} layers", rows.len());
        Ok(rows)
    }

    /// True when a layer with this exact name is registered.
    pub fn layer_exists(&self, layer_name: &str) -> anyhow::Result<bool> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM layers WHERE name = ?1",
            params![layer_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Get the feature attribute rows of a named layer in delivery order.
    ///
    /// Looking up a name with no registered layer is an error rather than
    /// an out-of-range panic; layer names are unique by construction
    /// (PRIMARY KEY), so a successful lookup is never ambiguous.
    pub fn query_features(&self, layer_name: &str) -> anyhow::Result<Vec<FeatureAttributes>> {
        if !self.layer_exists(layer_name)? {
            anyhow::bail!("layer not found: {}", layer_name);
        }

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT feature_id, field, value FROM features
             WHERE layer_name = ?1
             ORDER BY feature_id",
        )?;
        let rows: Vec<(i64, String, String)> = stmt
            .query_map(params![layer_name], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut features: Vec<FeatureAttributes> = Vec::new();
        let mut current_id = None;
        for (id, field, value) in rows {
            if current_id != Some(id) {
                features.push(FeatureAttributes::new());
                current_id = Some(id);
            }
            if let Some(attrs) = features.last_mut() {
                attrs.insert(field, value);
            }
        }
        log::info!(
            "query: query_features returned {} features for layer {}",
            features.len(),
            layer_name
        );
        Ok(features)
    }
}
