//! CSV data loading functions for populating the in-memory registry.
//!
//! # CSV Formats
//!
//! - **Layers** (has headers): `NAME,SOURCE,REGION`
//! - **Features** (has headers): a `layer` column assigns each row to a
//!   layer; every other column becomes a named attribute with its header
//!   spelling preserved

use crate::Database;
use ndvi_core::record::parse_attribute_table;
use rusqlite::params;
use std::collections::HashMap;

/// Source tag recorded for layers that first appear in a features CSV.
const IMPLICIT_SOURCE: &str = "attribute-table";

impl Database {
    /// Load layer metadata from CSV string.
    ///
    /// Expected format (with headers): `NAME,SOURCE,REGION`
    ///
    /// # Example CSV
    /// ```text
    /// NAME,SOURCE,REGION
    /// se_kanha_table,landsat,Kanha
    /// ```
    pub fn load_layers(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let name = r.get(0).unwrap_or("").trim();
            let source = r.get(1).unwrap_or("").trim();
            let region = r.get(2).unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO layers (name, source, region)
                 VALUES (?1, ?2, ?3)",
                params![name, source, region],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} layers", count);
        Ok(())
    }

    /// Load feature attribute rows from CSV string.
    ///
    /// The `layer` column (case-insensitive) assigns each row to a layer;
    /// layers not yet registered are added with a placeholder source.
    /// Rows keep their delivery order per layer.
    ///
    /// # Example CSV
    /// ```text
    /// layer,year,month,day,median_ndvi
    /// se_kanha_table,2001,4,1,0.52
    /// se_kanha_table,2001,5,17,0.61
    /// ```
    pub fn load_features(&self, csv_data: &str) -> anyhow::Result<()> {
        let rows = parse_attribute_table(csv_data)?;
        let conn = self.conn.borrow();

        let mut next_id: HashMap<String, i64> = HashMap::new();
        let mut count = 0u32;
        for (layer, attrs) in rows {
            let id = match next_id.get(&layer) {
                Some(id) => *id,
                None => {
                    conn.execute(
                        "INSERT OR IGNORE INTO layers (name, source, region)
                         VALUES (?1, ?2, '')",
                        params![layer, IMPLICIT_SOURCE],
                    )?;
                    let max: i64 = conn.query_row(
                        "SELECT COALESCE(MAX(feature_id), -1) FROM features WHERE layer_name = ?1",
                        params![layer],
                        |row| row.get(0),
                    )?;
                    max + 1
                }
            };

            for (field, value) in attrs.iter() {
                conn.execute(
                    "INSERT OR REPLACE INTO features (layer_name, feature_id, field, value)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![layer, id, field, value],
                )?;
            }
            next_id.insert(layer, id + 1);
            count += 1;
        }
        log::info!("loader: loaded {} feature rows", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn load_layers_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
NAME,SOURCE,REGION
se_kanha_table,landsat,Kanha
nw_pench_table,sentinel,Pench
";
        db.load_layers(csv).unwrap();

        let layers = db.query_layers().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name, "nw_pench_table");
        assert_eq!(layers[0].source, "sentinel");
        assert_eq!(layers[1].region, "Kanha");
    }

    #[test]
    fn load_layers_replaces_on_conflict() {
        let db = Database::new().unwrap();
        db.load_layers("NAME,SOURCE,REGION\nse_kanha_table,landsat,Kanha\n")
            .unwrap();
        db.load_layers("NAME,SOURCE,REGION\nse_kanha_table,landsat-8,Kanha\n")
            .unwrap();

        let layers = db.query_layers().unwrap();
        assert_eq!(layers.len(), 1, "Should have 1 row after upsert");
        assert_eq!(layers[0].source, "landsat-8");
    }

    #[test]
    fn load_features_registers_unseen_layers() {
        let db = Database::new().unwrap();
        db.load_features(
            "layer,year,month,day,median_ndvi\nse_kanha_table,2001,4,1,0.52\n",
        )
        .unwrap();

        let layers = db.query_layers().unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].name, "se_kanha_table");
        assert_eq!(layers[0].source, "attribute-table");
        assert_eq!(layers[0].feature_count, 1);
    }

    #[test]
    fn load_features_keeps_delivery_order() {
        let db = Database::new().unwrap();
        let csv = "\
layer,year,month,day,median_ndvi
se_kanha_table,2001,4,1,0.52
se_kanha_table,2001,5,17,0.61
se_kanha_table,2001,6,2,0.70
";
        db.load_features(csv).unwrap();

        let features = db.query_features("se_kanha_table").unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0].field("month"), Some("4"));
        assert_eq!(features[1].field("month"), Some("5"));
        assert_eq!(features[2].field("month"), Some("6"));
    }

    #[test]
    fn load_features_appends_across_loads() {
        let db = Database::new().unwrap();
        db.load_features("layer,year\nse_kanha_table,2001\n").unwrap();
        db.load_features("layer,year\nse_kanha_table,2002\n").unwrap();

        let features = db.query_features("se_kanha_table").unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].field("year"), Some("2002"));
    }

    #[test]
    fn load_features_preserves_loose_values() {
        let db = Database::new().unwrap();
        // non-numeric values load fine, interpretation is the pipeline's job
        db.load_features(
            "layer,year,month,day,median_ndvi\nse_kanha_table,n/a,4,1,cloud\n",
        )
        .unwrap();

        let features = db.query_features("se_kanha_table").unwrap();
        assert_eq!(features[0].field("year"), Some("n/a"));
        assert_eq!(features[0].field("median_ndvi"), Some("cloud"));
    }
}
