//! SQL schema definitions for the in-memory layer registry.

/// Returns the full SQL schema as a single batch string.
///
/// Two tables:
///
/// - `layers` - registry metadata, one row per named layer
/// - `features` - one row per (feature, field); values stay TEXT so that
///   attribute access remains loosely typed, numeric parsing happens in
///   the consuming pipeline
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS layers (
        name TEXT PRIMARY KEY,
        source TEXT NOT NULL,
        region TEXT
    );

    CREATE TABLE IF NOT EXISTS features (
        layer_name TEXT NOT NULL,
        feature_id INTEGER NOT NULL,
        field TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (layer_name, feature_id, field)
    );
    CREATE INDEX IF NOT EXISTS idx_features_layer ON features(layer_name);

    "#
}
