//! Layer listing command.

use std::path::Path;

/// List the layers the given inputs register, one per line or as JSON.
pub fn run_layers(
    layers_csv: Option<&Path>,
    features_csv: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let db = crate::load_registry(layers_csv, features_csv)?;
    let layers = db.query_layers()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&layers)?);
        return Ok(());
    }

    if layers.is_empty() {
        println!("no layers registered");
        return Ok(());
    }
    for layer in &layers {
        println!(
            "{}  features={}  source={}  region={}",
            layer.name, layer.feature_count, layer.source, layer.region
        );
    }
    Ok(())
}
