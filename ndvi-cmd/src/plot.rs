//! Fiscal-year plot command.

use log::info;
use ndvi_core::record::FieldNames;
use ndvi_core::series::build_fiscal_series;
use ndvi_db::Database;
use std::path::{Path, PathBuf};

/// Everything needed to produce one fiscal-year chart.
pub struct PlotRequest {
    pub layer_name: String,
    pub start_year: i32,
    pub fields: FieldNames,
    pub out: PathBuf,
}

/// What a plot run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// Chart written with this many points.
    Rendered { points: usize },
    /// Nothing survived filtering; no chart was produced.
    Empty,
}

/// Produce the fiscal-year chart for one layer.
///
/// Fetches the layer's feature rows from the registry, builds the sorted
/// series, and renders it to the requested path. When nothing survives
/// filtering, the single warning line goes to the console and the chart
/// backend is never called; that is a normal termination, not an error.
pub fn plot_fiscal_year(db: &Database, request: &PlotRequest) -> anyhow::Result<PlotOutcome> {
    let features = db.query_features(&request.layer_name)?;
    let series = build_fiscal_series(&features, request.start_year, &request.fields);

    if series.is_empty() {
        println!("⚠ No valid data points found");
        return Ok(PlotOutcome::Empty);
    }

    ndvi_chart::render_to_file(&request.out, &series)?;
    info!(
        "plot: {} points for layer {} written to {}",
        series.len(),
        request.layer_name,
        request.out.display()
    );
    Ok(PlotOutcome::Rendered {
        points: series.len(),
    })
}

/// CLI entry: load the CSV inputs into a fresh registry, then plot.
pub fn run_plot(
    layers_csv: Option<&Path>,
    features_csv: &Path,
    request: &PlotRequest,
) -> anyhow::Result<()> {
    let db = crate::load_registry(layers_csv, Some(features_csv))?;
    plot_fiscal_year(&db, request)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEATURES_CSV: &str = "\
layer,year,month,day,median_ndvi
se_kanha_table,2001,4,1,0.52
se_kanha_table,2001,7,12,0.74
se_kanha_table,2002,2,15,0.61
se_kanha_table,2001,2,1,0.60
se_kanha_table,2001,6,3,1.4
";

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_features(FEATURES_CSV).unwrap();
        db
    }

    #[test]
    fn plot_renders_surviving_points() {
        let db = sample_db();
        let out = std::env::temp_dir().join("ndvi_cmd_plot_renders.svg");
        let request = PlotRequest {
            layer_name: "se_kanha_table".to_string(),
            start_year: 2001,
            fields: FieldNames::default(),
            out: out.clone(),
        };

        let outcome = plot_fiscal_year(&db, &request).unwrap();
        // Apr + Jul + the Feb tail survive; Feb of the start year and the
        // saturated reading do not
        assert_eq!(outcome, PlotOutcome::Rendered { points: 3 });
        assert!(out.exists());
        std::fs::remove_file(out).unwrap();
    }

    #[test]
    fn plot_with_no_surviving_points_skips_rendering() {
        let db = sample_db();
        let out = std::env::temp_dir().join("ndvi_cmd_plot_empty.svg");
        let _ = std::fs::remove_file(&out);
        let request = PlotRequest {
            layer_name: "se_kanha_table".to_string(),
            // no rows fall in this window
            start_year: 1995,
            fields: FieldNames::default(),
            out: out.clone(),
        };

        let outcome = plot_fiscal_year(&db, &request).unwrap();
        assert_eq!(outcome, PlotOutcome::Empty);
        assert!(!out.exists(), "empty runs must not touch the chart backend");
    }

    #[test]
    fn plot_missing_layer_is_an_error() {
        let db = sample_db();
        let request = PlotRequest {
            layer_name: "no_such_table".to_string(),
            start_year: 2001,
            fields: FieldNames::default(),
            out: std::env::temp_dir().join("ndvi_cmd_plot_missing.svg"),
        };

        let err = plot_fiscal_year(&db, &request).unwrap_err();
        assert!(err.to_string().contains("layer not found"));
    }

    #[test]
    fn plot_honors_field_overrides() {
        let db = Database::new().unwrap();
        db.load_features(
            "layer,yr,mo,dy,ndvi_med\nse_kanha_table,2001,4,1,0.52\n",
        )
        .unwrap();
        let out = std::env::temp_dir().join("ndvi_cmd_plot_overrides.svg");
        let request = PlotRequest {
            layer_name: "se_kanha_table".to_string(),
            start_year: 2001,
            fields: FieldNames {
                ndvi: "ndvi_med".to_string(),
                year: "yr".to_string(),
                month: "mo".to_string(),
                day: "dy".to_string(),
            },
            out: out.clone(),
        };

        let outcome = plot_fiscal_year(&db, &request).unwrap();
        assert_eq!(outcome, PlotOutcome::Rendered { points: 1 });
        std::fs::remove_file(out).unwrap();
    }
}
