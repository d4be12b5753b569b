//! Command implementations for the NDVI CLI.
//!
//! Provides subcommands for rendering fiscal-year NDVI charts from
//! vector-layer attribute dumps and for inspecting the loaded registry.

use clap::Subcommand;
use ndvi_core::record::FieldNames;
use ndvi_db::Database;
use std::fs;
use std::path::{Path, PathBuf};

pub mod layers;
pub mod plot;

#[derive(Subcommand)]
pub enum Command {
    /// Render a fiscal-year NDVI chart for one layer
    Plot {
        /// Optional layer metadata CSV (NAME,SOURCE,REGION)
        #[arg(long)]
        layers_csv: Option<PathBuf>,

        /// Feature attribute table CSV with a 'layer' column
        #[arg(short = 'f', long)]
        features_csv: PathBuf,

        /// Name of the layer to plot
        #[arg(short = 'l', long)]
        layer: String,

        /// Fiscal year the window starts in (April of this year)
        #[arg(short = 'y', long)]
        start_year: i32,

        /// Field holding the NDVI value
        #[arg(long, default_value = "median_ndvi")]
        ndvi_field: String,

        /// Field holding the observation year
        #[arg(long, default_value = "year")]
        year_field: String,

        /// Field holding the observation month
        #[arg(long, default_value = "month")]
        month_field: String,

        /// Field holding the observation day
        #[arg(long, default_value = "day")]
        day_field: String,

        /// Output chart path (.svg or .png)
        #[arg(short = 'o', long, default_value = "ndvi.svg")]
        out: PathBuf,
    },

    /// List the layers a registry would hold for the given inputs
    Layers {
        /// Optional layer metadata CSV (NAME,SOURCE,REGION)
        #[arg(long)]
        layers_csv: Option<PathBuf>,

        /// Optional feature attribute table CSV with a 'layer' column
        #[arg(short = 'f', long)]
        features_csv: Option<PathBuf>,

        /// Emit JSON instead of a plain listing
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Plot {
            layers_csv,
            features_csv,
            layer,
            start_year,
            ndvi_field,
            year_field,
            month_field,
            day_field,
            out,
        } => {
            let request = plot::PlotRequest {
                layer_name: layer,
                start_year,
                fields: FieldNames {
                    ndvi: ndvi_field,
                    year: year_field,
                    month: month_field,
                    day: day_field,
                },
                out,
            };
            plot::run_plot(layers_csv.as_deref(), &features_csv, &request)
        }
        Command::Layers {
            layers_csv,
            features_csv,
            json,
        } => layers::run_layers(layers_csv.as_deref(), features_csv.as_deref(), json),
    }
}

/// Build a registry from the CSV inputs a command received.
pub(crate) fn load_registry(
    layers_csv: Option<&Path>,
    features_csv: Option<&Path>,
) -> anyhow::Result<Database> {
    let db = Database::new()?;
    if let Some(path) = layers_csv {
        let data = fs::read_to_string(path)?;
        db.load_layers(&data)?;
    }
    if let Some(path) = features_csv {
        let data = fs::read_to_string(path)?;
        db.load_features(&data)?;
    }
    Ok(db)
}
