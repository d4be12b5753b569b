//! Fiscal-year series assembly.
//!
//! Turns raw feature rows into the ordered point series a chart consumes:
//! parse, validate, keep the rows inside the requested fiscal window,
//! place each survivor on the fiscal month axis, sort.

use crate::fiscal;
use crate::record::{FeatureAttributes, FieldNames, NdviRecord};
use serde::Serialize;

/// Fraction of an axis unit used to spread same-month points by day.
pub const DAY_SPREAD: f64 = 0.3;

/// A chart point: fiscal-axis position and NDVI value.
///
/// `x` is the fiscal rank of the month plus a fractional day offset. The
/// offset separates observations within a month visually; it carries no
/// calendar meaning beyond ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub ndvi: f64,
}

/// The ordered point series for one layer and one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalSeries {
    /// Fiscal year the window starts in (April of this year).
    pub start_year: i32,
    /// Points sorted ascending by `x`.
    pub points: Vec<PlotPoint>,
}

impl FiscalSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Axis position for a day within a fiscal-ranked month.
pub fn plot_x(rank: u32, day: u32) -> f64 {
    rank as f64 + (day as f64 / 31.0) * DAY_SPREAD
}

/// Build the sorted fiscal-year series from feature rows.
///
/// Rows are processed in delivery order. A row is dropped when any of its
/// four fields fails to parse, when NDVI falls outside (0, 1], when it is
/// dated outside the fiscal window of `start_year`, or when its month is
/// not a calendar month. Drops are tallied, not reported per row.
pub fn build_fiscal_series(
    features: &[FeatureAttributes],
    start_year: i32,
    fields: &FieldNames,
) -> FiscalSeries {
    let mut points = Vec::new();
    let mut malformed = 0u32;
    let mut filtered = 0u32;

    for attrs in features {
        let record = match NdviRecord::from_attributes(attrs, fields) {
            Some(record) => record,
            None => {
                malformed += 1;
                continue;
            }
        };
        if !record.has_valid_ndvi() {
            filtered += 1;
            continue;
        }
        if !fiscal::in_fiscal_year(record.year, record.month, start_year) {
            filtered += 1;
            continue;
        }
        let rank = match fiscal::fiscal_rank(record.month) {
            Some(rank) => rank,
            None => {
                // unreachable for months that passed the year test unless
                // the upstream table is corrupt
                filtered += 1;
                continue;
            }
        };
        points.push(PlotPoint {
            x: plot_x(rank, record.day),
            ndvi: record.ndvi,
        });
    }

    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    log::debug!(
        "series: kept {} points for fiscal year {}, dropped {} malformed and {} filtered",
        points.len(),
        start_year,
        malformed,
        filtered
    );
    FiscalSeries {
        start_year,
        points,
    }
}
