//! CSV export of forecast results
//!
//! The audit artifact: one row per day across history and horizon, with
//! columns `timestamp,predicted,lower,upper`. The reader reproduces
//! exactly what the writer emits, so downloads can be re-ingested and
//! compared.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ForecastPoint, ForecastSeries};

/// One exported forecast row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Prediction date
    pub timestamp: NaiveDate,
    /// Point prediction
    pub predicted: f64,
    /// Lower interval bound
    pub lower: f64,
    /// Upper interval bound
    pub upper: f64,
}

impl From<&ForecastPoint> for ForecastRecord {
    fn from(p: &ForecastPoint) -> Self {
        Self {
            timestamp: p.date,
            predicted: p.predicted,
            lower: p.lower,
            upper: p.upper,
        }
    }
}

/// Write a forecast as CSV to any writer
pub fn write_forecast_csv<W: Write>(writer: W, forecast: &ForecastSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in forecast.points() {
        wtr.serialize(ForecastRecord::from(point))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a forecast as CSV to a file path
pub fn write_forecast_csv_path<P: AsRef<Path>>(path: P, forecast: &ForecastSeries) -> Result<()> {
    let file = File::create(path)?;
    write_forecast_csv(file, forecast)
}

/// Read forecast rows back from CSV
pub fn read_forecast_csv<R: Read>(reader: R) -> Result<Vec<ForecastRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Read forecast rows from a file path
pub fn read_forecast_csv_path<P: AsRef<Path>>(path: P) -> Result<Vec<ForecastRecord>> {
    let file = File::open(path)?;
    read_forecast_csv(file)
}
