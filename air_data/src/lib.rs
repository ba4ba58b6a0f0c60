//! # Air Data
//!
//! `air_data` is a Rust library for working with satellite-derived air
//! quality observations at a single geographic point. It covers the data
//! side of the CarbonCast pipeline: querying a pluggable observation
//! source, dropping occluded readings, ordering the result into a clean
//! daily series, trimming sensor artifacts, and caching fetched series.
//!
//! The observation source itself is a trait. A remote imagery backend, a
//! file replay, or the bundled [`synthetic::SyntheticSource`] are all
//! interchangeable behind [`DataSource`].
//!
//! ## Usage Example
//!
//! ```
//! use air_data::synthetic::SyntheticSource;
//! use air_data::{DateRange, GeoPoint, Query, SeriesExtractor, Variable};
//!
//! let source = SyntheticSource::new(42);
//! let extractor = SeriesExtractor::new(source);
//!
//! let query = Query::new(
//!     GeoPoint::new(-23.5505, -46.6333).unwrap(),
//!     Variable::No2,
//!     DateRange::default_window(),
//! );
//! let series = extractor.extract(&query).unwrap();
//! assert!(series.iter().all(|s| s.value.is_finite()));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cache;
pub mod extract;
pub mod outlier;
pub mod series;
pub mod synthetic;
pub mod variables;

// Re-export commonly used types
pub use crate::cache::SeriesCache;
pub use crate::extract::SeriesExtractor;
pub use crate::outlier::trim_outliers;
pub use crate::series::{AirSample, AirSeries};
pub use crate::variables::{DatasetSpec, TileSpec, Variable};

/// Errors that can occur while acquiring or preparing observation data
#[derive(Error, Debug)]
pub enum AirDataError {
    /// The observation source failed or was unreachable
    #[error("source error: {0}")]
    Source(String),

    /// A coordinate was outside the valid range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A date range was empty or reversed
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// A series did not support the requested operation
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AirDataError>;

/// A geographic point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, within [-90, 90]
    pub lat: f64,
    /// Longitude in degrees, within [-180, 180]
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, validating the coordinate ranges
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AirDataError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AirDataError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }
}

/// Half-open observation window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day inside the window
    pub start: NaiveDate,
    /// First day past the window
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, validating `start < end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(AirDataError::InvalidRange(format!(
                "start {} is not before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// The 2022-01-01 to 2025-01-01 window every dashboard query uses
    pub fn default_window() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    /// Whether the given day falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// One raw reading as delivered by a data source
///
/// `value` is `None` when the pixel was occluded (cloud cover) or outside
/// the sensor swath for that acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Acquisition date of the reading
    pub date: NaiveDate,
    /// Measured value, if the pixel was observable
    pub value: Option<f64>,
}

/// An extraction request: one point, one variable, one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Geographic point to sample
    pub point: GeoPoint,
    /// Variable to extract
    pub variable: Variable,
    /// Observation window
    pub range: DateRange,
}

impl Query {
    /// Create a query
    pub fn new(point: GeoPoint, variable: Variable, range: DateRange) -> Self {
        Self {
            point,
            variable,
            range,
        }
    }
}

/// Source of raw readings for a point and dataset
///
/// Implementations wrap a concrete imagery or measurement backend. The
/// trait is the seam the rest of the pipeline is written against; calls
/// are blocking and failures surface once, with no retry.
pub trait DataSource {
    /// Fetch all readings for `point` over `range` from the dataset
    /// described by `spec`
    ///
    /// Order is not guaranteed; occluded readings carry `None`.
    fn fetch(
        &self,
        point: GeoPoint,
        spec: &DatasetSpec,
        range: DateRange,
    ) -> Result<Vec<RawReading>>;
}
