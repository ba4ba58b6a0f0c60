//! Forecasting model seam and the augmented forecast series
//!
//! The forecaster is a black box behind two traits: anything that fits a
//! clean series and predicts a value with an interval for arbitrary dates
//! satisfies the contract. One concrete model ships in
//! [`seasonal_trend`].

use std::fmt::Debug;

use air_data::AirSeries;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ForecastError, Result};

pub mod seasonal_trend;

/// One forecast point with its prediction interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Date the prediction applies to
    pub date: NaiveDate,
    /// Point prediction
    pub predicted: f64,
    /// Lower interval bound
    pub lower: f64,
    /// Upper interval bound
    pub upper: f64,
}

/// Augmented forecast covering the historical range plus a fixed horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
    history_len: usize,
    horizon_days: usize,
}

impl ForecastSeries {
    /// Build a forecast series, validating shape and interval ordering
    pub fn new(
        points: Vec<ForecastPoint>,
        history_len: usize,
        horizon_days: usize,
    ) -> Result<Self> {
        if points.len() != history_len + horizon_days {
            return Err(ForecastError::Model(format!(
                "forecast length {} does not match history {} plus horizon {}",
                points.len(),
                history_len,
                horizon_days
            )));
        }
        for p in &points {
            if !(p.lower <= p.predicted && p.predicted <= p.upper) {
                return Err(ForecastError::Model(format!(
                    "interval out of order at {}: {} <= {} <= {} does not hold",
                    p.date, p.lower, p.predicted, p.upper
                )));
            }
        }
        Ok(Self {
            points,
            history_len,
            horizon_days,
        })
    }

    /// All points, history first, then the horizon
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Total number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the forecast has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of historical points
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Number of future points
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Final predicted point, end of the horizon
    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }
}

/// Forecast model that can be fitted to a clean series
pub trait TrendModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedTrendModel;

    /// Fit the model to the series
    fn fit(&self, series: &AirSeries) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted model able to predict dates at or beyond the training range
pub trait FittedTrendModel: Debug {
    /// Predict a value and interval for each date
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>>;

    /// Name of the model
    fn name(&self) -> &str;
}
