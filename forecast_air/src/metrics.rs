//! Headline metrics: current level, future level, delta, trend bucket

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::models::ForecastSeries;

/// Percentage delta beyond which the trend stops being `Stable`
pub const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Qualitative trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Delta below the negative threshold
    Decreasing,
    /// Delta within the threshold band
    Stable,
    /// Delta above the positive threshold
    Increasing,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
            Trend::Increasing => write!(f, "increasing"),
        }
    }
}

/// Headline numbers derived from an augmented forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMetrics {
    /// Estimated current level
    pub current: f64,
    /// Predicted level at the end of the horizon
    pub future: f64,
    /// Percentage change from current to future
    pub delta_pct: f64,
    /// Qualitative classification of the delta
    pub trend: Trend,
}

impl fmt::Display for HeadlineMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Headline Metrics:")?;
        writeln!(f, "  Current: {:.6}", self.current)?;
        writeln!(f, "  Future:  {:.6}", self.future)?;
        writeln!(f, "  Delta:   {:+.2}%", self.delta_pct)?;
        writeln!(f, "  Trend:   {}", self.trend)?;
        Ok(())
    }
}

/// Classify a percentage delta into a trend bucket
///
/// The thresholds are strict: a delta of exactly ±5% is still `Stable`.
pub fn classify_trend(delta_pct: f64) -> Trend {
    if delta_pct < -TREND_THRESHOLD_PCT {
        Trend::Decreasing
    } else if delta_pct > TREND_THRESHOLD_PCT {
        Trend::Increasing
    } else {
        Trend::Stable
    }
}

/// Derive headline metrics from an augmented forecast
///
/// The "current" level is read at the position `horizon_days` before the
/// end of the series. This is an index convention, not a calendar lookup:
/// it lands on the first predicted day after the observations rather than
/// on today's date, and it is kept for parity with the dashboards this
/// pipeline replaces. [`headline_metrics_at`] offers the date-based
/// alternative.
pub fn headline_metrics(forecast: &ForecastSeries) -> Result<HeadlineMetrics> {
    let len = forecast.len();
    let offset = forecast.horizon_days();
    if len == 0 {
        return Err(ForecastError::Model("empty forecast".to_string()));
    }
    if offset == 0 || offset > len {
        return Err(ForecastError::Model(format!(
            "cannot read the current level {} points from the end of a {}-point forecast",
            offset, len
        )));
    }

    let current = forecast.points()[len - offset].predicted;
    let future = forecast.points()[len - 1].predicted;
    finish(current, future)
}

/// Derive headline metrics reading the current level at a specific date
pub fn headline_metrics_at(forecast: &ForecastSeries, date: NaiveDate) -> Result<HeadlineMetrics> {
    let current = forecast
        .points()
        .iter()
        .find(|p| p.date == date)
        .map(|p| p.predicted)
        .ok_or_else(|| ForecastError::Model(format!("no forecast point at {}", date)))?;
    let future = forecast
        .last()
        .ok_or_else(|| ForecastError::Model("empty forecast".to_string()))?
        .predicted;
    finish(current, future)
}

fn finish(current: f64, future: f64) -> Result<HeadlineMetrics> {
    if current == 0.0 {
        return Err(ForecastError::ZeroBaseline);
    }
    let delta_pct = (future - current) / current * 100.0;
    Ok(HeadlineMetrics {
        current,
        future,
        delta_pct,
        trend: classify_trend(delta_pct),
    })
}
