//! Trend plus seasonal decomposition with prediction intervals
//!
//! Linear trend fitted by least squares, optional weekly (per-weekday)
//! and yearly (per-month) seasonal components estimated from the trend
//! residuals, and a symmetric prediction interval from the residual
//! spread. Daily seasonality is not offered: inputs are already daily
//! aggregates, and sub-daily terms only fit noise.

use air_data::AirSeries;
use chrono::{Datelike, NaiveDate};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{ForecastError, Result};
use crate::models::{FittedTrendModel, ForecastPoint, TrendModel};

/// Confidence level of the prediction interval
pub const INTERVAL_CONFIDENCE: f64 = 0.95;

/// Additive trend and seasonality model
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    /// Name of the model
    name: String,
    /// Fit a per-weekday component
    weekly_seasonality: bool,
    /// Fit a per-month component
    yearly_seasonality: bool,
}

impl SeasonalTrendModel {
    /// Model with both seasonal components enabled
    pub fn new() -> Self {
        Self::with_seasonality(true, true)
    }

    /// Model with explicit seasonal toggles
    pub fn with_seasonality(weekly: bool, yearly: bool) -> Self {
        Self {
            name: format!("Seasonal Trend (weekly={}, yearly={})", weekly, yearly),
            weekly_seasonality: weekly,
            yearly_seasonality: yearly,
        }
    }
}

impl Default for SeasonalTrendModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Fitted trend and seasonality model
#[derive(Debug, Clone)]
pub struct FittedSeasonalTrend {
    /// Name of the model
    name: String,
    /// First training date, origin of the trend axis
    origin: NaiveDate,
    /// Trend intercept at the origin
    intercept: f64,
    /// Trend slope per day
    slope: f64,
    /// Mean residual per weekday, Monday first
    weekly: [f64; 7],
    /// Mean residual per month, January first
    yearly: [f64; 12],
    /// Half-width of the prediction interval
    interval: f64,
}

impl TrendModel for SeasonalTrendModel {
    type Fitted = FittedSeasonalTrend;

    fn fit(&self, series: &AirSeries) -> Result<FittedSeasonalTrend> {
        if series.len() < 2 {
            return Err(ForecastError::Model(format!(
                "need at least 2 observations to fit a trend, got {}",
                series.len()
            )));
        }
        let samples = series.samples();
        for pair in samples.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(ForecastError::Model(format!(
                    "timestamps must be non-decreasing, {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        let origin = samples[0].date;
        let xs: Vec<f64> = samples
            .iter()
            .map(|s| (s.date - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = samples.iter().map(|s| s.value).collect();

        let (intercept, slope) = least_squares(&xs, &ys)?;

        // Residuals around the trend line
        let mut residuals: Vec<f64> = xs
            .iter()
            .zip(ys.iter())
            .map(|(x, y)| y - (intercept + slope * x))
            .collect();

        let mut weekly = [0.0f64; 7];
        if self.weekly_seasonality {
            let mut sums = [0.0f64; 7];
            let mut counts = [0usize; 7];
            for (s, r) in samples.iter().zip(residuals.iter()) {
                let bucket = s.date.weekday().num_days_from_monday() as usize;
                sums[bucket] += r;
                counts[bucket] += 1;
            }
            for bucket in 0..7 {
                if counts[bucket] > 0 {
                    weekly[bucket] = sums[bucket] / counts[bucket] as f64;
                }
            }
            for (s, r) in samples.iter().zip(residuals.iter_mut()) {
                *r -= weekly[s.date.weekday().num_days_from_monday() as usize];
            }
        }

        let mut yearly = [0.0f64; 12];
        if self.yearly_seasonality {
            let mut sums = [0.0f64; 12];
            let mut counts = [0usize; 12];
            for (s, r) in samples.iter().zip(residuals.iter()) {
                let bucket = s.date.month0() as usize;
                sums[bucket] += r;
                counts[bucket] += 1;
            }
            for bucket in 0..12 {
                if counts[bucket] > 0 {
                    yearly[bucket] = sums[bucket] / counts[bucket] as f64;
                }
            }
            for (s, r) in samples.iter().zip(residuals.iter_mut()) {
                *r -= yearly[s.date.month0() as usize];
            }
        }

        let variance = residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;
        let z = interval_multiplier(INTERVAL_CONFIDENCE)?;

        Ok(FittedSeasonalTrend {
            name: self.name.clone(),
            origin,
            intercept,
            slope,
            weekly,
            yearly,
            interval: z * variance.sqrt(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedTrendModel for FittedSeasonalTrend {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastPoint>> {
        let mut points = Vec::with_capacity(dates.len());
        for &date in dates {
            let x = (date - self.origin).num_days() as f64;
            let predicted = self.intercept
                + self.slope * x
                + self.weekly[date.weekday().num_days_from_monday() as usize]
                + self.yearly[date.month0() as usize];
            points.push(ForecastPoint {
                date,
                predicted,
                lower: predicted - self.interval,
                upper: predicted + self.interval,
            });
        }
        Ok(points)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordinary least squares fit of `y = intercept + slope * x`
fn least_squares(xs: &[f64], ys: &[f64]) -> Result<(f64, f64)> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx == 0.0 {
        return Err(ForecastError::Model(
            "all observations share one timestamp, trend is undefined".to_string(),
        ));
    }
    let slope = sxy / sxx;
    Ok((mean_y - slope * mean_x, slope))
}

/// Two-sided interval multiplier for the given confidence level
fn interval_multiplier(confidence: f64) -> Result<f64> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "confidence must be between 0 and 1, got {}",
            confidence
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::Model(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}
