//! Clean, time-ordered observation series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AirDataError, RawReading, Result};

/// One cleaned observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirSample {
    /// Acquisition date
    pub date: NaiveDate,
    /// Measured value, always present
    pub value: f64,
}

/// Time-ordered sequence of observations with no missing values
///
/// Samples are sorted ascending by date. Duplicate dates are assumed to
/// be avoided by the source; if they do occur they are kept in arrival
/// order rather than collapsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AirSeries {
    samples: Vec<AirSample>,
}

impl AirSeries {
    /// Build a series from samples in any order
    pub fn from_samples(mut samples: Vec<AirSample>) -> Self {
        samples.sort_by_key(|s| s.date);
        Self { samples }
    }

    /// Build a series from raw readings, dropping occluded ones
    pub fn from_readings(readings: Vec<RawReading>) -> Self {
        let samples = readings
            .into_iter()
            .filter_map(|r| r.value.map(|value| AirSample { date: r.date, value }))
            .collect();
        Self::from_samples(samples)
    }

    /// Series with no observations
    pub fn empty() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no observations
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in ascending date order
    pub fn samples(&self) -> &[AirSample] {
        &self.samples
    }

    /// Iterator over the samples
    pub fn iter(&self) -> impl Iterator<Item = &AirSample> {
        self.samples.iter()
    }

    /// Observation values in date order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Observation dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.samples.iter().map(|s| s.date).collect()
    }

    /// Date of the last observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.date)
    }

    /// Keep at most the `cap` earliest samples
    pub fn truncate(&mut self, cap: usize) {
        self.samples.truncate(cap);
    }

    /// Mean of the observation values
    pub fn mean(&self) -> Result<f64> {
        if self.samples.is_empty() {
            return Err(AirDataError::InvalidData(
                "empty series has no mean".to_string(),
            ));
        }
        let sum: f64 = self.samples.iter().map(|s| s.value).sum();
        Ok(sum / self.samples.len() as f64)
    }

    /// Population standard deviation of the observation values
    pub fn std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        let variance = self
            .samples
            .iter()
            .map(|s| (s.value - mean).powi(2))
            .sum::<f64>()
            / self.samples.len() as f64;
        Ok(variance.sqrt())
    }
}
