//! Series extraction: raw readings to a clean daily series

use tracing::debug;

use crate::series::{AirSample, AirSeries};
use crate::{DataSource, Query, Result};

/// Extracts clean series from a data source
///
/// The extractor is a pure function of the query apart from the remote
/// call itself. It fetches every reading in the window, drops occluded
/// ones, applies the variable's value scale, orders by date, and caps the
/// result at the variable's sample limit, earliest readings first to
/// match the upstream collection order.
#[derive(Debug)]
pub struct SeriesExtractor<S> {
    source: S,
}

impl<S: DataSource> SeriesExtractor<S> {
    /// Extractor over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and clean the series for one query
    ///
    /// An empty result is `Ok`: it means no usable observations, not a
    /// failed extraction. Callers decide their own minimum count.
    pub fn extract(&self, query: &Query) -> Result<AirSeries> {
        let spec = query.variable.dataset();
        let readings = self.source.fetch(query.point, &spec, query.range)?;
        let total = readings.len();

        let samples: Vec<AirSample> = readings
            .into_iter()
            .filter_map(|r| {
                r.value.map(|v| AirSample {
                    date: r.date,
                    value: v * spec.value_scale,
                })
            })
            .collect();
        let usable = samples.len();

        let mut series = AirSeries::from_samples(samples);
        series.truncate(spec.max_samples);

        debug!(
            variable = query.variable.label(),
            total,
            usable,
            kept = series.len(),
            "extracted series"
        );
        Ok(series)
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }
}
