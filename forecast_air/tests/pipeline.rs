use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use air_data::synthetic::SyntheticSource;
use air_data::{
    AirDataError, AirSeries, DataSource, DatasetSpec, DateRange, GeoPoint, Query, RawReading,
    Variable,
};
use chrono::NaiveDate;
use forecast_air::models::seasonal_trend::SeasonalTrendModel;
use forecast_air::models::{FittedTrendModel, ForecastPoint, TrendModel};
use forecast_air::pipeline::{AnalysisPipeline, MIN_USABLE_SAMPLES};
use forecast_air::{ForecastError, Trend};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn query() -> Query {
    Query::new(
        GeoPoint::new(-23.5505, -46.6333).unwrap(),
        Variable::No2,
        DateRange::default_window(),
    )
}

/// Source replaying `n` clean daily readings starting at 100
#[derive(Debug, Clone)]
struct FixedSource {
    n: usize,
}

impl DataSource for FixedSource {
    fn fetch(
        &self,
        _point: GeoPoint,
        _spec: &DatasetSpec,
        _range: DateRange,
    ) -> air_data::Result<Vec<RawReading>> {
        let start = day(2022, 1, 1);
        Ok((0..self.n)
            .map(|i| RawReading {
                date: start + chrono::Duration::days(i as i64),
                value: Some(100.0 + i as f64),
            })
            .collect())
    }
}

/// Source that counts how many times it is queried
#[derive(Debug, Clone)]
struct CountingSource {
    inner: FixedSource,
    fetches: Arc<AtomicUsize>,
}

impl DataSource for CountingSource {
    fn fetch(
        &self,
        point: GeoPoint,
        spec: &DatasetSpec,
        range: DateRange,
    ) -> air_data::Result<Vec<RawReading>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(point, spec, range)
    }
}

/// Source that always fails
#[derive(Debug, Clone)]
struct BrokenSource;

impl DataSource for BrokenSource {
    fn fetch(
        &self,
        _point: GeoPoint,
        _spec: &DatasetSpec,
        _range: DateRange,
    ) -> air_data::Result<Vec<RawReading>> {
        Err(AirDataError::Source("backend unreachable".to_string()))
    }
}

/// Model that records whether it was ever fitted
#[derive(Debug, Clone)]
struct SpyModel {
    inner: SeasonalTrendModel,
    fitted: Arc<AtomicBool>,
}

impl SpyModel {
    fn new() -> (Self, Arc<AtomicBool>) {
        let fitted = Arc::new(AtomicBool::new(false));
        (
            Self {
                inner: SeasonalTrendModel::new(),
                fitted: Arc::clone(&fitted),
            },
            fitted,
        )
    }
}

impl TrendModel for SpyModel {
    type Fitted = <SeasonalTrendModel as TrendModel>::Fitted;

    fn fit(&self, series: &AirSeries) -> forecast_air::error::Result<Self::Fitted> {
        self.fitted.store(true, Ordering::SeqCst);
        self.inner.fit(series)
    }

    fn name(&self) -> &str {
        "spy"
    }
}

/// Model whose every prediction is exactly zero
#[derive(Debug, Clone)]
struct ZeroModel;

#[derive(Debug)]
struct ZeroFitted;

impl TrendModel for ZeroModel {
    type Fitted = ZeroFitted;

    fn fit(&self, _series: &AirSeries) -> forecast_air::error::Result<ZeroFitted> {
        Ok(ZeroFitted)
    }

    fn name(&self) -> &str {
        "zero"
    }
}

impl FittedTrendModel for ZeroFitted {
    fn predict(&self, dates: &[NaiveDate]) -> forecast_air::error::Result<Vec<ForecastPoint>> {
        Ok(dates
            .iter()
            .map(|&date| ForecastPoint {
                date,
                predicted: 0.0,
                lower: 0.0,
                upper: 0.0,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "zero"
    }
}

#[test]
fn four_samples_report_insufficient_data_without_fitting() {
    let (model, fitted) = SpyModel::new();
    let pipeline = AnalysisPipeline::new(FixedSource { n: 4 }, model);

    let err = pipeline.run(&query()).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientData {
            found: 4,
            required: MIN_USABLE_SAMPLES,
        }
    ));
    assert!(!fitted.load(Ordering::SeqCst));
}

#[test]
fn growing_history_classifies_as_increasing() {
    // 800 daily readings growing linearly; the trim sheds both tails
    let pipeline = AnalysisPipeline::new(FixedSource { n: 800 }, SeasonalTrendModel::new());
    let report = pipeline.run(&query()).unwrap();

    assert_eq!(report.series.len(), 784);
    assert_eq!(
        report.forecast.len(),
        report.series.len() + pipeline.horizon_days()
    );
    assert!(report.metrics.future > report.metrics.current);
    assert_eq!(report.metrics.trend, Trend::Increasing);
}

#[test]
fn zero_baseline_aborts_the_run_and_leaves_no_csv() {
    let pipeline = AnalysisPipeline::new(FixedSource { n: 20 }, ZeroModel);
    let dir = tempdir().unwrap();
    let path = dir.path().join("forecast.csv");

    let err = pipeline.run_to_csv(&query(), &path).unwrap_err();
    assert!(matches!(err, ForecastError::ZeroBaseline));
    assert!(!path.exists());
}

#[test]
fn successful_run_writes_the_csv() {
    let pipeline = AnalysisPipeline::new(FixedSource { n: 60 }, SeasonalTrendModel::new());
    let dir = tempdir().unwrap();
    let path = dir.path().join("forecast.csv");

    let report = pipeline.run_to_csv(&query(), &path).unwrap();
    assert!(path.exists());

    let records = forecast_air::export::read_forecast_csv_path(&path).unwrap();
    assert_eq!(records.len(), report.forecast.len());
}

#[test]
fn repeated_queries_share_one_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: FixedSource { n: 60 },
        fetches: Arc::clone(&fetches),
    };
    let pipeline = AnalysisPipeline::new(source, SeasonalTrendModel::new());

    let first = pipeline.run(&query()).unwrap();
    let second = pipeline.run(&query()).unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(first.forecast, second.forecast);
}

#[test]
fn source_failure_surfaces_as_a_data_error() {
    let pipeline = AnalysisPipeline::new(BrokenSource, SeasonalTrendModel::new());
    let err = pipeline.run(&query()).unwrap_err();
    assert!(matches!(err, ForecastError::Data(AirDataError::Source(_))));
}

#[test]
fn custom_horizon_shapes_the_forecast() {
    let pipeline = AnalysisPipeline::new(FixedSource { n: 100 }, SeasonalTrendModel::new())
        .with_horizon(365 * 3)
        .unwrap();
    let report = pipeline.run(&query()).unwrap();

    assert_eq!(pipeline.horizon_days(), 1095);
    assert_eq!(report.forecast.len(), report.series.len() + 1095);
}

#[test]
fn synthetic_source_runs_end_to_end() {
    let source = SyntheticSource::new(7).with_trend(3e-8);
    let pipeline = AnalysisPipeline::new(source, SeasonalTrendModel::new());
    let report = pipeline.run(&query()).unwrap();

    assert!(report.series.len() >= MIN_USABLE_SAMPLES);
    assert!(report
        .forecast
        .points()
        .iter()
        .all(|p| p.lower <= p.predicted && p.predicted <= p.upper));
}
