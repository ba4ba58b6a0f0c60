use air_data::synthetic::SyntheticSource;
use air_data::{
    AirDataError, DataSource, DatasetSpec, DateRange, GeoPoint, Query, RawReading,
    SeriesExtractor, Variable,
};
use approx::assert_relative_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn query(variable: Variable) -> Query {
    Query::new(
        GeoPoint::new(-23.5505, -46.6333).unwrap(),
        variable,
        DateRange::default_window(),
    )
}

/// Source that replays a fixed list of readings
struct FixedSource(Vec<RawReading>);

impl DataSource for FixedSource {
    fn fetch(
        &self,
        _point: GeoPoint,
        _spec: &DatasetSpec,
        _range: DateRange,
    ) -> air_data::Result<Vec<RawReading>> {
        Ok(self.0.clone())
    }
}

/// Source that always fails
struct BrokenSource;

impl DataSource for BrokenSource {
    fn fetch(
        &self,
        _point: GeoPoint,
        _spec: &DatasetSpec,
        _range: DateRange,
    ) -> air_data::Result<Vec<RawReading>> {
        Err(AirDataError::Source(
            "satellite backend unreachable".to_string(),
        ))
    }
}

#[test]
fn extractor_drops_missing_and_sorts() {
    let source = FixedSource(vec![
        RawReading {
            date: day(2022, 3, 5),
            value: Some(2.0),
        },
        RawReading {
            date: day(2022, 3, 1),
            value: None,
        },
        RawReading {
            date: day(2022, 3, 3),
            value: Some(3.0),
        },
        RawReading {
            date: day(2022, 3, 2),
            value: None,
        },
        RawReading {
            date: day(2022, 3, 4),
            value: Some(1.0),
        },
    ]);
    let extractor = SeriesExtractor::new(source);
    let series = extractor.extract(&query(Variable::No2)).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(
        series.dates(),
        vec![day(2022, 3, 3), day(2022, 3, 4), day(2022, 3, 5)]
    );
    assert_eq!(series.values(), vec![3.0, 1.0, 2.0]);
    assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn extractor_applies_the_value_scale() {
    let source = FixedSource(vec![RawReading {
        date: day(2022, 6, 1),
        value: Some(8000.0),
    }]);
    let extractor = SeriesExtractor::new(source);
    let series = extractor.extract(&query(Variable::Ndvi)).unwrap();

    assert_eq!(series.len(), 1);
    assert_relative_eq!(series.values()[0], 0.8, max_relative = 1e-12);
}

#[test]
fn extractor_caps_at_the_variable_limit() {
    let base = day(2018, 1, 1);
    let readings: Vec<RawReading> = (0..1200)
        .map(|i| RawReading {
            date: base + chrono::Duration::days(i),
            value: Some(i as f64),
        })
        .collect();
    let extractor = SeriesExtractor::new(FixedSource(readings));
    let series = extractor.extract(&query(Variable::No2)).unwrap();

    // Earliest readings win, matching the upstream collection order
    assert_eq!(series.len(), 1000);
    assert_eq!(series.values()[999], 999.0);
}

#[test]
fn extractor_with_no_usable_readings_is_ok() {
    let source = FixedSource(vec![
        RawReading {
            date: day(2022, 1, 1),
            value: None,
        },
        RawReading {
            date: day(2022, 1, 2),
            value: None,
        },
    ]);
    let extractor = SeriesExtractor::new(source);
    let series = extractor.extract(&query(Variable::Co)).unwrap();
    assert!(series.is_empty());
}

#[test]
fn source_failure_propagates() {
    let extractor = SeriesExtractor::new(BrokenSource);
    let err = extractor.extract(&query(Variable::So2)).unwrap_err();
    assert!(matches!(err, AirDataError::Source(_)));
}

#[test]
fn synthetic_source_is_deterministic() {
    let q = query(Variable::No2);
    let a = SeriesExtractor::new(SyntheticSource::new(7))
        .extract(&q)
        .unwrap();
    let b = SeriesExtractor::new(SyntheticSource::new(7))
        .extract(&q)
        .unwrap();
    assert_eq!(a, b);

    // Cloud cover removes a noticeable share of the 1096-day window
    assert!(a.len() > 600);
    assert!(a.len() < 1000);
}

#[test]
fn geopoint_rejects_out_of_range_coordinates() {
    assert!(GeoPoint::new(91.0, 0.0).is_err());
    assert!(GeoPoint::new(0.0, -181.0).is_err());
    assert!(GeoPoint::new(-90.0, 180.0).is_ok());
}

#[test]
fn date_range_rejects_reversed_bounds() {
    assert!(DateRange::new(day(2023, 1, 1), day(2022, 1, 1)).is_err());
    assert!(DateRange::new(day(2022, 1, 1), day(2022, 1, 1)).is_err());

    let range = DateRange::new(day(2022, 1, 1), day(2023, 1, 1)).unwrap();
    assert!(range.contains(day(2022, 6, 1)));
    assert!(!range.contains(day(2023, 1, 1)));
}
