use air_data::synthetic::SyntheticSource;
use air_data::{DateRange, GeoPoint, Query, Variable};
use forecast_air::models::seasonal_trend::SeasonalTrendModel;
use forecast_air::pipeline::AnalysisPipeline;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Forecast Air: Point Forecast Example");
    println!("====================================\n");

    // A synthetic source stands in for the imagery backend; a slight
    // upward drift makes the trend classification interesting.
    let source = SyntheticSource::new(42).with_trend(3e-8);
    let pipeline = AnalysisPipeline::new(source, SeasonalTrendModel::new());

    let point = GeoPoint::new(-23.5505, -46.6333)?;
    println!(
        "Analyzing point ({:.4}, {:.4}) over {} .. {}\n",
        point.lat,
        point.lon,
        DateRange::default_window().start,
        DateRange::default_window().end
    );

    for variable in [Variable::No2, Variable::Co] {
        let query = Query::new(point, variable, DateRange::default_window());
        println!(
            "--- {} ({}) ---",
            variable.label(),
            variable.dataset().unit
        );

        let report = pipeline.run(&query)?;
        println!(
            "History: {} usable samples, forecast: {} points ({} day horizon)",
            report.series.len(),
            report.forecast.len(),
            pipeline.horizon_days()
        );
        println!("{}", report.metrics);
    }

    // Export the NO2 forecast as the audit CSV
    let query = Query::new(point, Variable::No2, DateRange::default_window());
    let path = std::env::temp_dir().join("no2_forecast.csv");
    let report = pipeline.run_to_csv(&query, &path)?;
    println!(
        "Exported {} forecast rows to {}",
        report.forecast.len(),
        path.display()
    );

    Ok(())
}
