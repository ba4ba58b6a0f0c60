use air_data::synthetic::SyntheticSource;
use air_data::{trim_outliers, DateRange, GeoPoint, Query, SeriesExtractor, Variable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Air Data: Series Extraction Example");
    println!("===================================\n");

    let source = SyntheticSource::new(42);
    let extractor = SeriesExtractor::new(source);
    let point = GeoPoint::new(-23.5505, -46.6333)?;

    for variable in Variable::ALL {
        let spec = variable.dataset();
        let query = Query::new(point, variable, DateRange::default_window());
        let series = extractor.extract(&query)?;
        let trimmed = trim_outliers(&series);

        println!(
            "{:<5} {:<40} {} usable, {} after trim",
            variable.label(),
            spec.collection,
            series.len(),
            trimmed.len()
        );
        if !trimmed.is_empty() {
            println!(
                "      mean {:.6} {} (std dev {:.6}), last observation {}",
                trimmed.mean()?,
                spec.unit,
                trimmed.std_dev()?,
                trimmed.last_date().unwrap()
            );
        }
    }

    Ok(())
}
