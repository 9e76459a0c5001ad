use climate_forecast::report::ChartSpec;
use climate_forecast::{ForecastPipeline, PipelineConfig};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: basic_forecast [CSV_PATH] [PERIODS]
    let mut args = env::args().skip(1);
    let csv_path = args.next().unwrap_or_else(|| "Boston_Climate.csv".to_string());
    let periods = args.next().unwrap_or_else(|| "10".to_string());

    println!("Loading data from: {}", csv_path);
    let pipeline = ForecastPipeline::new(PipelineConfig::default().with_data_path(&csv_path));

    let series = pipeline.load()?;
    println!(
        "Loaded {} months, last observation {:?}",
        series.len(),
        series.last_date()
    );

    let table = pipeline.run(&periods)?;
    println!("Forecast for the next {} months:", table.len());
    print!("{}", table);

    let chart = ChartSpec::from_table(&table);
    println!("{}", chart.to_json_pretty()?);

    Ok(())
}
