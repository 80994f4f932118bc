//! # commodity-forecast
//!
//! Command-line front end for the forecast engine. Reads a `date,price`
//! history (CSV, or JSON records), prints the chart payload as JSON.

use clap::Parser;
use commodity_forecast::{
    ForecastConfig, ForecastEngine, ForecastResponse, HistoricalSeries, ModelKind, SeriesLoader,
};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "commodity-forecast")]
#[command(about = "Short-horizon commodity price forecasting", long_about = None)]
struct Cli {
    /// Input file with date and price columns (CSV or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Number of days to forecast
    #[arg(short = 'n', long)]
    horizon: Option<usize>,

    /// Model type (trend_forest, forest, linear)
    #[arg(short, long)]
    model: Option<ModelKind>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the forest bootstrap
    #[arg(long)]
    seed: Option<u64>,

    /// Log in-sample fit metrics
    #[arg(long)]
    metrics: bool,

    /// Output file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commodity_forecast=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ForecastConfig::from_json_file(path)?,
        None => ForecastConfig::default(),
    };
    if let Some(horizon) = cli.horizon {
        config.horizon = horizon;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(seed) = cli.seed {
        config.forest.seed = seed;
    }

    let engine = ForecastEngine::from_config(&config)?;
    let records = SeriesLoader::from_path(&cli.input)?;
    info!(
        records = records.len(),
        input = %cli.input.display(),
        model = %config.model,
        "loaded price history"
    );

    let payload = engine.forecast_records(&records, Some(config.horizon))?;
    match &payload {
        ForecastResponse::Forecast(forecast) => info!(
            horizon = forecast.horizon(),
            trend = %forecast.trend_direction,
            "forecast generated"
        ),
        ForecastResponse::Error { error } => warn!("{}", error),
    }

    if cli.metrics && !payload.is_error() {
        let series = HistoricalSeries::from_records(&records)?;
        let fit = engine.evaluate(series.observations())?;
        info!(mae = fit.mae, rmse = fit.rmse, mape = fit.mape, "in-sample fit");
    }

    let json = payload.to_json_pretty()?;
    match cli.output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))?;
            info!(output = %path.display(), "payload written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
