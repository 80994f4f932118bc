use chrono::{Days, NaiveDate};
use commodity_forecast::models::{LinearTrendRegressor, RandomForestRegressor};
use commodity_forecast::{ForecastEngine, Observation, PriceRegressor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Commodity Forecast: Model Comparison");
    println!("====================================\n");

    // Weekly-ish maize prices with a harvest dip in the middle
    let history = create_sample_history()?;
    println!("Sample history: {} observations\n", history.len());

    compare(&ForecastEngine::new(), &history)?;
    compare(
        &ForecastEngine::with_regressor(RandomForestRegressor::default()),
        &history,
    )?;
    compare(
        &ForecastEngine::with_regressor(LinearTrendRegressor::new()),
        &history,
    )?;

    // The payload the web layer hands to the chart
    let forecast = ForecastEngine::new().forecast(&history, 3)?;
    let payload = commodity_forecast::ForecastResponse::from(forecast);
    println!("Chart payload:\n{}", payload.to_json_pretty()?);

    Ok(())
}

fn compare<R: PriceRegressor>(
    engine: &ForecastEngine<R>,
    history: &[Observation],
) -> Result<(), Box<dyn std::error::Error>> {
    let forecast = engine.forecast_default(history)?;
    let fit = engine.evaluate(history)?;

    println!("{}", engine.regressor().name());
    println!("  in-sample MAE {:.2}, MAPE {:.2}%", fit.mae, fit.mape);
    for (date, price) in forecast.future_dates.iter().zip(&forecast.predicted_prices) {
        println!("  {}: {:.2}", date, price);
    }
    println!("  trend: {}\n", forecast.trend_direction);

    Ok(())
}

fn create_sample_history() -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
    let origin = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid origin date")?;
    let offsets = [0u64, 6, 13, 15, 22, 30, 37, 41, 50, 57, 64, 70];
    let prices = [
        3100.0, 3150.0, 3220.0, 3260.0, 3180.0, 2950.0, 2870.0, 2900.0, 3010.0, 3120.0, 3190.0,
        3280.0,
    ];

    let mut history = Vec::with_capacity(offsets.len());
    for (offset, price) in offsets.iter().zip(prices) {
        history.push(Observation::new(origin + Days::new(*offset), price)?);
    }

    Ok(history)
}
