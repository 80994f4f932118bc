//! # Commodity Forecast Workspace
//!
//! Umbrella crate for the commodity price forecasting workspace.
//!
//! - [`commodity_forecast`]: the forecast engine, record loaders and chart payload
//! - [`forecast_math`]: regression trees, random forests and linear trends
//!
//! ## Example
//!
//! ```
//! use commodity_forecast_workspace::commodity_forecast::{forecast, Observation, TrendDirection};
//!
//! let history: Vec<Observation> = (1..=10)
//!     .map(|day| Observation::parse(&format!("2024-01-{:02}", day), 100.0 + day as f64))
//!     .collect::<Result<_, _>>()?;
//!
//! let result = forecast(&history, 7)?;
//! assert_eq!(result.predicted_prices.len(), 7);
//! assert_eq!(result.trend_direction, TrendDirection::Up);
//! # Ok::<(), commodity_forecast_workspace::commodity_forecast::ForecastError>(())
//! ```

pub use commodity_forecast;
pub use forecast_math;
