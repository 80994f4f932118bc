//! # Commodity Forecast
//!
//! Short-horizon price forecasts for a single commodity from a sparse,
//! irregularly dated price history.
//!
//! ## Features
//!
//! - Validated `{date, price}` observations loaded from CSV or JSON records
//! - Pluggable regressors over a "days since first observation" feature
//!   (trend forest, random forest, linear trend)
//! - Deterministic forecasts: forests are bootstrapped from a fixed seed
//! - A chart-ready JSON payload with dated predictions and an up/down trend
//!
//! ## Quick Start
//!
//! ```rust
//! use commodity_forecast::{generate_price_forecast, PriceRecord};
//!
//! let records = vec![
//!     PriceRecord::new("2024-01-01", 100.0),
//!     PriceRecord::new("2024-01-02", 102.0),
//!     PriceRecord::new("2024-01-03", 101.0),
//!     PriceRecord::new("2024-01-04", 105.0),
//!     PriceRecord::new("2024-01-05", 107.0),
//! ];
//!
//! let payload = generate_price_forecast(&records, Some(3))?;
//! let forecast = payload.forecast().expect("five records are enough");
//! assert_eq!(forecast.date_labels(), ["2024-01-06", "2024-01-07", "2024-01-08"]);
//! # Ok::<(), commodity_forecast::ForecastError>(())
//! ```
//!
//! Fewer than five records produce the error payload instead:
//!
//! ```rust
//! use commodity_forecast::{generate_price_forecast, PriceRecord};
//!
//! let records = vec![PriceRecord::new("2024-01-01", 100.0)];
//! let payload = generate_price_forecast(&records, None)?;
//! assert!(payload.is_error());
//! # Ok::<(), commodity_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod response;
pub mod series;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::engine::{forecast, generate_price_forecast, ForecastEngine};
pub use crate::error::ForecastError;
pub use crate::models::{FittedRegressor, ModelKind, PriceRegressor};
pub use crate::response::{Forecast, ForecastResponse, TrendDirection};
pub use crate::series::{HistoricalSeries, Observation, PriceRecord, SeriesLoader};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
