//! # Forecast Demand
//!
//! A Rust library for retail demand forecasting and inventory replenishment
//! planning.
//!
//! ## Features
//!
//! - Sales-history preparation: duplicate aggregation, calendar reindexing
//!   with explicit zero-demand days, and trailing moving-average features
//! - Demand characteristics analysis: trend, weekly and monthly seasonality,
//!   volatility, and data sufficiency
//! - Rule-based selection across five forecasting strategies (seasonal
//!   decomposition, linear regression, exponential smoothing, trend-adjusted
//!   moving average, AR(1))
//! - Hold-out backtesting with MAE/MAPE/RMSE scoring
//! - A recommendation-confidence score combining data volume, volatility,
//!   seasonality, and backtested error
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use forecast_demand::{DemandForecaster, SalesRecord};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
//! let history: Vec<SalesRecord> = (0i64..30)
//!     .map(|offset| SalesRecord {
//!         date: start + chrono::Duration::days(offset),
//!         quantity_sold: 10,
//!     })
//!     .collect();
//!
//! let forecaster = DemandForecaster::default();
//! let forecast = forecaster.predict_demand(&history, 7);
//!
//! assert_eq!(forecast.daily_forecast.len(), 7);
//! assert!(forecast.predicted_demand >= 0.0);
//! ```

pub mod backtest;
pub mod characteristics;
pub mod confidence;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod selection;
pub mod stats;

// Re-export commonly used types
pub use crate::backtest::ForecastAccuracy;
pub use crate::characteristics::{analyze, DemandCharacteristics, Seasonality};
pub use crate::data::{DailyObservation, PreparedSeries, SalesHistoryLoader, SalesRecord};
pub use crate::engine::{DemandForecaster, ForecastConfig, ForecastResult};
pub use crate::error::ForecastError;
pub use crate::models::ForecastMethod;
pub use crate::selection::select_method;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
