//! Forecasting strategies for daily demand series

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::PreparedSeries;
use crate::error::Result;

/// The five interchangeable forecasting strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Weekday factors over a recent window, combined with a fitted trend line
    SeasonalDecompose,
    /// Least squares over calendar features and a time index
    LinearRegression,
    /// Single exponential smoothing with a fixed smoothing constant
    ExponentialSmoothing,
    /// Trailing-window mean with a multiplicative trend adjustment
    MovingAverage,
    /// First-order autoregression toward the long-run mean
    Arima,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForecastMethod::SeasonalDecompose => "seasonal_decompose",
            ForecastMethod::LinearRegression => "linear_regression",
            ForecastMethod::ExponentialSmoothing => "exponential_smoothing",
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::Arima => "arima",
        };
        f.write_str(name)
    }
}

/// Raw output of one forecasting strategy.
///
/// Daily values are already clamped to be non-negative; the engine sums them
/// into the point forecast and widens them into a confidence interval.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodForecast {
    /// Forecasted demand per future day
    pub daily: Vec<f64>,
    /// Dispersion estimate used for the confidence interval
    pub sigma: f64,
    /// Strategy-specific trend indicator
    pub trend_factor: f64,
    /// Dispersion of the seasonal adjustment, 0 for non-seasonal strategies
    pub seasonality_factor: f64,
}

/// Common interface for forecasting strategies
pub trait DemandModel {
    /// Which strategy this model implements
    fn method(&self) -> ForecastMethod;

    /// Forecast demand for the given number of future days
    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast>;
}

pub mod arima;
pub mod exponential_smoothing;
pub mod moving_average;
pub mod regression;
pub mod seasonal;
