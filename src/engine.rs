//! The forecasting engine: configuration, orchestration, and the public result

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, warn};

use crate::backtest::{self, ForecastAccuracy};
use crate::characteristics::{analyze, DemandCharacteristics};
use crate::data::{PreparedSeries, SalesRecord};
use crate::error::Result;
use crate::models::arima::Ar1Model;
use crate::models::exponential_smoothing::ExponentialSmoothing;
use crate::models::moving_average::TrendedMovingAverage;
use crate::models::regression::LinearRegression;
use crate::models::seasonal::SeasonalDecomposition;
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::selection::select_method;
use crate::stats;

/// Daily demand assumed when the history holds no records at all
const DEFAULT_MEAN_DEMAND: f64 = 5.0;
/// Dispersion assumed when the history is too short to estimate one
const DEFAULT_STD_DEMAND: f64 = 2.0;
/// Reliability reported for the simple-average fallback
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Engine configuration, immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Histories with fewer raw records skip straight to the fallback
    pub min_data_points: usize,
    /// Coverage of the confidence interval
    pub confidence_level: f64,
    /// Smoothing constant for the exponential-smoothing strategy
    pub smoothing_alpha: f64,
    /// Trailing window for the moving-average strategy
    pub moving_average_window: usize,
    /// Trailing window for the seasonal-decomposition strategy
    pub seasonal_window: usize,
    /// Fraction of the series held out for backtesting
    pub backtest_holdout: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_data_points: 10,
            confidence_level: 0.95,
            smoothing_alpha: 0.3,
            moving_average_window: 14,
            seasonal_window: 28,
            backtest_holdout: 0.3,
        }
    }
}

/// The externally visible forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Total predicted demand over the horizon
    pub predicted_demand: f64,
    /// Interval around the total, low side clamped at zero
    pub confidence_interval: (f64, f64),
    /// Dispersion of the seasonal adjustment used, 0 when none was applied
    pub seasonality_factor: f64,
    /// Trend indicator of the strategy that produced the forecast
    pub trend_factor: f64,
    /// Predicted demand per future day, one entry per horizon day
    pub daily_forecast: Vec<f64>,
    /// Strategy that produced the forecast
    pub method_used: ForecastMethod,
    /// Backtested accuracy of the pipeline on this history
    pub forecast_accuracy: ForecastAccuracy,
    /// Reliability score in `[0.1, 1.0]`
    pub recommendation_confidence: f64,
    /// Characteristics of the prepared series; absent on the fallback path
    pub data_characteristics: Option<DemandCharacteristics>,
}

impl ForecastResult {
    /// Serialize the forecast to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Demand forecasting engine.
///
/// Stateless between calls: each invocation prepares its own series and
/// returns a freshly constructed result, so one instance may be shared across
/// threads for different products.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    config: ForecastConfig,
    z_score: f64,
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl DemandForecaster {
    /// Create an engine with the given configuration.
    pub fn new(config: ForecastConfig) -> Self {
        let z_score = Normal::new(0.0, 1.0)
            .map(|normal| normal.inverse_cdf(0.5 + config.confidence_level / 2.0))
            .unwrap_or(1.96);
        let z_score = if z_score.is_finite() && z_score > 0.0 {
            z_score
        } else {
            1.96
        };
        Self { config, z_score }
    }

    /// The engine configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast total and daily demand over the next `horizon_days`.
    ///
    /// Never fails: histories too short for modeling take the simple-average
    /// fallback, and any error inside the pipeline degrades to the same
    /// fallback instead of reaching the caller.
    pub fn predict_demand(&self, history: &[SalesRecord], horizon_days: usize) -> ForecastResult {
        if history.len() < self.config.min_data_points {
            debug!(
                records = history.len(),
                "history below minimum, using simple-average fallback"
            );
            return self.simple_average_result(history, horizon_days);
        }

        match self.run_pipeline(history, horizon_days) {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, "forecast pipeline failed, degrading to simple-average fallback");
                self.simple_average_result(history, horizon_days)
            }
        }
    }

    fn run_pipeline(&self, history: &[SalesRecord], horizon_days: usize) -> Result<ForecastResult> {
        let series = PreparedSeries::from_records(history);
        let characteristics = analyze(&series);
        let method = select_method(&characteristics);
        debug!(%method, data_points = characteristics.data_points, "selected forecasting method");

        let (method_used, forecast) = self.forecast_with_fallback(&series, method, horizon_days);

        let accuracy = backtest::evaluate(&series, self.config.backtest_holdout, |train, test_horizon| {
            let train_method = select_method(&analyze(train));
            self.forecast_with_fallback(train, train_method, test_horizon).1.daily
        });

        let confidence = crate::confidence::score(&characteristics, &accuracy);

        Ok(self.assemble(
            method_used,
            forecast,
            Some(characteristics),
            accuracy,
            confidence,
            horizon_days,
        ))
    }

    /// Run the selected strategy, falling back through seasonal decomposition
    /// and the moving average before settling on a flat simple average.
    fn forecast_with_fallback(
        &self,
        series: &PreparedSeries,
        selected: ForecastMethod,
        horizon: usize,
    ) -> (ForecastMethod, MethodForecast) {
        let mut chain = vec![selected];
        for fallback in [ForecastMethod::SeasonalDecompose, ForecastMethod::MovingAverage] {
            if !chain.contains(&fallback) {
                chain.push(fallback);
            }
        }

        for method in chain {
            match self.run_method(method, series, horizon) {
                Ok(forecast) => return (method, forecast),
                Err(error) => warn!(%method, %error, "strategy failed, trying next fallback"),
            }
        }

        let quantities = series.quantities();
        (
            ForecastMethod::MovingAverage,
            self.simple_method_forecast(&quantities, horizon),
        )
    }

    fn run_method(
        &self,
        method: ForecastMethod,
        series: &PreparedSeries,
        horizon: usize,
    ) -> Result<MethodForecast> {
        match method {
            ForecastMethod::SeasonalDecompose => {
                SeasonalDecomposition::new(self.config.seasonal_window)?.forecast(series, horizon)
            }
            ForecastMethod::LinearRegression => LinearRegression::new().forecast(series, horizon),
            ForecastMethod::ExponentialSmoothing => {
                ExponentialSmoothing::new(self.config.smoothing_alpha)?.forecast(series, horizon)
            }
            ForecastMethod::MovingAverage => {
                TrendedMovingAverage::new(self.config.moving_average_window)?
                    .forecast(series, horizon)
            }
            ForecastMethod::Arima => Ar1Model::new().forecast(series, horizon),
        }
    }

    /// Flat forecast at the historical mean, with library defaults when the
    /// history is empty or too short to estimate dispersion.
    fn simple_method_forecast(&self, quantities: &[f64], horizon: usize) -> MethodForecast {
        let mean = stats::mean_or(quantities, DEFAULT_MEAN_DEMAND).max(0.0);
        MethodForecast {
            daily: vec![mean; horizon],
            sigma: stats::std_dev_or(quantities, DEFAULT_STD_DEMAND),
            trend_factor: 0.0,
            seasonality_factor: 0.0,
        }
    }

    fn simple_average_result(&self, history: &[SalesRecord], horizon_days: usize) -> ForecastResult {
        let quantities: Vec<f64> = history
            .iter()
            .map(|record| f64::from(record.quantity_sold))
            .collect();
        let forecast = self.simple_method_forecast(&quantities, horizon_days);

        let total: f64 = forecast.daily.iter().sum();
        let margin = self.z_score * forecast.sigma * (horizon_days as f64).sqrt();
        ForecastResult {
            predicted_demand: total,
            confidence_interval: (0.0, total + margin),
            seasonality_factor: forecast.seasonality_factor,
            trend_factor: forecast.trend_factor,
            daily_forecast: forecast.daily,
            method_used: ForecastMethod::MovingAverage,
            forecast_accuracy: ForecastAccuracy::default(),
            recommendation_confidence: FALLBACK_CONFIDENCE,
            data_characteristics: None,
        }
    }

    fn assemble(
        &self,
        method_used: ForecastMethod,
        forecast: MethodForecast,
        characteristics: Option<DemandCharacteristics>,
        accuracy: ForecastAccuracy,
        confidence: f64,
        horizon_days: usize,
    ) -> ForecastResult {
        let total: f64 = forecast.daily.iter().sum();
        let margin = self.z_score * forecast.sigma * (horizon_days as f64).sqrt();
        ForecastResult {
            predicted_demand: total,
            confidence_interval: ((total - margin).max(0.0), total + margin),
            seasonality_factor: forecast.seasonality_factor,
            trend_factor: forecast.trend_factor,
            daily_forecast: forecast.daily,
            method_used,
            forecast_accuracy: accuracy,
            recommendation_confidence: confidence,
            data_characteristics: characteristics,
        }
    }
}
