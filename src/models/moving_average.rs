//! Trailing moving average with a trend adjustment

use crate::data::PreparedSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::stats;

/// Upper bound on the cumulative trend multiplier over long horizons
const MAX_GROWTH: f64 = 3.0;

/// Moving-average strategy with a multiplicative trend.
///
/// Uses the mean of a short trailing window as the base level, then scales it
/// by a per-day trend rate fitted over the same window. The cumulative
/// multiplier is clamped to `[0, 3]` so a steep recent slope cannot explode a
/// long-horizon forecast.
#[derive(Debug, Clone)]
pub struct TrendedMovingAverage {
    window: usize,
}

impl TrendedMovingAverage {
    /// Create a moving-average model with the given trailing window.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }
        Ok(Self { window })
    }
}

impl DemandModel for TrendedMovingAverage {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::MovingAverage
    }

    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast> {
        let quantities = series.quantities();
        if quantities.is_empty() {
            return Err(ForecastError::DataError(
                "Empty demand series".to_string(),
            ));
        }

        let window = self.window.min(quantities.len());
        let recent = &quantities[quantities.len() - window..];
        let base = stats::mean(recent);
        let (slope, _) = stats::linear_fit(recent);
        let rate = slope / base.max(1.0);

        let daily: Vec<f64> = (1..=horizon)
            .map(|step| {
                let growth = (1.0 + rate * step as f64).clamp(0.0, MAX_GROWTH);
                (base * growth).max(0.0)
            })
            .collect();

        Ok(MethodForecast {
            daily,
            sigma: stats::std_dev(recent),
            trend_factor: rate,
            seasonality_factor: 0.0,
        })
    }
}
