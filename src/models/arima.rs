//! First-order autoregression toward the long-run mean

use crate::data::PreparedSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::stats;

/// AR(1) strategy.
///
/// Blends the previous value with the long-run mean using the lag-1
/// autocorrelation as the mixing weight. A degenerate correlation (constant
/// series) collapses to forecasting the mean.
#[derive(Debug, Clone, Default)]
pub struct Ar1Model;

impl Ar1Model {
    pub fn new() -> Self {
        Self
    }
}

impl DemandModel for Ar1Model {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Arima
    }

    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast> {
        let quantities = series.quantities();
        if quantities.len() < 2 {
            return Err(ForecastError::ModelError(
                "Autoregression needs at least two observations".to_string(),
            ));
        }

        let mean = stats::mean(&quantities);
        let phi = stats::lag1_autocorrelation(&quantities);

        let mut residuals = Vec::with_capacity(quantities.len() - 1);
        for t in 1..quantities.len() {
            let predicted = phi * quantities[t - 1] + (1.0 - phi) * mean;
            residuals.push(quantities[t] - predicted);
        }

        // Recursion runs on the unclamped level; only the emitted values are
        // floored at zero.
        let mut level = quantities[quantities.len() - 1];
        let mut daily = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            level = phi * level + (1.0 - phi) * mean;
            daily.push(level.max(0.0));
        }

        Ok(MethodForecast {
            daily,
            sigma: stats::std_dev(&residuals),
            trend_factor: phi,
            seasonality_factor: 0.0,
        })
    }
}
