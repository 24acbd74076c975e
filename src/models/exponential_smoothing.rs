//! Single exponential smoothing

use crate::data::PreparedSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::stats;

/// Single exponential smoothing strategy.
///
/// Tracks a smoothed demand level and forecasts it flat across the horizon;
/// suited to volatile series where chasing the noise makes things worse.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

impl ExponentialSmoothing {
    /// Create a smoother with the given smoothing constant.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        Ok(Self { alpha })
    }
}

impl DemandModel for ExponentialSmoothing {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::ExponentialSmoothing
    }

    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast> {
        let quantities = series.quantities();
        if quantities.is_empty() {
            return Err(ForecastError::DataError(
                "Empty demand series".to_string(),
            ));
        }

        // The level before each update is the one-step-ahead prediction for
        // that day, so the residuals fall out of the same pass.
        let mut level = quantities[0];
        let mut residuals = Vec::with_capacity(quantities.len().saturating_sub(1));
        for &value in &quantities[1..] {
            residuals.push(value - level);
            level = self.alpha * value + (1.0 - self.alpha) * level;
        }

        let point = level.max(0.0);
        Ok(MethodForecast {
            daily: vec![point; horizon],
            sigma: stats::std_dev(&residuals),
            trend_factor: 0.0,
            seasonality_factor: 0.0,
        })
    }
}
