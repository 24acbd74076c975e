//! Seasonal decomposition over a recent demand window

use chrono::{Datelike, Duration};

use crate::data::PreparedSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::stats;

/// Seasonal decomposition strategy.
///
/// Normalizes per-weekday demand against the mean of a trailing window and
/// projects a fitted trend line forward, so weekday highs and weekend lows
/// survive into the forecast.
#[derive(Debug, Clone)]
pub struct SeasonalDecomposition {
    window: usize,
}

impl SeasonalDecomposition {
    /// Create a seasonal decomposition over a trailing window of days.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal window must be positive".to_string(),
            ));
        }
        Ok(Self { window })
    }
}

impl DemandModel for SeasonalDecomposition {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::SeasonalDecompose
    }

    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast> {
        let observations = series.observations();
        if observations.is_empty() {
            return Err(ForecastError::DataError(
                "Empty demand series".to_string(),
            ));
        }

        let window = self.window.min(observations.len());
        let recent = &observations[observations.len() - window..];
        let values: Vec<f64> = recent.iter().map(|o| o.quantity_sold).collect();
        let overall_mean = stats::mean(&values);

        // Per-weekday mean demand relative to the window mean; weekdays with
        // no observations in the window stay neutral.
        let mut sums = [0.0; 7];
        let mut counts = [0usize; 7];
        for observation in recent {
            let bucket = observation.day_of_week as usize;
            sums[bucket] += observation.quantity_sold;
            counts[bucket] += 1;
        }
        let mut factors = [1.0; 7];
        if overall_mean > 0.0 {
            for day in 0..7 {
                if counts[day] > 0 {
                    factors[day] = (sums[day] / counts[day] as f64) / overall_mean;
                }
            }
        }

        let (slope, intercept) = stats::linear_fit(&values);
        let last_date = series
            .last_date()
            .ok_or_else(|| ForecastError::DataError("Empty demand series".to_string()))?;

        let daily: Vec<f64> = (1..=horizon)
            .map(|step| {
                let date = last_date + Duration::days(step as i64);
                let weekday = date.weekday().num_days_from_monday() as usize;
                let base = intercept + slope * (window as f64 - 1.0 + step as f64);
                (base * factors[weekday]).max(0.0)
            })
            .collect();

        let factor_mean = stats::mean(&factors);
        let seasonality_factor = if factor_mean > 0.0 {
            stats::std_dev(&factors) / factor_mean
        } else {
            0.0
        };

        Ok(MethodForecast {
            daily,
            sigma: stats::std_dev(&values) / (window as f64).sqrt(),
            trend_factor: slope * 30.0 / overall_mean.max(1.0),
            seasonality_factor,
        })
    }
}
