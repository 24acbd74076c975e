//! Least-squares regression over calendar features

use chrono::{Datelike, Duration};

use crate::data::PreparedSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, ForecastMethod, MethodForecast};
use crate::stats;

/// Index of the time coefficient in the feature row
const TIME_INDEX: usize = 5;

/// Linear regression strategy.
///
/// Fits demand against day-of-week, day-of-month, month, a weekend flag, and a
/// running time index, then projects the fit onto future calendar days. A tiny
/// ridge term keeps collinear calendar features from making the normal
/// equations singular.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    ridge: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self { ridge: 1e-6 }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

fn feature_row(day_of_week: u32, day_of_month: u32, month: u32, is_weekend: bool, t: usize) -> Vec<f64> {
    vec![
        1.0,
        f64::from(day_of_week),
        f64::from(day_of_month),
        f64::from(month),
        if is_weekend { 1.0 } else { 0.0 },
        t as f64,
    ]
}

fn dot(row: &[f64], beta: &[f64]) -> f64 {
    row.iter().zip(beta).map(|(x, b)| x * b).sum()
}

impl DemandModel for LinearRegression {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearRegression
    }

    fn forecast(&self, series: &PreparedSeries, horizon: usize) -> Result<MethodForecast> {
        let observations = series.observations();
        if observations.is_empty() {
            return Err(ForecastError::DataError(
                "Empty demand series".to_string(),
            ));
        }

        let rows: Vec<Vec<f64>> = observations
            .iter()
            .enumerate()
            .map(|(t, o)| feature_row(o.day_of_week, o.day_of_month, o.month, o.is_weekend, t))
            .collect();
        let targets: Vec<f64> = observations.iter().map(|o| o.quantity_sold).collect();

        let beta = stats::least_squares(&rows, &targets, self.ridge).ok_or_else(|| {
            ForecastError::NumericalError(
                "Singular normal equations in demand regression".to_string(),
            )
        })?;

        let residuals: Vec<f64> = rows
            .iter()
            .zip(&targets)
            .map(|(row, &y)| y - dot(row, &beta))
            .collect();

        let n = observations.len();
        let last_date = series
            .last_date()
            .ok_or_else(|| ForecastError::DataError("Empty demand series".to_string()))?;

        let daily: Vec<f64> = (1..=horizon)
            .map(|step| {
                let date = last_date + Duration::days(step as i64);
                let day_of_week = date.weekday().num_days_from_monday();
                let row = feature_row(
                    day_of_week,
                    date.day(),
                    date.month(),
                    day_of_week >= 5,
                    n - 1 + step,
                );
                dot(&row, &beta).max(0.0)
            })
            .collect();

        Ok(MethodForecast {
            daily,
            sigma: stats::std_dev(&residuals),
            trend_factor: beta.get(TIME_INDEX).copied().unwrap_or(0.0),
            seasonality_factor: 0.0,
        })
    }
}
