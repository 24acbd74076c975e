//! Hold-out evaluation of forecast accuracy

use serde::{Deserialize, Serialize};

use crate::data::PreparedSeries;

/// Test segments shorter than this are not worth scoring
const MIN_TEST_POINTS: usize = 3;

/// Accuracy metrics from a backtest run.
///
/// All zeros when the history was too short to hold out a test segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    /// Mean absolute error
    pub mae: f64,
    /// Mean absolute percentage error
    pub mape: f64,
    /// Root mean squared error
    pub rmse: f64,
}

/// Score a forecasting pipeline against the trailing portion of a series.
///
/// The series is split at the `1 - holdout` mark; `forecast_fn` re-runs the
/// full pipeline on the training prefix with the test length as its horizon,
/// and the result is compared against the held-out actual values.
pub fn evaluate<F>(series: &PreparedSeries, holdout: f64, forecast_fn: F) -> ForecastAccuracy
where
    F: Fn(&PreparedSeries, usize) -> Vec<f64>,
{
    let n = series.len();
    let train_len = (n as f64 * (1.0 - holdout)).floor() as usize;
    let test_len = n - train_len;
    if test_len < MIN_TEST_POINTS || train_len == 0 {
        return ForecastAccuracy::default();
    }

    let train = series.prefix(train_len);
    let actual: Vec<f64> = series.observations()[train_len..]
        .iter()
        .map(|o| o.quantity_sold)
        .collect();

    let mut forecast = forecast_fn(&train, test_len);
    let padding = forecast.last().copied().unwrap_or(0.0);
    forecast.resize(test_len, padding);

    accuracy_metrics(&forecast, &actual)
}

/// MAE, MAPE, and RMSE of a forecast against actual values.
///
/// Actual values are floored at 1 in the percentage error so zero-demand days
/// do not divide by zero.
pub fn accuracy_metrics(forecast: &[f64], actual: &[f64]) -> ForecastAccuracy {
    let n = forecast.len().min(actual.len());
    if n == 0 {
        return ForecastAccuracy::default();
    }

    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut pct_sum = 0.0;
    for i in 0..n {
        let error = actual[i] - forecast[i];
        abs_sum += error.abs();
        sq_sum += error * error;
        pct_sum += error.abs() / actual[i].max(1.0);
    }

    let count = n as f64;
    ForecastAccuracy {
        mae: abs_sum / count,
        mape: pct_sum / count * 100.0,
        rmse: (sq_sum / count).sqrt(),
    }
}
