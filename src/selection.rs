//! Rule-based forecasting method selection

use crate::characteristics::DemandCharacteristics;
use crate::models::ForecastMethod;

/// History shorter than this always gets the moving-average strategy
const SHORT_HISTORY_POINTS: usize = 14;
/// Seasonality strength above which decomposition wins
const SEASONAL_STRENGTH_THRESHOLD: f64 = 0.3;
/// Absolute trend strength above which regression wins
const TREND_THRESHOLD: f64 = 0.2;
/// Volatility above which smoothing wins
const HIGH_VOLATILITY: f64 = 1.0;
/// Coefficient of variation below which the series is stable enough for AR(1)
const STABLE_CV: f64 = 0.5;

/// Map demand characteristics to a forecasting method.
///
/// Rules are evaluated in order; the first match wins.
pub fn select_method(characteristics: &DemandCharacteristics) -> ForecastMethod {
    if characteristics.data_points < SHORT_HISTORY_POINTS {
        return ForecastMethod::MovingAverage;
    }
    if characteristics.seasonality.strength > SEASONAL_STRENGTH_THRESHOLD {
        return ForecastMethod::SeasonalDecompose;
    }
    if characteristics.trend_strength.abs() > TREND_THRESHOLD {
        return ForecastMethod::LinearRegression;
    }
    if characteristics.volatility > HIGH_VOLATILITY {
        return ForecastMethod::ExponentialSmoothing;
    }
    if characteristics.cv < STABLE_CV {
        return ForecastMethod::Arima;
    }
    ForecastMethod::ExponentialSmoothing
}
