//! Recommendation-confidence scoring

use crate::backtest::ForecastAccuracy;
use crate::characteristics::DemandCharacteristics;

/// Combine data volume, volatility, seasonality, and backtested error into a
/// single reliability score in `[0.1, 1.0]`.
pub fn score(characteristics: &DemandCharacteristics, accuracy: &ForecastAccuracy) -> f64 {
    let mut score: f64 = 0.5;

    if characteristics.data_points >= 30 {
        score += 0.2;
    } else if characteristics.data_points >= 14 {
        score += 0.1;
    }

    if characteristics.volatility < 0.5 {
        score += 0.2;
    } else if characteristics.volatility > 1.5 {
        score -= 0.2;
    }

    if characteristics.seasonality.strength > 0.3 {
        score += 0.1;
    }

    if accuracy.mape < 20.0 {
        score += 0.2;
    } else if accuracy.mape > 50.0 {
        score -= 0.2;
    }

    score.clamp(0.1, 1.0)
}
