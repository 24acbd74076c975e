//! Demand characteristics used to choose a forecasting strategy

use serde::{Deserialize, Serialize};

use crate::data::PreparedSeries;
use crate::stats;

/// Minimum days of history before a trend is measured
const TREND_MIN_POINTS: usize = 14;
/// Minimum days of history before day-of-month effects are measured
const MONTHLY_MIN_POINTS: usize = 60;
/// Weekly bucket dispersion above which weekly seasonality is flagged
const WEEKLY_CV_THRESHOLD: f64 = 0.2;
/// Monthly bucket dispersion above which monthly seasonality is flagged
const MONTHLY_CV_THRESHOLD: f64 = 0.15;

/// Detected calendar seasonality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    /// Demand varies by day of week
    pub has_weekly: bool,
    /// Demand varies by day of month
    pub has_monthly: bool,
    /// Dispersion of average demand across weekdays
    pub weekly_strength: f64,
    /// Dispersion of average demand across days of the month
    pub monthly_strength: f64,
    /// The stronger of the two seasonal signals
    pub strength: f64,
}

/// Summary statistics of a prepared demand series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCharacteristics {
    /// Days in the prepared series
    pub data_points: usize,
    /// Mean daily demand
    pub mean_demand: f64,
    /// Sample standard deviation of daily demand
    pub std_demand: f64,
    /// Coefficient of variation, std / max(mean, 1)
    pub cv: f64,
    /// Relative change between the first and second half of the series
    pub trend_strength: f64,
    /// Calendar seasonality signals
    pub seasonality: Seasonality,
    /// Demand volatility, std / max(mean, 1)
    pub volatility: f64,
    /// Fraction of days with zero demand
    pub zero_demand_ratio: f64,
}

/// Compute the characteristics record for a prepared series.
pub fn analyze(series: &PreparedSeries) -> DemandCharacteristics {
    let quantities = series.quantities();
    let n = quantities.len();

    let mean_demand = stats::mean(&quantities);
    let std_demand = stats::std_dev(&quantities);
    let cv = std_demand / mean_demand.max(1.0);

    let trend_strength = if n >= TREND_MIN_POINTS {
        let (first_half, second_half) = quantities.split_at(n / 2);
        let first_mean = stats::mean(first_half);
        let second_mean = stats::mean(second_half);
        (second_mean - first_mean) / first_mean.max(1.0)
    } else {
        0.0
    };

    let weekly_strength = bucket_dispersion(series, 7, |o| o.day_of_week as usize);
    let monthly_strength = if n >= MONTHLY_MIN_POINTS {
        bucket_dispersion(series, 31, |o| (o.day_of_month - 1) as usize)
    } else {
        0.0
    };

    let seasonality = Seasonality {
        has_weekly: weekly_strength > WEEKLY_CV_THRESHOLD,
        has_monthly: monthly_strength > MONTHLY_CV_THRESHOLD,
        weekly_strength,
        monthly_strength,
        strength: weekly_strength.max(monthly_strength),
    };

    let zero_days = quantities.iter().filter(|&&q| q == 0.0).count();
    let zero_demand_ratio = if n == 0 {
        0.0
    } else {
        zero_days as f64 / n as f64
    };

    DemandCharacteristics {
        data_points: n,
        mean_demand,
        std_demand,
        cv,
        trend_strength,
        seasonality,
        volatility: std_demand / mean_demand.max(1.0),
        zero_demand_ratio,
    }
}

/// Coefficient of variation of per-bucket mean demand.
///
/// Buckets with no observations are skipped; a non-positive grand mean yields
/// 0 rather than a division blow-up.
fn bucket_dispersion<F>(series: &PreparedSeries, buckets: usize, bucket_of: F) -> f64
where
    F: Fn(&crate::data::DailyObservation) -> usize,
{
    let mut sums = vec![0.0; buckets];
    let mut counts = vec![0usize; buckets];
    for observation in series.observations() {
        let bucket = bucket_of(observation);
        if bucket < buckets {
            sums[bucket] += observation.quantity_sold;
            counts[bucket] += 1;
        }
    }

    let means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .filter(|(_, &count)| count > 0)
        .map(|(&sum, &count)| sum / count as f64)
        .collect();

    let grand_mean = stats::mean(&means);
    if grand_mean <= 0.0 {
        return 0.0;
    }
    stats::std_dev(&means) / grand_mean
}
