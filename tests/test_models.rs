use assert_approx_eq::assert_approx_eq;
use chrono::{Duration, NaiveDate};
use forecast_demand::models::arima::Ar1Model;
use forecast_demand::models::exponential_smoothing::ExponentialSmoothing;
use forecast_demand::models::moving_average::TrendedMovingAverage;
use forecast_demand::models::regression::LinearRegression;
use forecast_demand::models::seasonal::SeasonalDecomposition;
use forecast_demand::models::DemandModel;
use forecast_demand::{PreparedSeries, SalesRecord};

fn monday() -> NaiveDate {
    // 2024-01-01 is a Monday
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn series(quantities: &[u32]) -> PreparedSeries {
    let records: Vec<SalesRecord> = quantities
        .iter()
        .enumerate()
        .map(|(i, &quantity_sold)| SalesRecord {
            date: monday() + Duration::days(i as i64),
            quantity_sold,
        })
        .collect();
    PreparedSeries::from_records(&records)
}

#[test]
fn exponential_smoothing_forecasts_flat_at_the_level() {
    let model = ExponentialSmoothing::new(0.3).unwrap();
    let forecast = model.forecast(&series(&[10; 15]), 6).unwrap();

    assert_eq!(forecast.daily.len(), 6);
    for value in &forecast.daily {
        assert_approx_eq!(*value, 10.0);
    }
    assert_approx_eq!(forecast.sigma, 0.0);
    assert_eq!(forecast.trend_factor, 0.0);
}

#[test]
fn exponential_smoothing_rejects_bad_alpha() {
    assert!(ExponentialSmoothing::new(0.0).is_err());
    assert!(ExponentialSmoothing::new(1.0).is_err());
    assert!(ExponentialSmoothing::new(f64::NAN).is_err());
}

#[test]
fn moving_average_projects_a_rising_trend() {
    let quantities: Vec<u32> = (1..=20).collect();
    let forecast = TrendedMovingAverage::new(14)
        .unwrap()
        .forecast(&series(&quantities), 5)
        .unwrap();

    assert_eq!(forecast.daily.len(), 5);
    assert!(forecast.trend_factor > 0.0);
    for pair in forecast.daily.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    // Base level is the mean of the trailing 14 days (7..=20).
    assert!(forecast.daily[0] > 13.5);
}

#[test]
fn moving_average_clamps_a_steep_decline_at_zero() {
    let quantities: Vec<u32> = (0..14).map(|i| 130 - 10 * i).collect();
    let forecast = TrendedMovingAverage::new(14)
        .unwrap()
        .forecast(&series(&quantities), 10)
        .unwrap();

    assert!(forecast.trend_factor < 0.0);
    for value in &forecast.daily {
        assert!(*value >= 0.0);
    }
    assert_eq!(forecast.daily[9], 0.0);
}

#[test]
fn moving_average_rejects_a_zero_window() {
    assert!(TrendedMovingAverage::new(0).is_err());
}

#[test]
fn ar1_forecasts_the_mean_of_a_constant_series() {
    let forecast = Ar1Model::new().forecast(&series(&[8; 20]), 4).unwrap();

    for value in &forecast.daily {
        assert_approx_eq!(*value, 8.0);
    }
    assert_approx_eq!(forecast.sigma, 0.0);
    assert_eq!(forecast.trend_factor, 0.0);
}

#[test]
fn ar1_persists_the_last_value_of_a_perfect_ramp() {
    let quantities: Vec<u32> = (1..=20).collect();
    let forecast = Ar1Model::new().forecast(&series(&quantities), 5).unwrap();

    // A ramp has lag-1 correlation of exactly 1, so the forecast holds the
    // last observation.
    assert_approx_eq!(forecast.trend_factor, 1.0);
    for value in &forecast.daily {
        assert_approx_eq!(*value, 20.0);
    }
}

#[test]
fn ar1_needs_at_least_two_observations() {
    assert!(Ar1Model::new().forecast(&series(&[5]), 3).is_err());
}

#[test]
fn seasonal_decomposition_keeps_weekends_low() {
    let quantities: Vec<u32> = (0..21).map(|i| if i % 7 < 5 { 10 } else { 2 }).collect();
    let forecast = SeasonalDecomposition::new(28)
        .unwrap()
        .forecast(&series(&quantities), 7)
        .unwrap();

    assert_eq!(forecast.daily.len(), 7);
    // The series ends on a Sunday, so the forecast runs Monday..Sunday.
    let weekday_low = forecast.daily[..5]
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let weekend_high = forecast.daily[5..]
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(weekend_high < weekday_low);
    assert!(forecast.seasonality_factor > 0.0);
}

#[test]
fn seasonal_decomposition_handles_an_all_zero_series() {
    let forecast = SeasonalDecomposition::new(28)
        .unwrap()
        .forecast(&series(&[0; 10]), 5)
        .unwrap();

    assert_eq!(forecast.daily, vec![0.0; 5]);
    assert_eq!(forecast.seasonality_factor, 0.0);
}

#[test]
fn regression_extends_a_linear_ramp() {
    let quantities: Vec<u32> = (0..40).collect();
    let forecast = LinearRegression::new()
        .forecast(&series(&quantities), 5)
        .unwrap();

    assert_eq!(forecast.daily.len(), 5);
    assert!(forecast.trend_factor > 0.1);
    assert!(forecast.daily[0] > 38.0 && forecast.daily[0] < 42.0);
    for pair in forecast.daily.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-3);
    }
}

#[test]
fn every_model_returns_the_requested_horizon() {
    let quantities: Vec<u32> = (0..16).map(|i| (i * 3 + 1) % 7).collect();
    let data = series(&quantities);
    let horizon = 9;

    let models: Vec<Box<dyn DemandModel>> = vec![
        Box::new(SeasonalDecomposition::new(28).unwrap()),
        Box::new(LinearRegression::new()),
        Box::new(ExponentialSmoothing::new(0.3).unwrap()),
        Box::new(TrendedMovingAverage::new(14).unwrap()),
        Box::new(Ar1Model::new()),
    ];
    for model in models {
        let forecast = model.forecast(&data, horizon).unwrap();
        assert_eq!(forecast.daily.len(), horizon);
        for value in &forecast.daily {
            assert!(*value >= 0.0);
        }
        assert!(forecast.sigma >= 0.0);
    }
}

#[test]
fn every_model_rejects_an_empty_series() {
    let empty = PreparedSeries::from_records(&[]);

    assert!(SeasonalDecomposition::new(28).unwrap().forecast(&empty, 3).is_err());
    assert!(LinearRegression::new().forecast(&empty, 3).is_err());
    assert!(ExponentialSmoothing::new(0.3).unwrap().forecast(&empty, 3).is_err());
    assert!(TrendedMovingAverage::new(14).unwrap().forecast(&empty, 3).is_err());
    assert!(Ar1Model::new().forecast(&empty, 3).is_err());
}
