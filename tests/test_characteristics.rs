use chrono::{Duration, NaiveDate};
use forecast_demand::{analyze, PreparedSeries, SalesRecord};
use pretty_assertions::assert_eq;

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
fn constant_series_is_flat_and_calm() {
    let characteristics = analyze(&series(&[7; 20]));

    assert_eq!(characteristics.data_points, 20);
    assert_eq!(characteristics.mean_demand, 7.0);
    assert_eq!(characteristics.std_demand, 0.0);
    assert_eq!(characteristics.cv, 0.0);
    assert_eq!(characteristics.trend_strength, 0.0);
    assert_eq!(characteristics.volatility, 0.0);
    assert_eq!(characteristics.zero_demand_ratio, 0.0);
    assert!(!characteristics.seasonality.has_weekly);
    assert!(!characteristics.seasonality.has_monthly);
    assert_eq!(characteristics.seasonality.strength, 0.0);
}

#[test]
fn growing_series_has_positive_trend() {
    let quantities: Vec<u32> = (0..40).collect();
    let characteristics = analyze(&series(&quantities));

    assert!(characteristics.trend_strength > 0.2);
    assert!(characteristics.cv > 0.5);
}

#[test]
fn short_series_reports_no_trend() {
    let quantities: Vec<u32> = (0..10).map(|i| i * 5).collect();
    let characteristics = analyze(&series(&quantities));

    assert_eq!(characteristics.trend_strength, 0.0);
}

#[test]
fn weekday_pattern_flags_weekly_seasonality() {
    let quantities: Vec<u32> = (0..21).map(|i| if i % 7 < 5 { 10 } else { 2 }).collect();
    let characteristics = analyze(&series(&quantities));

    assert!(characteristics.seasonality.has_weekly);
    assert!(characteristics.seasonality.weekly_strength > 0.3);
    assert_eq!(
        characteristics.seasonality.strength,
        characteristics.seasonality.weekly_strength
    );
}

#[test]
fn zero_demand_days_are_counted() {
    let quantities: Vec<u32> = (0..10).map(|i| if i % 2 == 0 { 8 } else { 0 }).collect();
    let characteristics = analyze(&series(&quantities));

    assert_eq!(characteristics.zero_demand_ratio, 0.5);
}

#[test]
fn monthly_pattern_needs_sixty_days() {
    let month_start_spike = |i: i64| -> u32 {
        use chrono::Datelike;
        let date = monday() + Duration::days(i);
        if date.day() <= 5 {
            50
        } else {
            10
        }
    };

    let long: Vec<u32> = (0..90).map(month_start_spike).collect();
    let characteristics = analyze(&series(&long));
    assert!(characteristics.seasonality.has_monthly);
    assert!(characteristics.seasonality.monthly_strength > 0.15);

    let short: Vec<u32> = (0..50).map(month_start_spike).collect();
    let characteristics = analyze(&series(&short));
    assert!(!characteristics.seasonality.has_monthly);
    assert_eq!(characteristics.seasonality.monthly_strength, 0.0);
}
