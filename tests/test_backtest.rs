use std::cell::Cell;

use assert_approx_eq::assert_approx_eq;
use chrono::{Duration, NaiveDate};
use forecast_demand::backtest::{accuracy_metrics, evaluate};
use forecast_demand::{stats, PreparedSeries, SalesRecord};

fn series(quantities: &[u32]) -> PreparedSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records: Vec<SalesRecord> = quantities
        .iter()
        .enumerate()
        .map(|(i, &quantity_sold)| SalesRecord {
            date: start + Duration::days(i as i64),
            quantity_sold,
        })
        .collect();
    PreparedSeries::from_records(&records)
}

#[test]
fn constant_series_backtests_clean() {
    let data = series(&[6; 40]);
    let accuracy = evaluate(&data, 0.3, |train, horizon| {
        vec![stats::mean(&train.quantities()); horizon]
    });

    assert_approx_eq!(accuracy.mae, 0.0);
    assert_approx_eq!(accuracy.mape, 0.0);
    assert_approx_eq!(accuracy.rmse, 0.0);
}

#[test]
fn short_series_skips_scoring() {
    let data = series(&[4; 6]);
    let accuracy = evaluate(&data, 0.3, |_, _| {
        panic!("a two-day test segment should not be scored")
    });

    assert_eq!(accuracy, Default::default());
}

#[test]
fn split_holds_out_the_trailing_segment() {
    let data = series(&[5; 10]);
    let seen = Cell::new((0usize, 0usize));

    evaluate(&data, 0.3, |train, horizon| {
        seen.set((train.len(), horizon));
        vec![5.0; horizon]
    });

    // 70% of 10 days rounds down to a 6-day training prefix.
    assert_eq!(seen.get(), (6, 4));
}

#[test]
fn short_forecasts_are_padded_with_their_last_value() {
    let data = series(&[5, 5, 5, 5, 5, 5, 5, 6, 7, 8]);
    let accuracy = evaluate(&data, 0.3, |_, _| vec![5.0]);

    // Held out: [5, 6, 7, 8] against a padded [5, 5, 5, 5].
    assert_approx_eq!(accuracy.mae, 1.5);
    assert_approx_eq!(accuracy.rmse, (14.0_f64 / 4.0).sqrt());
    assert_approx_eq!(accuracy.mape, (0.0 + 1.0 / 6.0 + 2.0 / 7.0 + 3.0 / 8.0) / 4.0 * 100.0);
}

#[test]
fn accuracy_metrics_floor_actuals_at_one() {
    let accuracy = accuracy_metrics(&[5.0, 5.0], &[0.0, 0.0]);

    assert_approx_eq!(accuracy.mae, 5.0);
    assert_approx_eq!(accuracy.rmse, 5.0);
    assert_approx_eq!(accuracy.mape, 500.0);
}

#[test]
fn accuracy_metrics_handle_empty_input() {
    assert_eq!(accuracy_metrics(&[], &[]), Default::default());
}
