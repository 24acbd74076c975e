//! Sales history handling and daily series preparation

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats;

/// A single recorded sale: a calendar date and the units sold that day.
///
/// Records may arrive unordered and may repeat dates; preparation aggregates
/// them into one observation per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the sale
    pub date: NaiveDate,
    /// Units sold on that date
    pub quantity_sold: u32,
}

/// One day of the prepared series, with calendar and moving-average features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar date
    pub date: NaiveDate,
    /// Total units sold on that date (0 for days without a sale)
    pub quantity_sold: f64,
    /// Day of week, 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// Day of month, 1-based
    pub day_of_month: u32,
    /// Month, 1-based
    pub month: u32,
    /// Quarter, 1-based
    pub quarter: u32,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Trailing 7-day mean, partial windows allowed
    pub ma_7: f64,
    /// Trailing 30-day mean, partial windows allowed
    pub ma_30: f64,
}

/// An ordered, gap-free daily demand series.
///
/// Spans the full calendar range of the input records; days without a sale
/// carry an explicit zero, since the absence of a sale is a real zero-demand
/// data point rather than missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedSeries {
    observations: Vec<DailyObservation>,
}

impl PreparedSeries {
    /// Build a prepared series from raw sales records.
    ///
    /// Duplicate dates are aggregated by summation, the series is sorted and
    /// reindexed onto the complete daily calendar range, and calendar plus
    /// moving-average features are appended. The output is identical for any
    /// permutation of the input.
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *totals.entry(record.date).or_insert(0.0) += f64::from(record.quantity_sold);
        }

        let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Self {
                    observations: Vec::new(),
                }
            }
        };

        let mut dates = Vec::new();
        let mut quantities = Vec::new();
        let mut day = first;
        while day <= last {
            dates.push(day);
            quantities.push(totals.get(&day).copied().unwrap_or(0.0));
            day += Duration::days(1);
        }

        let observations = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let day_of_week = date.weekday().num_days_from_monday();
                DailyObservation {
                    date,
                    quantity_sold: quantities[i],
                    day_of_week,
                    day_of_month: date.day(),
                    month: date.month(),
                    quarter: (date.month() - 1) / 3 + 1,
                    is_weekend: day_of_week >= 5,
                    ma_7: trailing_mean(&quantities, i, 7),
                    ma_30: trailing_mean(&quantities, i, 30),
                }
            })
            .collect();

        Self { observations }
    }

    /// The daily observations in calendar order
    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series contains no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Daily quantities in calendar order
    pub fn quantities(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.quantity_sold).collect()
    }

    /// Last calendar date of the series, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// The first `len` observations as a new series
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            observations: self.observations[..len.min(self.observations.len())].to_vec(),
        }
    }
}

fn trailing_mean(values: &[f64], end: usize, window: usize) -> f64 {
    let start = (end + 1).saturating_sub(window);
    stats::mean(&values[start..=end])
}

/// Loader for sales history files
#[derive(Debug)]
pub struct SalesHistoryLoader;

impl SalesHistoryLoader {
    /// Load sales records from a CSV file with `date,quantity_sold` columns.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: SalesRecord = row?;
            records.push(record);
        }
        Ok(records)
    }
}
