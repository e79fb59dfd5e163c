//! Monthly revenue and acquisition series over a trailing window.

use crate::{
    metrics::ratio,
    types::{Client, Timestamp},
};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MONTHS_BACK: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    /// `YYYY-MM`
    pub month: String,
    /// `Jan 2026`
    pub month_label: String,
    pub revenue: f64,
    pub transactions: usize,
    pub new_clients: usize,
    pub average_order_value: f64,
}

/// A calendar month as a half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl MonthWindow {
    /// The month `offset` months before the month containing `reference`.
    pub fn trailing(reference: Timestamp, offset: u32) -> Self {
        let index = reference.year() * 12 + reference.month0() as i32 - offset as i32;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        Self {
            year,
            month,
            start: month_start(year, month),
            end: month_start(next_year, next_month),
        }
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        t >= self.start && t < self.end
    }

    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    pub fn label(&self) -> String {
        self.start.format("%b %Y").to_string()
    }
}

fn month_start(year: i32, month: u32) -> Timestamp {
    // Day 1 of a month in 1..=12 always exists.
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// One point per month for the `months_back` months ending with the
/// reference month, oldest first.
pub fn compute_time_series(
    clients: &[Client],
    months_back: u32,
    reference: Timestamp,
) -> Vec<TimeSeriesPoint> {
    (0..months_back)
        .rev()
        .map(|offset| {
            let window = MonthWindow::trailing(reference, offset);

            let (revenue, transactions) = clients
                .iter()
                .flat_map(|c| c.purchases.iter())
                .filter(|p| window.contains(p.date))
                .fold((0.0, 0usize), |(sum, n), p| (sum + p.total, n + 1));

            let new_clients = clients
                .iter()
                .filter(|c| window.contains(c.registration_date))
                .count();

            TimeSeriesPoint {
                month: window.key(),
                month_label: window.label(),
                revenue,
                transactions,
                new_clients,
                average_order_value: ratio(revenue, transactions as f64),
            }
        })
        .collect()
}

/// The default 12-month window ending now.
pub fn compute_time_series_now(clients: &[Client]) -> Vec<TimeSeriesPoint> {
    compute_time_series(clients, DEFAULT_MONTHS_BACK, Utc::now())
}
