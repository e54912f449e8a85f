//! Reservation pricing
//!
//! A reservation is billed per started day between its start and end
//! midnights at the resource's daily rate. There is no proration and no
//! currency handling.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::window::DateWindow;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Number of started 24-hour periods between `start` and `end`.
///
/// Equal instants yield 0, as does an `end` before `start`.
pub fn billable_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let seconds = (end - start).num_seconds().max(0);
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// `billable_days × daily_rate` with no minimum.
pub fn total_cost(window: &DateWindow, daily_rate: Decimal) -> Decimal {
    PricingPolicy::default().total(window, daily_rate)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Lower bound on billed days, so a same-day reservation can cost one day.
    pub minimum_days: u32,
}

impl PricingPolicy {
    pub fn days(&self, window: &DateWindow) -> i64 {
        billable_days(window.start_at(), window.end_at()).max(i64::from(self.minimum_days))
    }

    pub fn total(&self, window: &DateWindow, daily_rate: Decimal) -> Decimal {
        Decimal::from(self.days(window)) * daily_rate
    }
}
