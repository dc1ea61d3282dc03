// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DateWindow, Expense, ExpenseFilters};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight on the first day of the month containing `at`.
pub fn month_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(at.year(), at.month(), 1).unwrap_or(at.date_naive());
    Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
}

/// Inclusive bounds for a date window, or `None` when it does not restrict.
pub fn window_bounds(
    window: DateWindow,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    match window {
        DateWindow::ThisMonth => Some((month_start(now), now)),
        DateWindow::Last30Days => Some((now - chrono::Duration::days(30), now)),
        DateWindow::Last90Days => Some((now - chrono::Duration::days(90), now)),
        DateWindow::AllTime => None,
    }
}

pub fn passes_date_window(expense: &Expense, window: DateWindow, now: DateTime<Utc>) -> bool {
    match window_bounds(window, now) {
        Some((start, end)) => start <= expense.date && expense.date <= end,
        None => true,
    }
}

pub fn passes(expense: &Expense, filters: &ExpenseFilters, now: DateTime<Utc>) -> bool {
    passes_date_window(expense, filters.date_window, now)
        && (filters.categories.is_empty() || filters.categories.contains(&expense.category))
        && (filters.payment_modes.is_empty()
            || filters.payment_modes.contains(&expense.payment_mode))
}

/// Keeps the expenses that pass every filter, in their original order.
pub fn filter_expenses<'a>(
    expenses: &'a [Expense],
    filters: &ExpenseFilters,
    now: DateTime<Utc>,
) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| passes(e, filters, now))
        .collect()
}
