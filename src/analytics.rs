// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month-by-category aggregation behind the analytics chart.
//!
//! The month range runs from the month of the earliest expense up to the
//! current month with no gaps. Expenses dated in a later month than `now`
//! fall outside that range; they are left out of the buckets and counted in
//! [`MonthlySeries::beyond_range`].
//!
//! Sums saturate at the `Decimal` bounds instead of overflowing.

use crate::models::{Category, Expense};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(at: DateTime<Utc>) -> Self {
        Self::new(at.year(), at.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Months from `self` to `later`; negative if `later` is earlier.
    pub fn months_until(self, later: MonthKey) -> i64 {
        (later.year as i64 - self.year as i64) * 12 + (later.month as i64 - self.month as i64)
    }

    /// YYYY-MM
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// e.g. "Mar 2024"
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(d) => d.format("%b %Y").to_string(),
            None => self.key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBucket {
    pub month: MonthKey,
    sums: [Decimal; Category::ALL.len()],
}

impl MonthlyBucket {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            sums: [Decimal::ZERO; Category::ALL.len()],
        }
    }

    pub fn amount_for(&self, category: Category) -> Decimal {
        self.sums[category.index()]
    }

    pub fn add(&mut self, category: Category, amount: Decimal) {
        let slot = &mut self.sums[category.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.sums.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySeries {
    pub buckets: Vec<MonthlyBucket>,
    pub beyond_range: usize,
}

impl MonthlySeries {
    pub fn bucket(&self, month: MonthKey) -> Option<&MonthlyBucket> {
        self.buckets.iter().find(|b| b.month == month)
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.buckets.iter().map(MonthlyBucket::total))
    }
}

/// Every month from the earliest expense (or `now` if later) through `now`.
pub fn month_range(expenses: &[Expense], now: DateTime<Utc>) -> Vec<MonthKey> {
    let current = MonthKey::of(now);
    let first = expenses
        .iter()
        .map(|e| MonthKey::of(e.date))
        .min()
        .map_or(current, |m| m.min(current));

    let mut months = Vec::new();
    let mut m = first;
    while m <= current {
        months.push(m);
        m = m.next();
    }
    months
}

pub fn monthly_breakdown(expenses: &[Expense], now: DateTime<Utc>) -> MonthlySeries {
    let months = month_range(expenses, now);
    let first = months[0];
    let mut buckets: Vec<MonthlyBucket> = months.into_iter().map(MonthlyBucket::empty).collect();
    let mut beyond_range = 0;

    for e in expenses {
        let offset = first.months_until(MonthKey::of(e.date));
        match usize::try_from(offset).ok().and_then(|i| buckets.get_mut(i)) {
            Some(bucket) => bucket.add(e.category, e.amount),
            None => {
                debug!(id = %e.id, date = %e.date, "expense outside chart range");
                beyond_range += 1;
            }
        }
    }

    MonthlySeries {
        buckets,
        beyond_range,
    }
}

/// Sum of the bucket for the month containing `now`; zero if absent.
pub fn this_month_total(series: &MonthlySeries, now: DateTime<Utc>) -> Decimal {
    series
        .bucket(MonthKey::of(now))
        .map_or(Decimal::ZERO, MonthlyBucket::total)
}

/// Per-category totals in `Category::ALL` order.
pub fn category_totals<'a, I>(expenses: I) -> Vec<(Category, Decimal)>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut sums = [Decimal::ZERO; Category::ALL.len()];
    for e in expenses {
        let slot = &mut sums[e.category.index()];
        *slot = slot.saturating_add(e.amount);
    }
    Category::ALL.into_iter().zip(sums).collect()
}
