// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{MonthlySeries, this_month_total};
use crate::client::ExpenseApi;
use crate::error::Reported;
use crate::models::Category;
use crate::notify::Notifier;
use crate::store::ExpenseStore;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct MonthRow {
    pub month: String,
    pub label: String,
    pub categories: BTreeMap<String, String>,
    pub total: String,
}

pub fn month_rows(series: &MonthlySeries) -> Vec<MonthRow> {
    series
        .buckets
        .iter()
        .map(|b| MonthRow {
            month: b.month.key(),
            label: b.month.label(),
            categories: Category::ALL
                .iter()
                .map(|c| (c.to_string(), fmt_amount(&b.amount_for(*c))))
                .collect(),
            total: fmt_amount(&b.total()),
        })
        .collect()
}

pub fn handle<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    store.ensure_loaded().map_err(|_| Reported)?;

    let series = store.monthly(now);
    let data = month_rows(&series);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if store.expenses().is_empty() {
        println!("Add expenses to see your spending patterns");
        return Ok(());
    }

    let mut headers = vec!["Month"];
    headers.extend(Category::ALL.iter().map(|c| c.as_str()));
    headers.push("Total");
    let rows: Vec<Vec<String>> = series
        .buckets
        .iter()
        .map(|b| {
            let mut row = vec![b.month.label()];
            row.extend(Category::ALL.iter().map(|c| fmt_amount(&b.amount_for(*c))));
            row.push(fmt_amount(&b.total()));
            row
        })
        .collect();
    println!("{}", pretty_table(&headers, rows));
    println!(
        "This month's total: {}",
        fmt_amount(&this_month_total(&series, now))
    );
    if series.beyond_range > 0 {
        eprintln!(
            "warning: {} expense(s) dated after the current month are not charted",
            series.beyond_range
        );
    }
    Ok(())
}
