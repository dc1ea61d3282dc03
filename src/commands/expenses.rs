// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{category_totals, saturating_sum};
use crate::client::ExpenseApi;
use crate::error::Reported;
use crate::models::{Category, Expense, ExpenseDraft, ExpenseFilters, PaymentMode};
use crate::notify::Notifier;
use crate::store::ExpenseStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Filter state from `--period`, `--category` and `--payment-mode`.
pub fn filters_from(sub: &clap::ArgMatches) -> Result<ExpenseFilters> {
    let mut filters = ExpenseFilters::default();
    if let Some(period) = sub.get_one::<String>("period") {
        filters.date_window = period.parse()?;
    }
    if let Some(cats) = sub.get_many::<String>("category") {
        for c in cats {
            filters.categories.insert(c.parse::<Category>()?);
        }
    }
    if let Some(modes) = sub.get_many::<String>("payment-mode") {
        for m in modes {
            filters.payment_modes.insert(m.parse::<PaymentMode>()?);
        }
    }
    Ok(filters)
}

pub fn draft_from(sub: &clap::ArgMatches, now: DateTime<Utc>) -> Result<ExpenseDraft> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now,
    };
    let mut draft = ExpenseDraft::new(amount, date)?;
    if let Some(c) = sub.get_one::<String>("category") {
        draft = draft.with_category(c.parse()?);
    }
    if let Some(m) = sub.get_one::<String>("payment-mode") {
        draft = draft.with_payment_mode(m.parse()?);
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        draft = draft.with_notes(n)?;
    }
    Ok(draft)
}

pub fn add<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<()> {
    let draft = draft_from(sub, now)?;
    let created = store.create(&draft).map_err(|_| Reported)?;
    println!("id: {}", created.id);
    Ok(())
}

pub fn remove<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store.remove(id).map_err(|_| Reported)?;
    println!("Deleted expense {}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub payment_mode: String,
    pub notes: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id.clone(),
            date: e.date.format("%Y-%m-%d").to_string(),
            category: e.category.to_string(),
            amount: fmt_amount(&e.amount),
            payment_mode: e.payment_mode.to_string(),
            notes: e.notes.clone(),
        }
    }
}

/// Loads if needed, applies the filters, newest first.
pub fn query_rows<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<Vec<ExpenseRow>> {
    *store.filters_mut() = filters_from(sub)?;
    store.ensure_loaded().map_err(|_| Reported)?;

    let mut shown = store.filtered(now);
    shown.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        shown.truncate(*limit);
    }
    Ok(shown.into_iter().map(ExpenseRow::from).collect())
}

pub fn list<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub, now)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses found with the current filters.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.category.clone(),
                r.amount.clone(),
                r.payment_mode.clone(),
                r.notes.clone(),
                r.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Category", "Amount", "Payment Mode", "Notes", "Id"],
            rows
        )
    );

    let filtered = store.filtered(now);
    let total = saturating_sum(filtered.iter().map(|e| e.amount));
    let by_cat: Vec<String> = category_totals(filtered.iter().copied())
        .into_iter()
        .filter(|(_, amt)| !amt.is_zero())
        .map(|(c, amt)| format!("{} {}", c, fmt_amount(&amt)))
        .collect();
    let active = store.filters().active_count();
    println!(
        "Showing {} expenses ({}){} | total {} | {}",
        data.len(),
        store.filters().date_window,
        if active > 0 {
            format!(", {} filters", active)
        } else {
            String::new()
        },
        fmt_amount(&total),
        by_cat.join(", ")
    );
    Ok(())
}
