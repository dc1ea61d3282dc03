// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::ExpenseApi;
use crate::commands::expenses::{ExpenseRow, filters_from};
use crate::error::Reported;
use crate::notify::Notifier;
use crate::store::ExpenseStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Writes the filtered list in its stored order. Returns the number of rows.
pub fn export_expenses<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<usize> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    *store.filters_mut() = filters_from(sub)?;
    store.ensure_loaded().map_err(|_| Reported)?;
    let shown = store.filtered(now);

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            for e in &shown {
                wtr.serialize(ExpenseRow::from(*e))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&shown)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(shown.len())
}

pub fn handle<A: ExpenseApi, N: Notifier>(
    store: &mut ExpenseStore<A, N>,
    sub: &clap::ArgMatches,
    now: DateTime<Utc>,
) -> Result<()> {
    let n = export_expenses(store, sub, now)?;
    println!(
        "Exported {} expenses to {}",
        n,
        sub.get_one::<String>("out").unwrap()
    );
    Ok(())
}
