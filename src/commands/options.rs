// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, DateWindow, PaymentMode};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle() -> Result<()> {
    let width = Category::ALL.len().max(PaymentMode::ALL.len()).max(DateWindow::ALL.len());
    let cell = |v: Option<&str>| v.unwrap_or("").to_string();
    let rows: Vec<Vec<String>> = (0..width)
        .map(|i| {
            vec![
                cell(Category::ALL.get(i).map(|c| c.as_str())),
                cell(PaymentMode::ALL.get(i).map(|m| m.as_str())),
                cell(DateWindow::ALL.get(i).map(|w| w.as_str())),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Payment Mode", "Period"], rows)
    );
    Ok(())
}
