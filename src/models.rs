// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::DraftError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const NOTES_MAX_CHARS: usize = 100;

// Lowercase, with '-' and '_' folded to spaces, so "credit-card" == "Credit Card".
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Rental,
    Groceries,
    Entertainment,
    Travel,
    Others,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Rental,
        Category::Groceries,
        Category::Entertainment,
        Category::Travel,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rental => "Rental",
            Category::Groceries => "Groceries",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Others => "Others",
        }
    }

    /// Position in `ALL`, used to index per-category sums.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.as_str()) == wanted)
            .ok_or_else(|| DraftError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Net Banking")]
    NetBanking,
    Cash,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Upi,
        PaymentMode::CreditCard,
        PaymentMode::NetBanking,
        PaymentMode::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::CreditCard => "Credit Card",
            PaymentMode::NetBanking => "Net Banking",
            PaymentMode::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        PaymentMode::ALL
            .into_iter()
            .find(|m| normalize(m.as_str()) == wanted)
            .ok_or_else(|| DraftError::UnknownPaymentMode(s.to_string()))
    }
}

/// Named date windows offered by the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateWindow {
    #[default]
    #[serde(rename = "This month")]
    ThisMonth,
    #[serde(rename = "Last 30 days")]
    Last30Days,
    #[serde(rename = "Last 90 days")]
    Last90Days,
    #[serde(rename = "All time")]
    AllTime,
}

impl DateWindow {
    pub const ALL: [DateWindow; 4] = [
        DateWindow::ThisMonth,
        DateWindow::Last30Days,
        DateWindow::Last90Days,
        DateWindow::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindow::ThisMonth => "This month",
            DateWindow::Last30Days => "Last 30 days",
            DateWindow::Last90Days => "Last 90 days",
            DateWindow::AllTime => "All time",
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateWindow {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        DateWindow::ALL
            .into_iter()
            .find(|w| normalize(w.as_str()) == wanted)
            .ok_or_else(|| DraftError::UnknownDateWindow(s.to_string()))
    }
}

/// An expense as held by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    #[serde(default)]
    pub notes: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "paymentMode")]
    pub payment_mode: PaymentMode,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Body of a create request. The server assigns the id and owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseDraft {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: Category,
    notes: String,
    date: DateTime<Utc>,
    #[serde(rename = "paymentMode")]
    payment_mode: PaymentMode,
}

impl ExpenseDraft {
    pub fn new(amount: Decimal, date: DateTime<Utc>) -> Result<Self, DraftError> {
        if amount <= Decimal::ZERO {
            return Err(DraftError::NonPositiveAmount(amount));
        }
        Ok(Self {
            amount,
            category: Category::Others,
            notes: String::new(),
            date,
            payment_mode: PaymentMode::Cash,
        })
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_payment_mode(mut self, payment_mode: PaymentMode) -> Self {
        self.payment_mode = payment_mode;
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Result<Self, DraftError> {
        let len = notes.chars().count();
        if len > NOTES_MAX_CHARS {
            return Err(DraftError::NotesTooLong(len));
        }
        self.notes = notes.to_string();
        Ok(self)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// List view filter state. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilters {
    pub date_window: DateWindow,
    pub categories: BTreeSet<Category>,
    pub payment_modes: BTreeSet<PaymentMode>,
}

impl ExpenseFilters {
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_payment_mode(&mut self, mode: PaymentMode) {
        if !self.payment_modes.remove(&mode) {
            self.payment_modes.insert(mode);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn active_count(&self) -> usize {
        self.categories.len() + self.payment_modes.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Bearer token plus the profile it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}
