// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use spendbook::client::ExpenseApi;
use spendbook::error::ApiError;
use spendbook::models::{Category, Expense, ExpenseDraft, PaymentMode, Session, UserProfile};
use spendbook::notify::{Level, Notification, Notifier};
use std::cell::{Cell, RefCell};

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn expense(id: &str, date: DateTime<Utc>, category: Category, amount: i64) -> Expense {
    Expense {
        id: id.to_string(),
        amount: Decimal::from(amount),
        category,
        notes: String::new(),
        date,
        payment_mode: PaymentMode::Cash,
        owner: Some("u1".to_string()),
    }
}

pub fn session(token: &str) -> Session {
    Session {
        token: token.to_string(),
        user: UserProfile {
            id: format!("id-{}", token),
            email: format!("{}@example.com", token),
            name: token.to_string(),
        },
    }
}

/// Server double: holds records, counts calls, and fails on demand.
#[derive(Default)]
pub struct FakeApi {
    pub remote: RefCell<Vec<Expense>>,
    pub fail_list: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub fail_delete: Cell<bool>,
    pub list_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub delete_calls: Cell<usize>,
    pub tokens: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with(expenses: Vec<Expense>) -> Self {
        let api = Self::default();
        *api.remote.borrow_mut() = expenses;
        api
    }
}

impl ExpenseApi for FakeApi {
    fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_string());
        if self.fail_list.get() {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(self.remote.borrow().clone())
    }

    fn create_expense(&self, token: &str, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_string());
        if self.fail_create.get() {
            return Err(ApiError::Server {
                status: 500,
                message: "Server error".into(),
            });
        }
        let created = Expense {
            id: format!("srv-{}", self.create_calls.get()),
            amount: draft.amount(),
            category: draft.category(),
            notes: draft.notes().to_string(),
            date: draft.date(),
            payment_mode: draft.payment_mode(),
            owner: Some("u1".to_string()),
        };
        self.remote.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn delete_expense(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_string());
        if self.fail_delete.get() {
            return Err(ApiError::NotFound("Expense not found".into()));
        }
        self.remote.borrow_mut().retain(|e| e.id != id);
        Ok(())
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub seen: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> impl Iterator<Item = &Notification> {
        self.seen.iter().filter(|n| n.level == Level::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, n: Notification) {
        self.seen.push(n);
    }
}
