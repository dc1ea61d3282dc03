// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory expense list for the signed-in user.
//!
//! Local state only changes after the remote service confirms a write, and
//! every failed operation emits exactly one error notification.

use crate::analytics::{MonthlySeries, monthly_breakdown};
use crate::client::ExpenseApi;
use crate::error::ApiError;
use crate::filter::filter_expenses;
use crate::models::{Expense, ExpenseDraft, ExpenseFilters, Session};
use crate::notify::{Notification, Notifier};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// A fetch in flight, stamped with the session generation it was issued for.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: String,
}

impl LoadTicket {
    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(usize),
    /// The session changed while the fetch was in flight.
    Stale,
    NoSession,
    AlreadyLoaded,
}

pub struct ExpenseStore<A, N> {
    api: A,
    notifier: N,
    session: Option<Session>,
    generation: u64,
    loaded_generation: Option<u64>,
    expenses: Vec<Expense>,
    filters: ExpenseFilters,
}

impl<A: ExpenseApi, N: Notifier> ExpenseStore<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            session: None,
            generation: 0,
            loaded_generation: None,
            expenses: Vec::new(),
            filters: ExpenseFilters::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn filters(&self) -> &ExpenseFilters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut ExpenseFilters {
        &mut self.filters
    }

    /// True until the first fetch for the current session has finished.
    pub fn is_loading(&self) -> bool {
        self.session.is_some() && self.loaded_generation != Some(self.generation)
    }

    pub fn sign_in(&mut self, session: Session) {
        info!(user = %session.user.email, "signed in");
        self.session = Some(session);
        self.reset_for_new_identity();
    }

    pub fn sign_out(&mut self) {
        if self.session.take().is_some() {
            info!("signed out");
        }
        self.reset_for_new_identity();
    }

    fn reset_for_new_identity(&mut self) {
        self.generation += 1;
        self.loaded_generation = None;
        self.expenses.clear();
    }

    pub fn begin_load(&self) -> Option<LoadTicket> {
        self.session.as_ref().map(|s| LoadTicket {
            generation: self.generation,
            token: s.token.clone(),
        })
    }

    /// Applies a fetch result unless the session changed since `begin_load`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Expense>, ApiError>,
    ) -> Result<LoadOutcome, ApiError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale expense fetch"
            );
            return Ok(LoadOutcome::Stale);
        }
        self.loaded_generation = Some(self.generation);
        match result {
            Ok(list) => {
                let n = list.len();
                self.expenses = list;
                debug!(count = n, "expenses loaded");
                Ok(LoadOutcome::Applied(n))
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to fetch expenses: {}", e)));
                Err(e)
            }
        }
    }

    /// Replaces the local list with the server's. No-op without a session.
    pub fn load(&mut self) -> Result<LoadOutcome, ApiError> {
        let Some(ticket) = self.begin_load() else {
            return Ok(LoadOutcome::NoSession);
        };
        let result = self.api.list_expenses(ticket.token());
        self.finish_load(ticket, result)
    }

    /// Fetches at most once per sign-in.
    pub fn ensure_loaded(&mut self) -> Result<LoadOutcome, ApiError> {
        if self.session.is_some() && self.loaded_generation == Some(self.generation) {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        self.load()
    }

    fn require_token(&mut self, action: &str) -> Result<String, ApiError> {
        match &self.session {
            Some(s) => Ok(s.token.clone()),
            None => {
                let e = ApiError::NotAuthenticated;
                self.notifier
                    .notify(Notification::error(format!("Failed to {}: {}", action, e)));
                Err(e)
            }
        }
    }

    pub fn create(&mut self, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        let token = self.require_token("add expense")?;
        match self.api.create_expense(&token, draft) {
            Ok(created) => {
                debug!(id = %created.id, "expense created");
                self.notifier.notify(Notification::info(
                    "Expense Added",
                    format!("{} added to {}", created.amount, created.category),
                ));
                self.expenses.push(created.clone());
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to add expense: {}", e)));
                Err(e)
            }
        }
    }

    /// Deletes remotely, then drops matching local records. Returns how many were dropped.
    pub fn remove(&mut self, id: &str) -> Result<usize, ApiError> {
        let token = self.require_token("delete expense")?;
        match self.api.delete_expense(&token, id) {
            Ok(()) => {
                let before = self.expenses.len();
                self.expenses.retain(|e| e.id != id);
                let removed = before - self.expenses.len();
                debug!(%id, removed, "expense deleted");
                Ok(removed)
            }
            Err(e) => {
                warn!(%id, error = %e, "delete failed");
                self.notifier
                    .notify(Notification::error(format!("Failed to delete expense: {}", e)));
                Err(e)
            }
        }
    }

    /// The list view's working set under the current filters.
    pub fn filtered(&self, now: DateTime<Utc>) -> Vec<&Expense> {
        filter_expenses(&self.expenses, &self.filters, now)
    }

    /// Chart data over the full, unfiltered list.
    pub fn monthly(&self, now: DateTime<Utc>) -> MonthlySeries {
        monthly_breakdown(&self.expenses, now)
    }
}
