// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures talking to the remote expense service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not signed in; run `spendbook auth login` first")]
    NotAuthenticated,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rejected by server: {0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-success HTTP status and the server's message onto the taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            400 | 422 => ApiError::Validation(message),
            _ => ApiError::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::from_status(status.as_u16(), e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Invalid input caught before anything is sent.
#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("Amount must be a positive number (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("Notes must be {max} characters or less (got {0})", max = crate::models::NOTES_MAX_CHARS)]
    NotesTooLong(usize),

    #[error("Unknown category '{0}' (expected Rental, Groceries, Entertainment, Travel or Others)")]
    UnknownCategory(String),

    #[error("Unknown payment mode '{0}' (expected UPI, Credit Card, Net Banking or Cash)")]
    UnknownPaymentMode(String),

    #[error("Unknown period '{0}' (expected this-month, last-30-days, last-90-days or all-time)")]
    UnknownDateWindow(String),
}

/// Marks a failure the user has already been notified about.
#[derive(Error, Debug)]
#[error("operation failed")]
pub struct Reported;
