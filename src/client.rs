// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ApiError;
use crate::models::{Expense, ExpenseDraft, Session};
use crate::utils::http_client;
use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Remote expense endpoints. Every call is scoped to the token's owner.
pub trait ExpenseApi {
    fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError>;
    fn create_expense(&self, token: &str, draft: &ExpenseDraft) -> Result<Expense, ApiError>;
    fn delete_expense(&self, token: &str, id: &str) -> Result<(), ApiError>;
}

/// Remote account endpoints issuing bearer tokens.
pub trait AuthApi {
    fn register(&self, name: &str, email: &str, password: &str) -> Result<Session, ApiError>;
    fn login(&self, email: &str, password: &str) -> Result<Session, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: String,
}

pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid API url '{}'", base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("API url '{}' cannot be used as a base", base_url);
        }
        Ok(Self {
            client: http_client()?,
            base,
        })
    }

    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// The `{"message": ...}` field of an error body, else the status reason.
fn server_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ServerMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = server_message(status, &body);
    debug!(status = status.as_u16(), %message, "request rejected");
    Err(ApiError::from_status(status.as_u16(), message))
}

/// Decodes each record on its own; records that do not decode are skipped.
pub fn decode_expense_list(values: Vec<Value>) -> Vec<Expense> {
    let total = values.len();
    let expenses: Vec<Expense> = values
        .into_iter()
        .filter_map(|v| {
            let id = v.get("_id").and_then(Value::as_str).map(str::to_owned);
            match serde_json::from_value::<Expense>(v) {
                Ok(e) => Some(e),
                Err(err) => {
                    let id = id.as_deref().unwrap_or("?");
                    warn!(id, error = %err, "skipping expense record");
                    None
                }
            }
        })
        .collect();
    if expenses.len() < total {
        let skipped = total - expenses.len();
        warn!(skipped, total, "some expense records were unreadable");
    }
    expenses
}

impl ExpenseApi for HttpApi {
    fn list_expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        let url = self.endpoint(&["expenses"]);
        debug!(%url, "GET");
        let resp = self.client.get(url).bearer_auth(token).send()?;
        let values: Vec<Value> = check(resp)?.json()?;
        Ok(decode_expense_list(values))
    }

    fn create_expense(&self, token: &str, draft: &ExpenseDraft) -> Result<Expense, ApiError> {
        let url = self.endpoint(&["expenses"]);
        debug!(%url, "POST");
        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(draft)
            .send()?;
        Ok(check(resp)?.json()?)
    }

    fn delete_expense(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["expenses", id]);
        debug!(%url, "DELETE");
        let resp = self.client.delete(url).bearer_auth(token).send()?;
        check(resp)?;
        Ok(())
    }
}

impl AuthApi for HttpApi {
    fn register(&self, name: &str, email: &str, password: &str) -> Result<Session, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&["auth", "register"]))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()?;
        Ok(check(resp)?.json()?)
    }

    fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&["auth", "login"]))
            .json(&json!({ "email": email, "password": password }))
            .send()?;
        Ok(check(resp)?.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_and_escapes_segments() {
        let api = HttpApi::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            api.endpoint(&["expenses"]).as_str(),
            "http://localhost:5000/api/expenses"
        );
        assert_eq!(
            api.endpoint(&["expenses", "a/b"]).as_str(),
            "http://localhost:5000/api/expenses/a%2Fb"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(HttpApi::new("mailto:me@example.com").is_err());
        assert!(HttpApi::new("not a url").is_err());
    }

    #[test]
    fn server_message_prefers_body_message() {
        let body = r#"{"message":"Amount is required"}"#;
        let msg = server_message(StatusCode::BAD_REQUEST, body);
        assert_eq!(msg, "Amount is required");
    }

    #[test]
    fn server_message_falls_back_to_reason() {
        assert_eq!(
            server_message(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "Not Found"
        );
        assert_eq!(
            server_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(
            server_message(StatusCode::from_u16(599).unwrap(), "{}"),
            "request failed"
        );
    }

    #[test]
    fn unreadable_record_does_not_sink_the_list() {
        let values: Vec<Value> = serde_json::from_str(
            r#"[
                {"_id":"big","amount":1e30,"category":"Travel","notes":"",
                 "date":"2024-03-01T00:00:00Z","paymentMode":"Cash"},
                {"_id":"ok","amount":12.5,"category":"Groceries","notes":"milk",
                 "date":"2024-03-02T00:00:00Z","paymentMode":"UPI"},
                {"_id":"odd","amount":3,"category":"Lottery","notes":"",
                 "date":"2024-03-03T00:00:00Z","paymentMode":"Cash"}
            ]"#,
        )
        .unwrap();
        let expenses = decode_expense_list(values);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, "ok");
    }
}
