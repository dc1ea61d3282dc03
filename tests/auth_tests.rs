// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use spendbook::client::AuthApi;
use spendbook::commands::auth;
use spendbook::error::ApiError;
use spendbook::models::{Session, UserProfile};
use spendbook::{cli, config, db};
use std::cell::RefCell;

#[derive(Default)]
struct FakeAuth {
    logins: RefCell<Vec<(String, String)>>,
}

impl AuthApi for FakeAuth {
    fn register(&self, name: &str, email: &str, _password: &str) -> Result<Session, ApiError> {
        if email == "taken@example.com" {
            return Err(ApiError::Validation("Email already registered".into()));
        }
        Ok(Session {
            token: "new-token".into(),
            user: UserProfile {
                id: "u9".into(),
                email: email.into(),
                name: name.into(),
            },
        })
    }

    fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.logins
            .borrow_mut()
            .push((email.to_string(), password.to_string()));
        if password != "secret" {
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
        Ok(Session {
            token: "tok".into(),
            user: UserProfile {
                id: "u1".into(),
                email: email.into(),
                name: "Alice".into(),
            },
        })
    }
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn auth_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendbook", "auth"];
    argv.extend_from_slice(args);
    let m = cli::build_cli().get_matches_from(argv);
    let (_, auth_m) = m.subcommand().unwrap();
    let (_, sub) = auth_m.subcommand().unwrap();
    sub.clone()
}

#[test]
fn login_normalizes_email_and_stores_session() {
    let conn = setup();
    let api = FakeAuth::default();
    let sub = auth_matches(&["login", "--email", " Alice@Example.com ", "--password", "secret"]);
    let session = auth::login(&api, &conn, &sub).unwrap();

    assert_eq!(api.logins.borrow()[0].0, "alice@example.com");
    assert_eq!(config::load_stored(&conn).unwrap().session, Some(session));
}

#[test]
fn rejected_login_stores_nothing() {
    let conn = setup();
    let sub = auth_matches(&["login", "--email", "a@example.com", "--password", "nope"]);
    let err = auth::login(&FakeAuth::default(), &conn, &sub).unwrap_err();
    assert!(err.to_string().contains("Login failed"));
    assert!(config::load_stored(&conn).unwrap().session.is_none());
}

#[test]
fn malformed_email_never_reaches_the_server() {
    let conn = setup();
    let api = FakeAuth::default();
    let sub = auth_matches(&["login", "--email", "not-an-email", "--password", "secret"]);
    assert!(auth::login(&api, &conn, &sub).is_err());
    assert!(api.logins.borrow().is_empty());
}

#[test]
fn register_signs_in() {
    let conn = setup();
    let sub = auth_matches(&[
        "register", "--name", "Bob", "--email", "bob@example.com", "--password", "pw",
    ]);
    let session = auth::register(&FakeAuth::default(), &conn, &sub).unwrap();
    assert_eq!(session.user.name, "Bob");
    assert_eq!(
        db::get_setting(&conn, "token").unwrap().as_deref(),
        Some("new-token")
    );

    let sub = auth_matches(&[
        "register", "--name", "Eve", "--email", "taken@example.com", "--password", "pw",
    ]);
    assert!(auth::register(&FakeAuth::default(), &conn, &sub).is_err());
}
