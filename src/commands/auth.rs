// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::AuthApi;
use crate::config::{self, Settings};
use crate::models::Session;
use crate::utils::validate_email;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle<A: AuthApi>(
    api: &A,
    conn: &Connection,
    settings: &Settings,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let session = register(api, conn, sub)?;
            println!("Registered and signed in as {} <{}>", session.user.name, session.user.email);
        }
        Some(("login", sub)) => {
            let session = login(api, conn, sub)?;
            println!("Signed in as {} <{}>", session.user.name, session.user.email);
        }
        Some(("logout", _)) => {
            config::clear_session(conn)?;
            println!("Signed out");
        }
        Some(("status", _)) => match &settings.session {
            Some(s) if !s.user.email.is_empty() => {
                println!("Signed in as {} <{}> at {}", s.user.name, s.user.email, settings.api_url)
            }
            Some(_) => println!("Using token from environment at {}", settings.api_url),
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}

pub fn register<A: AuthApi>(api: &A, conn: &Connection, sub: &clap::ArgMatches) -> Result<Session> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let email = validate_email(sub.get_one::<String>("email").unwrap())?;
    let password = sub.get_one::<String>("password").unwrap();
    if name.is_empty() {
        anyhow::bail!("Name must not be empty");
    }
    let session = api
        .register(name, &email, password)
        .context("Registration failed")?;
    config::save_session(conn, &session)?;
    Ok(session)
}

pub fn login<A: AuthApi>(api: &A, conn: &Connection, sub: &clap::ArgMatches) -> Result<Session> {
    let email = validate_email(sub.get_one::<String>("email").unwrap())?;
    let password = sub.get_one::<String>("password").unwrap();
    let session = api.login(&email, password).context("Login failed")?;
    config::save_session(conn, &session)?;
    Ok(session)
}
