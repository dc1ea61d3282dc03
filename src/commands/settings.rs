// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::client::HttpApi;
use crate::config::{self, Settings};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap().trim();
            // Fails early on URLs the client could not use
            HttpApi::new(url)?;
            config::set_api_url(conn, url)?;
            println!("API url set to {}", url);
        }
        Some(("show", _)) => {
            let user = match &settings.session {
                Some(s) if !s.user.email.is_empty() => s.user.email.clone(),
                Some(_) => "(token from environment)".to_string(),
                None => "(not signed in)".to_string(),
            };
            let rows = vec![
                vec!["api_url".to_string(), settings.api_url.clone()],
                vec!["user".to_string(), user],
                vec![
                    "database".to_string(),
                    crate::db::db_path()?.display().to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
