// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use spendbook::client::HttpApi;
use spendbook::error::Reported;
use spendbook::notify::ConsoleNotifier;
use spendbook::store::ExpenseStore;
use spendbook::{cli, commands, config, db};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let settings = config::load(&conn)?;
    let now = Utc::now();

    let open_store = || -> Result<ExpenseStore<HttpApi, ConsoleNotifier>> {
        let mut store = ExpenseStore::new(HttpApi::new(&settings.api_url)?, ConsoleNotifier);
        if let Some(session) = settings.session.clone() {
            store.sign_in(session);
        }
        Ok(store)
    };

    match matches.subcommand() {
        Some(("auth", sub)) => {
            let api = HttpApi::new(&settings.api_url)?;
            commands::auth::handle(&api, &conn, &settings, sub)?
        }
        Some(("config", sub)) => commands::settings::handle(&conn, &settings, sub)?,
        Some(("add", sub)) => commands::expenses::add(&mut open_store()?, sub, now)?,
        Some(("list", sub)) => commands::expenses::list(&mut open_store()?, sub, now)?,
        Some(("rm", sub)) => commands::expenses::remove(&mut open_store()?, sub)?,
        Some(("analytics", sub)) => commands::analytics::handle(&mut open_store()?, sub, now)?,
        Some(("export", sub)) => commands::exporter::handle(&mut open_store()?, sub, now)?,
        Some(("options", _)) => commands::options::handle()?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    match run() {
        // Already shown to the user as a notification
        Err(e) if e.is::<Reported>() => std::process::exit(1),
        other => other,
    }
}
