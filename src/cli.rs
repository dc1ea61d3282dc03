// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn filter_args() -> [Arg; 3] {
    [
        Arg::new("period")
            .long("period")
            .default_value("this-month")
            .help("this-month | last-30-days | last-90-days | all-time"),
        Arg::new("category")
            .long("category")
            .action(ArgAction::Append)
            .help("Only these categories (repeatable)"),
        Arg::new("payment-mode")
            .long("payment-mode")
            .action(ArgAction::Append)
            .help("Only these payment modes (repeatable)"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendbook")
        .about("Track personal expenses against a remote expense service")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("auth")
                .about("Sign in to the expense service")
                .subcommand(
                    Command::new("register")
                        .about("Create an account and sign in")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Forget the stored token"))
                .subcommand(Command::new("status").about("Show who is signed in")),
        )
        .subcommand(
            Command::new("config")
                .about("Local settings")
                .subcommand(
                    Command::new("set-url")
                        .about("Set the expense service base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("Others"),
                )
                .arg(
                    Arg::new("payment-mode")
                        .long("payment-mode")
                        .default_value("Cash"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (defaults to now)"),
                )
                .arg(
                    Arg::new("notes")
                        .long("notes")
                        .help("Up to 100 characters"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List expenses, newest first")
                .args(filter_args())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an expense")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("analytics")
                .about("Monthly spend per category")
                .args(json_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Write the filtered expense list to a file")
                .args(filter_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"]),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("options").about("Show categories, payment modes and periods"),
        )
}
