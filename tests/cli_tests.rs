// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeApi, RecordingNotifier, at, expense, session};
use rust_decimal::Decimal;
use spendbook::cli;
use spendbook::commands::{analytics, expenses, exporter};
use spendbook::models::{Category, DateWindow, Expense, PaymentMode};
use spendbook::store::ExpenseStore;
use tempfile::tempdir;

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["spendbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, sub) = matches.subcommand().expect("subcommand");
    sub.clone()
}

fn store_with(list: Vec<Expense>) -> ExpenseStore<FakeApi, RecordingNotifier> {
    let mut store = ExpenseStore::new(FakeApi::with(list), RecordingNotifier::default());
    store.sign_in(session("alice"));
    store
}

fn sample() -> Vec<Expense> {
    let mut upi = expense("b", at(2024, 3, 12), Category::Groceries, 300);
    upi.payment_mode = PaymentMode::Upi;
    vec![
        expense("a", at(2024, 3, 2), Category::Rental, 1000),
        upi,
        expense("c", at(2024, 1, 20), Category::Travel, 80),
    ]
}

#[test]
fn filter_flags_build_filter_state() {
    let sub = sub_matches(&[
        "list",
        "--period",
        "last-90-days",
        "--category",
        "rental",
        "--category",
        "Travel",
        "--payment-mode",
        "credit-card",
    ]);
    let f = expenses::filters_from(&sub).unwrap();
    assert_eq!(f.date_window, DateWindow::Last90Days);
    assert_eq!(f.categories.len(), 2);
    assert!(f.categories.contains(&Category::Travel));
    assert!(f.payment_modes.contains(&PaymentMode::CreditCard));
}

#[test]
fn unknown_filter_value_is_rejected() {
    let sub = sub_matches(&["list", "--category", "Gadgets"]);
    assert!(expenses::filters_from(&sub).is_err());
}

#[test]
fn add_flags_build_a_validated_draft() {
    let now = at(2024, 3, 20);
    let sub = sub_matches(&[
        "add",
        "--amount",
        "12.50",
        "--category",
        "travel",
        "--payment-mode",
        "UPI",
        "--notes",
        "bus",
    ]);
    let draft = expenses::draft_from(&sub, now).unwrap();
    assert_eq!(draft.amount(), Decimal::new(1250, 2));
    assert_eq!(draft.category(), Category::Travel);
    assert_eq!(draft.payment_mode(), PaymentMode::Upi);
    assert_eq!(draft.date(), now);

    let sub = sub_matches(&["add", "--amount", "0", "--date", "2024-03-01"]);
    assert!(expenses::draft_from(&sub, now).is_err());
}

#[test]
fn list_sorts_newest_first_and_limits() {
    let mut store = store_with(sample());
    let sub = sub_matches(&["list", "--period", "all-time", "--limit", "2"]);
    let rows = expenses::query_rows(&mut store, &sub, at(2024, 3, 20)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "b");
    assert_eq!(rows[0].date, "2024-03-12");
    assert_eq!(rows[0].payment_mode, "UPI");
    assert_eq!(rows[1].id, "a");
    assert_eq!(rows[1].amount, "1000.00");
}

#[test]
fn list_defaults_to_this_month() {
    let mut store = store_with(sample());
    let sub = sub_matches(&["list"]);
    let rows = expenses::query_rows(&mut store, &sub, at(2024, 3, 20)).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(store.api().list_calls.get(), 1);
}

#[test]
fn rm_deletes_remotely_and_locally() {
    let mut store = store_with(sample());
    store.load().unwrap();
    let sub = sub_matches(&["rm", "a"]);
    expenses::remove(&mut store, &sub).unwrap();
    assert!(store.expenses().iter().all(|e| e.id != "a"));
    assert!(store.api().remote.borrow().iter().all(|e| e.id != "a"));
}

#[test]
fn failed_add_is_reported_once() {
    let mut store = store_with(sample());
    store.api().fail_create.set(true);
    let sub = sub_matches(&["add", "--amount", "5"]);
    let err = expenses::add(&mut store, &sub, at(2024, 3, 20)).unwrap_err();
    assert!(err.is::<spendbook::error::Reported>());
    assert_eq!(store.notifier().errors().count(), 1);
}

#[test]
fn month_rows_carry_every_category() {
    let mut store = store_with(sample());
    store.load().unwrap();
    let rows = analytics::month_rows(&store.monthly(at(2024, 3, 20)));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].month, "2024-01");
    assert_eq!(rows[0].label, "Jan 2024");
    assert_eq!(rows[0].categories["Travel"], "80.00");
    assert_eq!(rows[1].total, "0.00");
    assert_eq!(rows[2].categories.len(), 5);
    assert_eq!(rows[2].total, "1300.00");
}

#[test]
fn export_writes_filtered_csv() {
    let mut store = store_with(sample());
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let out_str = out.to_string_lossy().to_string();
    let sub = sub_matches(&[
        "export",
        "--period",
        "all-time",
        "--category",
        "Groceries",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    let n = exporter::export_expenses(&mut store, &sub, at(2024, 3, 20)).unwrap();
    assert_eq!(n, 1);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["id", "date", "category", "amount", "payment_mode", "notes"]
    );
    let rec = rdr.records().next().unwrap().unwrap();
    assert_eq!(&rec[0], "b");
    assert_eq!(&rec[3], "300.00");
}

#[test]
fn export_json_uses_wire_format() {
    let mut store = store_with(sample());
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");
    let out_str = out.to_string_lossy().to_string();
    let sub = sub_matches(&[
        "export", "--period", "all-time", "--format", "json", "--out", &out_str,
    ]);
    exporter::export_expenses(&mut store, &sub, at(2024, 3, 20)).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let back: Vec<Expense> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, sample());
}
