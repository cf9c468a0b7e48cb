// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use flowtrack::{cli, commands::transactions, db, models::TransactionType};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        ("2025-01-01", "2500", "income", "Salary", None),
        ("2025-01-03", "42.50", "expense", "Groceries weekly", Some("Corner shop")),
        ("2025-01-04", "300", "saved", "Emergency fund", None),
        ("2024-12-30", "80", "expense", "Gifts", None),
    ];
    for (date, amount, kind, reason, description) in rows {
        conn.execute(
            "INSERT INTO transactions(date, amount, type, reason, description) \
             VALUES (?1,?2,?3,?4,?5)",
            params![date, amount, kind, reason, description],
        )
        .unwrap();
    }
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["flowtrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_defaults_to_current_month_newest_first() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, today(), &list_matches(&[])).unwrap();
    let dates: Vec<String> = rows.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-01-04", "2025-01-03", "2025-01-01"]);
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let m = list_matches(&["--all", "--limit", "2"]);
    let rows = transactions::query_rows(&conn, today(), &m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-04");
}

#[test]
fn list_sorts_by_amount_ascending_across_all_months() {
    let conn = setup();
    let rows = transactions::query_rows(
        &conn,
        today(),
        &list_matches(&["--all", "--sort", "amount", "--order", "asc"]),
    )
    .unwrap();
    let amounts: Vec<String> = rows.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["42.50", "80", "300", "2500"]);
}

#[test]
fn list_search_matches_description() {
    let conn = setup();
    let rows =
        transactions::query_rows(&conn, today(), &list_matches(&["--search", "CORNER"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reason, "Groceries weekly");
}

#[test]
fn list_ignores_malformed_amount_bound() {
    let conn = setup();
    let rows = transactions::query_rows(
        &conn,
        today(),
        &list_matches(&["--min", "lots", "--max", "100", "--type", "expense"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TransactionType::Expense);
}

#[test]
fn add_rejects_non_positive_amount() {
    let conn = setup();
    let before: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    let matches = cli::build_cli().get_matches_from([
        "flowtrack", "tx", "add", "--date", "2025-01-05", "--amount", "-5", "--type", "expense",
        "--reason", "Refund",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&conn, today(), tx_m).unwrap_err();
    assert!(format!("{:#}", err).contains("greater than zero"));
    let after: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn add_rejects_unknown_type() {
    let matches = cli::build_cli().get_matches_from([
        "flowtrack", "tx", "add", "--date", "2025-01-05", "--amount", "5", "--type", "transfer",
        "--reason", "Move",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    let err = transactions::new_from_matches(add_m).unwrap_err();
    assert!(err.to_string().contains("Unknown transaction type"));
}

#[test]
fn add_then_remove_round_trip() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "flowtrack",
        "tx",
        "add",
        "--date",
        "2025-01-06",
        "--amount",
        "12.5",
        "--type",
        "Expense",
        "--reason",
        "  Lunch  ",
        "--description",
        "",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, today(), tx_m).unwrap();
    let (id, reason, description): (i64, String, Option<String>) = conn
        .query_row(
            "SELECT id, reason, description FROM transactions WHERE date='2025-01-06'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(reason, "Lunch");
    assert_eq!(description, None);

    let id_s = id.to_string();
    let matches = cli::build_cli().get_matches_from(["flowtrack", "tx", "rm", "--id", &id_s]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, today(), tx_m).unwrap();
    let left: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions WHERE id=?1", [id], |r| r.get(0))
        .unwrap();
    assert_eq!(left, 0);

    // Deleting again reports the missing row.
    assert!(transactions::handle(&conn, today(), tx_m).is_err());
}
