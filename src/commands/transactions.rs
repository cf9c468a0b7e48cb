// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{filter_from_matches, sort_from_matches};
use crate::engine;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, today: NaiveDate, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, today, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn new_from_matches(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let required = |name: &str| {
        sub.get_one::<String>(name)
            .cloned()
            .with_context(|| format!("--{} is required", name))
    };
    let date = parse_date(&required("date")?)?;
    let amount = parse_decimal(&required("amount")?)?;
    let kind = required("type")?.parse::<TransactionType>()?;
    Ok(NewTransaction {
        date,
        amount,
        kind,
        reason: required("reason")?,
        description: sub.get_one::<String>("description").cloned(),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_from_matches(sub)?;
    let (date, amount, kind) = (new.date, new.amount, new.kind);
    let id = SqliteStore::new(conn)
        .create(new)
        .context("Could not record transaction")?;
    println!(
        "Recorded #{}: {} {} on {}",
        id,
        kind,
        fmt_money(&amount, &get_currency(conn)?),
        date
    );
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    SqliteStore::new(conn).delete(id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, today: NaiveDate, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, today, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    format!("{:.2}", t.amount),
                    t.reason.clone(),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Reason", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

/// The filtered, sorted view selected by the `tx list` flags.
pub fn query_rows(
    conn: &Connection,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let spec = filter_from_matches(sub)?;
    let sort = sort_from_matches(sub)?;
    let all = SqliteStore::new(conn)
        .list()
        .context("Could not load transactions")?;
    let mut rows: Vec<Transaction> = engine::visible(&all, &spec, sort, today)
        .into_iter()
        .cloned()
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    tracing::debug!(total = all.len(), shown = rows.len(), "listed view");
    Ok(rows)
}
