// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::filter_from_matches;
use crate::engine::{self, Insights, Runway, SortSpec};
use crate::models::Transaction;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle_months(
    conn: &Connection,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = month_rows(conn, today, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    m.count.to_string(),
                    fmt_money(&m.total, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Transactions", "Net"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MonthRow {
    pub month: String,
    pub count: usize,
    pub total: rust_decimal::Decimal,
}

fn load_all(conn: &Connection) -> Result<Vec<Transaction>> {
    SqliteStore::new(conn)
        .list()
        .context("Could not load transactions")
}

pub fn month_rows(
    conn: &Connection,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<Vec<MonthRow>> {
    let spec = filter_from_matches(sub)?;
    let all = load_all(conn)?;
    let dash = engine::build_dashboard(&all, &spec, SortSpec::default(), today);
    Ok(dash
        .months
        .into_iter()
        .map(|g| MonthRow {
            month: g.label(),
            count: g.transactions.len(),
            total: g.total,
        })
        .collect())
}

pub fn handle_insights(
    conn: &Connection,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let insights = compute_insights(conn, today, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &insights)? {
        return Ok(());
    }
    if !insights.has_data {
        println!("No transactions yet. Add one with `flowtrack tx add`.");
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let money = |d: &rust_decimal::Decimal| fmt_money(d, &ccy);
    let cards = vec![
        vec!["Liquid balance".into(), money(&insights.liquid_balance)],
        vec!["Total saved".into(), money(&insights.total_saved)],
        vec!["Income this month".into(), money(&insights.month_income)],
        vec!["Spent this month".into(), money(&insights.month_expense)],
        vec!["Daily burn".into(), money(&insights.daily_burn)],
        vec!["Projected spend".into(), money(&insights.projected_expense)],
        vec!["Projected balance".into(), money(&insights.projected_balance)],
        vec!["Savings rate".into(), format!("{}%", insights.savings_rate)],
        vec!["Runway".into(), runway_label(insights.runway)],
    ];
    println!("{}", pretty_table(&["Insight", "Value"], cards));

    if !insights.top_reasons.is_empty() {
        let rows = insights
            .top_reasons
            .iter()
            .enumerate()
            .map(|(i, r)| vec![(i + 1).to_string(), r.reason.clone(), money(&r.total)])
            .collect();
        println!("{}", pretty_table(&["#", "Spent on", "Total"], rows));
    }

    let trend = insights
        .last_7_days
        .iter()
        .map(|d| vec![d.date.format("%a %d %b").to_string(), money(&d.total)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], trend));
    Ok(())
}

pub fn compute_insights(
    conn: &Connection,
    today: NaiveDate,
    sub: &clap::ArgMatches,
) -> Result<Insights> {
    let spec = filter_from_matches(sub)?;
    let all = load_all(conn)?;
    Ok(engine::build_dashboard(&all, &spec, SortSpec::default(), today).insights)
}

pub fn runway_label(runway: Runway) -> String {
    match runway {
        Runway::Days(1) => "1 day".to_string(),
        Runway::Days(n) => format!("{} days", n),
        Runway::Unbounded => "unbounded (no spending)".to_string(),
    }
}
