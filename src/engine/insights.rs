// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived dashboard figures.
//!
//! Two pools feed the figures. The visible pool is whatever the active filter
//! selected; balances and the reason breakdown come from it. The current-month
//! pool is every transaction dated in the month of the reference date,
//! regardless of filters, so burn rate and projections stay anchored to the
//! real month.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::engine::filter::current_month;
use crate::models::{Transaction, TransactionType};
use crate::utils::days_in_month;

pub const TOP_REASON_LIMIT: usize = 5;
pub const TREND_DAYS: i64 = 7;

/// Days until the liquid balance runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "days")]
pub enum Runway {
    Days(i64),
    /// Nothing is being spent.
    Unbounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonTotal {
    pub reason: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyExpense {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub has_data: bool,
    pub liquid_balance: Decimal,
    pub total_saved: Decimal,
    pub month_income: Decimal,
    pub month_expense: Decimal,
    pub month_saved: Decimal,
    pub daily_burn: Decimal,
    pub projected_expense: Decimal,
    pub projected_balance: Decimal,
    /// Whole percent of this month's income moved to savings.
    pub savings_rate: i64,
    pub runway: Runway,
    pub top_reasons: Vec<ReasonTotal>,
    /// Oldest first, ending on the reference date.
    pub last_7_days: Vec<DailyExpense>,
}

impl Insights {
    pub fn empty(today: NaiveDate) -> Self {
        Insights {
            has_data: false,
            liquid_balance: Decimal::ZERO,
            total_saved: Decimal::ZERO,
            month_income: Decimal::ZERO,
            month_expense: Decimal::ZERO,
            month_saved: Decimal::ZERO,
            daily_burn: Decimal::ZERO,
            projected_expense: Decimal::ZERO,
            projected_balance: Decimal::ZERO,
            savings_rate: 0,
            runway: Runway::Unbounded,
            top_reasons: Vec::new(),
            last_7_days: trend_days(today)
                .map(|date| DailyExpense {
                    date,
                    total: Decimal::ZERO,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    income: Decimal,
    expense: Decimal,
    saved: Decimal,
}

impl Totals {
    fn of<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut t = Totals::default();
        for tx in txs {
            match tx.kind {
                TransactionType::Income => t.income = t.income.saturating_add(tx.amount),
                TransactionType::Expense => t.expense = t.expense.saturating_add(tx.amount),
                TransactionType::Saved => t.saved = t.saved.saturating_add(tx.amount),
            }
        }
        t
    }

    fn net(&self) -> Decimal {
        self.income
            .saturating_sub(self.expense)
            .saturating_sub(self.saved)
    }
}

/// Computes every figure from the full list, the filtered subset of it, and
/// the reference date.
pub fn compute(all: &[Transaction], visible: &[&Transaction], today: NaiveDate) -> Insights {
    if all.is_empty() {
        return Insights::empty(today);
    }

    let visible_totals = Totals::of(visible.iter().copied());
    let month = Totals::of(current_month(all, today));

    let elapsed = Decimal::from(today.day().max(1));
    // Dividing by a day count of at least one cannot overflow.
    let daily_burn = month.expense / elapsed;
    let projected_expense = daily_burn.saturating_mul(Decimal::from(days_in_month(today)));
    let projected_balance = month
        .income
        .saturating_sub(projected_expense)
        .saturating_sub(month.saved);
    let liquid_balance = visible_totals.net();

    Insights {
        has_data: true,
        liquid_balance,
        total_saved: visible_totals.saved,
        month_income: month.income,
        month_expense: month.expense,
        month_saved: month.saved,
        daily_burn,
        projected_expense,
        projected_balance,
        savings_rate: savings_rate(month.saved, month.income),
        runway: runway(liquid_balance, daily_burn),
        top_reasons: top_reasons(visible, TOP_REASON_LIMIT),
        last_7_days: last_7_days(all, today),
    }
}

pub fn savings_rate(saved: Decimal, income: Decimal) -> i64 {
    if income.is_zero() {
        return 0;
    }
    let Some(ratio) = saved.checked_div(income) else {
        return i64::MAX;
    };
    ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
        .max(0)
}

pub fn runway(liquid_balance: Decimal, daily_burn: Decimal) -> Runway {
    if daily_burn.is_zero() {
        return Runway::Unbounded;
    }
    // Quotients beyond the i64 range saturate towards the sign of the result.
    let saturated = if liquid_balance.is_sign_negative() == daily_burn.is_sign_negative() {
        i64::MAX
    } else {
        i64::MIN
    };
    let days = liquid_balance
        .checked_div(daily_burn)
        .and_then(|q| q.floor().to_i64())
        .unwrap_or(saturated);
    Runway::Days(days)
}

/// Expense totals keyed by the lowercased first word of the reason, largest
/// first. Equal totals keep first-seen order.
pub fn top_reasons(visible: &[&Transaction], limit: usize) -> Vec<ReasonTotal> {
    let mut totals: Vec<ReasonTotal> = Vec::new();
    for tx in visible.iter().filter(|t| t.is_expense()) {
        let key = tx
            .reason
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match totals.iter_mut().find(|r| r.reason == key) {
            Some(r) => r.total = r.total.saturating_add(tx.amount),
            None => totals.push(ReasonTotal {
                reason: key,
                total: tx.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(limit);
    totals
}

fn trend_days(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..TREND_DAYS).rev().map(move |back| today - Duration::days(back))
}

pub fn last_7_days(all: &[Transaction], today: NaiveDate) -> Vec<DailyExpense> {
    trend_days(today)
        .map(|date| DailyExpense {
            date,
            total: all
                .iter()
                .filter(|t| t.is_expense() && t.date == date)
                .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::{self, FilterSpec};
    use crate::engine::test_support::tx;
    use std::str::FromStr;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn empty_list_yields_zero_state() {
        let today = d("2024-03-15");
        let out = compute(&[], &[], today);
        assert!(!out.has_data);
        assert_eq!(out.liquid_balance, Decimal::ZERO);
        assert_eq!(out.savings_rate, 0);
        assert_eq!(out.runway, Runway::Unbounded);
        assert_eq!(out.last_7_days.len(), 7);
        assert_eq!(out.last_7_days[0].date, d("2024-03-09"));
        assert_eq!(out.last_7_days[6].date, today);
    }

    #[test]
    fn march_example_balances() {
        let txs = vec![
            tx(1, "2024-03-01", "1000", TransactionType::Income, "Salary"),
            tx(2, "2024-03-02", "400", TransactionType::Expense, "Rent"),
            tx(3, "2024-03-02", "200", TransactionType::Saved, "ISA"),
        ];
        let today = d("2024-03-10");
        let visible = filter::apply(&txs, &FilterSpec::default(), today);
        let out = compute(&txs, &visible, today);
        assert_eq!(out.liquid_balance, dec("400"));
        assert_eq!(out.total_saved, dec("200"));
        // 400 spent over 10 days, March has 31 days.
        assert_eq!(out.daily_burn, dec("40"));
        assert_eq!(out.projected_expense, dec("1240"));
        assert_eq!(out.projected_balance, dec("-440"));
        assert_eq!(out.savings_rate, 20);
        assert_eq!(out.runway, Runway::Days(10));
    }

    #[test]
    fn burn_rate_ignores_filters() {
        let txs = vec![
            tx(1, "2024-03-01", "100", TransactionType::Expense, "Food"),
            tx(2, "2024-03-02", "50", TransactionType::Expense, "Travel"),
        ];
        let today = d("2024-03-05");
        let spec = FilterSpec {
            search: Some("travel".into()),
            ..FilterSpec::default()
        };
        let visible = filter::apply(&txs, &spec, today);
        let out = compute(&txs, &visible, today);
        assert_eq!(out.liquid_balance, dec("-50"));
        assert_eq!(out.daily_burn, dec("30"));
    }

    #[test]
    fn first_of_month_divides_by_one() {
        let txs = vec![tx(1, "2024-02-01", "29", TransactionType::Expense, "x")];
        let out = compute(&txs, &[], d("2024-02-01"));
        assert_eq!(out.daily_burn, dec("29"));
        // 2024 is a leap year.
        assert_eq!(out.projected_expense, dec("841"));
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        let txs = vec![tx(1, "2024-03-01", "300", TransactionType::Saved, "ISA")];
        let today = d("2024-03-10");
        let visible = filter::apply(&txs, &FilterSpec::default(), today);
        let out = compute(&txs, &visible, today);
        assert_eq!(out.savings_rate, 0);
        assert_eq!(savings_rate(dec("1"), dec("3")), 33);
        assert_eq!(savings_rate(dec("1"), dec("8")), 13);
    }

    #[test]
    fn runway_floors_and_has_unbounded_sentinel() {
        assert_eq!(runway(dec("100"), dec("30")), Runway::Days(3));
        assert_eq!(runway(dec("-10"), dec("3")), Runway::Days(-4));
        assert_eq!(runway(dec("100"), Decimal::ZERO), Runway::Unbounded);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let five = "50000000000000000000000000000";
        let seven = "70000000000000000000000000000";
        let txs = vec![
            tx(1, "2024-03-01", five, TransactionType::Income, "Windfall"),
            tx(2, "2024-03-01", five, TransactionType::Income, "Windfall"),
            tx(3, "2024-03-02", "1", TransactionType::Expense, "Coffee"),
            tx(4, "2024-03-10", seven, TransactionType::Expense, "Yacht"),
            tx(5, "2024-03-10", seven, TransactionType::Expense, "Yacht"),
        ];
        let today = d("2024-03-10");
        let visible = filter::apply(&txs, &FilterSpec::default(), today);
        let out = compute(&txs, &visible, today);
        assert_eq!(out.month_income, Decimal::MAX);
        assert_eq!(out.month_expense, Decimal::MAX);
        assert_eq!(out.projected_expense, Decimal::MAX);
        assert_eq!(out.top_reasons[0].total, Decimal::MAX);
        assert_eq!(out.last_7_days[6].total, Decimal::MAX);
    }

    #[test]
    fn runway_saturates_when_the_quotient_overflows() {
        let huge = dec("50000000000000000000000000000");
        let tiny = dec("0.0000000000000000000000000001");
        assert_eq!(runway(huge, tiny), Runway::Days(i64::MAX));
        assert_eq!(runway(-huge, tiny), Runway::Days(i64::MIN));
        // A large but representable quotient still exceeds i64.
        assert_eq!(runway(huge, Decimal::ONE), Runway::Days(i64::MAX));

        let txs = vec![
            tx(1, "2024-03-01", &huge.to_string(), TransactionType::Income, "x"),
            tx(2, "2024-03-02", "1", TransactionType::Expense, "y"),
        ];
        let today = d("2024-03-10");
        let visible = filter::apply(&txs, &FilterSpec::default(), today);
        assert_eq!(compute(&txs, &visible, today).runway, Runway::Days(i64::MAX));
    }

    #[test]
    fn savings_rate_saturates_on_tiny_income() {
        let saved = dec("10000000000000000000000000000");
        assert_eq!(savings_rate(saved, dec("0.01")), i64::MAX);
        // Fits a Decimal as a percentage but not an i64.
        assert_eq!(savings_rate(dec("1000000000000000000000000"), Decimal::ONE), i64::MAX);
    }

    #[test]
    fn top_reasons_group_by_first_word_and_cap_at_five() {
        let txs = vec![
            tx(1, "2024-03-01", "10", TransactionType::Expense, "Coffee beans"),
            tx(2, "2024-03-01", "5", TransactionType::Expense, "coffee shop"),
            tx(3, "2024-03-01", "15", TransactionType::Expense, "Rent"),
            tx(4, "2024-03-01", "1", TransactionType::Expense, "a"),
            tx(5, "2024-03-01", "1", TransactionType::Expense, "b"),
            tx(6, "2024-03-01", "1", TransactionType::Expense, "c"),
            tx(7, "2024-03-01", "1", TransactionType::Expense, "d"),
            tx(8, "2024-03-01", "999", TransactionType::Income, "Salary"),
        ];
        let refs: Vec<&Transaction> = txs.iter().collect();
        let top = top_reasons(&refs, TOP_REASON_LIMIT);
        let names: Vec<&str> = top.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(names, vec!["coffee", "rent", "a", "b", "c"]);
        assert_eq!(top[0].total, dec("15"));
    }

    #[test]
    fn last_7_days_covers_all_transactions_oldest_first() {
        let txs = vec![
            tx(1, "2024-03-01", "7", TransactionType::Expense, "x"),
            tx(2, "2024-02-28", "3", TransactionType::Expense, "x"),
            tx(3, "2024-02-28", "4", TransactionType::Expense, "x"),
            tx(4, "2024-02-28", "100", TransactionType::Income, "x"),
            tx(5, "2024-02-20", "9", TransactionType::Expense, "x"),
        ];
        let today = d("2024-03-02");
        let out = compute(&txs, &[], today);
        let series: Vec<(NaiveDate, Decimal)> =
            out.last_7_days.iter().map(|e| (e.date, e.total)).collect();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0], (d("2024-02-25"), Decimal::ZERO));
        assert_eq!(series[3], (d("2024-02-28"), dec("7")));
        assert_eq!(series[5], (d("2024-03-01"), dec("7")));
        assert_eq!(series[6], (today, Decimal::ZERO));
    }
}
