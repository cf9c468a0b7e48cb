// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};

/// Inclusive date bounds; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Inclusive amount bounds; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AmountRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl AmountRange {
    /// Builds a range from raw user input. Bounds that do not parse as numbers
    /// are dropped rather than rejected.
    pub fn parse(min_raw: Option<&str>, max_raw: Option<&str>) -> Self {
        AmountRange {
            min: parse_bound("min", min_raw),
            max: parse_bound("max", max_raw),
        }
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Option<Decimal> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<Decimal>() {
        Ok(d) => Some(d),
        Err(_) => {
            tracing::warn!(bound = name, value = raw, "ignoring non-numeric amount bound");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    pub date_range: Option<DateRange>,
    pub amount_range: AmountRange,
    pub search: Option<String>,
    pub kind: Option<TransactionType>,
    /// Restricts to the month of the reference date when no explicit date
    /// range is set.
    pub scope_to_current_month: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            date_range: None,
            amount_range: AmountRange::default(),
            search: None,
            kind: None,
            scope_to_current_month: true,
        }
    }
}

impl FilterSpec {
    pub fn matches(&self, tx: &Transaction, today: NaiveDate) -> bool {
        match self.date_range {
            Some(range) => {
                if !range.contains(tx.date) {
                    return false;
                }
            }
            None if self.scope_to_current_month => {
                if !same_month(tx.date, today) {
                    return false;
                }
            }
            None => {}
        }
        if !self.amount_range.contains(tx.amount) {
            return false;
        }
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        match self.search_needle() {
            Some(needle) => {
                tx.reason.to_lowercase().contains(&needle)
                    || tx
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Transactions satisfying every active predicate of `spec`, in input order.
pub fn apply<'a>(
    transactions: &'a [Transaction],
    spec: &FilterSpec,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| spec.matches(tx, today))
        .collect()
}

/// The unfiltered set of transactions dated in the month of `today`.
pub fn current_month<'a>(
    transactions: &'a [Transaction],
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| same_month(tx.date, today))
        .collect()
}
