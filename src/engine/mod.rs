// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a snapshot of transactions.
//!
//! Nothing here touches the database or the clock: callers pass the
//! transactions, the filter and sort selection, and the reference date.

pub mod filter;
pub mod grouping;
pub mod insights;
pub mod sort;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Transaction;

pub use filter::{AmountRange, DateRange, FilterSpec};
pub use grouping::MonthGroup;
pub use insights::{DailyExpense, Insights, ReasonTotal, Runway};
pub use sort::{SortField, SortOrder, SortSpec};

/// Everything one screen of the tracker shows.
#[derive(Debug, Serialize)]
pub struct Dashboard<'a> {
    pub rows: Vec<&'a Transaction>,
    pub months: Vec<MonthGroup<'a>>,
    pub insights: Insights,
}

/// Filtered and sorted rows for `spec`.
pub fn visible<'a>(
    transactions: &'a [Transaction],
    spec: &FilterSpec,
    sort: SortSpec,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let mut rows = filter::apply(transactions, spec, today);
    sort::apply(&mut rows, sort);
    rows
}

pub fn build_dashboard<'a>(
    transactions: &'a [Transaction],
    spec: &FilterSpec,
    sort: SortSpec,
    today: NaiveDate,
) -> Dashboard<'a> {
    let rows = visible(transactions, spec, sort, today);
    let months = grouping::by_month(&rows);
    let insights = insights::compute(transactions, &rows, today);
    Dashboard {
        rows,
        months,
        insights,
    }
}
