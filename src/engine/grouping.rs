// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, Month};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<'a> {
    pub year: i32,
    pub month: u32,
    pub transactions: Vec<&'a Transaction>,
    /// Income minus expense minus saved.
    pub total: Decimal,
}

impl MonthGroup<'_> {
    /// e.g. `March 2024`.
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("?");
        format!("{} {}", name, self.year)
    }
}

/// Partitions by calendar month, most recent month first. Order within a
/// group follows the input.
pub fn by_month<'a>(transactions: &[&'a Transaction]) -> Vec<MonthGroup<'a>> {
    let mut map: BTreeMap<(i32, u32), MonthGroup<'a>> = BTreeMap::new();
    for &tx in transactions {
        let key = (tx.date.year(), tx.date.month());
        let group = map.entry(key).or_insert_with(|| MonthGroup {
            year: key.0,
            month: key.1,
            transactions: Vec::new(),
            total: Decimal::ZERO,
        });
        group.total = group.total.saturating_add(tx.signed_amount());
        group.transactions.push(tx);
    }
    map.into_values().rev().collect()
}
