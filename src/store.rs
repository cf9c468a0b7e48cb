// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence boundary for transactions.
//!
//! The store is the only place records are created or removed. It validates
//! input before anything is written, so everything handed to the engine
//! already satisfies the model invariants.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType};

pub trait TransactionStore {
    /// All transactions, newest first (`date`, then `created_at`, then `id`).
    fn list(&self) -> Result<Vec<Transaction>>;

    fn create(&self, new: NewTransaction) -> Result<i64>;

    fn delete(&self, id: i64) -> Result<()>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }
}

impl TransactionStore for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, type, reason, description, created_at
             FROM transactions
             ORDER BY date DESC, created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(RawRow {
                id: r.get(0)?,
                date: r.get(1)?,
                amount: r.get(2)?,
                kind: r.get(3)?,
                reason: r.get(4)?,
                description: r.get(5)?,
                created_at: r.get(6)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_transaction()?);
        }
        tracing::debug!(count = out.len(), "listed transactions");
        Ok(out)
    }

    fn create(&self, new: NewTransaction) -> Result<i64> {
        let new = new.validate()?;
        self.conn.execute(
            "INSERT INTO transactions(date, amount, type, reason, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.date.to_string(),
                new.amount.to_string(),
                new.kind.as_str(),
                new.reason,
                new.description
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            id,
            date = %new.date,
            amount = %new.amount,
            kind = %new.kind,
            "created transaction"
        );
        Ok(id)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::info!(id, "deleted transaction");
        Ok(())
    }
}

struct RawRow {
    id: i64,
    date: String,
    amount: String,
    kind: String,
    reason: String,
    description: Option<String>,
    created_at: String,
}

impl RawRow {
    fn into_transaction(self) -> Result<Transaction> {
        let id = self.id;
        let corrupt = |detail: String| Error::Corrupt { id, detail };
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| corrupt(format!("date '{}': {}", self.date, e)))?;
        let amount = self
            .amount
            .parse::<Decimal>()
            .map_err(|e| corrupt(format!("amount '{}': {}", self.amount, e)))?;
        let kind = self
            .kind
            .parse::<TransactionType>()
            .map_err(|e| corrupt(e.to_string()))?;
        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| corrupt(format!("created_at '{}'", self.created_at)))?;
        Ok(Transaction {
            id,
            date,
            amount,
            kind,
            reason: self.reason,
            description: self.description.filter(|s| !s.is_empty()),
            created_at,
        })
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
