// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{filter_from_matches, sort_from_matches};
use crate::engine;
use crate::export::{self, Format};
use crate::store::{SqliteStore, TransactionStore};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, today: NaiveDate, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse::<Format>()
        .map_err(|e| anyhow!(e))?;
    let out = sub.get_one::<String>("out").context("--out is required")?;

    let spec = filter_from_matches(sub)?;
    let sort = sort_from_matches(sub)?;
    let all = SqliteStore::new(conn)
        .list()
        .context("Could not load transactions")?;
    let rows = engine::visible(&all, &spec, sort, today);

    // Rendered in full first so a failed export never leaves a partial file.
    let mut buf = Vec::new();
    export::write(fmt, &rows, &mut buf)?;
    std::fs::write(out, &buf).with_context(|| format!("Write {}", out))?;
    tracing::info!(count = rows.len(), path = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
