// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::str::FromStr;

use serde_json::json;

use crate::error::Result;
use crate::models::Transaction;

pub const COLUMNS: [&str; 6] = ["id", "date", "amount", "type", "reason", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(format!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

pub fn write<W: Write>(format: Format, rows: &[&Transaction], out: W) -> Result<()> {
    match format {
        Format::Csv => write_csv(rows, out),
        Format::Json => write_json(rows, out),
    }
}

/// Header row then one record per transaction. Quoting is left to the csv
/// writer, so commas, quotes and newlines in text fields survive.
pub fn write_csv<W: Write>(rows: &[&Transaction], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(COLUMNS)?;
    for t in rows {
        wtr.write_record([
            t.id.to_string(),
            t.date.to_string(),
            t.amount.to_string(),
            t.kind.to_string(),
            t.reason.clone(),
            t.description.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(rows: &[&Transaction], mut out: W) -> Result<()> {
    let items: Vec<_> = rows
        .iter()
        .map(|t| {
            json!({
                "id": t.id, "date": t.date, "amount": t.amount.to_string(), "type": t.kind,
                "reason": t.reason, "description": t.description
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &items)?;
    out.flush()?;
    Ok(())
}
