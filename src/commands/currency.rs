// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, set_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.get_one::<String>("set") {
        Some(raw) => {
            let ccy = raw.trim().to_uppercase();
            if ccy.is_empty() {
                bail!("Currency code must not be empty");
            }
            set_currency(conn, &ccy)?;
            println!("Display currency set to {}", ccy);
        }
        None => println!("{}", get_currency(conn)?),
    }
    Ok(())
}
