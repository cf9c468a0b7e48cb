// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime settings resolved from global flags and their environment
//! fallbacks.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::db;
use crate::utils::parse_date;

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Reference date for month scoping and projections.
    pub today: NaiveDate,
    pub log_filter: String,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p.trim()),
            None => db::default_db_path()?,
        };
        let today = match m.get_one::<String>("today") {
            Some(s) => parse_date(s)?,
            None => chrono::Local::now().date_naive(),
        };
        let log_filter = m
            .get_one::<String>("log")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Config {
            db_path,
            today,
            log_filter,
        })
    }
}
