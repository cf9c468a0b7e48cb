// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod currency;
pub mod exporter;
pub mod reports;
pub mod transactions;

use crate::engine::{AmountRange, DateRange, FilterSpec, SortField, SortOrder, SortSpec};
use crate::models::TransactionType;
use crate::utils::parse_date;
use anyhow::{Result, anyhow};

/// Reads the shared filter flags. Dates must parse; amount bounds that do not
/// are dropped.
pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<FilterSpec> {
    let from = opt(sub, "from").map(parse_date).transpose()?;
    let to = opt(sub, "to").map(parse_date).transpose()?;
    let date_range = if from.is_some() || to.is_some() {
        Some(DateRange { from, to })
    } else {
        None
    };
    let kind = opt(sub, "type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    Ok(FilterSpec {
        date_range,
        amount_range: AmountRange::parse(opt(sub, "min"), opt(sub, "max")),
        search: opt(sub, "search").map(str::to_string),
        kind,
        scope_to_current_month: !sub.get_flag("all"),
    })
}

pub fn sort_from_matches(sub: &clap::ArgMatches) -> Result<SortSpec> {
    let field = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortField>().map_err(|e| anyhow!(e))?,
        None => SortField::default(),
    };
    let order = match sub.get_one::<String>("order") {
        Some(s) => s.parse::<SortOrder>().map_err(|e| anyhow!(e))?,
        None => SortOrder::default(),
    };
    Ok(SortSpec::new(field, order))
}

fn opt<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}
