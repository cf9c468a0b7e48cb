// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use flowtrack::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let cfg = Config::from_matches(&matches)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?cfg, "resolved configuration");

    let conn = db::open_or_init(&cfg.db_path)?;
    let today = cfg.today;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, today, sub)?,
        Some(("months", sub)) => commands::reports::handle_months(&conn, today, sub)?,
        Some(("insights", sub)) => commands::reports::handle_insights(&conn, today, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, today, sub)?,
        Some(("currency", sub)) => commands::currency::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
