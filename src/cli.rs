// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Earliest date YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("to").long("to").help("Latest date YYYY-MM-DD (inclusive)"))
        .arg(
            Arg::new("min")
                .long("min")
                .allow_hyphen_values(true)
                .help("Minimum amount; ignored if not a number"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .allow_hyphen_values(true)
                .help("Maximum amount; ignored if not a number"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .help("Case-insensitive text in reason or description"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .value_parser(["income", "expense", "saved"]),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Do not restrict to the current month"),
        )
}

fn sort_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("sort")
            .long("sort")
            .value_parser(["date", "amount", "type"])
            .default_value("date"),
    )
    .arg(
        Arg::new("order")
            .long("order")
            .value_parser(["asc", "desc"])
            .default_value("desc"),
    )
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
        .arg(
            Arg::new("jsonl")
                .long("jsonl")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

pub fn build_cli() -> Command {
    Command::new("flowtrack")
        .version(crate_version!())
        .about("Track income, expenses and savings; see where the month is heading")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FLOWTRACK_DB")
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .env("FLOWTRACK_TODAY")
                .help("Reference date YYYY-MM-DD (defaults to the local date)"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .env("FLOWTRACK_LOG")
                .help("Log filter, e.g. debug or flowtrack=info"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and remove transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income, expense or saved"),
                        )
                        .arg(Arg::new("reason").long("reason").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(sort_args(filter_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(json_args(filter_args(
            Command::new("months").about("Net flow per calendar month"),
        )))
        .subcommand(json_args(filter_args(
            Command::new("insights").about("Balance, burn rate, projections and trends"),
        )))
        .subcommand(sort_args(filter_args(
            Command::new("export")
                .about("Write the filtered view to a file")
                .arg(Arg::new("format").long("format").default_value("csv"))
                .arg(Arg::new("out").long("out").required(true)),
        )))
        .subcommand(
            Command::new("currency")
                .about("Show or set the display currency")
                .arg(Arg::new("set").long("set")),
        )
}
