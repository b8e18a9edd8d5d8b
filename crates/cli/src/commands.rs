//! Clap command tree definition.
//!
//! `build_cli` holds the process-level flags. `build_repl_cmd` is the
//! multicall tree each input line is parsed against, in both the
//! interactive prompt and pipe mode.

use clap::{Arg, ArgAction, Command};

/// Build the process-level command (flags only).
pub fn build_cli() -> Command {
    Command::new("sift")
        .about("Substring search desk over in-memory records")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Config file (default: ./sift.toml if present)"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Records revealed per page (overrides config)"),
        )
        .arg(
            Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64))
                .help("Query debounce delay in milliseconds (overrides config)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Load N sample records at startup (overrides config)"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write a default config file (at --config or ./sift.toml) if none exists, then exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
}

/// Build the per-line command tree.
pub fn build_repl_cmd() -> Command {
    Command::new("repl")
        .multicall(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Set the query (applied after the debounce delay)")
                .arg(
                    Arg::new("text")
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .value_name("TEXT")
                        .help("Query words; omit to clear the query. Quote terms starting with '#'"),
                ),
        )
        .subcommand(
            Command::new("priority")
                .about("Filter by priority")
                .arg(
                    Arg::new("level")
                        .required(true)
                        .value_name("All|Low|Medium|High"),
                ),
        )
        .subcommand(
            Command::new("status")
                .about("Filter by status")
                .arg(
                    Arg::new("state")
                        .required(true)
                        .value_name("All|Open|Closed"),
                ),
        )
        .subcommand(Command::new("more").about("Reveal the next page"))
        .subcommand(
            Command::new("add")
                .about("Add a record (shown first, page resets)")
                .arg(Arg::new("title").required(true).value_name("TITLE"))
                .arg(
                    Arg::new("description")
                        .required(true)
                        .value_name("DESCRIPTION"),
                )
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .short('p')
                        .value_name("LEVEL")
                        .help("Low, Medium or High (default: Low)"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .value_name("STATE")
                        .help("Open or Closed (default: Open)"),
                ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Flip a record between Open and Closed")
                .arg(Arg::new("id").required(true).value_name("ID")),
        )
        .subcommand(Command::new("show").about("Print the current result"))
        .subcommand(Command::new("count").about("Print open and total record counts"))
        .subcommand(Command::new("wait").about("Sleep through the debounce delay, then apply"))
}
