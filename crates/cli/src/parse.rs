//! ArgMatches → Action/MetaCommand conversion.
//!
//! Translates clap's parsed arguments into desk actions. Meta-commands
//! (`quit`, `help`, `clear`) are recognised before clap sees the line.

use clap::ArgMatches;
use sift_core::{NewRecord, Priority, RecordId, Selection, Status};

/// A desk operation parsed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Feed raw query text to the debouncer.
    Search(String),
    /// Change the priority filter.
    Priority(Selection<Priority>),
    /// Change the status filter.
    Status(Selection<Status>),
    /// Reveal the next page.
    More,
    /// Add a record.
    Add(NewRecord),
    /// Flip a record's status.
    Toggle(RecordId),
    /// Print the current view.
    Show,
    /// Print open/total counts.
    Count,
    /// Sleep through the debounce delay, then apply.
    Wait,
}

/// REPL meta-commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let cmd = parts.next()?;

    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => {
            let command = parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            Some(MetaCommand::Help { command })
        }
        _ => None,
    }
}

/// Convert clap ArgMatches into an Action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<Action, String> {
    let (sub_name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "search" => Ok(Action::Search(parse_search(sub_matches))),
        "priority" => required(sub_matches, "level")?
            .parse()
            .map(Action::Priority)
            .map_err(|e: sift_core::Error| e.to_string()),
        "status" => required(sub_matches, "state")?
            .parse()
            .map(Action::Status)
            .map_err(|e: sift_core::Error| e.to_string()),
        "more" => Ok(Action::More),
        "add" => parse_add(sub_matches),
        "toggle" => required(sub_matches, "id")?
            .parse::<RecordId>()
            .map(Action::Toggle)
            .map_err(|e| format!("Invalid id: {}", e)),
        "show" => Ok(Action::Show),
        "count" => Ok(Action::Count),
        "wait" => Ok(Action::Wait),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn parse_search(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("text")
        .map(|words| words.map(|w| w.as_str()).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn parse_add(matches: &ArgMatches) -> Result<Action, String> {
    let title = required(matches, "title")?;
    let description = required(matches, "description")?;
    let mut new = NewRecord::new(title, description).map_err(|e| e.to_string())?;

    if let Some(p) = matches.get_one::<String>("priority") {
        let priority: Priority = p.parse().map_err(|e: sift_core::Error| e.to_string())?;
        new = new.with_priority(priority);
    }
    if let Some(s) = matches.get_one::<String>("status") {
        let status: Status = s.parse().map_err(|e: sift_core::Error| e.to_string())?;
        new = new.with_status(status);
    }
    Ok(Action::Add(new))
}
