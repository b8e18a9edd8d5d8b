//! REPL loop with rustyline.
//!
//! Interactive mode: prompt, meta-commands, history, TAB completion.
//! Pipe mode: read lines from stdin, execute each.

use std::io::{self, BufRead};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use tracing::warn;

use crate::commands::build_repl_cmd;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{check_meta_command, matches_to_action, MetaCommand};
use crate::state::DeskState;

/// Run the interactive REPL.
pub fn run_repl(state: &mut DeskState, mode: OutputMode) {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<SiftHelper, _> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            warn!(error = %e, "Line editor unavailable; falling back to pipe mode");
            run_pipe(state, mode);
            return;
        }
    };
    rl.set_helper(Some(SiftHelper));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = state.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                if let Some(meta) = check_meta_command(trimmed) {
                    match meta {
                        MetaCommand::Quit => break,
                        MetaCommand::Clear => {
                            // ANSI clear screen
                            print!("\x1B[2J\x1B[1;1H");
                        }
                        MetaCommand::Help { command } => print_help(command.as_deref()),
                    }
                    continue;
                }

                execute_line(trimmed, state, mode);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

/// Run in pipe mode: read lines from stdin, execute each.
///
/// Blank lines and `#` comments are skipped. Returns 1 if any line failed.
pub fn run_pipe(state: &mut DeskState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(check_meta_command(trimmed), Some(MetaCommand::Quit)) {
            break;
        }

        if !execute_line(trimmed, state, mode) {
            exit_code = 1;
        }
    }

    exit_code
}

/// Tokenize, parse and execute one line. Returns true on success.
fn execute_line(line: &str, state: &mut DeskState, mode: OutputMode) -> bool {
    // shlex respects quotes
    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return true,
        None => {
            eprintln!("(error) Invalid quoting: {}", line);
            return false;
        }
    };

    let matches = match build_repl_cmd().try_get_matches_from(tokens) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("(error) {}", e);
            return false;
        }
    };

    match state.execute(action) {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
            true
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            false
        }
    }
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.sift_history", h))
}

fn print_help(command: Option<&str>) {
    if let Some(cmd) = command {
        let cli = build_repl_cmd();
        if let Err(e) = cli.try_get_matches_from(vec![cmd, "--help"]) {
            println!("{}", e);
        }
    } else {
        println!("Available commands:");
        println!("  search [text...]           Set the query (applied after the debounce delay)");
        println!("  priority <All|Low|Medium|High>");
        println!("  status <All|Open|Closed>");
        println!("  more                       Reveal the next page");
        println!("  add <title> <description> [--priority P] [--status S]");
        println!("  toggle <id>                Flip Open/Closed");
        println!("  show                       Print the current result");
        println!("  count                      Open and total record counts");
        println!("  wait                       Sleep through the debounce delay");
        println!();
        println!("Meta-commands:");
        println!("  help [command]             Show help");
        println!("  quit / exit                Exit");
        println!("  clear                      Clear screen");
    }
}

// =========================================================================
// TAB Completion
// =========================================================================

/// Known commands for TAB completion.
const COMMANDS: &[&str] = &[
    "search", "priority", "status", "more", "add", "toggle", "show", "count", "wait", "help",
    "quit", "exit", "clear",
];

/// Known values for each filter command.
fn values_for(cmd: &str) -> &'static [&'static str] {
    match cmd {
        "priority" => &["All", "Low", "Medium", "High"],
        "status" => &["All", "Open", "Closed"],
        _ => &[],
    }
}

fn pairs(words: &[&str], prefix: &str) -> Vec<Pair> {
    words
        .iter()
        .filter(|w| w.to_lowercase().starts_with(&prefix.to_lowercase()))
        .map(|w| Pair {
            display: w.to_string(),
            replacement: w.to_string(),
        })
        .collect()
}

struct SiftHelper;

impl Helper for SiftHelper {}
impl Validator for SiftHelper {}
impl Highlighter for SiftHelper {}
impl Hinter for SiftHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for SiftHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let trailing_space = line_to_pos.ends_with(' ');

        match (parts.as_slice(), trailing_space) {
            ([], _) => Ok((pos, pairs(COMMANDS, ""))),
            ([prefix], false) => Ok((pos - prefix.len(), pairs(COMMANDS, prefix))),
            ([cmd], true) => Ok((pos, pairs(values_for(cmd), ""))),
            ([cmd, prefix], false) => Ok((pos - prefix.len(), pairs(values_for(cmd), prefix))),
            _ => Ok((pos, vec![])),
        }
    }
}
