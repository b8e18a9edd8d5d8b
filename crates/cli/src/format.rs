//! Output → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): summary line, then one block per record
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use sift_core::{Error, Record, ResultView};

use crate::state::Output;

/// Descriptions longer than this are cut in human mode.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(output),
        OutputMode::Human => format_human(output),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

/// Cut `text` to `max` characters, appending `…` when anything was dropped.
pub fn shorten(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

// =========================================================================
// Human
// =========================================================================

fn format_human(output: &Output) -> String {
    match output {
        Output::None => String::new(),
        Output::Pending { query } if query.is_empty() => "(query cleared)".to_string(),
        Output::Pending { query } => format!("(searching \"{}\")", query),
        Output::View(view) => format_view_human(view),
        Output::Added(id) => format!("(added) #{}", id),
        Output::Toggled { id, status } => format!("#{} is now {}", id, status),
        Output::Counts { open, total } => format!("{} open / {} total", open, total),
    }
}

fn format_view_human(view: &ResultView) -> String {
    let mut lines = vec![view.summary()];
    if view.is_empty() {
        lines.push("(no records)".to_string());
    }
    for record in &view.records {
        lines.push(format_record_human(record));
    }
    if view.has_more {
        lines.push(format!(
            "(page {}; {} more, type `more`)",
            view.page,
            view.total_matched - view.visible()
        ));
    }
    lines.join("\n")
}

fn format_record_human(record: &Record) -> String {
    format!(
        "#{:<6} {:<6} {:<6} {}  ({})\n        {}",
        record.id,
        record.priority,
        record.status,
        record.title,
        record.created_at.format("%Y-%m-%d %H:%M"),
        shorten(&record.description, DESCRIPTION_PREVIEW_CHARS)
    )
}

// =========================================================================
// JSON
// =========================================================================

fn format_json(output: &Output) -> String {
    let value = match output {
        Output::None => return String::new(),
        Output::Pending { query } => serde_json::json!({ "pending": query }),
        Output::View(view) => {
            serde_json::to_value(view).unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }))
        }
        Output::Added(id) => serde_json::json!({ "added": id }),
        Output::Toggled { id, status } => serde_json::json!({ "id": id, "status": status }),
        Output::Counts { open, total } => serde_json::json!({ "open": open, "total": total }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sift_core::{Priority, RecordId, Status};

    fn record(description: &str) -> Record {
        Record {
            id: RecordId::new(1004),
            title: "Login fails".to_string(),
            description: description.to_string(),
            priority: Priority::High,
            status: Status::Open,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn shorten_cuts_at_char_boundary() {
        assert_eq!(shorten("abc", 120), "abc");
        assert_eq!(shorten("abcdef", 3), "abc…");
        assert_eq!(shorten("ééééé", 2), "éé…");
        let exact = "x".repeat(120);
        assert_eq!(shorten(&exact, 120), exact, "no ellipsis at exactly the limit");
    }

    #[test]
    fn human_view_has_summary_and_more_hint() {
        let view = ResultView {
            records: vec![record(&"long ".repeat(40))],
            total_matched: 3,
            has_more: true,
            page: 1,
            ..ResultView::default()
        };
        let text = format_output(&Output::View(view), OutputMode::Human);
        assert!(text.starts_with("Showing 1 / 3 results"));
        assert!(text.contains("#1004"));
        assert!(text.contains('…'));
        assert!(text.contains("2 more"));
    }

    #[test]
    fn human_empty_view() {
        let text = format_output(&Output::View(ResultView::default()), OutputMode::Human);
        assert!(text.contains("Showing 0 / 0 results"));
        assert!(text.contains("(no records)"));
    }

    #[test]
    fn json_view_is_parseable() {
        let view = ResultView {
            records: vec![record("short")],
            total_matched: 1,
            page: 1,
            query: "login".to_string(),
            ..ResultView::default()
        };
        let text = format_output(&Output::View(view), OutputMode::Json);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["total_matched"], 1);
        assert_eq!(parsed["query"], "login");
        assert_eq!(parsed["records"][0]["id"], 1004);
        assert_eq!(
            parsed["records"][0]["description"], "short",
            "JSON keeps the full description"
        );
    }

    #[test]
    fn error_formats() {
        let err = Error::RecordNotFound(RecordId::new(7));
        assert!(format_error(&err, OutputMode::Human).starts_with("(error)"));
        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputMode::Json)).unwrap();
        assert!(json["error"].as_str().unwrap().contains('7'));
    }

    #[test]
    fn none_prints_nothing() {
        assert!(format_output(&Output::None, OutputMode::Human).is_empty());
        assert!(format_output(&Output::None, OutputMode::Json).is_empty());
    }
}
