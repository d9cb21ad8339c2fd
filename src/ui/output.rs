//! Printers for each CLI command's result

use std::path::Path;
use owo_colors::OwoColorize;
use serde_json::Value;
use crate::review::{HistoryEntry, ReviewRecord};
use crate::ui::{history_table, theme, Icons};

/// Startup lines for `serve`
pub fn serving(model: &str, store: &Path) {
    let t = theme();
    println!("{} {}", Icons::ROCKET, "Codecritic".style(t.title));
    println!("   {} {}", "Model:".style(t.label), model);
    println!("   {} {}", "Store:".style(t.label), store.display());
}

/// A stored review and its feedback, flagging degraded inference
pub fn review(record: &ReviewRecord) {
    let t = theme();
    println!();
    println!("━ {} ━", format!("Review #{} · {}", record.id, record.language).style(t.title));

    match inference_error(&record.feedback) {
        Some(error) => println!(
            "{} {}",
            Icons::WARN,
            format!("Model unavailable, stored as degraded feedback: {}", error).style(t.degraded)
        ),
        None => indented(&record.feedback),
    }
}

/// Most recent reviews, or a note when the store is empty
pub fn history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("{}", "∅ No reviews yet.".style(theme().hint));
    } else {
        println!("{}", history_table(entries));
    }
}

/// Suggestion text, or why there is none
pub fn suggestions(pattern: &str, text: Option<&str>) {
    let t = theme();
    match text {
        Some(text) => {
            println!();
            println!("━ {} ━", format!("Recurring issues in code containing {:?}", pattern).style(t.title));
            indented(text);
        }
        None => eprintln!(
            "{} {}",
            Icons::WARN,
            format!("No past reviews contain {:?}", pattern).style(t.degraded)
        ),
    }
}

pub fn config_written(path: &Path) {
    let t = theme();
    println!("{} {}", Icons::CHECK, format!("Wrote {}", path.display()).style(t.done));
    println!(
        "{}",
        "Set [inference].endpoint and export the token variable before serving.".style(t.hint)
    );
}

fn indented(text: &str) {
    for line in text.lines() {
        println!("  {}", line.style(theme().feedback));
    }
}

/// Message of a `{"error": ...}` feedback body, if that's what the review holds
fn inference_error(feedback: &str) -> Option<String> {
    let value: Value = serde_json::from_str(feedback).ok()?;
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.get("error").map(|error| match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
