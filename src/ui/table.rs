use tabled::{settings::Style, Table, Tabled};
use crate::review::HistoryEntry;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Reviewed at")]
    reviewed_at: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        let reviewed_at = entry
            .created_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| entry.timestamp.to_string());
        Self {
            id: entry.id,
            language: entry.language.clone(),
            reviewed_at,
        }
    }
}

/// Render history as a table; empty string when there is nothing to show
pub fn history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let rows: Vec<HistoryRow> = entries.iter().map(HistoryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
