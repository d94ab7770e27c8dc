//! Rendering of records, tables and statistics for the terminal.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::entity::Entity;
use crate::error::Result;
use crate::stats::ResourceStats;
use crate::types::Resource;

/// Color a status label by its semantic group
pub fn colorize_status(label: &str) -> String {
    let tag = format!("[{}]", label);
    match label {
        "active" | "paid" | "success" | "completed" | "available" | "admitted" => {
            tag.green().to_string()
        }
        "pending" | "scheduled" | "on_leave" | "outpatient" | "maintenance" | "medium" => {
            tag.yellow().to_string()
        }
        "failed" | "overdue" | "high" => tag.red().to_string(),
        "cancelled" | "inactive" | "discharged" | "retired" => tag.dimmed().to_string(),
        _ => tag,
    }
}

/// Format a record for single-line display
pub fn format_record_line<T: Entity>(record: &T) -> String {
    let id = format!("{:12}", record.id());
    let title = record
        .search_haystacks()
        .first()
        .copied()
        .unwrap_or_default()
        .to_string();
    format!(
        "{} {} - {}",
        id.cyan(),
        colorize_status(&record.status_label()),
        title
    )
}

/// Render a collection as a table
pub fn render_table<T: Entity>(records: &[&T]) -> String {
    let mut builder = Builder::default();
    builder.push_record(T::columns().iter().copied());
    for record in records {
        builder.push_record(record.cells());
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// Render a record as `field: value` detail lines
pub fn render_detail<T: Entity>(record: &T) -> String {
    let mut out = String::new();
    for (column, cell) in T::columns().iter().zip(record.cells()) {
        out.push_str(&format!("{:14} {}\n", format!("{}:", column), cell));
    }
    out
}

pub fn records_to_json<T: Entity>(records: &[&T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render the statistics block shown under tables and by `stats`
pub fn render_stats(resource: Resource, stats: &ResourceStats) -> String {
    let mut out = format!("{} {}\n", stats.total.to_string().bold(), resource);
    for (status, count) in &stats.by_status {
        out.push_str(&format!(
            "  {:14} {:>5}  {:>3}%\n",
            status,
            count,
            stats.rate(status)
        ));
    }
    if let Some(sum) = stats.metric_sum {
        out.push_str(&format!("  {:14} {:>10.2}\n", "amount total", sum));
    }
    out
}

/// Extract just the date part (YYYY-MM-DD) of an ISO datetime string.
/// Too-short strings come back unchanged.
pub fn format_date_for_display(date_str: &str) -> &str {
    date_str.get(..10).unwrap_or(date_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::StaffUser;

    fn user() -> StaffUser {
        StaffUser {
            id: "u-1".to_string(),
            name: "Dr. Test".to_string(),
            email: "t@h.com".to_string(),
            role: "Doctor".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_contains_header_and_rows() {
        let record = user();
        let table = render_table(&[&record]);
        assert!(table.contains("Name"));
        assert!(table.contains("Dr. Test"));
        assert!(table.contains("t@h.com"));
    }

    #[test]
    fn test_json_output_roundtrips() {
        let record = user();
        let json = records_to_json(&[&record]).unwrap();
        let parsed: Vec<StaffUser> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Dr. Test");
    }

    #[test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display("2026-01-15T10:30:00Z"), "2026-01-15");
        assert_eq!(format_date_for_display("2026-01-15"), "2026-01-15");
        assert_eq!(format_date_for_display("short"), "short");
    }
}
