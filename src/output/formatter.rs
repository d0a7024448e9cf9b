use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::scoring::PointRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

const HEADERS: [&str; 6] = ["team", "quals", "awards", "draft", "elims", "total"];

/// Strip the "frc" prefix for display ("frc58" -> "58")
pub fn team_number(team_key: &str) -> &str {
    team_key.strip_prefix("frc").unwrap_or(team_key)
}

/// Format records as an aligned table with a header row.
/// Index column is 1-based place; team column is left-aligned, points right-aligned.
pub fn format_table(records: &[PointRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No teams scored.".to_string();
    }

    let index_width = records.len().to_string().len() + 1;
    let team_width = records
        .iter()
        .map(|r| team_number(&r.team_key).len())
        .max()
        .unwrap_or(0)
        .max(HEADERS[0].len());
    let num_width = 6;

    let header = format!(
        "{:>iw$} {:<tw$} {:>nw$} {:>nw$} {:>nw$} {:>nw$} {:>nw$}",
        "",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        HEADERS[3],
        HEADERS[4],
        HEADERS[5],
        iw = index_width,
        tw = team_width,
        nw = num_width
    );

    let mut lines = Vec::with_capacity(records.len() + 1);
    if use_colors {
        lines.push(header.dimmed().to_string());
    } else {
        lines.push(header);
    }

    for (idx, record) in records.iter().enumerate() {
        let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
        let team = format!("{:<width$}", team_number(&record.team_key), width = team_width);
        let parts = format!(
            "{:>nw$} {:>nw$} {:>nw$} {:>nw$}",
            record.quals,
            record.awards,
            record.draft,
            record.elims,
            nw = num_width
        );
        let total = format!("{:>width$}", record.total(), width = num_width);

        if use_colors {
            lines.push(format!(
                "{} {} {} {}",
                index_str.dimmed(),
                team.cyan(),
                parts,
                total.bold()
            ));
        } else {
            lines.push(format!("{} {} {} {}", index_str, team, parts, total));
        }
    }

    lines.join("\n")
}

/// Format records as tab-separated values for scripting
/// Columns: team_key, quals, awards, draft, elims, total (no headers, no colors)
pub fn format_tsv(records: &[PointRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                r.team_key,
                r.quals,
                r.awards,
                r.draft,
                r.elims,
                r.total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a PointRecord,
    total: u32,
}

/// Format records as a pretty-printed JSON array, each entry carrying its total
pub fn format_json(records: &[PointRecord]) -> serde_json::Result<String> {
    let rows: Vec<JsonRecord> = records
        .iter()
        .map(|record| JsonRecord {
            record,
            total: record.total(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Format the quals curve for a field size, one "rank points" pair per line
pub fn format_quals_curve(points: &[u32]) -> String {
    let width = points.len().to_string().len();
    points
        .iter()
        .enumerate()
        .map(|(idx, p)| format!("{:>width$}  {:>2}", idx + 1, p, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
