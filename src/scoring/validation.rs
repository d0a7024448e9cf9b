use std::collections::HashSet;

use super::tables::{AwardPointTable, ScoringTables};

/// Validate scoring tables at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_tables(tables: &ScoringTables) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_award_table("scoring.awards.normal", &tables.awards.normal, &mut errors);
    check_award_table(
        "scoring.awards.championship",
        &tables.awards.championship,
        &mut errors,
    );

    if tables.include_draft && tables.draft.is_empty() {
        errors.push("scoring.draft: must have at least one alliance row".to_string());
    }
    for (i, row) in tables.draft.iter().enumerate() {
        if row.is_empty() {
            errors.push(format!(
                "scoring.draft[{}]: alliance {} has no pick values",
                i,
                i + 1
            ));
        }
    }

    let events = &tables.events;
    for code in &events.championship_finals {
        if events.championship_divisions.contains(code) {
            errors.push(format!(
                "scoring.events: event type {} is listed as both division and finals",
                code
            ));
        }
    }
    for code in events
        .championship_divisions
        .iter()
        .chain(&events.championship_finals)
    {
        if !events.official.contains(code) {
            errors.push(format!(
                "scoring.events: championship event type {} is not listed as official",
                code
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_award_table(path: &str, table: &AwardPointTable, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for (i, entry) in table.points.iter().enumerate() {
        if !seen.insert(entry.award) {
            errors.push(format!(
                "{}.points[{}]: award type {} is listed more than once",
                path, i, entry.award
            ));
        }
    }
}
