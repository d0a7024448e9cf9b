use anyhow::Result;

use crate::provider::{fetch_event_data, EventDataProvider, EventInfo};
use crate::scoring::{aggregate, EventClass, EventScore, ScoringTables};

/// A scored event, records sorted by total descending
#[derive(Debug, Clone)]
pub struct ScoredEvent {
    pub info: EventInfo,
    pub class: EventClass,
    pub score: EventScore,
}

/// Fetch an event's facts, classify it, and score every team.
///
/// Provider failures and draft inconsistencies abort the whole pass; nothing
/// partial is returned.
pub async fn fetch_and_score_event<P: EventDataProvider>(
    provider: &P,
    event_key: &str,
    tables: &ScoringTables,
    include_draft: bool,
    verbose: bool,
) -> Result<ScoredEvent> {
    let data = fetch_event_data(provider, event_key).await?;

    let class = tables.events.classify(data.info.event_type);

    if verbose {
        eprintln!(
            "Event {} ({}): type {}, {}, {}",
            data.info.key,
            data.info.name,
            data.info.event_type,
            class.tier,
            if class.official { "official" } else { "unofficial" }
        );
        eprintln!(
            "  {} ranked teams, {} awards, {} matches, {} alliances",
            data.facts.rankings.len(),
            data.facts.awards.len(),
            data.facts.matches.len(),
            data.facts.alliances.len()
        );
    }

    let mut score = aggregate(&data.facts, class, tables, include_draft)?;

    if verbose {
        for skipped in &score.skipped {
            eprintln!("  Skipped: {}", skipped);
        }
    }

    score.sort_by_total();

    Ok(ScoredEvent {
        info: data.info,
        class,
        score,
    })
}
