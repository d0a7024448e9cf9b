//! Wire types for The Blue Alliance API v3 and their mapping onto scoring types.

use serde::Deserialize;
use std::collections::HashMap;

use crate::provider::EventInfo;
use crate::scoring::{AllianceEntry, AwardEntry, CompLevel, MatchEntry, RankingEntry};

#[derive(Debug, Deserialize)]
pub struct TbaEvent {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub event_type: i32,
}

impl From<TbaEvent> for EventInfo {
    fn from(event: TbaEvent) -> Self {
        EventInfo {
            key: event.key,
            name: event.name,
            event_type: event.event_type,
        }
    }
}

/// `/event/{key}/rankings` body. The whole body is `null` before quals start.
#[derive(Debug, Deserialize)]
pub struct TbaRankings {
    #[serde(default)]
    pub rankings: Option<Vec<TbaRanking>>,
}

#[derive(Debug, Deserialize)]
pub struct TbaRanking {
    pub team_key: String,
    pub rank: Option<u32>,
}

pub fn rankings_from(body: Option<TbaRankings>) -> Vec<RankingEntry> {
    body.and_then(|b| b.rankings)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            Some(RankingEntry {
                rank: r.rank?,
                team_key: r.team_key,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct TbaAlliance {
    #[serde(default)]
    pub picks: Vec<String>,
}

/// Seeds follow list order: the first alliance is seed 1
pub fn alliances_from(body: Option<Vec<TbaAlliance>>) -> Vec<AllianceEntry> {
    body.unwrap_or_default()
        .into_iter()
        .zip(1u32..)
        .map(|(alliance, seed)| AllianceEntry {
            seed,
            picks: alliance.picks,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct TbaMatch {
    pub key: String,
    pub comp_level: String,
    #[serde(default)]
    pub winning_alliance: Option<String>,
    #[serde(default)]
    pub alliances: Option<HashMap<String, TbaMatchAlliance>>,
}

#[derive(Debug, Deserialize)]
pub struct TbaMatchAlliance {
    #[serde(default)]
    pub team_keys: Vec<String>,
}

impl From<TbaMatch> for MatchEntry {
    fn from(m: TbaMatch) -> Self {
        MatchEntry {
            comp_level: CompLevel::from_code(&m.comp_level),
            winning_alliance: m.winning_alliance.filter(|c| !c.is_empty()),
            alliances: m
                .alliances
                .unwrap_or_default()
                .into_iter()
                .map(|(color, alliance)| (color, alliance.team_keys))
                .collect(),
            key: m.key,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TbaAward {
    pub award_type: u32,
    #[serde(default)]
    pub recipient_list: Vec<TbaRecipient>,
}

#[derive(Debug, Deserialize)]
pub struct TbaRecipient {
    #[serde(default)]
    pub team_key: Option<String>,
}

impl From<TbaAward> for AwardEntry {
    fn from(award: TbaAward) -> Self {
        AwardEntry {
            award_type: award.award_type,
            recipients: award
                .recipient_list
                .into_iter()
                .map(|r| r.team_key)
                .collect(),
        }
    }
}
