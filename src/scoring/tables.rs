use serde::{Deserialize, Serialize};

use super::types::{EventClass, EventTier};

/// Provider award-type codes the scoring rules refer to by name
pub mod award_codes {
    pub const CHAIRMANS: u32 = 0;
    pub const WINNER: u32 = 1;
    pub const FINALIST: u32 = 2;
    pub const WOODIE_FLOWERS: u32 = 3;
    pub const DEANS_LIST: u32 = 4;
    pub const VOLUNTEER: u32 = 5;
    pub const FOUNDERS: u32 = 6;
    pub const ENGINEERING_INSPIRATION: u32 = 9;
    pub const ROOKIE_ALL_STAR: u32 = 10;
    pub const ROOKIE_INSPIRATION: u32 = 15;
    pub const CHAIRMANS_FINALIST: u32 = 69;
}

/// Provider event-type codes
pub mod event_codes {
    pub const REGIONAL: i32 = 0;
    pub const DISTRICT: i32 = 1;
    pub const DISTRICT_CMP: i32 = 2;
    pub const CMP_DIVISION: i32 = 3;
    pub const CMP_FINALS: i32 = 4;
    pub const DISTRICT_CMP_DIVISION: i32 = 5;
}

/// All scoring tables, as read from the `scoring` section of the config.
///
/// Example YAML:
/// ```yaml
/// include_draft: true
/// events:
///   official: [0, 1, 2, 3, 4, 5]
///   championship_divisions: [3]
///   championship_finals: [4]
/// awards:
///   normal:
///     default: 5
///     points:
///       - { award: 0, points: 10 }
/// draft:
///   - [16, 16, 1, 0]
///   - [15, 15, 2, 0]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringTables {
    #[serde(default = "default_include_draft")]
    pub include_draft: bool,

    #[serde(default)]
    pub events: EventClassifier,

    #[serde(default)]
    pub awards: AwardTables,

    /// Row `s - 1` holds the values for alliance seed `s`, indexed by pick order
    #[serde(default = "default_draft_table")]
    pub draft: Vec<Vec<u32>>,
}

fn default_include_draft() -> bool {
    true
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            include_draft: true,
            events: EventClassifier::default(),
            awards: AwardTables::default(),
            draft: default_draft_table(),
        }
    }
}

impl ScoringTables {
    /// Draft value for pick index `pick` on alliance `seed` (1-based)
    pub fn draft_value(&self, seed: u32, pick: usize) -> Option<u32> {
        let row = (seed as usize).checked_sub(1)?;
        self.draft.get(row)?.get(pick).copied()
    }
}

/// District-style alliance values: captain and first pick of alliance `s` get
/// `17 - s`, the second pick gets `s`, backups get nothing.
fn default_draft_table() -> Vec<Vec<u32>> {
    (1..=8u32).map(|s| vec![17 - s, 17 - s, s, 0]).collect()
}

/// Maps provider event-type codes onto [`EventClass`]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventClassifier {
    /// Event types whose awards count
    #[serde(default)]
    pub official: Vec<i32>,

    #[serde(default)]
    pub championship_divisions: Vec<i32>,

    #[serde(default)]
    pub championship_finals: Vec<i32>,
}

impl Default for EventClassifier {
    fn default() -> Self {
        use event_codes::*;
        Self {
            official: vec![
                REGIONAL,
                DISTRICT,
                DISTRICT_CMP,
                CMP_DIVISION,
                CMP_FINALS,
                DISTRICT_CMP_DIVISION,
            ],
            championship_divisions: vec![CMP_DIVISION],
            championship_finals: vec![CMP_FINALS],
        }
    }
}

impl EventClassifier {
    pub fn classify(&self, event_type: i32) -> EventClass {
        let tier = if self.championship_finals.contains(&event_type) {
            EventTier::ChampionshipFinals
        } else if self.championship_divisions.contains(&event_type) {
            EventTier::ChampionshipDivision
        } else {
            EventTier::Normal
        };

        EventClass {
            official: self.official.contains(&event_type),
            tier,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AwardTables {
    #[serde(default = "AwardPointTable::normal")]
    pub normal: AwardPointTable,

    #[serde(default = "AwardPointTable::championship")]
    pub championship: AwardPointTable,
}

impl Default for AwardTables {
    fn default() -> Self {
        Self {
            normal: AwardPointTable::normal(),
            championship: AwardPointTable::championship(),
        }
    }
}

impl AwardTables {
    /// Championship divisions and finals share the championship table
    pub fn for_tier(&self, tier: EventTier) -> &AwardPointTable {
        if tier.is_championship() {
            &self.championship
        } else {
            &self.normal
        }
    }
}

/// Award values for one event tier. Award types not listed score `default`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AwardPointTable {
    #[serde(default)]
    pub default: u32,

    #[serde(default)]
    pub points: Vec<AwardPoints>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AwardPoints {
    /// Provider award-type code
    pub award: u32,
    pub points: u32,
}

impl AwardPointTable {
    pub fn points_for(&self, award_type: u32) -> u32 {
        self.points
            .iter()
            .find(|entry| entry.award == award_type)
            .map(|entry| entry.points)
            .unwrap_or(self.default)
    }

    pub fn normal() -> Self {
        use award_codes::*;
        Self {
            default: 5,
            points: vec![
                AwardPoints { award: CHAIRMANS, points: 10 },
                AwardPoints { award: ENGINEERING_INSPIRATION, points: 8 },
                AwardPoints { award: ROOKIE_ALL_STAR, points: 8 },
                AwardPoints { award: WINNER, points: 0 },
                AwardPoints { award: FINALIST, points: 0 },
                AwardPoints { award: WOODIE_FLOWERS, points: 0 },
                AwardPoints { award: DEANS_LIST, points: 0 },
                AwardPoints { award: VOLUNTEER, points: 0 },
                AwardPoints { award: FOUNDERS, points: 0 },
            ],
        }
    }

    pub fn championship() -> Self {
        use award_codes::*;
        Self {
            default: 10,
            points: vec![
                AwardPoints { award: CHAIRMANS, points: 20 },
                AwardPoints { award: CHAIRMANS_FINALIST, points: 15 },
                AwardPoints { award: ENGINEERING_INSPIRATION, points: 15 },
                AwardPoints { award: ROOKIE_INSPIRATION, points: 10 },
                AwardPoints { award: WINNER, points: 0 },
                AwardPoints { award: FINALIST, points: 0 },
                AwardPoints { award: WOODIE_FLOWERS, points: 0 },
                AwardPoints { award: DEANS_LIST, points: 0 },
                AwardPoints { award: VOLUNTEER, points: 0 },
                AwardPoints { award: FOUNDERS, points: 0 },
            ],
        }
    }
}
