use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A team's finishing position in qualification rounds. Rank 1 is best.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    pub team_key: String,
    pub rank: u32,
}

/// An award handed out at the event.
///
/// Recipients are kept in provider order. `None` (or an empty key) marks a
/// recipient with no team, e.g. an individual volunteer award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardEntry {
    pub award_type: u32,
    pub recipients: Vec<Option<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompLevel {
    Qualification,
    Eighthfinal,
    Quarterfinal,
    Semifinal,
    Final,
    Other,
}

impl CompLevel {
    /// Map a provider comp level code ("qm", "ef", "qf", "sf", "f")
    pub fn from_code(code: &str) -> Self {
        match code {
            "qm" => CompLevel::Qualification,
            "ef" => CompLevel::Eighthfinal,
            "qf" => CompLevel::Quarterfinal,
            "sf" => CompLevel::Semifinal,
            "f" => CompLevel::Final,
            _ => CompLevel::Other,
        }
    }

    pub fn is_elimination(&self) -> bool {
        !matches!(self, CompLevel::Qualification)
    }
}

/// A scheduled match. Unplayed matches carry no winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub key: String,
    pub comp_level: CompLevel,
    pub winning_alliance: Option<String>,
    pub alliances: HashMap<String, Vec<String>>, // color -> team keys
}

impl MatchEntry {
    /// Resolve the team keys of the winning alliance.
    ///
    /// Returns None when the match has no winner yet or the winning color has
    /// no alliance data.
    pub fn winning_team_keys(&self) -> Option<&[String]> {
        let color = self.winning_alliance.as_deref().filter(|c| !c.is_empty())?;
        self.alliances.get(color).map(|teams| teams.as_slice())
    }
}

/// A drafted alliance. `picks[0]` is the captain, then picks in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceEntry {
    pub seed: u32,
    pub picks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTier {
    Normal,
    ChampionshipDivision,
    ChampionshipFinals,
}

impl EventTier {
    pub fn is_championship(&self) -> bool {
        matches!(
            self,
            EventTier::ChampionshipDivision | EventTier::ChampionshipFinals
        )
    }
}

impl fmt::Display for EventTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTier::Normal => write!(f, "normal"),
            EventTier::ChampionshipDivision => write!(f, "championship division"),
            EventTier::ChampionshipFinals => write!(f, "championship finals"),
        }
    }
}

/// How an event counts for scoring purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClass {
    pub official: bool,
    pub tier: EventTier,
}

/// The raw facts an event's score is computed from
#[derive(Debug, Clone, Default)]
pub struct EventFacts {
    pub rankings: Vec<RankingEntry>,
    pub awards: Vec<AwardEntry>,
    pub matches: Vec<MatchEntry>,
    pub alliances: Vec<AllianceEntry>,
}

/// Per-team point breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PointRecord {
    pub team_key: String,
    pub quals: u32,
    pub awards: u32,
    pub draft: u32,
    pub elims: u32,
}

impl PointRecord {
    pub fn new(team_key: impl Into<String>) -> Self {
        Self {
            team_key: team_key.into(),
            ..Default::default()
        }
    }

    pub fn total(&self) -> u32 {
        self.quals + self.awards + self.draft + self.elims
    }
}

/// An upstream entry that was tolerated and left out of the totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedEntry {
    /// Award recipient with no team attached
    TeamlessRecipient { award_type: u32 },
    /// Elimination match without a resolvable winning alliance
    UnresolvedMatch { match_key: String },
    /// Team won an elimination match but never got a point record
    UntrackedElimsTeam { match_key: String, team_key: String },
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedEntry::TeamlessRecipient { award_type } => {
                write!(f, "award {} recipient has no team", award_type)
            }
            SkippedEntry::UnresolvedMatch { match_key } => {
                write!(f, "match {} has no resolvable winner", match_key)
            }
            SkippedEntry::UntrackedElimsTeam {
                match_key,
                team_key,
            } => write!(
                f,
                "match {} winner {} has no point record",
                match_key, team_key
            ),
        }
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default)]
pub struct EventScore {
    pub records: Vec<PointRecord>,
    pub skipped: Vec<SkippedEntry>,
}

impl EventScore {
    /// Sort records by total descending, then quals descending, then team key
    pub fn sort_by_total(&mut self) {
        self.records.sort_by(|a, b| {
            b.total()
                .cmp(&a.total())
                .then_with(|| b.quals.cmp(&a.quals))
                .then_with(|| a.team_key.cmp(&b.team_key))
        });
    }

    #[cfg(test)]
    pub fn get(&self, team_key: &str) -> Option<&PointRecord> {
        self.records.iter().find(|r| r.team_key == team_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(winner: Option<&str>) -> MatchEntry {
        let mut alliances = HashMap::new();
        alliances.insert(
            "red".to_string(),
            vec!["frc1".to_string(), "frc2".to_string(), "frc3".to_string()],
        );
        alliances.insert(
            "blue".to_string(),
            vec!["frc4".to_string(), "frc5".to_string(), "frc6".to_string()],
        );
        MatchEntry {
            key: "2019test_sf1m1".to_string(),
            comp_level: CompLevel::Semifinal,
            winning_alliance: winner.map(str::to_string),
            alliances,
        }
    }

    #[test]
    fn test_winning_team_keys_resolves() {
        let m = sample_match(Some("blue"));
        assert_eq!(
            m.winning_team_keys(),
            Some(&["frc4".to_string(), "frc5".to_string(), "frc6".to_string()][..])
        );
    }

    #[test]
    fn test_winning_team_keys_unplayed() {
        assert!(sample_match(None).winning_team_keys().is_none());
        assert!(sample_match(Some("")).winning_team_keys().is_none());
    }

    #[test]
    fn test_winning_team_keys_missing_color() {
        let mut m = sample_match(Some("red"));
        m.alliances.remove("red");
        assert!(m.winning_team_keys().is_none());
    }

    #[test]
    fn test_comp_level_codes() {
        assert_eq!(CompLevel::from_code("qm"), CompLevel::Qualification);
        assert_eq!(CompLevel::from_code("sf"), CompLevel::Semifinal);
        assert_eq!(CompLevel::from_code("xx"), CompLevel::Other);
        assert!(!CompLevel::Qualification.is_elimination());
        assert!(CompLevel::Other.is_elimination());
    }

    #[test]
    fn test_total_is_sum() {
        let record = PointRecord {
            team_key: "frc58".to_string(),
            quals: 17,
            awards: 8,
            draft: 16,
            elims: 10,
        };
        assert_eq!(record.total(), 51);
    }

    #[test]
    fn test_sort_by_total_tie_breaks() {
        let mut score = EventScore {
            records: vec![
                PointRecord { team_key: "frc2".to_string(), quals: 10, awards: 5, ..Default::default() },
                PointRecord { team_key: "frc1".to_string(), quals: 15, ..Default::default() },
                PointRecord { team_key: "frc3".to_string(), quals: 20, ..Default::default() },
                PointRecord { team_key: "frc0".to_string(), quals: 15, ..Default::default() },
            ],
            skipped: vec![],
        };
        score.sort_by_total();
        let order: Vec<_> = score.records.iter().map(|r| r.team_key.as_str()).collect();
        assert_eq!(order, vec!["frc3", "frc0", "frc1", "frc2"]);
    }
}
