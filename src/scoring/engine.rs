use std::collections::HashMap;
use std::fmt;

use super::quals::quals_points;
use super::tables::{award_codes, ScoringTables};
use super::types::{
    EventClass, EventFacts, EventScore, EventTier, PointRecord, SkippedEntry,
};

/// Points for each team on the winning alliance of an elimination match
pub const ELIMS_WIN_POINTS: u32 = 5;

/// Flat bonus for reaching the championship finals bracket
pub const CMP_FINALS_BONUS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// An alliance pick references a team with no point record
    UntrackedDraftPick { team_key: String, seed: u32, pick: usize },
    /// The draft table has no value for this alliance/pick slot
    MissingDraftValue { seed: u32, pick: usize },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::UntrackedDraftPick {
                team_key,
                seed,
                pick,
            } => write!(
                f,
                "Alliance {} pick {} ({}) is not in the event rankings",
                seed, pick, team_key
            ),
            ScoringError::MissingDraftValue { seed, pick } => write!(
                f,
                "Draft table has no value for alliance {} pick {}",
                seed, pick
            ),
        }
    }
}

impl std::error::Error for ScoringError {}

/// Point records keyed by team, kept in first-seen order
struct Ledger {
    index: HashMap<String, usize>,
    records: Vec<PointRecord>,
}

impl Ledger {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    fn entry(&mut self, team_key: &str) -> &mut PointRecord {
        let idx = match self.index.get(team_key) {
            Some(&idx) => idx,
            None => {
                self.records.push(PointRecord::new(team_key));
                self.index.insert(team_key.to_string(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        &mut self.records[idx]
    }

    fn get_mut(&mut self, team_key: &str) -> Option<&mut PointRecord> {
        let idx = *self.index.get(team_key)?;
        self.records.get_mut(idx)
    }
}

/// Strip trailing junk some match feeds append to team keys ("frc58 /" -> "frc58")
pub fn normalize_team_key(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

/// Compute every team's point breakdown for one event.
///
/// Records come back in the order teams were first seen (rankings, then awards).
/// Missing award recipients and unresolvable elimination matches are skipped
/// and reported in [`EventScore::skipped`]. Draft lookups are strict.
pub fn aggregate(
    facts: &EventFacts,
    class: EventClass,
    tables: &ScoringTables,
    include_draft: bool,
) -> Result<EventScore, ScoringError> {
    let mut ledger = Ledger::new();
    let mut skipped = Vec::new();

    // Field size is the number of ranked teams, not registered teams
    let team_count = facts.rankings.len() as u32;
    for ranking in &facts.rankings {
        ledger.entry(&ranking.team_key).quals += quals_points(ranking.rank, team_count);
    }

    if class.official && !facts.awards.is_empty() {
        let table = tables.awards.for_tier(class.tier);

        for award in &facts.awards {
            let finals_bonus = class.tier == EventTier::ChampionshipFinals
                && matches!(
                    award.award_type,
                    award_codes::WINNER | award_codes::FINALIST
                );

            for recipient in &award.recipients {
                let team_key = match recipient.as_deref() {
                    Some(key) if !key.is_empty() => key,
                    _ => {
                        skipped.push(SkippedEntry::TeamlessRecipient {
                            award_type: award.award_type,
                        });
                        continue;
                    }
                };

                let record = ledger.entry(team_key);
                record.awards += table.points_for(award.award_type);
                if finals_bonus {
                    record.awards += CMP_FINALS_BONUS;
                }
            }
        }
    }

    for m in facts.matches.iter().filter(|m| m.comp_level.is_elimination()) {
        let Some(winners) = m.winning_team_keys() else {
            skipped.push(SkippedEntry::UnresolvedMatch {
                match_key: m.key.clone(),
            });
            continue;
        };

        for raw_key in winners {
            let team_key = normalize_team_key(raw_key);
            match ledger.get_mut(team_key) {
                Some(record) => record.elims += ELIMS_WIN_POINTS,
                None => skipped.push(SkippedEntry::UntrackedElimsTeam {
                    match_key: m.key.clone(),
                    team_key: team_key.to_string(),
                }),
            }
        }
    }

    if include_draft {
        for alliance in &facts.alliances {
            for (pick, team_key) in alliance.picks.iter().enumerate() {
                let value = tables.draft_value(alliance.seed, pick).ok_or(
                    ScoringError::MissingDraftValue {
                        seed: alliance.seed,
                        pick,
                    },
                )?;
                let record =
                    ledger
                        .get_mut(team_key)
                        .ok_or_else(|| ScoringError::UntrackedDraftPick {
                            team_key: team_key.clone(),
                            seed: alliance.seed,
                            pick,
                        })?;
                record.draft += value;
            }
        }
    }

    Ok(EventScore {
        records: ledger.records,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::types::{
        AllianceEntry, AwardEntry, CompLevel, MatchEntry, RankingEntry,
    };

    const OFFICIAL_NORMAL: EventClass = EventClass {
        official: true,
        tier: EventTier::Normal,
    };

    fn rankings(count: u32) -> Vec<RankingEntry> {
        (1..=count)
            .map(|rank| RankingEntry {
                team_key: format!("frc{}", rank),
                rank,
            })
            .collect()
    }

    fn award(award_type: u32, teams: &[Option<&str>]) -> AwardEntry {
        AwardEntry {
            award_type,
            recipients: teams.iter().map(|t| t.map(str::to_string)).collect(),
        }
    }

    fn elim_match(key: &str, winner: Option<&str>, red: &[&str], blue: &[&str]) -> MatchEntry {
        let mut alliances = HashMap::new();
        alliances.insert("red".to_string(), red.iter().map(|t| t.to_string()).collect());
        alliances.insert("blue".to_string(), blue.iter().map(|t| t.to_string()).collect());
        MatchEntry {
            key: key.to_string(),
            comp_level: CompLevel::Quarterfinal,
            winning_alliance: winner.map(str::to_string),
            alliances,
        }
    }

    fn alliance(seed: u32, picks: &[&str]) -> AllianceEntry {
        AllianceEntry {
            seed,
            picks: picks.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_quals_only() {
        let facts = EventFacts {
            rankings: rankings(4),
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        let quals: Vec<u32> = score.records.iter().map(|r| r.quals).collect();
        assert_eq!(quals, vec![22, 16, 12, 9]);
        assert!(score.records.iter().all(|r| r.total() == r.quals));
        assert!(score.skipped.is_empty());
    }

    #[test]
    fn test_award_only_team_has_no_quals() {
        let facts = EventFacts {
            rankings: rankings(4),
            awards: vec![award(award_codes::CHAIRMANS, &[Some("frc9999")])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        let record = score.get("frc9999").unwrap();
        assert_eq!(record.quals, 0);
        assert_eq!(record.awards, 10);
        assert_eq!(record.total(), record.awards);
        assert_eq!(score.records.len(), 5);
    }

    #[test]
    fn test_awards_ignored_for_unofficial_event() {
        let facts = EventFacts {
            rankings: rankings(4),
            awards: vec![
                award(award_codes::CHAIRMANS, &[Some("frc1")]),
                award(award_codes::WINNER, &[Some("frc2"), Some("frc3")]),
            ],
            ..Default::default()
        };
        let class = EventClass {
            official: false,
            tier: EventTier::Normal,
        };
        let score = aggregate(&facts, class, &ScoringTables::default(), true).unwrap();

        assert!(score.records.iter().all(|r| r.awards == 0));
    }

    #[test]
    fn test_teamless_recipient_skipped() {
        let facts = EventFacts {
            rankings: rankings(2),
            awards: vec![award(award_codes::VOLUNTEER, &[None, Some("")])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.records.len(), 2);
        assert_eq!(score.skipped.len(), 2);
        assert_eq!(
            score.skipped[0],
            SkippedEntry::TeamlessRecipient {
                award_type: award_codes::VOLUNTEER
            }
        );
    }

    #[test]
    fn test_championship_table_for_divisions() {
        let facts = EventFacts {
            rankings: rankings(2),
            awards: vec![award(award_codes::CHAIRMANS, &[Some("frc1")])],
            ..Default::default()
        };
        let class = EventClass {
            official: true,
            tier: EventTier::ChampionshipDivision,
        };
        let score = aggregate(&facts, class, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc1").unwrap().awards, 20);
    }

    #[test]
    fn test_finals_winner_gets_table_value_and_bonus() {
        let mut tables = ScoringTables::default();
        tables.awards.championship.points.retain(|p| p.award != award_codes::WINNER);
        tables.awards.championship.points.push(crate::scoring::AwardPoints {
            award: award_codes::WINNER,
            points: 7,
        });

        let facts = EventFacts {
            rankings: rankings(4),
            awards: vec![
                award(award_codes::WINNER, &[Some("frc1"), Some("frc2")]),
                award(award_codes::FINALIST, &[Some("frc3")]),
                award(award_codes::CHAIRMANS, &[Some("frc4")]),
            ],
            ..Default::default()
        };
        let class = EventClass {
            official: true,
            tier: EventTier::ChampionshipFinals,
        };
        let score = aggregate(&facts, class, &tables, true).unwrap();

        assert_eq!(score.get("frc1").unwrap().awards, 7 + CMP_FINALS_BONUS);
        assert_eq!(score.get("frc2").unwrap().awards, 7 + CMP_FINALS_BONUS);
        assert_eq!(score.get("frc3").unwrap().awards, CMP_FINALS_BONUS);
        assert_eq!(score.get("frc4").unwrap().awards, 20);
    }

    #[test]
    fn test_no_finals_bonus_in_divisions() {
        let facts = EventFacts {
            rankings: rankings(2),
            awards: vec![award(award_codes::WINNER, &[Some("frc1")])],
            ..Default::default()
        };
        let class = EventClass {
            official: true,
            tier: EventTier::ChampionshipDivision,
        };
        let score = aggregate(&facts, class, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc1").unwrap().awards, 0);
    }

    #[test]
    fn test_elims_winners_get_points() {
        let facts = EventFacts {
            rankings: rankings(6),
            matches: vec![
                elim_match("qf1m1", Some("red"), &["frc1", "frc2", "frc3"], &["frc4", "frc5", "frc6"]),
                elim_match("qf1m2", Some("red"), &["frc1", "frc2", "frc3"], &["frc4", "frc5", "frc6"]),
            ],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc1").unwrap().elims, 10);
        assert_eq!(score.get("frc3").unwrap().elims, 10);
        assert_eq!(score.get("frc4").unwrap().elims, 0);
    }

    #[test]
    fn test_qualification_matches_ignored() {
        let mut qm = elim_match("qm1", Some("blue"), &["frc1"], &["frc2"]);
        qm.comp_level = CompLevel::Qualification;
        let facts = EventFacts {
            rankings: rankings(2),
            matches: vec![qm],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert!(score.records.iter().all(|r| r.elims == 0));
    }

    #[test]
    fn test_unplayed_match_skipped() {
        let mut missing_alliance = elim_match("f1m2", Some("blue"), &["frc1"], &["frc2"]);
        missing_alliance.alliances.clear();
        let facts = EventFacts {
            rankings: rankings(2),
            matches: vec![
                elim_match("f1m1", None, &["frc1"], &["frc2"]),
                missing_alliance,
                elim_match("f1m3", Some(""), &["frc1"], &["frc2"]),
            ],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert!(score.records.iter().all(|r| r.elims == 0));
        assert_eq!(score.skipped.len(), 3);
        assert_eq!(
            score.skipped[0],
            SkippedEntry::UnresolvedMatch {
                match_key: "f1m1".to_string()
            }
        );
    }

    #[test]
    fn test_elims_team_key_normalized() {
        let facts = EventFacts {
            rankings: vec![
                RankingEntry { team_key: "frc58".to_string(), rank: 1 },
                RankingEntry { team_key: "frc1".to_string(), rank: 2 },
            ],
            matches: vec![elim_match("sf1m1", Some("red"), &["frc58 /"], &["frc1"])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc58").unwrap().elims, ELIMS_WIN_POINTS);
        assert!(score.get("frc58 /").is_none());
    }

    #[test]
    fn test_untracked_elims_team_skipped() {
        let facts = EventFacts {
            rankings: rankings(1),
            matches: vec![elim_match("sf1m1", Some("red"), &["frc1", "frc77"], &["frc2"])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.records.len(), 1);
        assert_eq!(score.get("frc1").unwrap().elims, ELIMS_WIN_POINTS);
        assert_eq!(
            score.skipped,
            vec![SkippedEntry::UntrackedElimsTeam {
                match_key: "sf1m1".to_string(),
                team_key: "frc77".to_string(),
            }]
        );
    }

    #[test]
    fn test_untracked_elims_team_does_not_block_partners() {
        let facts = EventFacts {
            rankings: rankings(3),
            matches: vec![elim_match("f1m1", Some("red"), &["frc77", "frc1", "frc2"], &["frc3"])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc1").unwrap().elims, ELIMS_WIN_POINTS);
        assert_eq!(score.get("frc2").unwrap().elims, ELIMS_WIN_POINTS);
        assert_eq!(score.skipped.len(), 1);
    }

    #[test]
    fn test_draft_points() {
        let facts = EventFacts {
            rankings: rankings(6),
            alliances: vec![
                alliance(1, &["frc1", "frc4", "frc6"]),
                alliance(2, &["frc2", "frc3", "frc5"]),
            ],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        assert_eq!(score.get("frc1").unwrap().draft, 16);
        assert_eq!(score.get("frc4").unwrap().draft, 16);
        assert_eq!(score.get("frc6").unwrap().draft, 1);
        assert_eq!(score.get("frc2").unwrap().draft, 15);
        assert_eq!(score.get("frc5").unwrap().draft, 2);
    }

    #[test]
    fn test_draft_excluded_when_disabled() {
        let facts = EventFacts {
            rankings: rankings(2),
            alliances: vec![alliance(1, &["frc1", "frc404"])],
            ..Default::default()
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), false).unwrap();

        assert!(score.records.iter().all(|r| r.draft == 0));
    }

    #[test]
    fn test_draft_pick_without_record_is_error() {
        let facts = EventFacts {
            rankings: rankings(2),
            alliances: vec![alliance(1, &["frc1", "frc404"])],
            ..Default::default()
        };
        let err = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap_err();

        assert_eq!(
            err,
            ScoringError::UntrackedDraftPick {
                team_key: "frc404".to_string(),
                seed: 1,
                pick: 1,
            }
        );
    }

    #[test]
    fn test_draft_slot_outside_table_is_error() {
        let facts = EventFacts {
            rankings: rankings(2),
            alliances: vec![alliance(9, &["frc1"])],
            ..Default::default()
        };
        let err = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap_err();

        assert_eq!(err, ScoringError::MissingDraftValue { seed: 9, pick: 0 });
    }

    #[test]
    fn test_full_event_totals() {
        let facts = EventFacts {
            rankings: rankings(4),
            awards: vec![
                award(award_codes::ENGINEERING_INSPIRATION, &[Some("frc2")]),
                award(award_codes::WINNER, &[Some("frc1"), Some("frc4")]),
            ],
            matches: vec![
                elim_match("f1m1", Some("red"), &["frc1", "frc4"], &["frc2", "frc3"]),
                elim_match("f1m2", Some("red"), &["frc1", "frc4"], &["frc2", "frc3"]),
                elim_match("f1m3", None, &["frc1", "frc4"], &["frc2", "frc3"]),
            ],
            alliances: vec![alliance(1, &["frc1", "frc4"]), alliance(2, &["frc2", "frc3"])],
        };
        let score = aggregate(&facts, OFFICIAL_NORMAL, &ScoringTables::default(), true).unwrap();

        // frc1: quals 22, draft 16, elims 10
        let frc1 = score.get("frc1").unwrap();
        assert_eq!((frc1.quals, frc1.awards, frc1.draft, frc1.elims), (22, 0, 16, 10));
        assert_eq!(frc1.total(), 48);

        // frc2: quals 16, awards 8, draft 15
        let frc2 = score.get("frc2").unwrap();
        assert_eq!(frc2.total(), 39);

        for record in &score.records {
            assert_eq!(
                record.total(),
                record.quals + record.awards + record.draft + record.elims
            );
        }
    }

    #[test]
    fn test_normalize_team_key() {
        assert_eq!(normalize_team_key("frc58 /"), "frc58");
        assert_eq!(normalize_team_key("frc58"), "frc58");
        assert_eq!(normalize_team_key(" frc58"), "frc58");
        assert_eq!(normalize_team_key(""), "");
    }
}
