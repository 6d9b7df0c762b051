//! Aggregations over an enumerated scenario set.
//!
//! Everything here is a plain pass over the scenario slice: group-by-winner
//! counts, a min-by-key for the cheapest winning path, and per race-win
//! count breakdowns for one target competitor.

use std::ops::RangeInclusive;

use tracing::info;

use crate::error::{InvalidInput, Result};
use crate::scenario::Scenario;
use crate::standings::Standings;

/// Championships won by one competitor across all scenarios.
#[derive(Clone, Debug, PartialEq)]
pub struct ChampionshipTally {
    pub competitor: String,
    pub championships: usize,
    /// Share of all scenarios, 0-100.
    pub percentage: f64,
}

/// Whether a target with no winning scenario can still mathematically win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Elimination {
    /// The target wins at least one scenario.
    Contender,
    /// Gap to the leader is at least the points still available.
    Eliminated { leader: String, gap: u64, max_available: u64 },
    /// No enumerated scenario is won, but the gap is still closable.
    NoWinningScenario { leader: String, gap: u64, max_available: u64 },
}

impl Elimination {
    /// True only when the points gap cannot be closed
    pub fn is_eliminated(&self) -> bool {
        matches!(self, Elimination::Eliminated { .. })
    }
}

/// Winning scenario with the fewest target wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinPath {
    /// Position of the scenario in the enumerated sequence.
    pub scenario_index: usize,
    pub race_wins: u32,
    pub sprint_wins: u32,
}

impl WinPath {
    pub fn total_wins(&self) -> u32 {
        self.race_wins + self.sprint_wins
    }
}

/// Extent of the target's wins over all of its winning scenarios.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinRanges {
    pub race_wins: RangeInclusive<u32>,
    pub sprint_wins: RangeInclusive<u32>,
}

/// Winning scenarios that share one race-win count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceWinBreakdown {
    pub race_wins: u32,
    pub scenarios: usize,
    pub sprint_wins: RangeInclusive<u32>,
}

/// How often the target wins the title given exactly `race_wins` race wins.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalWinRate {
    pub race_wins: u32,
    pub championships: usize,
    pub scenarios: usize,
    /// `championships / scenarios`, 0-100.
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub target: String,
    pub total_scenarios: usize,
    pub tally: Vec<ChampionshipTally>,
    pub elimination: Elimination,
    /// Indices of scenarios the target wins, in enumeration order.
    pub winning_scenarios: Vec<usize>,
    pub minimum_win_path: Option<WinPath>,
    pub win_ranges: Option<WinRanges>,
    pub breakdown: Vec<RaceWinBreakdown>,
    pub conditional_win_rates: Vec<ConditionalWinRate>,
}

impl AnalysisResult {
    /// Scenarios the target wins
    pub fn target_championships(&self) -> usize {
        self.winning_scenarios.len()
    }

    /// Get the tally for one competitor
    pub fn tally_for(&self, competitor: &str) -> Option<&ChampionshipTally> {
        self.tally.iter().find(|t| t.competitor == competitor)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn span(values: impl Iterator<Item = u32>) -> Option<RangeInclusive<u32>> {
    values.fold(None, |acc, v| match acc {
        None => Some(v..=v),
        Some(r) => Some((*r.start()).min(v)..=(*r.end()).max(v)),
    })
}

/// Analyze an enumerated scenario set from the point of view of `target`.
///
/// The minimum-win path is the first winning scenario, in enumeration order,
/// with the smallest race-plus-sprint win count; other scenarios may need
/// the same number of wins.
pub fn analyze(
    scenarios: &[Scenario],
    target: &str,
    standings: &Standings,
    max_available_points: u64,
) -> Result<AnalysisResult> {
    let target_idx = standings.require(target)?;
    let first = scenarios.first().ok_or(InvalidInput::NoScenarios)?;
    if let Some(bad) = scenarios
        .iter()
        .find(|s| s.competitor_count() != standings.len())
    {
        return Err(InvalidInput::ShapeMismatch {
            expected: standings.len(),
            found: bad.competitor_count(),
        }
        .into());
    }
    let race_count = first.race_count();
    let total = scenarios.len();

    let mut counts = vec![0usize; standings.len()];
    for s in scenarios {
        counts[s.winner] += 1;
    }
    let tally = standings
        .iter()
        .zip(&counts)
        .map(|(c, &championships)| ChampionshipTally {
            competitor: c.name.clone(),
            championships,
            percentage: percentage(championships, total),
        })
        .collect();

    let winning_scenarios: Vec<usize> = scenarios
        .iter()
        .enumerate()
        .filter(|(_, s)| s.winner == target_idx)
        .map(|(i, _)| i)
        .collect();
    let wins_of = |i: usize| *scenarios[i].outcome(target_idx);

    let elimination = if winning_scenarios.is_empty() {
        let (_, leader) = standings.leader();
        let gap = u64::from(leader.points) - u64::from(standings.competitor(target_idx).points);
        if gap >= max_available_points {
            Elimination::Eliminated {
                leader: leader.name.clone(),
                gap,
                max_available: max_available_points,
            }
        } else {
            Elimination::NoWinningScenario {
                leader: leader.name.clone(),
                gap,
                max_available: max_available_points,
            }
        }
    } else {
        Elimination::Contender
    };

    // min_by_key keeps the first of equal keys
    let minimum_win_path = winning_scenarios
        .iter()
        .copied()
        .min_by_key(|&i| wins_of(i).race_wins + wins_of(i).sprint_wins)
        .map(|i| WinPath {
            scenario_index: i,
            race_wins: wins_of(i).race_wins,
            sprint_wins: wins_of(i).sprint_wins,
        });

    let win_ranges = span(winning_scenarios.iter().map(|&i| wins_of(i).race_wins)).and_then(
        |race_wins| {
            span(winning_scenarios.iter().map(|&i| wins_of(i).sprint_wins))
                .map(|sprint_wins| WinRanges { race_wins, sprint_wins })
        },
    );

    let breakdown = match &win_ranges {
        Some(ranges) => ranges
            .race_wins
            .clone()
            .filter_map(|k| {
                let sprints: Vec<u32> = winning_scenarios
                    .iter()
                    .filter(|&&i| wins_of(i).race_wins == k)
                    .map(|&i| wins_of(i).sprint_wins)
                    .collect();
                span(sprints.iter().copied()).map(|sprint_wins| RaceWinBreakdown {
                    race_wins: k,
                    scenarios: sprints.len(),
                    sprint_wins,
                })
            })
            .collect(),
        None => Vec::new(),
    };

    let conditional_win_rates = (0..=race_count)
        .filter_map(|k| {
            let (subset, won) = scenarios
                .iter()
                .filter(|s| s.outcome(target_idx).race_wins == k)
                .fold((0usize, 0usize), |(n, w), s| {
                    (n + 1, w + usize::from(s.winner == target_idx))
                });
            (subset > 0).then(|| ConditionalWinRate {
                race_wins: k,
                championships: won,
                scenarios: subset,
                percentage: percentage(won, subset),
            })
        })
        .collect();

    info!(
        competitor = target,
        scenarios = total,
        championships = winning_scenarios.len(),
        "scenario analysis complete"
    );

    Ok(AnalysisResult {
        target: target.to_string(),
        total_scenarios: total,
        tally,
        elimination,
        winning_scenarios,
        minimum_win_path,
        win_ranges,
        breakdown,
        conditional_win_rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChampionshipError;
    use crate::scenario::enumerate_scenarios;
    use crate::standings::EventCounts;

    fn setup(entries: &[(&str, u32)], events: EventCounts) -> (Standings, Vec<Scenario>) {
        let standings = Standings::new(entries.iter().copied()).unwrap();
        let scenarios = enumerate_scenarios(&standings, events).unwrap();
        (standings, scenarios)
    }

    #[test]
    fn test_tally_sums_to_total() {
        let events = EventCounts::new(5, 2);
        let (standings, scenarios) =
            setup(&[("Piastri", 346), ("Norris", 332), ("Verstappen", 306)], events);
        let result =
            analyze(&scenarios, "Verstappen", &standings, events.max_points_available()).unwrap();

        assert_eq!(result.total_scenarios, 21 * 6);
        let sum: usize = result.tally.iter().map(|t| t.championships).sum();
        assert_eq!(sum, result.total_scenarios);
        let pct: f64 = result.tally.iter().map(|t| t.percentage).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_eliminated_target() {
        let events = EventCounts::new(1, 0);
        let (standings, scenarios) = setup(&[("A", 100), ("B", 60)], events);
        let result = analyze(&scenarios, "B", &standings, events.max_points_available()).unwrap();

        assert_eq!(result.target_championships(), 0);
        assert!(result.elimination.is_eliminated());
        assert!(result.minimum_win_path.is_none());
        assert!(result.win_ranges.is_none());
        assert!(result.breakdown.is_empty());
        // The conditional table is still reported for every race-win count
        assert_eq!(result.conditional_win_rates.len(), 2);
        assert!(result.conditional_win_rates.iter().all(|r| r.championships == 0));
    }

    #[test]
    fn test_no_winning_scenario_but_not_eliminated() {
        // B trails by 10 with 25 available, but the per-competitor split
        // gives A 15 points when B wins the only race: 100+15 ties 90+25
        // and the tie goes to A.
        let events = EventCounts::new(1, 0);
        let (standings, scenarios) = setup(&[("A", 100), ("B", 90)], events);
        let result = analyze(&scenarios, "B", &standings, events.max_points_available()).unwrap();

        assert_eq!(result.target_championships(), 0);
        assert_eq!(
            result.elimination,
            Elimination::NoWinningScenario {
                leader: "A".to_string(),
                gap: 10,
                max_available: 25
            }
        );
    }

    #[test]
    fn test_minimum_win_path_and_ranges() {
        let events = EventCounts::new(2, 1);
        let (standings, scenarios) = setup(&[("A", 100), ("B", 95)], events);
        let result = analyze(&scenarios, "B", &standings, events.max_points_available()).unwrap();

        // B needs at least one race win: 95+25+15 = 135 vs 100+25+15 = 140
        // is short, so both races are needed, plus nothing from the sprint.
        let path = result.minimum_win_path.clone().unwrap();
        assert_eq!(path.race_wins, 2);
        assert_eq!(path.sprint_wins, 0);
        let target = scenarios[path.scenario_index].outcome(1);
        assert_eq!(target.race_wins, 2);

        let ranges = result.win_ranges.clone().unwrap();
        assert_eq!(ranges.race_wins, 2..=2);
        assert_eq!(ranges.sprint_wins, 0..=1);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].scenarios, 2);
    }

    #[test]
    fn test_conditional_rates() {
        let events = EventCounts::new(2, 1);
        let (standings, scenarios) = setup(&[("A", 100), ("B", 95)], events);
        let result = analyze(&scenarios, "B", &standings, events.max_points_available()).unwrap();

        assert_eq!(result.conditional_win_rates.len(), 3);
        let two = &result.conditional_win_rates[2];
        assert_eq!(two.race_wins, 2);
        assert_eq!(two.scenarios, 2);
        assert_eq!(two.championships, 2);
        assert!((two.percentage - 100.0).abs() < 1e-9);
        assert_eq!(result.conditional_win_rates[0].championships, 0);
    }

    #[test]
    fn test_unknown_target_rejected() {
        let events = EventCounts::new(1, 1);
        let (standings, scenarios) = setup(&[("A", 100), ("B", 95)], events);
        let result = analyze(&scenarios, "Z", &standings, 33);
        assert!(matches!(
            result,
            Err(ChampionshipError::InvalidInput(InvalidInput::UnknownCompetitor(_)))
        ));
    }

    #[test]
    fn test_empty_scenarios_rejected() {
        let standings = Standings::new([("A", 1)]).unwrap();
        let result = analyze(&[], "A", &standings, 0);
        assert!(matches!(
            result,
            Err(ChampionshipError::InvalidInput(InvalidInput::NoScenarios))
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let (_, scenarios) = setup(&[("A", 100), ("B", 95)], EventCounts::new(1, 0));
        let three = Standings::new([("A", 100), ("B", 95), ("C", 90)]).unwrap();
        let result = analyze(&scenarios, "A", &three, 25);
        assert!(matches!(
            result,
            Err(ChampionshipError::InvalidInput(InvalidInput::ShapeMismatch { expected: 3, found: 2 }))
        ));
    }
}
