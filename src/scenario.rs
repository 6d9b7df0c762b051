use rayon::prelude::*;
use tracing::{debug, warn};

use crate::constants::DEFAULT_MAX_SCENARIOS;
use crate::distribution::{distribution_count, win_distributions};
use crate::error::{ChampionshipError, Result};
use crate::points::{project, EventKind, PointsTable};
use crate::standings::{EventCounts, Standings};

/// One competitor's share of a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompetitorOutcome {
    pub race_wins: u32,
    pub sprint_wins: u32,
    pub total: u64,
}

/// A fully resolved hypothetical end of season.
///
/// `outcomes` is indexed like the standings it was enumerated from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scenario {
    pub outcomes: Vec<CompetitorOutcome>,
    pub winner: usize,
}

impl Scenario {
    /// Get one competitor's outcome
    pub fn outcome(&self, competitor: usize) -> &CompetitorOutcome {
        &self.outcomes[competitor]
    }

    /// Final total of the champion
    pub fn winner_total(&self) -> u64 {
        self.outcomes[self.winner].total
    }

    /// Number of competitors in the scenario
    pub fn competitor_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of races in the season this scenario resolves.
    pub fn race_count(&self) -> u32 {
        self.outcomes.iter().map(|o| o.race_wins).sum()
    }

    /// Number of sprints in the season this scenario resolves.
    pub fn sprint_count(&self) -> u32 {
        self.outcomes.iter().map(|o| o.sprint_wins).sum()
    }
}

/// Index of the highest total. Equal totals go to the lower index.
pub fn pick_winner(totals: impl IntoIterator<Item = u64>) -> usize {
    let mut best: Option<(usize, u64)> = None;
    for (i, total) in totals.into_iter().enumerate() {
        match best {
            Some((_, top)) if total <= top => {}
            _ => best = Some((i, total)),
        }
    }
    best.map(|(i, _)| i).unwrap_or(0)
}

/// Scenarios produced by `events` for `competitor_count` competitors.
pub fn scenario_count(events: EventCounts, competitor_count: usize) -> u128 {
    distribution_count(events.races, competitor_count)
        .saturating_mul(distribution_count(events.sprints, competitor_count))
}

/// Exhaustive scenario enumerator.
///
/// Crosses every race win distribution with every sprint win distribution
/// and projects each pair into final totals. Refuses to start when the
/// projected scenario count is above `max_scenarios`.
///
/// Point tables are only installed through [`ScenarioEnumerator::with_points`],
/// which rejects tables that increase with position.
#[derive(Clone, Copy, Debug)]
pub struct ScenarioEnumerator {
    pub max_scenarios: u64,
    race_points: PointsTable,
    sprint_points: PointsTable,
}

impl Default for ScenarioEnumerator {
    fn default() -> Self {
        ScenarioEnumerator::new(DEFAULT_MAX_SCENARIOS)
    }
}

impl ScenarioEnumerator {
    /// Enumerator with the standard race and sprint podium points.
    pub fn new(max_scenarios: u64) -> Self {
        ScenarioEnumerator {
            max_scenarios,
            race_points: EventKind::Race.podium(),
            sprint_points: EventKind::Sprint.podium(),
        }
    }

    /// Enumerator with custom point tables.
    pub fn with_points(
        max_scenarios: u64,
        race_points: PointsTable,
        sprint_points: PointsTable,
    ) -> Result<Self> {
        race_points.validate()?;
        sprint_points.validate()?;
        Ok(ScenarioEnumerator {
            max_scenarios,
            race_points,
            sprint_points,
        })
    }

    /// Get the race points table
    pub fn race_points(&self) -> PointsTable {
        self.race_points
    }

    /// Get the sprint points table
    pub fn sprint_points(&self) -> PointsTable {
        self.sprint_points
    }

    /// Projected scenario count, checked against the ceiling.
    pub fn check_capacity(&self, events: EventCounts, competitor_count: usize) -> Result<u64> {
        let projected = scenario_count(events, competitor_count);
        if projected > u128::from(self.max_scenarios) {
            return Err(ChampionshipError::ResourceExceeded {
                projected,
                ceiling: self.max_scenarios,
            });
        }
        // fits: bounded by a u64 ceiling
        let projected = projected as u64;
        if projected.saturating_mul(2) >= self.max_scenarios {
            warn!(
                projected,
                ceiling = self.max_scenarios,
                "scenario count is close to the ceiling"
            );
        }
        Ok(projected)
    }

    /// Enumerate every scenario for the given standings and remaining events.
    ///
    /// Output order is fixed: race distributions in generator order, and for
    /// each of them sprint distributions in generator order.
    pub fn enumerate(&self, standings: &Standings, events: EventCounts) -> Result<Vec<Scenario>> {
        self.race_points.validate()?;
        self.sprint_points.validate()?;
        let n = standings.len();
        let expected = self.check_capacity(events, n)?;

        let race_dists = win_distributions(events.races, n);
        let sprint_dists = win_distributions(events.sprints, n);
        debug!(
            races = events.races,
            sprints = events.sprints,
            race_distributions = race_dists.len(),
            sprint_distributions = sprint_dists.len(),
            "enumerating scenarios"
        );

        let base: Vec<u64> = standings.iter().map(|c| u64::from(c.points)).collect();
        let sprint_points: Vec<Vec<u64>> = sprint_dists
            .iter()
            .map(|d| project(d, events.sprints, &self.sprint_points))
            .collect();

        let scenarios: Vec<Scenario> = race_dists
            .par_iter()
            .flat_map_iter(|race| {
                let race_points = project(race, events.races, &self.race_points);
                sprint_dists
                    .iter()
                    .zip(&sprint_points)
                    .map(|(sprint, sprint_pts)| {
                        build_scenario(&base, race, &race_points, sprint, sprint_pts)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        assert!(
            !scenarios.is_empty() && scenarios.len() as u64 == expected,
            "enumerated {} scenarios, expected {}",
            scenarios.len(),
            expected
        );
        Ok(scenarios)
    }
}

fn build_scenario(
    base: &[u64],
    race: &[u32],
    race_points: &[u64],
    sprint: &[u32],
    sprint_points: &[u64],
) -> Scenario {
    let outcomes: Vec<CompetitorOutcome> = (0..base.len())
        .map(|i| CompetitorOutcome {
            race_wins: race[i],
            sprint_wins: sprint[i],
            total: base[i] + race_points[i] + sprint_points[i],
        })
        .collect();
    let winner = pick_winner(outcomes.iter().map(|o| o.total));
    Scenario { outcomes, winner }
}

/// Enumerate with the default ceiling.
pub fn enumerate_scenarios(standings: &Standings, events: EventCounts) -> Result<Vec<Scenario>> {
    ScenarioEnumerator::default().enumerate(standings, events)
}
