use crate::analysis::{analyze, AnalysisResult};
use crate::error::Result;
use crate::profile::{performance_profiles, PerformanceProfile};
use crate::scenario::{scenario_count, Scenario, ScenarioEnumerator};
use crate::simulation::{MonteCarloEstimator, SimulationSummary};
use crate::standings::{EventCounts, Standings};

/// Snapshot of a championship: standings, remaining events and the
/// performance profiles derived from the standings.
///
/// Updates never mutate a snapshot in place; `with_standings` and
/// `with_events` build a new one with profiles recomputed, so standings
/// and profiles always agree.
#[derive(Clone, Debug)]
pub struct ChampionshipState {
    standings: Standings,
    events: EventCounts,
    profiles: Vec<PerformanceProfile>,
}

impl ChampionshipState {
    /// Snapshot with profiles derived from `standings`
    pub fn new(standings: Standings, events: EventCounts) -> Self {
        let profiles = performance_profiles(&standings);
        ChampionshipState {
            standings,
            events,
            profiles,
        }
    }

    /// Get the standings
    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    /// Get the remaining events
    pub fn events(&self) -> EventCounts {
        self.events
    }

    /// Get the performance profiles
    pub fn profiles(&self) -> &[PerformanceProfile] {
        &self.profiles
    }

    /// New snapshot after a standings change
    pub fn with_standings(&self, standings: Standings) -> Self {
        ChampionshipState::new(standings, self.events)
    }

    /// New snapshot after the calendar changes
    pub fn with_events(&self, events: EventCounts) -> Self {
        ChampionshipState::new(self.standings.clone(), events)
    }

    /// Points still on offer to one competitor
    pub fn max_points_available(&self) -> u64 {
        self.events.max_points_available()
    }

    /// Scenarios a full enumeration would produce
    pub fn scenario_count(&self) -> u128 {
        scenario_count(self.events, self.standings.len())
    }

    /// Name of the current leader, the default analysis target.
    pub fn leader(&self) -> &str {
        &self.standings.leader().1.name
    }

    /// Enumerate every scenario from this snapshot
    pub fn enumerate(&self, enumerator: &ScenarioEnumerator) -> Result<Vec<Scenario>> {
        enumerator.enumerate(&self.standings, self.events)
    }

    /// Enumerate every scenario and analyze it for `target` (leader if `None`).
    pub fn analyze(
        &self,
        enumerator: &ScenarioEnumerator,
        target: Option<&str>,
    ) -> Result<(Vec<Scenario>, AnalysisResult)> {
        let target = target.unwrap_or_else(|| self.leader());
        // Reject an unknown target before paying for the enumeration
        self.standings.require(target)?;
        let scenarios = self.enumerate(enumerator)?;
        let result = analyze(&scenarios, target, &self.standings, self.max_points_available())?;
        Ok((scenarios, result))
    }

    pub fn run_monte_carlo(&self, estimator: &MonteCarloEstimator) -> Result<SimulationSummary> {
        estimator.run(&self.standings, self.events, &self.profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> ChampionshipState {
        let standings =
            Standings::new([("Piastri", 346), ("Norris", 332), ("Verstappen", 306)]).unwrap();
        ChampionshipState::new(standings, EventCounts::new(5, 2))
    }

    #[test]
    fn test_defaults_to_leader() {
        let state = make_state();
        let (scenarios, result) = state.analyze(&ScenarioEnumerator::default(), None).unwrap();
        assert_eq!(result.target, "Piastri");
        assert_eq!(scenarios.len() as u128, state.scenario_count());
    }

    #[test]
    fn test_with_standings_rebuilds_profiles() {
        let state = make_state();
        let updated = state.with_standings(
            Standings::new([("Piastri", 346), ("Norris", 332), ("Verstappen", 400)]).unwrap(),
        );

        assert_eq!(updated.leader(), "Verstappen");
        assert!(updated.profiles()[2].win > state.profiles()[2].win);
        // Original snapshot untouched
        assert_eq!(state.leader(), "Piastri");
        assert_eq!(state.standings().points_of("Verstappen"), Some(306));
    }

    #[test]
    fn test_with_events() {
        let state = make_state();
        let updated = state.with_events(EventCounts::new(4, 2));
        assert_eq!(updated.max_points_available(), 4 * 25 + 2 * 8);
        assert_eq!(state.max_points_available(), 5 * 25 + 2 * 8);
        assert_eq!(updated.profiles(), state.profiles());
    }

    #[test]
    fn test_unknown_target_fails_fast() {
        let state = make_state();
        assert!(state
            .analyze(&ScenarioEnumerator::default(), Some("Hamilton"))
            .is_err());
    }

    #[test]
    fn test_monte_carlo_through_state() {
        let state = make_state();
        let estimator = MonteCarloEstimator::new(500, Some(11)).unwrap();
        let summary = state.run_monte_carlo(&estimator).unwrap();
        assert_eq!(summary.trials, 500);
        assert_eq!(summary.odds.len(), 3);
    }
}
