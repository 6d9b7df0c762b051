//! Property-based tests for win distributions, scenarios and analysis.

use std::collections::HashSet;

use proptest::prelude::*;
use statrs::function::factorial::binomial;

use championship_core::points::EventKind;
use championship_core::{
    analyze, distribution_count, enumerate_scenarios, non_win_split, scenario_count,
    win_distributions, EventCounts, Standings,
};

/// Strategy: 1-4 competitors with arbitrary current points.
fn standings_strategy() -> impl Strategy<Value = Standings> {
    prop::collection::vec(0u32..400, 1..=4).prop_map(|points| {
        Standings::new(
            points
                .into_iter()
                .enumerate()
                .map(|(i, p)| (format!("C{i}"), p)),
        )
        .unwrap()
    })
}

/// Strategy: small calendars so enumeration stays cheap.
fn events_strategy() -> impl Strategy<Value = EventCounts> {
    (0u32..=4, 0u32..=2).prop_map(|(races, sprints)| EventCounts::new(races, sprints))
}

fn expected_contribution(kind: EventKind, wins: u32, event_count: u32) -> u64 {
    let table = kind.podium();
    let (second, third) = non_win_split(wins, event_count);
    (wins * table.win + second * table.second + third * table.third) as u64
}

proptest! {
    // 1. Count law: C(e + n - 1, n - 1) distributions
    #[test]
    fn distribution_count_law(events in 0u32..12, n in 1usize..6) {
        let dists = win_distributions(events, n);
        let expected = binomial(events as u64 + n as u64 - 1, n as u64 - 1).round() as usize;
        prop_assert_eq!(dists.len(), expected);
        prop_assert_eq!(distribution_count(events, n), expected as u128);
    }

    // 2. Every distribution has the right length and sum; none repeats
    #[test]
    fn distribution_sum_invariant(events in 0u32..10, n in 1usize..5) {
        let dists = win_distributions(events, n);
        for d in &dists {
            prop_assert_eq!(d.len(), n);
            prop_assert_eq!(d.iter().sum::<u32>(), events);
        }
        let unique: HashSet<_> = dists.iter().collect();
        prop_assert_eq!(unique.len(), dists.len());
    }

    // 3. Final totals recomputed from win counts match
    #[test]
    fn scenario_total_invariant(standings in standings_strategy(), events in events_strategy()) {
        let scenarios = enumerate_scenarios(&standings, events).unwrap();
        for s in &scenarios {
            for (c, o) in standings.iter().zip(&s.outcomes) {
                let expected = c.points as u64
                    + expected_contribution(EventKind::Race, o.race_wins, events.races)
                    + expected_contribution(EventKind::Sprint, o.sprint_wins, events.sprints);
                prop_assert_eq!(o.total, expected);
            }
            // winner holds the maximum, earliest on ties
            let top = s.outcomes.iter().map(|o| o.total).max().unwrap();
            let first_top = s.outcomes.iter().position(|o| o.total == top).unwrap();
            prop_assert_eq!(s.winner, first_top);
        }
    }

    // 4. Scenario cardinality is the product of distribution counts
    #[test]
    fn scenario_cardinality(standings in standings_strategy(), events in events_strategy()) {
        let scenarios = enumerate_scenarios(&standings, events).unwrap();
        let n = standings.len();
        let expected = distribution_count(events.races, n) * distribution_count(events.sprints, n);
        prop_assert_eq!(scenarios.len() as u128, expected);
        prop_assert_eq!(scenario_count(events, n), expected);
    }

    // 5. Championship counts cover every scenario exactly once
    #[test]
    fn tally_completeness(standings in standings_strategy(), events in events_strategy()) {
        let scenarios = enumerate_scenarios(&standings, events).unwrap();
        let target = standings.competitor(0).name.clone();
        let result = analyze(&scenarios, &target, &standings, events.max_points_available()).unwrap();
        let sum: usize = result.tally.iter().map(|t| t.championships).sum();
        prop_assert_eq!(sum, scenarios.len());
    }

    // 6. A gap of at least the available points means no winning scenario
    #[test]
    fn elimination_monotonicity(
        standings in standings_strategy(),
        races in 1u32..=3,
        sprints in 0u32..=2,
    ) {
        let events = EventCounts::new(races, sprints);
        let max_available = events.max_points_available();
        let scenarios = enumerate_scenarios(&standings, events).unwrap();
        let leader_points = standings.leader().1.points as u64;

        for c in standings.iter() {
            let gap = leader_points - c.points as u64;
            if gap >= max_available {
                let result = analyze(&scenarios, &c.name, &standings, max_available).unwrap();
                prop_assert_eq!(result.target_championships(), 0);
                prop_assert!(result.elimination.is_eliminated());
            }
        }
    }

    // 9. Enumeration is deterministic
    #[test]
    fn enumeration_idempotent(standings in standings_strategy(), events in events_strategy()) {
        let first = enumerate_scenarios(&standings, events).unwrap();
        let second = enumerate_scenarios(&standings, events).unwrap();
        prop_assert_eq!(first, second);
    }
}
