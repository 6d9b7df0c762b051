//! Plain-text championship report.
//!
//! Rendering only: every number printed here comes from an
//! [`AnalysisResult`] or [`SimulationSummary`] computed elsewhere.

use std::fmt::{self, Write};

use crate::analysis::{AnalysisResult, Elimination};
use crate::championship::ChampionshipState;
use crate::points::non_win_split;
use crate::scenario::Scenario;
use crate::simulation::SimulationSummary;

const WIDTH: usize = 80;

fn rule(w: &mut impl Write, ch: char) -> fmt::Result {
    writeln!(w, "{}", ch.to_string().repeat(WIDTH))
}

/// "2xP1, 1xP2, 2xP3" for one competitor in one event type.
fn placings(wins: u32, event_count: u32) -> String {
    let (p2, p3) = non_win_split(wins, event_count);
    let parts: Vec<String> = [(wins, "P1"), (p2, "P2"), (p3, "P3")]
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, pos)| format!("{}x{}", n, pos))
        .collect();
    if parts.is_empty() {
        "No points".to_string()
    } else {
        parts.join(", ")
    }
}

fn write_header(w: &mut impl Write, state: &ChampionshipState, total: usize) -> fmt::Result {
    rule(w, '=')?;
    writeln!(w, "CHAMPIONSHIP SCENARIO ANALYSIS")?;
    rule(w, '=')?;
    writeln!(w)?;

    writeln!(w, "CURRENT STANDINGS:")?;
    rule(w, '-')?;
    for (pos, c) in state.standings().ranked().iter().enumerate() {
        writeln!(w, "P{}. {:20} {:4} points", pos + 1, c.name, c.points)?;
    }
    writeln!(w)?;

    let events = state.events();
    writeln!(w, "REMAINING EVENTS:")?;
    rule(w, '-')?;
    writeln!(w, "Races:                {}", events.races)?;
    writeln!(w, "Sprints:              {}", events.sprints)?;
    writeln!(w, "Total events:         {}", events.total())?;
    writeln!(w, "Max points available: {}", state.max_points_available())?;
    writeln!(w)?;
    writeln!(w, "Total scenarios analyzed: {}", total)?;
    writeln!(w)
}

fn write_tally(w: &mut impl Write, analysis: &AnalysisResult) -> fmt::Result {
    writeln!(w, "CHAMPIONSHIP PROBABILITIES (All Scenarios):")?;
    rule(w, '-')?;
    for t in &analysis.tally {
        writeln!(
            w,
            "{:20} {:5} / {:5} = {:6.2}%",
            t.competitor, t.championships, analysis.total_scenarios, t.percentage
        )?;
    }
    writeln!(w)
}

fn write_scenario(
    w: &mut impl Write,
    state: &ChampionshipState,
    target: usize,
    number: usize,
    scenario: &Scenario,
) -> fmt::Result {
    let events = state.events();
    let standings = state.standings();

    writeln!(w, "\nScenario {}:", number)?;
    rule(w, '-')?;
    writeln!(w, "RACE RESULTS ({} races):", events.races)?;
    for (c, o) in standings.iter().zip(&scenario.outcomes) {
        writeln!(w, "  {:15} {}", c.name, placings(o.race_wins, events.races))?;
    }
    writeln!(w, "\nSPRINT RESULTS ({} sprints):", events.sprints)?;
    for (c, o) in standings.iter().zip(&scenario.outcomes) {
        writeln!(w, "  {:15} {}", c.name, placings(o.sprint_wins, events.sprints))?;
    }

    writeln!(w, "\nFINAL CHAMPIONSHIP STANDINGS:")?;
    let mut order: Vec<usize> = (0..scenario.outcomes.len()).collect();
    order.sort_by(|&a, &b| scenario.outcomes[b].total.cmp(&scenario.outcomes[a].total));
    for (pos, &i) in order.iter().enumerate() {
        let c = standings.competitor(i);
        let total = scenario.outcomes[i].total;
        let marker = if i == target { " <- CHAMPION" } else { "" };
        writeln!(
            w,
            "  P{}. {:15} {} points (+{} from current){}",
            pos + 1,
            c.name,
            total,
            total - u64::from(c.points),
            marker
        )?;
    }

    let target_total = scenario.winner_total();
    let margins: Vec<String> = standings
        .iter()
        .zip(&scenario.outcomes)
        .enumerate()
        .filter(|(i, _)| *i != target)
        .map(|(_, (c, o))| format!("{}: +{}", c.name, target_total - o.total))
        .collect();
    writeln!(w, "\nCHAMPIONSHIP MARGIN:")?;
    writeln!(
        w,
        "  {} wins by: {}",
        standings.competitor(target).name,
        margins.join(", ")
    )
}

fn write_target(
    w: &mut impl Write,
    state: &ChampionshipState,
    scenarios: &[Scenario],
    analysis: &AnalysisResult,
) -> fmt::Result {
    let events = state.events();
    let name = &analysis.target;
    writeln!(w, "DETAILED ANALYSIS FOR {}:", name.to_uppercase())?;
    rule(w, '-')?;

    match &analysis.elimination {
        Elimination::Eliminated { leader, gap, max_available }
        | Elimination::NoWinningScenario { leader, gap, max_available } => {
            writeln!(w, "WARNING: {} does NOT win in ANY scenario!", name)?;
            writeln!(w)?;
            writeln!(w, "Current gap to leader ({}): {} points", leader, gap)?;
            writeln!(w, "Maximum available points: {}", max_available)?;
            if analysis.elimination.is_eliminated() {
                writeln!(w, "Mathematically ELIMINATED (gap larger than max points)")?;
            } else {
                writeln!(w, "Still mathematically possible, but needs near-perfect execution")?;
            }
            return Ok(());
        }
        Elimination::Contender => {}
    }

    let won = analysis.target_championships();
    writeln!(
        w,
        "{} wins in {} scenarios ({:.1}%)",
        name,
        won,
        won as f64 / analysis.total_scenarios as f64 * 100.0
    )?;
    writeln!(w)?;

    if let Some(path) = &analysis.minimum_win_path {
        writeln!(w, "MINIMUM WINNING SCENARIO (fewest total wins):")?;
        writeln!(w, "  Race wins: {} out of {}", path.race_wins, events.races)?;
        writeln!(w, "  Sprint wins: {} out of {}", path.sprint_wins, events.sprints)?;
        writeln!(
            w,
            "  Total events won: {} out of {}",
            path.total_wins(),
            events.total()
        )?;
        writeln!(w)?;
    }

    if let Some(ranges) = &analysis.win_ranges {
        writeln!(w, "RANGE OF WINNING COMBINATIONS:")?;
        writeln!(w, "  Race wins: {} to {}", ranges.race_wins.start(), ranges.race_wins.end())?;
        writeln!(
            w,
            "  Sprint wins: {} to {}",
            ranges.sprint_wins.start(),
            ranges.sprint_wins.end()
        )?;
        writeln!(w)?;
    }

    writeln!(w, "BREAKDOWN OF WINNING SCENARIOS:")?;
    for b in &analysis.breakdown {
        writeln!(
            w,
            "  {} race wins: {} scenarios (sprint wins needed: {}-{})",
            b.race_wins,
            b.scenarios,
            b.sprint_wins.start(),
            b.sprint_wins.end()
        )?;
    }
    writeln!(w)?;

    writeln!(w, "Win probability by race wins:")?;
    rule(w, '-')?;
    for r in &analysis.conditional_win_rates {
        writeln!(
            w,
            "{} race wins: {:3}/{:3} = {:5.1}%",
            r.race_wins, r.championships, r.scenarios, r.percentage
        )?;
    }
    writeln!(w)?;

    writeln!(w, "ALL WINNING SCENARIOS FOR {}:", name.to_uppercase())?;
    rule(w, '=')?;
    if let Some(target) = state.standings().index_of(name) {
        for (n, &i) in analysis.winning_scenarios.iter().enumerate() {
            write_scenario(w, state, target, n + 1, &scenarios[i])?;
        }
    }
    writeln!(w)?;
    rule(w, '=')
}

fn write_simulation(w: &mut impl Write, summary: &SimulationSummary) -> fmt::Result {
    writeln!(w, "MONTE CARLO SIMULATION ({} iterations):", summary.trials)?;
    rule(w, '-')?;
    for o in summary.ranked() {
        writeln!(
            w,
            "{:20} {:6.2}% (±{:.2})",
            o.competitor, o.percentage, o.margin_of_error
        )?;
    }
    writeln!(w)
}

/// Write the full report to any `fmt::Write` sink.
pub fn write_report<W: Write>(
    w: &mut W,
    state: &ChampionshipState,
    scenarios: &[Scenario],
    analysis: &AnalysisResult,
    simulation: Option<&SimulationSummary>,
) -> fmt::Result {
    write_header(w, state, analysis.total_scenarios)?;
    write_tally(w, analysis)?;
    write_target(w, state, scenarios, analysis)?;
    writeln!(w)?;
    if let Some(summary) = simulation {
        write_simulation(w, summary)?;
    }
    rule(w, '=')?;
    writeln!(w, "Analysis complete!")?;
    rule(w, '=')
}

/// Render the full report into a `String`.
pub fn render_report(
    state: &ChampionshipState,
    scenarios: &[Scenario],
    analysis: &AnalysisResult,
    simulation: Option<&SimulationSummary>,
) -> String {
    let mut out = String::new();
    write_report(&mut out, state, scenarios, analysis, simulation)
        .expect("writing to a String cannot fail");
    out
}
