//! Championship Core - exhaustive championship scenario analysis.
//!
//! Enumerates every distinct way the remaining race and sprint wins can be
//! shared out between competitors, projects each one into final points,
//! and aggregates the result into championship odds, minimum winning paths
//! and elimination checks. A Monte Carlo estimator gives an independent,
//! approximate view from the same standings.
//!
//! Python bindings are available behind the `python` feature.

pub mod analysis;
pub mod championship;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod export;
pub mod points;
pub mod profile;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod standings;

#[cfg(feature = "python")]
mod python;

pub use analysis::{
    analyze, AnalysisResult, ChampionshipTally, ConditionalWinRate, Elimination, RaceWinBreakdown,
    WinPath, WinRanges,
};
pub use championship::ChampionshipState;
pub use config::ChampionshipConfig;
pub use constants::{DEFAULT_MAX_SCENARIOS, DEFAULT_TRIALS, RACE_POINTS, SPRINT_POINTS};
pub use distribution::{distribution_count, win_distributions, WinDistribution, WinDistributions};
pub use error::{ChampionshipError, InvalidInput, Result};
pub use points::{non_win_split, project, EventKind, PointsTable};
pub use profile::{performance_profiles, PerformanceProfile, Tier};
pub use scenario::{
    enumerate_scenarios, pick_winner, scenario_count, CompetitorOutcome, Scenario,
    ScenarioEnumerator,
};
pub use simulation::{MonteCarloEstimator, SimulatedOdds, SimulationSummary};
pub use standings::{Competitor, EventCounts, Standings};

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,championship_core=debug"));

    fmt().with_env_filter(filter).with_target(false).init();
}
