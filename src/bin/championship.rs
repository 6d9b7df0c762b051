//! Championship scenario report.
//!
//! Usage: `championship [--config FILE] [--races N] [--sprints N] [--target NAME]`
//!
//! Without a config file the built-in sample season is analyzed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use championship_core::export::save_scenarios_csv;
use championship_core::report::render_report;
use championship_core::{
    init_logging, ChampionshipConfig, ChampionshipState, Result, ScenarioEnumerator,
};

#[derive(Parser, Debug)]
#[command(name = "championship")]
#[command(about = "Enumerate every championship outcome and estimate title odds")]
struct Args {
    /// TOML file with standings and remaining events
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the number of remaining races
    #[arg(long)]
    races: Option<u32>,

    /// Override the number of remaining sprints
    #[arg(long)]
    sprints: Option<u32>,

    /// Competitor to analyze (defaults to the current leader)
    #[arg(long)]
    target: Option<String>,

    /// Monte Carlo trials
    #[arg(long)]
    trials: Option<usize>,

    /// Seed for a reproducible Monte Carlo run
    #[arg(long)]
    seed: Option<u64>,

    /// Refuse to enumerate more scenarios than this
    #[arg(long)]
    max_scenarios: Option<u64>,

    /// Where to write the scenario table
    #[arg(long, default_value = "f1_all_scenarios.csv")]
    csv: PathBuf,

    /// Skip writing the scenario table
    #[arg(long)]
    no_csv: bool,

    /// Skip the Monte Carlo section
    #[arg(long)]
    no_simulation: bool,
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ChampionshipConfig::load(path)?
        }
        None => ChampionshipConfig::default(),
    };

    let mut events = config.events()?;
    if let Some(races) = args.races {
        events.races = races;
    }
    if let Some(sprints) = args.sprints {
        events.sprints = sprints;
    }

    let state = ChampionshipState::new(config.standings()?, events);
    let enumerator = match args.max_scenarios {
        Some(ceiling) => ScenarioEnumerator::new(ceiling),
        None => config.enumerator()?,
    };
    let target = args.target.as_deref().or(config.target.as_deref());

    info!(
        competitors = state.standings().len(),
        races = events.races,
        sprints = events.sprints,
        scenarios = %state.scenario_count(),
        "Generating all possible scenarios"
    );
    let (scenarios, analysis) = state.analyze(&enumerator, target)?;

    let simulation = if args.no_simulation {
        None
    } else {
        let estimator = config.estimator_with(args.trials, args.seed)?;
        Some(state.run_monte_carlo(&estimator)?)
    };

    print!(
        "{}",
        render_report(&state, &scenarios, &analysis, simulation.as_ref())
    );

    if !args.no_csv {
        save_scenarios_csv(&args.csv, state.standings(), &scenarios)?;
        info!("All scenarios saved to {}", args.csv.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
