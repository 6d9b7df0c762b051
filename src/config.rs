//! TOML configuration for a championship run.
//!
//! ```toml
//! races_remaining = 5
//! sprints_remaining = 2
//! target = "Verstappen"
//!
//! [[standings]]
//! name = "Piastri"
//! points = 346
//!
//! [simulation]
//! trials = 10000
//! seed = 42
//!
//! [limits]
//! max_scenarios = 5000000
//! ```
//!
//! Counts are read as signed integers so a negative value is reported as
//! invalid input rather than a parse failure.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_MAX_SCENARIOS, DEFAULT_TRIALS};
use crate::error::{ChampionshipError, InvalidInput, Result};
use crate::scenario::ScenarioEnumerator;
use crate::simulation::MonteCarloEstimator;
use crate::standings::{EventCounts, Standings};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StandingEntry {
    pub name: String,
    pub points: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub trials: i64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: DEFAULT_TRIALS as i64,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_scenarios: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_scenarios: DEFAULT_MAX_SCENARIOS as i64,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChampionshipConfig {
    pub standings: Vec<StandingEntry>,
    pub races_remaining: i64,
    pub sprints_remaining: i64,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ChampionshipConfig {
    /// The 2025 run-in with five grands prix and two sprints left.
    fn default() -> Self {
        let entry = |name: &str, points| StandingEntry {
            name: name.to_string(),
            points,
        };
        ChampionshipConfig {
            standings: vec![
                entry("Piastri", 346),
                entry("Norris", 332),
                entry("Verstappen", 306),
            ],
            races_remaining: 5,
            sprints_remaining: 2,
            target: None,
            simulation: SimulationConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

fn non_negative_u32(field: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(InvalidInput::Negative {
            field: field.to_string(),
            value,
        }
        .into());
    }
    u32::try_from(value).map_err(|_| {
        InvalidInput::OutOfRange {
            field: field.to_string(),
            value,
        }
        .into()
    })
}

impl ChampionshipConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ChampionshipError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn standings(&self) -> Result<Standings> {
        let entries = self
            .standings
            .iter()
            .map(|e| -> Result<(String, u32)> {
                let points = non_negative_u32(&format!("points for {}", e.name), e.points)?;
                Ok((e.name.clone(), points))
            })
            .collect::<Result<Vec<_>>>()?;
        Standings::new(entries)
    }

    /// Validated remaining race and sprint counts
    pub fn events(&self) -> Result<EventCounts> {
        Ok(EventCounts::new(
            non_negative_u32("races_remaining", self.races_remaining)?,
            non_negative_u32("sprints_remaining", self.sprints_remaining)?,
        ))
    }

    /// Enumerator with the configured ceiling
    pub fn enumerator(&self) -> Result<ScenarioEnumerator> {
        let ceiling = self.limits.max_scenarios;
        if ceiling < 0 {
            return Err(InvalidInput::Negative {
                field: "max_scenarios".to_string(),
                value: ceiling,
            }
            .into());
        }
        Ok(ScenarioEnumerator::new(ceiling as u64))
    }

    /// Estimator from the `[simulation]` table
    pub fn estimator(&self) -> Result<MonteCarloEstimator> {
        let trials = self.simulation.trials;
        if trials < 0 {
            return Err(InvalidInput::Negative {
                field: "trials".to_string(),
                value: trials,
            }
            .into());
        }
        MonteCarloEstimator::new(trials as usize, self.simulation.seed)
    }

    /// Estimator with command-line overrides applied.
    ///
    /// An explicit trial count replaces `[simulation].trials` before it is
    /// validated, so a bad configured value does not block the override.
    pub fn estimator_with(
        &self,
        trials: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MonteCarloEstimator> {
        match trials {
            Some(trials) => MonteCarloEstimator::new(trials, seed.or(self.simulation.seed)),
            None => {
                let configured = self.estimator()?;
                MonteCarloEstimator::new(configured.trials, seed.or(configured.seed))
            }
        }
    }
}
