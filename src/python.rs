//! Python bindings, built with `--features python`.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap;

use crate::championship::ChampionshipState;
use crate::constants::DEFAULT_TRIALS;
use crate::error::ChampionshipError;
use crate::report::render_report;
use crate::scenario::ScenarioEnumerator;
use crate::simulation::MonteCarloEstimator;
use crate::standings::{EventCounts, Standings};

fn to_py_err(err: ChampionshipError) -> PyErr {
    match err {
        ChampionshipError::InvalidInput(e) => PyValueError::new_err(e.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Read a `{name: points}` dict, keeping insertion order.
fn standings_from_dict(dict: &Bound<'_, PyDict>) -> PyResult<Standings> {
    let mut entries = Vec::with_capacity(dict.len());
    for (name, points) in dict.iter() {
        entries.push((name.extract::<String>()?, points.extract::<u32>()?));
    }
    Standings::new(entries).map_err(to_py_err)
}

/// Championship predictor over a standings snapshot.
#[pyclass(name = "ChampionshipPredictor")]
pub struct PyChampionshipPredictor {
    state: ChampionshipState,
    enumerator: ScenarioEnumerator,
}

#[pymethods]
impl PyChampionshipPredictor {
    #[new]
    #[pyo3(signature = (standings, races_remaining, sprint_races_remaining, max_scenarios = None))]
    fn new(
        standings: &Bound<'_, PyDict>,
        races_remaining: u32,
        sprint_races_remaining: u32,
        max_scenarios: Option<u64>,
    ) -> PyResult<Self> {
        let standings = standings_from_dict(standings)?;
        let enumerator = max_scenarios.map(ScenarioEnumerator::new).unwrap_or_default();
        Ok(PyChampionshipPredictor {
            state: ChampionshipState::new(
                standings,
                EventCounts::new(races_remaining, sprint_races_remaining),
            ),
            enumerator,
        })
    }

    /// Replace the standings after a race.
    fn update_standings(&mut self, standings: &Bound<'_, PyDict>) -> PyResult<()> {
        self.state = self.state.with_standings(standings_from_dict(standings)?);
        Ok(())
    }

    fn update_races_remaining(&mut self, races: u32, sprints: u32) {
        self.state = self.state.with_events(EventCounts::new(races, sprints));
    }

    fn max_points_available(&self) -> u64 {
        self.state.max_points_available()
    }

    fn scenario_count(&self) -> u128 {
        self.state.scenario_count()
    }

    /// Championship percentage per competitor over all scenarios.
    fn championship_odds(&self) -> PyResult<HashMap<String, f64>> {
        let (_, analysis) = self.state.analyze(&self.enumerator, None).map_err(to_py_err)?;
        Ok(analysis
            .tally
            .into_iter()
            .map(|t| (t.competitor, t.percentage))
            .collect())
    }

    #[pyo3(signature = (n_simulations = DEFAULT_TRIALS, seed = None))]
    fn run_monte_carlo(&self, n_simulations: usize, seed: Option<u64>) -> PyResult<HashMap<String, f64>> {
        let estimator = MonteCarloEstimator::new(n_simulations, seed).map_err(to_py_err)?;
        let summary = self.state.run_monte_carlo(&estimator).map_err(to_py_err)?;
        Ok(summary.percentages())
    }

    /// Full text report for `target` (leader if omitted).
    #[pyo3(signature = (target = None, n_simulations = None, seed = None))]
    fn report(&self, target: Option<&str>, n_simulations: Option<usize>, seed: Option<u64>) -> PyResult<String> {
        let (scenarios, analysis) = self.state.analyze(&self.enumerator, target).map_err(to_py_err)?;
        let summary = match n_simulations {
            Some(n) => {
                let estimator = MonteCarloEstimator::new(n, seed).map_err(to_py_err)?;
                Some(self.state.run_monte_carlo(&estimator).map_err(to_py_err)?)
            }
            None => None,
        };
        Ok(render_report(&self.state, &scenarios, &analysis, summary.as_ref()))
    }

    fn __repr__(&self) -> String {
        let events = self.state.events();
        format!(
            "ChampionshipPredictor({} competitors, {} races, {} sprints)",
            self.state.standings().len(),
            events.races,
            events.sprints
        )
    }
}

/// Python module definition
#[pymodule]
fn championship_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChampionshipPredictor>()?;
    m.add("RACE_POINTS", crate::constants::RACE_POINTS.to_vec())?;
    m.add("SPRINT_POINTS", crate::constants::SPRINT_POINTS.to_vec())?;
    Ok(())
}
