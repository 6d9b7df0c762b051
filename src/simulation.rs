use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::constants::CONFIDENCE_LEVEL;
use crate::error::{InvalidInput, Result};
use crate::points::EventKind;
use crate::profile::{PerformanceProfile, Tier};
use crate::scenario::pick_winner;
use crate::standings::{EventCounts, Standings};

/// Trials simulated by one worker with its own random stream.
const TRIALS_PER_CHUNK: usize = 1024;

/// Simulated championship odds for one competitor.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedOdds {
    pub competitor: String,
    pub championships: usize,
    /// Share of trials won, 0-100.
    pub percentage: f64,
    /// Half-width of the confidence interval around `percentage`, in points.
    pub margin_of_error: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSummary {
    pub trials: usize,
    /// Odds in standings order, zero-win competitors included.
    pub odds: Vec<SimulatedOdds>,
}

impl SimulationSummary {
    /// Simulated title percentage for `competitor`
    pub fn percentage_of(&self, competitor: &str) -> Option<f64> {
        self.odds
            .iter()
            .find(|o| o.competitor == competitor)
            .map(|o| o.percentage)
    }

    /// Odds sorted by percentage, highest first.
    pub fn ranked(&self) -> Vec<&SimulatedOdds> {
        let mut ranked: Vec<&SimulatedOdds> = self.odds.iter().collect();
        ranked.sort_by(|a, b| b.championships.cmp(&a.championships));
        ranked
    }

    pub fn percentages(&self) -> HashMap<String, f64> {
        self.odds
            .iter()
            .map(|o| (o.competitor.clone(), o.percentage))
            .collect()
    }
}

/// Points scored by one competitor in one simulated event.
///
/// Each competitor is sampled on its own; two competitors may both take
/// the win in the same event.
pub fn sample_event_points<R: Rng>(kind: EventKind, profile: &PerformanceProfile, rng: &mut R) -> u32 {
    let table = kind.position_points();
    match profile.tier(rng.gen::<f64>()) {
        Tier::Win => table[0],
        Tier::Podium => pick(&table[1..3], rng),
        Tier::Top5 => pick(&table[3..5], rng),
        Tier::Other => pick(&table[5..], rng),
    }
}

fn pick<R: Rng>(values: &[u32], rng: &mut R) -> u32 {
    values[rng.gen_range(0..values.len())]
}

/// Simulate the rest of the season once and return final totals.
pub fn simulate_season<R: Rng>(
    standings: &Standings,
    events: EventCounts,
    profiles: &[PerformanceProfile],
    rng: &mut R,
) -> Vec<u64> {
    let mut totals: Vec<u64> = standings.iter().map(|c| u64::from(c.points)).collect();

    for (kind, count) in [(EventKind::Race, events.races), (EventKind::Sprint, events.sprints)] {
        for _ in 0..count {
            for (total, profile) in totals.iter_mut().zip(profiles) {
                *total += u64::from(sample_event_points(kind, profile, rng));
            }
        }
    }

    totals
}

/// Monte Carlo championship estimator.
///
/// Trials are split into fixed-size chunks. Chunk seeds are drawn in order
/// from one master stream, so a seeded run gives the same tallies however
/// rayon schedules the chunks.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloEstimator {
    pub trials: usize,
    pub seed: Option<u64>,
}

impl MonteCarloEstimator {
    pub fn new(trials: usize, seed: Option<u64>) -> Result<Self> {
        if trials == 0 {
            return Err(InvalidInput::ZeroTrials.into());
        }
        Ok(MonteCarloEstimator { trials, seed })
    }

    pub fn run(
        &self,
        standings: &Standings,
        events: EventCounts,
        profiles: &[PerformanceProfile],
    ) -> Result<SimulationSummary> {
        if profiles.len() != standings.len() {
            return Err(InvalidInput::ShapeMismatch {
                expected: standings.len(),
                found: profiles.len(),
            }
            .into());
        }

        let mut master = match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let chunks: Vec<(u64, usize)> = (0..self.trials)
            .step_by(TRIALS_PER_CHUNK)
            .map(|start| (master.gen::<u64>(), TRIALS_PER_CHUNK.min(self.trials - start)))
            .collect();
        debug!(trials = self.trials, chunks = chunks.len(), "running monte carlo");

        let n = standings.len();
        let tallies = chunks
            .par_iter()
            .map(|&(seed, size)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut tally = vec![0usize; n];
                for _ in 0..size {
                    let totals = simulate_season(standings, events, profiles, &mut rng);
                    tally[pick_winner(totals)] += 1;
                }
                tally
            })
            .reduce(
                || vec![0usize; n],
                |mut acc, chunk| {
                    for (a, c) in acc.iter_mut().zip(chunk) {
                        *a += c;
                    }
                    acc
                },
            );

        let z = z_score(CONFIDENCE_LEVEL);
        let trials = self.trials as f64;
        let odds: Vec<SimulatedOdds> = standings
            .iter()
            .zip(tallies)
            .map(|(c, championships)| {
                let p = championships as f64 / trials;
                SimulatedOdds {
                    competitor: c.name.clone(),
                    championships,
                    percentage: p * 100.0,
                    margin_of_error: z * (p * (1.0 - p) / trials).sqrt() * 100.0,
                }
            })
            .collect();

        info!(trials = self.trials, "monte carlo simulation complete");
        Ok(SimulationSummary {
            trials: self.trials,
            odds,
        })
    }
}

/// Two-sided standard normal critical value for `confidence`.
fn z_score(confidence: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + confidence / 2.0))
        .unwrap_or(1.96)
}
