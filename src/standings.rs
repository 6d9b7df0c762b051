use std::collections::HashSet;

use crate::constants::{RACE_POINTS, SPRINT_POINTS};
use crate::error::{InvalidInput, Result};

/// A competitor and their current championship points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competitor {
    pub name: String,
    pub points: u32,
}

/// Current championship standings.
///
/// Competitors keep the order they were supplied in. That order is the fixed
/// competitor ordering used by win distributions and tie-breaks, so a
/// competitor's index is stable for the lifetime of the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    competitors: Vec<Competitor>,
}

impl Standings {
    /// Build standings from `(name, points)` pairs.
    ///
    /// Fails on an empty list, blank names or duplicate names.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut competitors = Vec::new();

        for (name, points) in entries {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(InvalidInput::BlankName.into());
            }
            if !seen.insert(name.clone()) {
                return Err(InvalidInput::DuplicateCompetitor(name).into());
            }
            competitors.push(Competitor { name, points });
        }

        if competitors.is_empty() {
            return Err(InvalidInput::EmptyStandings.into());
        }

        Ok(Standings { competitors })
    }

    /// Number of competitors
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    /// Always false for constructed standings; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Iterate competitors in standings order
    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter()
    }

    /// Get the competitor at `index`
    pub fn competitor(&self, index: usize) -> &Competitor {
        &self.competitors[index]
    }

    /// Competitor names in standings order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.competitors.iter().map(|c| c.name.as_str())
    }

    /// Index of `name`, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.competitors.iter().position(|c| c.name == name)
    }

    /// Index of `name`, or an `UnknownCompetitor` error.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| InvalidInput::UnknownCompetitor(name.to_string()).into())
    }

    /// Current points of `name`, if present
    pub fn points_of(&self, name: &str) -> Option<u32> {
        self.index_of(name).map(|i| self.competitors[i].points)
    }

    /// Sum of everyone's points
    pub fn total_points(&self) -> u64 {
        self.competitors.iter().map(|c| u64::from(c.points)).sum()
    }

    /// Current leader. Equal points go to the earlier competitor.
    pub fn leader(&self) -> (usize, &Competitor) {
        let mut best = 0;
        for (i, c) in self.competitors.iter().enumerate().skip(1) {
            if c.points > self.competitors[best].points {
                best = i;
            }
        }
        (best, &self.competitors[best])
    }

    /// Competitors sorted by points, highest first (stable on ties).
    pub fn ranked(&self) -> Vec<&Competitor> {
        let mut ranked: Vec<&Competitor> = self.competitors.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }
}

/// Scoring events still to be run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub races: u32,
    pub sprints: u32,
}

impl EventCounts {
    /// Remaining races and sprints
    pub fn new(races: u32, sprints: u32) -> Self {
        EventCounts { races, sprints }
    }

    /// Races plus sprints
    pub fn total(&self) -> u64 {
        u64::from(self.races) + u64::from(self.sprints)
    }

    /// Points a competitor could still collect by winning everything.
    pub fn max_points_available(&self) -> u64 {
        u64::from(self.races) * u64::from(RACE_POINTS[0])
            + u64::from(self.sprints) * u64::from(SPRINT_POINTS[0])
    }
}
