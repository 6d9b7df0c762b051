use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChampionshipError>;

#[derive(Debug, Error)]
pub enum ChampionshipError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("projected scenario count {projected} exceeds the ceiling of {ceiling}")]
    ResourceExceeded { projected: u128, ceiling: u64 },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Inputs rejected before any generation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("standings must list at least one competitor")]
    EmptyStandings,

    #[error("competitor names must not be blank")]
    BlankName,

    #[error("competitor {0:?} is listed more than once")]
    DuplicateCompetitor(String),

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: i64 },

    #[error("{field} is too large: {value}")]
    OutOfRange { field: String, value: i64 },

    #[error("unknown competitor {0:?}")]
    UnknownCompetitor(String),

    #[error("points must not increase with position (win {win}, second {second}, third {third})")]
    PointsOrder { win: u32, second: u32, third: u32 },

    #[error("trial count must be positive")]
    ZeroTrials,

    #[error("no scenarios to analyze")]
    NoScenarios,

    #[error("scenario covers {found} competitors but standings list {expected}")]
    ShapeMismatch { expected: usize, found: usize },
}
