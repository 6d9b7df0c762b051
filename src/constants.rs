/// Points awarded per finishing position in a grand prix
pub const RACE_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Points awarded per finishing position in a sprint
pub const SPRINT_POINTS: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// Cap on the win probability derived from standings share
pub const MAX_WIN_PROB: f64 = 0.50;

/// Multiplier applied to a competitor's share of total points
pub const WIN_WEIGHT_MULTIPLIER: f64 = 1.5;

/// Unnormalized podium (P2/P3) weight
pub const PODIUM_WEIGHT: f64 = 0.35;

/// Unnormalized P4/P5 weight
pub const TOP5_WEIGHT: f64 = 0.10;

/// Unnormalized weight for everything outside the top five
pub const OTHER_WEIGHT: f64 = 0.05;

/// Monte Carlo trials used when none are configured
pub const DEFAULT_TRIALS: usize = 10_000;

/// Largest scenario set the enumerator will allocate by default
pub const DEFAULT_MAX_SCENARIOS: u64 = 5_000_000;

/// Confidence level for Monte Carlo margins of error
pub const CONFIDENCE_LEVEL: f64 = 0.95;
