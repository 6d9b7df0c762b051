use crate::constants::{MAX_WIN_PROB, OTHER_WEIGHT, PODIUM_WEIGHT, TOP5_WEIGHT, WIN_WEIGHT_MULTIPLIER};
use crate::standings::Standings;

/// Finishing tier sampled by the Monte Carlo estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Win,
    Podium,
    Top5,
    Other,
}

/// Probability of each finishing tier for one competitor in one event.
///
/// The four probabilities always sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceProfile {
    pub win: f64,
    pub podium: f64,
    pub top5: f64,
    pub other: f64,
}

impl PerformanceProfile {
    /// Profile for a competitor holding `share` of all championship points.
    ///
    /// Win chance scales with share and is capped; the remaining tiers use
    /// fixed weights, then all four are normalized.
    pub fn from_share(share: f64) -> Self {
        let win = (share * WIN_WEIGHT_MULTIPLIER).min(MAX_WIN_PROB);
        let total = win + PODIUM_WEIGHT + TOP5_WEIGHT + OTHER_WEIGHT;
        PerformanceProfile {
            win: win / total,
            podium: PODIUM_WEIGHT / total,
            top5: TOP5_WEIGHT / total,
            other: OTHER_WEIGHT / total,
        }
    }

    /// Map a uniform draw in `[0, 1)` to a tier.
    pub fn tier(&self, draw: f64) -> Tier {
        if draw < self.win {
            Tier::Win
        } else if draw < self.win + self.podium {
            Tier::Podium
        } else if draw < self.win + self.podium + self.top5 {
            Tier::Top5
        } else {
            Tier::Other
        }
    }
}

/// Profiles for every competitor, in standings order.
///
/// With no points on the board every competitor gets an equal share.
pub fn performance_profiles(standings: &Standings) -> Vec<PerformanceProfile> {
    let total = standings.total_points();
    let n = standings.len() as f64;
    standings
        .iter()
        .map(|c| {
            let share = if total == 0 {
                1.0 / n
            } else {
                c.points as f64 / total as f64
            };
            PerformanceProfile::from_share(share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(p: &PerformanceProfile) -> f64 {
        p.win + p.podium + p.top5 + p.other
    }

    #[test]
    fn test_profiles_normalized() {
        let standings = Standings::new([("Piastri", 346), ("Norris", 332), ("Verstappen", 306)]).unwrap();
        for p in performance_profiles(&standings) {
            assert!((sum(&p) - 1.0).abs() < 1e-12, "profile must sum to 1: {:?}", p);
        }
    }

    #[test]
    fn test_win_capped() {
        let p = PerformanceProfile::from_share(1.0);
        // capped at 0.5 before normalizing, so the weights already sum to 1
        assert!((p.win - 0.5).abs() < 1e-12);
        assert!((p.podium - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_leader_more_likely_to_win() {
        let standings = Standings::new([("A", 300), ("B", 100), ("C", 50)]).unwrap();
        let profiles = performance_profiles(&standings);
        assert!(profiles[0].win > profiles[1].win);
        assert!(profiles[1].win > profiles[2].win);
    }

    #[test]
    fn test_zero_points_equal_shares() {
        let standings = Standings::new([("A", 0), ("B", 0)]).unwrap();
        let profiles = performance_profiles(&standings);
        assert_eq!(profiles[0], profiles[1]);
        assert!((sum(&profiles[0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tier_boundaries() {
        let p = PerformanceProfile::from_share(1.0);
        assert_eq!(p.tier(0.0), Tier::Win);
        assert_eq!(p.tier(0.49), Tier::Win);
        assert_eq!(p.tier(0.51), Tier::Podium);
        assert_eq!(p.tier(0.84), Tier::Podium);
        assert_eq!(p.tier(0.9), Tier::Top5);
        assert_eq!(p.tier(0.99), Tier::Other);
    }
}
