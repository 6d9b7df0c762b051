use crate::constants::{RACE_POINTS, SPRINT_POINTS};
use crate::error::{InvalidInput, Result};

/// Scoring event type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Race,
    Sprint,
}

impl EventKind {
    /// Points for every scoring position, P1 first.
    pub fn position_points(self) -> &'static [u32] {
        match self {
            EventKind::Race => &RACE_POINTS,
            EventKind::Sprint => &SPRINT_POINTS,
        }
    }

    /// Win/second/third values used by the exhaustive projection.
    pub fn podium(self) -> PointsTable {
        let p = self.position_points();
        PointsTable {
            win: p[0],
            second: p[1],
            third: p[2],
        }
    }
}

/// Points for a win and for the two runner-up places.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointsTable {
    pub win: u32,
    pub second: u32,
    pub third: u32,
}

impl PointsTable {
    /// Build a table, rejecting values that increase with position.
    pub fn new(win: u32, second: u32, third: u32) -> Result<Self> {
        let table = PointsTable { win, second, third };
        table.validate()?;
        Ok(table)
    }

    /// Check that points never increase with position.
    pub fn validate(&self) -> Result<()> {
        if self.second > self.win || self.third > self.second {
            return Err(InvalidInput::PointsOrder {
                win: self.win,
                second: self.second,
                third: self.third,
            }
            .into());
        }
        Ok(())
    }

    /// Points for `wins` wins out of `event_count` events.
    ///
    /// Events not won are split between second and third place, with the
    /// odd one out going to third. The split is applied to each competitor
    /// on its own, so the runner-up places across competitors need not be
    /// consistent with a single race result.
    pub fn contribution(&self, wins: u32, event_count: u32) -> u64 {
        debug_assert!(wins <= event_count, "{wins} wins out of {event_count} events");
        let (second_count, third_count) = non_win_split(wins, event_count);
        u64::from(wins) * u64::from(self.win)
            + u64::from(second_count) * u64::from(self.second)
            + u64::from(third_count) * u64::from(self.third)
    }
}

/// Split events not won into (second places, third places).
pub fn non_win_split(wins: u32, event_count: u32) -> (u32, u32) {
    let non_wins = event_count.saturating_sub(wins);
    let second_count = non_wins / 2;
    (second_count, non_wins - second_count)
}

/// Point contribution of each competitor for one event type.
pub fn project(distribution: &[u32], event_count: u32, table: &PointsTable) -> Vec<u64> {
    distribution
        .iter()
        .map(|&wins| table.contribution(wins, event_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_even_and_odd() {
        assert_eq!(non_win_split(0, 4), (2, 2));
        assert_eq!(non_win_split(1, 4), (1, 2));
        assert_eq!(non_win_split(0, 1), (0, 1));
        assert_eq!(non_win_split(3, 3), (0, 0));
    }

    #[test]
    fn test_race_projection() {
        let table = EventKind::Race.podium();
        let points = project(&[4, 0, 0], 4, &table);
        assert_eq!(points, vec![100, 66, 66]);
    }

    #[test]
    fn test_sprint_projection() {
        let table = EventKind::Sprint.podium();
        let points = project(&[1, 0, 0], 1, &table);
        assert_eq!(points, vec![8, 6, 6]);
    }

    #[test]
    fn test_runner_up_points_are_independent_per_competitor() {
        // Three competitors without a win each get a P2 and a P3 from the
        // same two races.
        let table = EventKind::Race.podium();
        let points = project(&[0, 0, 0, 2], 2, &table);
        assert_eq!(points, vec![33, 33, 33, 50]);
    }

    #[test]
    fn test_no_events_no_points() {
        let table = EventKind::Race.podium();
        assert_eq!(project(&[0, 0], 0, &table), vec![0, 0]);
    }

    #[test]
    fn test_points_table_order_checked() {
        assert!(PointsTable::new(25, 18, 15).is_ok());
        assert!(PointsTable::new(10, 18, 15).is_err());
        assert!(PointsTable::new(25, 15, 18).is_err());
    }

    #[test]
    fn test_literal_table_validated() {
        let table = PointsTable { win: 1, second: 50, third: 40 };
        assert_eq!(
            table.validate().unwrap_err().to_string(),
            PointsTable::new(1, 50, 40).unwrap_err().to_string()
        );
        assert!(EventKind::Race.podium().validate().is_ok());
        assert!(EventKind::Sprint.podium().validate().is_ok());
        // equal neighbours are allowed
        assert!(PointsTable { win: 5, second: 5, third: 5 }.validate().is_ok());
    }
}
