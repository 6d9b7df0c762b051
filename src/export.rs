use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{ChampionshipError, Result};
use crate::scenario::Scenario;
use crate::standings::Standings;

/// Column names: race wins, sprint wins and total per competitor, then the winner.
pub fn scenario_headers(standings: &Standings) -> Vec<String> {
    let mut headers: Vec<String> = standings
        .names()
        .flat_map(|name| {
            [
                format!("{}_race_wins", name),
                format!("{}_sprint_wins", name),
                format!("{}_total", name),
            ]
        })
        .collect();
    headers.push("winner".to_string());
    headers
}

/// Write one CSV row per scenario.
pub fn write_scenarios_csv<W: Write>(
    writer: W,
    standings: &Standings,
    scenarios: &[Scenario],
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(scenario_headers(standings))?;

    for scenario in scenarios {
        let mut row: Vec<String> = Vec::with_capacity(scenario.outcomes.len() * 3 + 1);
        for o in &scenario.outcomes {
            row.push(o.race_wins.to_string());
            row.push(o.sprint_wins.to_string());
            row.push(o.total.to_string());
        }
        row.push(standings.competitor(scenario.winner).name.clone());
        csv.write_record(&row)?;
    }

    csv.flush().map_err(|e| ChampionshipError::Csv(e.into()))
}

pub fn save_scenarios_csv(path: &Path, standings: &Standings, scenarios: &[Scenario]) -> Result<()> {
    let file = File::create(path).map_err(|source| ChampionshipError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_scenarios_csv(file, standings, scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::enumerate_scenarios;
    use crate::standings::EventCounts;

    #[test]
    fn test_headers() {
        let standings = Standings::new([("A", 1), ("B", 2)]).unwrap();
        assert_eq!(
            scenario_headers(&standings),
            vec![
                "A_race_wins",
                "A_sprint_wins",
                "A_total",
                "B_race_wins",
                "B_sprint_wins",
                "B_total",
                "winner"
            ]
        );
    }

    #[test]
    fn test_rows_written() {
        let standings = Standings::new([("A", 100), ("B", 95)]).unwrap();
        let scenarios = enumerate_scenarios(&standings, EventCounts::new(1, 0)).unwrap();

        let mut buffer = Vec::new();
        write_scenarios_csv(&mut buffer, &standings, &scenarios).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        // B takes the only race: A 100+15, B 95+25
        assert_eq!(lines[1], "0,0,115,1,0,120,B");
        assert_eq!(lines[2], "1,0,125,0,0,110,A");
    }
}
