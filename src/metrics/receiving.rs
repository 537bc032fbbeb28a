//! RECEIVING: receptions and per-catch averages
//!
//! All averages run over completed passes. Average pass length is the air
//! distance, `yards_gained - yards_after_catch`.

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::offense_filter;
use crate::utils::{flag, is_set, num, round_count, round_rate, scalar_f64};

pub const TEAM_KEY: &str = "posteam";

const TABLE_COLS: &[&str] = &[
    "receptions",
    "yards_per_reception",
    "avg_pass_length",
    "yards_after_catch",
    "touchdowns",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceivingStats {
    pub receptions: i64,
    pub yards_per_reception: f64,
    pub avg_pass_length: f64,
    pub yards_after_catch: f64,
    pub touchdowns: i64,
}

impl KpiSource for ReceivingStats {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Receptions", self.receptions),
            Kpi::tenths("Yds/Rec", self.yards_per_reception),
            Kpi::tenths("Avg Pass Length", self.avg_pass_length),
            Kpi::tenths("Yds After Catch", self.yards_after_catch),
            Kpi::whole("Receiving TD", self.touchdowns),
        ]
    }
}

/// One row per offense with unrounded receiving values
pub fn receiving_table(plays: &DataFrame) -> Result<DataFrame> {
    let caught = || is_set("complete_pass");

    plays
        .clone()
        .lazy()
        .filter(col(TEAM_KEY).is_not_null())
        .group_by([col(TEAM_KEY)])
        .agg([
            flag("complete_pass").sum().alias("receptions"),
            num("yards_gained").filter(caught()).mean().alias("yards_per_reception"),
            (num("yards_gained") - num("yards_after_catch"))
                .filter(caught())
                .mean()
                .alias("avg_pass_length"),
            num("yards_after_catch").filter(caught()).mean().alias("yards_after_catch"),
            flag("touchdown").filter(caught()).sum().alias("touchdowns"),
        ])
        .collect()
        .context("receiving: Failed to aggregate per-team table")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<ReceivingStats>> {
    let receptions = scalar_f64(row, "receptions")?.unwrap_or(0.0);
    let Some(yards_per_reception) = scalar_f64(row, "yards_per_reception")? else {
        return Ok(Aggregate::NoData);
    };
    if receptions <= 0.0 {
        return Ok(Aggregate::NoData);
    }

    Ok(Aggregate::Value(ReceivingStats {
        receptions: round_count(receptions),
        yards_per_reception: round_rate(yards_per_reception),
        avg_pass_length: round_rate(scalar_f64(row, "avg_pass_length")?.unwrap_or(0.0)),
        yards_after_catch: round_rate(scalar_f64(row, "yards_after_catch")?.unwrap_or(0.0)),
        touchdowns: round_count(scalar_f64(row, "touchdowns")?.unwrap_or(0.0)),
    }))
}

/// Receiving bundle for one team's offense
pub fn team_receiving(plays: &DataFrame, team: &str) -> Result<Aggregate<ReceivingStats>> {
    let offense = offense_filter(plays, team)?;
    let table = receiving_table(&offense)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average receiving bundle (mean across offenses)
pub fn league_receiving(plays: &DataFrame) -> Result<Aggregate<ReceivingStats>> {
    let table = receiving_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plays() -> DataFrame {
        df![
            "posteam" => &["KC", "KC", "KC", "DEN"],
            "complete_pass" => &[1.0, 1.0, 0.0, 0.0],
            "yards_gained" => &[15.0, 7.0, 0.0, 4.0],
            "yards_after_catch" => &[Some(5.0), Some(7.0), None, None],
            "touchdown" => &[1.0, 0.0, 0.0, 0.0],
        ].unwrap()
    }

    #[test]
    fn test_team_receiving() {
        let stats = team_receiving(&plays(), "KC").unwrap().into_option().unwrap();
        assert_eq!(stats.receptions, 2);
        assert_relative_eq!(stats.yards_per_reception, 11.0, epsilon = 0.0001);
        // (15 - 5 + 7 - 7) / 2
        assert_relative_eq!(stats.avg_pass_length, 5.0, epsilon = 0.0001);
        assert_relative_eq!(stats.yards_after_catch, 6.0, epsilon = 0.0001);
        assert_eq!(stats.touchdowns, 1);
    }

    #[test]
    fn test_no_receptions_is_no_data() {
        assert!(team_receiving(&plays(), "DEN").unwrap().is_no_data());
    }

    #[test]
    fn test_league_skips_teams_without_catches() {
        let league = league_receiving(&plays()).unwrap().into_option().unwrap();
        // DEN contributes 0 receptions but no per-catch averages
        assert_eq!(league.receptions, 1);
        assert_relative_eq!(league.yards_per_reception, 11.0, epsilon = 0.0001);
    }
}
