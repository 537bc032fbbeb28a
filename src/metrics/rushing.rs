//! RUSHING: rushes, yards per rush, rushing yards, rushing touchdowns

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::offense_filter;
use crate::utils::{flag, is_set, num, round_count, round_rate, scalar_f64};

pub const TEAM_KEY: &str = "posteam";

const TABLE_COLS: &[&str] = &["rushes", "yards_per_rush", "yards", "touchdowns"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RushingStats {
    pub rushes: i64,
    pub yards_per_rush: f64,
    pub yards: i64,
    pub touchdowns: i64,
}

impl KpiSource for RushingStats {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Rushes", self.rushes),
            Kpi::tenths("Yds/Rush", self.yards_per_rush),
            Kpi::whole("Rushing Yds", self.yards),
            Kpi::whole("Rushing TD", self.touchdowns),
        ]
    }
}

/// One row per offense with unrounded rushing values
pub fn rushing_table(plays: &DataFrame) -> Result<DataFrame> {
    let rush = || is_set("rush_attempt");

    plays
        .clone()
        .lazy()
        .filter(col(TEAM_KEY).is_not_null())
        .group_by([col(TEAM_KEY)])
        .agg([
            flag("rush_attempt").sum().alias("rushes"),
            num("yards_gained").filter(rush()).mean().alias("yards_per_rush"),
            num("yards_gained").filter(rush()).sum().alias("yards"),
            flag("touchdown").filter(rush()).sum().alias("touchdowns"),
        ])
        .collect()
        .context("rushing: Failed to aggregate per-team table")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<RushingStats>> {
    let rushes = scalar_f64(row, "rushes")?.unwrap_or(0.0);
    let Some(yards_per_rush) = scalar_f64(row, "yards_per_rush")? else {
        return Ok(Aggregate::NoData);
    };
    if rushes <= 0.0 {
        return Ok(Aggregate::NoData);
    }

    Ok(Aggregate::Value(RushingStats {
        rushes: round_count(rushes),
        yards_per_rush: round_rate(yards_per_rush),
        yards: round_count(scalar_f64(row, "yards")?.unwrap_or(0.0)),
        touchdowns: round_count(scalar_f64(row, "touchdowns")?.unwrap_or(0.0)),
    }))
}

/// Rushing bundle for one team's offense
pub fn team_rushing(plays: &DataFrame, team: &str) -> Result<Aggregate<RushingStats>> {
    let offense = offense_filter(plays, team)?;
    let table = rushing_table(&offense)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average rushing bundle (mean across offenses)
pub fn league_rushing(plays: &DataFrame) -> Result<Aggregate<RushingStats>> {
    let table = rushing_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}
