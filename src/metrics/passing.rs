//! PASSING: attempts, completion %, yards, touchdowns, interceptions
//!
//! **Columns needed**:
//!   1. posteam - Team key
//!   2. pass_attempt, sack - Attempts exclude sacked dropbacks
//!   3. complete_pass - Completions
//!   4. play_type, yards_gained - Passing yards over `play_type == "pass"`
//!   5. touchdown, interception - Scored on pass plays only

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::offense_filter;
use crate::utils::{
    count_where, flag, num, pass_attempted, ratio, round_count, round_rate, scalar_f64,
};

pub const TEAM_KEY: &str = "posteam";

const TABLE_COLS: &[&str] = &[
    "attempts",
    "completion_pct",
    "yards",
    "touchdowns",
    "interceptions",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassingStats {
    pub attempts: i64,
    pub completion_pct: f64,
    pub yards: i64,
    pub touchdowns: i64,
    pub interceptions: i64,
}

impl KpiSource for PassingStats {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Attempts", self.attempts),
            Kpi::tenths("Completion %", self.completion_pct),
            Kpi::whole("Passing Yds", self.yards),
            Kpi::whole("Touchdowns", self.touchdowns),
            Kpi::whole("Interceptions", self.interceptions).inverse(),
        ]
    }
}

/// One row per offense with unrounded passing values
pub fn passing_table(plays: &DataFrame) -> Result<DataFrame> {
    let is_pass = || col("play_type").eq(lit("pass"));

    plays
        .clone()
        .lazy()
        .filter(col(TEAM_KEY).is_not_null())
        .group_by([col(TEAM_KEY)])
        .agg([
            count_where(pass_attempted()).alias("attempts"),
            flag("complete_pass").sum().alias("completions"),
            num("yards_gained").filter(is_pass()).sum().alias("yards"),
            flag("touchdown").filter(is_pass()).sum().alias("touchdowns"),
            flag("interception").filter(is_pass()).sum().alias("interceptions"),
        ])
        .with_column((ratio(col("completions"), col("attempts")) * lit(100.0)).alias("completion_pct"))
        .collect()
        .context("passing: Failed to aggregate per-team table")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<PassingStats>> {
    let attempts = scalar_f64(row, "attempts")?.unwrap_or(0.0);
    let Some(completion_pct) = scalar_f64(row, "completion_pct")? else {
        return Ok(Aggregate::NoData);
    };
    if attempts <= 0.0 {
        return Ok(Aggregate::NoData);
    }

    Ok(Aggregate::Value(PassingStats {
        attempts: round_count(attempts),
        completion_pct: round_rate(completion_pct),
        yards: round_count(scalar_f64(row, "yards")?.unwrap_or(0.0)),
        touchdowns: round_count(scalar_f64(row, "touchdowns")?.unwrap_or(0.0)),
        interceptions: round_count(scalar_f64(row, "interceptions")?.unwrap_or(0.0)),
    }))
}

/// Passing bundle for one team's offense
pub fn team_passing(plays: &DataFrame, team: &str) -> Result<Aggregate<PassingStats>> {
    let offense = offense_filter(plays, team)?;
    let table = passing_table(&offense)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average passing bundle (mean across offenses)
pub fn league_passing(plays: &DataFrame) -> Result<Aggregate<PassingStats>> {
    let table = passing_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}
