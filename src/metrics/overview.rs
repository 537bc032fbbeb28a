//! OFFENSIVE OVERVIEW: yardage totals and the weekly run/pass split

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::offense_filter;
use crate::utils::{f64_values, i64_values, num, round_count, round_rate, scalar_f64, str_values};

pub const TEAM_KEY: &str = "posteam";

const TABLE_COLS: &[&str] = &["total_yards", "yards_per_game", "rushing_yards", "passing_yards"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverview {
    pub total_yards: i64,
    pub yards_per_game: f64,
    pub rushing_yards: i64,
    pub passing_yards: i64,
}

impl KpiSource for TeamOverview {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Total Yds", self.total_yards),
            Kpi::tenths("Yds/Game", self.yards_per_game),
            Kpi::whole("Rushing Yds", self.rushing_yards),
            Kpi::whole("Passing Yds", self.passing_yards),
        ]
    }
}

/// Yards gained on one play type in one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyYards {
    pub season: i32,
    pub week: i32,
    pub play_type: String,
    pub yards: i64,
}

/// One row per offense with unrounded yardage values
pub fn overview_table(plays: &DataFrame) -> Result<DataFrame> {
    let plays = plays.clone().lazy().filter(col(TEAM_KEY).is_not_null());

    let totals = plays.clone().group_by([col(TEAM_KEY)]).agg([
        num("yards_gained").sum().alias("total_yards"),
        num("yards_gained")
            .filter(col("play_type").eq(lit("run")))
            .sum()
            .alias("rushing_yards"),
        num("yards_gained")
            .filter(col("play_type").eq(lit("pass")))
            .sum()
            .alias("passing_yards"),
    ]);

    let per_game = plays
        .group_by([col(TEAM_KEY), col("season"), col("week")])
        .agg([num("yards_gained").sum().alias("game_yards")])
        .group_by([col(TEAM_KEY)])
        .agg([col("game_yards").mean().alias("yards_per_game")]);

    totals
        .left_join(per_game, col(TEAM_KEY), col(TEAM_KEY))
        .collect()
        .context("overview: Failed to aggregate per-team table")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<TeamOverview>> {
    let Some(yards_per_game) = scalar_f64(row, "yards_per_game")? else {
        return Ok(Aggregate::NoData);
    };
    let count = |name: &str| -> Result<i64> {
        Ok(round_count(scalar_f64(row, name)?.unwrap_or(0.0)))
    };

    Ok(Aggregate::Value(TeamOverview {
        total_yards: count("total_yards")?,
        yards_per_game: round_rate(yards_per_game),
        rushing_yards: count("rushing_yards")?,
        passing_yards: count("passing_yards")?,
    }))
}

/// Yardage overview for one team's offense
pub fn team_overview(plays: &DataFrame, team: &str) -> Result<Aggregate<TeamOverview>> {
    let offense = offense_filter(plays, team)?;
    let table = overview_table(&offense)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average yardage overview (mean across offenses)
pub fn league_overview(plays: &DataFrame) -> Result<Aggregate<TeamOverview>> {
    let table = overview_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}

/// Weekly rushing and passing yards for one team, ordered by season, week, play type
pub fn weekly_yards(plays: &DataFrame, team: &str) -> Result<Vec<WeeklyYards>> {
    let weekly = offense_filter(plays, team)?
        .lazy()
        .filter(col("play_type").eq(lit("run")).or(col("play_type").eq(lit("pass"))))
        .group_by([col("season"), col("week"), col("play_type")])
        .agg([num("yards_gained").sum().alias("yards")])
        .collect()
        .context("overview: Failed to aggregate weekly yards")?;

    let seasons = i64_values(&weekly, "season")?;
    let weeks = i64_values(&weekly, "week")?;
    let play_types = str_values(&weekly, "play_type")?;
    let yards = f64_values(&weekly, "yards")?;

    let mut rows: Vec<WeeklyYards> = seasons
        .into_iter()
        .zip(weeks)
        .zip(play_types)
        .zip(yards)
        .filter_map(|(((season, week), play_type), yards)| {
            Some(WeeklyYards {
                season: season? as i32,
                week: week? as i32,
                play_type: play_type?,
                yards: round_count(yards.unwrap_or(0.0)),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.season, a.week, &a.play_type).cmp(&(b.season, b.week, &b.play_type))
    });
    Ok(rows)
}
