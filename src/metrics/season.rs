//! SEASON RECORD: wins, losses, ties and scoring per game
//!
//! Games are the distinct (season, week, home_team, away_team) tuples of the
//! play table, carrying the maximum reported score of each side. Every game is
//! then seen from both perspectives (home and away) so one group-by yields the
//! per-team record.

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::team_season_filter;
use crate::utils::{count_where, num, round_count, round_rate, scalar_f64};

pub const TEAM_KEY: &str = "team";

const TABLE_COLS: &[&str] = &[
    "games",
    "wins",
    "losses",
    "ties",
    "avg_points",
    "avg_points_against",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub ties: i64,
    pub avg_points: f64,
    pub avg_points_against: f64,
}

impl KpiSource for SeasonRecord {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Wins", self.wins),
            Kpi::whole("Losses", self.losses).inverse(),
            Kpi::tenths("Avg Points", self.avg_points),
            Kpi::tenths("Avg Points Against", self.avg_points_against).inverse(),
        ]
    }
}

/// One row per game with the final score of each side
pub fn games_table(plays: &DataFrame) -> Result<DataFrame> {
    plays
        .clone()
        .lazy()
        .filter(col("home_team").is_not_null().and(col("away_team").is_not_null()))
        .group_by([col("season"), col("week"), col("home_team"), col("away_team")])
        .agg([
            num("home_score").max().alias("home_score"),
            num("away_score").max().alias("away_score"),
        ])
        .collect()
        .context("season: Failed to collapse plays into games")
}

fn perspective(games: &LazyFrame, team: &str, points_for: &str, points_against: &str) -> LazyFrame {
    games.clone().select([
        col(team).alias(TEAM_KEY),
        col(points_for).alias("points_for"),
        col(points_against).alias("points_against"),
    ])
}

/// One row per team with its record and unrounded scoring averages
pub fn team_records_table(plays: &DataFrame) -> Result<DataFrame> {
    let games = games_table(plays)?.lazy();
    let home = perspective(&games, "home_team", "home_score", "away_score");
    let away = perspective(&games, "away_team", "away_score", "home_score");

    concat([home, away], UnionArgs::default())?
        .group_by([col(TEAM_KEY)])
        .agg([
            len().cast(DataType::Float64).alias("games"),
            count_where(col("points_for").gt(col("points_against"))).alias("wins"),
            count_where(col("points_for").lt(col("points_against"))).alias("losses"),
            count_where(col("points_for").eq(col("points_against"))).alias("ties"),
            col("points_for").mean().alias("avg_points"),
            col("points_against").mean().alias("avg_points_against"),
        ])
        .collect()
        .context("season: Failed to aggregate team records")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<SeasonRecord>> {
    let games = scalar_f64(row, "games")?.unwrap_or(0.0);
    if games <= 0.0 {
        return Ok(Aggregate::NoData);
    }
    let count = |name: &str| -> Result<i64> {
        Ok(round_count(scalar_f64(row, name)?.unwrap_or(0.0)))
    };

    Ok(Aggregate::Value(SeasonRecord {
        games: round_count(games),
        wins: count("wins")?,
        losses: count("losses")?,
        ties: count("ties")?,
        avg_points: round_rate(scalar_f64(row, "avg_points")?.unwrap_or(0.0)),
        avg_points_against: round_rate(scalar_f64(row, "avg_points_against")?.unwrap_or(0.0)),
    }))
}

/// Record and scoring for one team over its games in scope
pub fn team_record(plays: &DataFrame, team: &str) -> Result<Aggregate<SeasonRecord>> {
    let games = team_season_filter(plays, team)?;
    let table = team_records_table(&games)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average record and scoring (mean across teams)
pub fn league_record(plays: &DataFrame) -> Result<Aggregate<SeasonRecord>> {
    let table = team_records_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}
