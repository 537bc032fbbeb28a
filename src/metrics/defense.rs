//! DEFENSE: tackles, sacks, yards allowed, turnovers and stop rates
//!
//! Keyed by `defteam`. Per-game values average the weekly sums of each
//! (season, week). Two rates can be undefined for a team that did face plays:
//!   - 3rd-down stop %: `(1 - mean(third_down_converted)) * 100` over `down == 3`
//!   - goal-line stand %: `(1 - mean(drive had a TD)) * 100` over goal-to-go
//!     drives, one group per (season, week, drive)

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{league_aggregate, team_aggregate, Aggregate, Kpi, KpiSource};
use crate::filters::defense_filter;
use crate::utils::{count_where, flag, is_set, num, round_count, round_rate, scalar_f64};

pub const TEAM_KEY: &str = "defteam";

const TABLE_COLS: &[&str] = &[
    "tackles",
    "sacks",
    "yards_allowed",
    "turnovers",
    "touchdowns",
    "tackles_for_loss",
    "sacks_per_game",
    "yards_allowed_per_game",
    "third_down_stop_pct",
    "goal_line_stand_pct",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenseStats {
    pub tackles: i64,
    pub sacks: i64,
    pub yards_allowed: i64,
    pub turnovers: i64,
    /// Touchdowns scored by the defense
    pub touchdowns: i64,
    pub tackles_for_loss: i64,
    pub sacks_per_game: f64,
    pub yards_allowed_per_game: i64,
    pub third_down_stop_pct: Option<f64>,
    pub goal_line_stand_pct: Option<f64>,
}

impl KpiSource for DefenseStats {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Tackles", self.tackles),
            Kpi::whole("Sacks", self.sacks),
            Kpi::whole("Yds Allowed", self.yards_allowed).inverse(),
            Kpi::whole("Turnovers", self.turnovers),
            Kpi::whole("Defensive TD", self.touchdowns),
            Kpi::whole("Tackles for Loss", self.tackles_for_loss),
            Kpi::tenths("Sacks/Game", self.sacks_per_game),
            Kpi::whole("Yds Allowed/Game", self.yards_allowed_per_game).inverse(),
            Kpi::optional_tenths("3rd Down Stop %", self.third_down_stop_pct),
            Kpi::optional_tenths("Goal Line Stand %", self.goal_line_stand_pct),
        ]
    }
}

/// One row per defense with unrounded defensive values
pub fn defense_table(plays: &DataFrame) -> Result<DataFrame> {
    let plays = plays.clone().lazy().filter(col(TEAM_KEY).is_not_null());

    let totals = plays.clone().group_by([col(TEAM_KEY)]).agg([
        (flag("solo_tackle").sum() + flag("assist_tackle").sum()).alias("tackles"),
        flag("sack").sum().alias("sacks"),
        num("yards_gained").sum().alias("yards_allowed"),
        (flag("interception").sum() + flag("fumble_lost").sum()).alias("turnovers"),
        count_where(col("td_team").eq(col(TEAM_KEY))).alias("touchdowns"),
        count_where(
            is_set("solo_tackle")
                .or(is_set("assist_tackle"))
                .and(num("yards_gained").lt(lit(0.0))),
        )
        .alias("tackles_for_loss"),
    ]);

    let per_game = plays
        .clone()
        .group_by([col(TEAM_KEY), col("season"), col("week")])
        .agg([
            flag("sack").sum().alias("game_sacks"),
            num("yards_gained").sum().alias("game_yards"),
        ])
        .group_by([col(TEAM_KEY)])
        .agg([
            col("game_sacks").mean().alias("sacks_per_game"),
            col("game_yards").mean().alias("yards_allowed_per_game"),
        ]);

    let third_down = plays
        .clone()
        .filter(num("down").eq(lit(3.0)))
        .group_by([col(TEAM_KEY)])
        .agg([flag("third_down_converted").mean().alias("third_down_conversion_rate")]);

    let goal_line = plays
        .filter(is_set("goal_to_go"))
        .group_by([col(TEAM_KEY), col("season"), col("week"), col("drive")])
        .agg([flag("touchdown").max().alias("drive_touchdown")])
        .group_by([col(TEAM_KEY)])
        .agg([col("drive_touchdown").mean().alias("goal_line_td_rate")]);

    totals
        .left_join(per_game, col(TEAM_KEY), col(TEAM_KEY))
        .left_join(third_down, col(TEAM_KEY), col(TEAM_KEY))
        .left_join(goal_line, col(TEAM_KEY), col(TEAM_KEY))
        .with_columns([
            ((lit(1.0) - col("third_down_conversion_rate")) * lit(100.0)).alias("third_down_stop_pct"),
            ((lit(1.0) - col("goal_line_td_rate")) * lit(100.0)).alias("goal_line_stand_pct"),
        ])
        .collect()
        .context("defense: Failed to aggregate per-team table")
}

fn read_row(row: &DataFrame) -> Result<Aggregate<DefenseStats>> {
    let count = |name: &str| -> Result<i64> {
        Ok(round_count(scalar_f64(row, name)?.unwrap_or(0.0)))
    };

    Ok(Aggregate::Value(DefenseStats {
        tackles: count("tackles")?,
        sacks: count("sacks")?,
        yards_allowed: count("yards_allowed")?,
        turnovers: count("turnovers")?,
        touchdowns: count("touchdowns")?,
        tackles_for_loss: count("tackles_for_loss")?,
        sacks_per_game: round_rate(scalar_f64(row, "sacks_per_game")?.unwrap_or(0.0)),
        yards_allowed_per_game: count("yards_allowed_per_game")?,
        third_down_stop_pct: scalar_f64(row, "third_down_stop_pct")?.map(round_rate),
        goal_line_stand_pct: scalar_f64(row, "goal_line_stand_pct")?.map(round_rate),
    }))
}

/// Defense bundle for one team
pub fn team_defense(plays: &DataFrame, team: &str) -> Result<Aggregate<DefenseStats>> {
    let defense = defense_filter(plays, team)?;
    let table = defense_table(&defense)?;
    team_aggregate(&table, TEAM_KEY, team, read_row)
}

/// League-average defense bundle (mean across defenses)
pub fn league_defense(plays: &DataFrame) -> Result<Aggregate<DefenseStats>> {
    let table = defense_table(plays)?;
    league_aggregate(&table, TABLE_COLS, read_row)
}
