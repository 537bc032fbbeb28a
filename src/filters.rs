//! Row filters that narrow a season dataset before aggregation
//!
//! An unknown team or an empty scope yields an empty frame rather than an
//! error; the aggregators turn empty input into `Aggregate::NoData`.

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::{count_where, is_set, scalar_f64};

/// Game-type filter chosen in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Regular,
    Playoffs,
    All,
}

impl GameType {
    pub const ALL: [GameType; 3] = [GameType::Regular, GameType::Playoffs, GameType::All];

    pub fn label(&self) -> &'static str {
        match self {
            GameType::Regular => "Regular Season",
            GameType::Playoffs => "Playoffs",
            GameType::All => "All Games",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            GameType::Regular => "regular",
            GameType::Playoffs => "playoffs",
            GameType::All => "all",
        }
    }

    /// `season_type` value kept by this filter (`None` keeps everything)
    fn season_type(&self) -> Option<&'static str> {
        match self {
            GameType::Regular => Some("REG"),
            GameType::Playoffs => Some("POST"),
            GameType::All => None,
        }
    }
}

fn filtered(plays: &DataFrame, predicate: Expr, context: &str) -> Result<DataFrame> {
    plays
        .clone()
        .lazy()
        .filter(predicate)
        .collect()
        .with_context(|| format!("{}: Failed to filter plays", context))
}

/// Keep regular-season plays, playoff plays, or all of them
pub fn game_type_filter(plays: &DataFrame, game_type: GameType) -> Result<DataFrame> {
    match game_type.season_type() {
        Some(season_type) => filtered(
            plays,
            col("season_type").eq(lit(season_type)),
            "game type filter",
        ),
        None => Ok(plays.clone()),
    }
}

/// Plays from games the team took part in, home or away
pub fn team_season_filter(plays: &DataFrame, team: &str) -> Result<DataFrame> {
    filtered(
        plays,
        col("home_team").eq(lit(team)).or(col("away_team").eq(lit(team))),
        "team season filter",
    )
}

/// Plays where the team has possession
pub fn offense_filter(plays: &DataFrame, team: &str) -> Result<DataFrame> {
    filtered(plays, col("posteam").eq(lit(team)), "offense filter")
}

/// Plays where the team is on defense
pub fn defense_filter(plays: &DataFrame, team: &str) -> Result<DataFrame> {
    filtered(plays, col("defteam").eq(lit(team)), "defense filter")
}

/// Dropbacks of one passer: throws and sacks
///
/// Scrambles keep the passer name but have `pass_attempt == 0`, so they drop out.
pub fn passer_filter(plays: &DataFrame, passer: &str) -> Result<DataFrame> {
    filtered(
        plays,
        col("passer").eq(lit(passer)).and(is_set("pass_attempt")),
        "passer filter",
    )
}

/// Whether the team has any offensive snaps in scope
pub fn has_offensive_plays(plays: &DataFrame, team: &str) -> Result<bool> {
    let counted = plays
        .clone()
        .lazy()
        .select([count_where(col("posteam").eq(lit(team))).alias("snaps")])
        .collect()?;
    Ok(scalar_f64(&counted, "snaps")?.unwrap_or(0.0) > 0.0)
}
