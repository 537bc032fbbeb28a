//! Report assembly: one selection in, every metric group out
//!
//! Reports are plain data. The JSON API serializes them directly and the HTML
//! pages turn them into view models.

use anyhow::Result;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::time::Instant;

use crate::comparison::{
    compare, Comparison, Defense, Overview, Passing, Receiving, Rushing, Scoring,
};
use crate::filters::{game_type_filter, has_offensive_plays, passer_filter};
use crate::metrics::{
    completed_passes, quarterback_stats, weekly_yards, Aggregate, DefenseStats, PassPlay,
    PassingStats, QuarterbackStats, ReceivingStats, RushingStats, SeasonRecord, TeamOverview,
    WeeklyYards,
};
use crate::selection::Selection;

#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub selection: Selection,
    pub heading: String,
    /// False when the team has no offensive plays in scope; every group is then empty
    pub has_plays: bool,
    pub record: Option<Comparison<SeasonRecord>>,
    pub overview: Option<Comparison<TeamOverview>>,
    pub weekly_yards: Vec<WeeklyYards>,
    pub passing: Option<Comparison<PassingStats>>,
    pub receiving: Option<Comparison<ReceivingStats>>,
    pub rushing: Option<Comparison<RushingStats>>,
    pub defense: Option<Comparison<DefenseStats>>,
}

impl TeamReport {
    /// Build every metric group for a selection
    ///
    /// `plays` holds the selected seasons; the game-type filter is applied here.
    pub fn build(plays: &DataFrame, selection: Selection) -> Result<Self> {
        let start = Instant::now();
        let heading = selection.heading();
        let scope = game_type_filter(plays, selection.game_type)?;
        let team = selection.team.abbr;

        if !has_offensive_plays(&scope, team)? {
            tracing::info!("No {} plays for {} in {:?}", selection.game_type.slug(), team, selection.seasons);
            return Ok(Self {
                selection,
                heading,
                has_plays: false,
                record: None,
                overview: None,
                weekly_yards: Vec::new(),
                passing: None,
                receiving: None,
                rushing: None,
                defense: None,
            });
        }

        let comparator = &selection.comparator;
        let report = Self {
            record: Some(compare::<Scoring>(&scope, team, comparator)?),
            overview: Some(compare::<Overview>(&scope, team, comparator)?),
            weekly_yards: weekly_yards(&scope, team)?,
            passing: Some(compare::<Passing>(&scope, team, comparator)?),
            receiving: Some(compare::<Receiving>(&scope, team, comparator)?),
            rushing: Some(compare::<Rushing>(&scope, team, comparator)?),
            defense: Some(compare::<Defense>(&scope, team, comparator)?),
            has_plays: true,
            heading,
            selection,
        };

        tracing::debug!(
            "Team report for {} {} built in {:.2?}",
            team,
            report.selection.comparator,
            start.elapsed()
        );
        Ok(report)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuarterbackReport {
    pub passer: String,
    pub seasons: Vec<i32>,
    pub stats: Aggregate<QuarterbackStats>,
    pub passes: Vec<PassPlay>,
}

impl QuarterbackReport {
    pub fn build(plays: &DataFrame, seasons: Vec<i32>, passer: &str) -> Result<Self> {
        let dropbacks = passer_filter(plays, passer)?;
        let stats = quarterback_stats(&dropbacks)?;
        let passes = completed_passes(plays, passer)?;

        Ok(Self {
            passer: passer.to_string(),
            seasons,
            stats,
            passes,
        })
    }
}
