//! Metric families for team, league and quarterback aggregation
//!
//! Each team family builds one per-team table of unrounded values. The
//! team-scoped aggregator narrows the plays to its team and reads that row;
//! the league-scoped aggregator averages every column across team rows and
//! rounds once. League baselines are therefore a mean of team values, never a
//! flat per-play mean.

pub mod kpi;
pub mod passing;
pub mod receiving;
pub mod rushing;
pub mod defense;
pub mod season;
pub mod overview;
pub mod quarterback;

// Re-export metric functions
pub use kpi::{Kpi, KpiDelta, KpiSource, Precision, format_number, pair_kpis};
pub use passing::{team_passing, league_passing, passing_table, PassingStats};
pub use receiving::{team_receiving, league_receiving, receiving_table, ReceivingStats};
pub use rushing::{team_rushing, league_rushing, rushing_table, RushingStats};
pub use defense::{team_defense, league_defense, defense_table, DefenseStats};
pub use season::{team_record, league_record, team_records_table, games_table, SeasonRecord};
pub use overview::{team_overview, league_overview, overview_table, weekly_yards, TeamOverview, WeeklyYards};
pub use quarterback::{
    quarterback_stats, completed_passes, passers, PassPlay, PasserSummary, QuarterbackStats,
};

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Outcome of an aggregation: a metric bundle, or an explicit empty-scope marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum Aggregate<T> {
    Value(T),
    NoData,
}

impl<T> Aggregate<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Aggregate::Value(v) => Some(v),
            Aggregate::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Aggregate::NoData)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Aggregate<U> {
        match self {
            Aggregate::Value(v) => Aggregate::Value(f(v)),
            Aggregate::NoData => Aggregate::NoData,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Aggregate::Value(v) => Some(v),
            Aggregate::NoData => None,
        }
    }
}

/// Read one team's row out of a per-team table
///
/// `None` when the team has no row (no plays in scope).
pub(crate) fn row_for_team(table: &DataFrame, key: &str, team: &str) -> Result<Option<DataFrame>> {
    let row = table
        .clone()
        .lazy()
        .filter(col(key).eq(lit(team)))
        .collect()
        .with_context(|| format!("Failed to select {} row for {}", key, team))?;

    Ok((row.height() > 0).then_some(row))
}

/// Mean of each listed column across team rows (nulls skipped)
///
/// `None` when the table has no teams.
pub(crate) fn column_means(table: &DataFrame, columns: &[&str]) -> Result<Option<DataFrame>> {
    if table.height() == 0 {
        return Ok(None);
    }

    let means: Vec<Expr> = columns
        .iter()
        .map(|&name| col(name).cast(DataType::Float64).mean().alias(name))
        .collect();

    let row = table
        .clone()
        .lazy()
        .select(means)
        .collect()
        .context("Failed to average per-team table")?;

    Ok(Some(row))
}

/// Team-scoped read of a per-team table
pub(crate) fn team_aggregate<T>(
    table: &DataFrame,
    key: &str,
    team: &str,
    read: impl FnOnce(&DataFrame) -> Result<Aggregate<T>>,
) -> Result<Aggregate<T>> {
    match row_for_team(table, key, team)? {
        Some(row) => read(&row),
        None => Ok(Aggregate::NoData),
    }
}

/// League-scoped read of a per-team table
pub(crate) fn league_aggregate<T>(
    table: &DataFrame,
    columns: &[&str],
    read: impl FnOnce(&DataFrame) -> Result<Aggregate<T>>,
) -> Result<Aggregate<T>> {
    match column_means(table, columns)? {
        Some(row) => read(&row),
        None => Ok(Aggregate::NoData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_means_skip_nulls() {
        let table = df![
            "posteam" => &["A", "B", "C"],
            "rate" => &[Some(40.0), None, Some(60.0)],
        ].unwrap();

        let means = column_means(&table, &["rate"]).unwrap().unwrap();
        assert_eq!(means.column("rate").unwrap().f64().unwrap().get(0), Some(50.0));
    }

    #[test]
    fn test_row_for_unknown_team() {
        let table = df![
            "posteam" => &["A"],
            "rate" => &[1.0],
        ].unwrap();

        assert!(row_for_team(&table, "posteam", "Z").unwrap().is_none());
        assert!(row_for_team(&table, "posteam", "A").unwrap().is_some());
    }

    #[test]
    fn test_aggregate_serializes_status() {
        let value: Aggregate<i64> = Aggregate::Value(3);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["status"], "value");
        assert_eq!(json["stats"], 3);

        let none: Aggregate<i64> = Aggregate::NoData;
        let json = serde_json::to_value(&none).unwrap();
        assert_eq!(json["status"], "no_data");
    }
}
