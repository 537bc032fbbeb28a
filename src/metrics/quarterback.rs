//! QUARTERBACK: per-passer production over the plays of one passer
//!
//! Attempts are `pass_attempt == 1` plays that are not sacks, the same count the
//! team passing family uses. Every per-attempt rate and the big-gain counts read
//! only those plays, so scrambles never leak in.

use polars::prelude::*;
use anyhow::{Context, Result};
use serde::Serialize;

use super::{Aggregate, Kpi, KpiSource};
use crate::filters::passer_filter;
use crate::utils::{
    count_where, f64_values, i64_values, is_set, is_unset, materialize_with_columns, num,
    pass_attempted, ratio, round_count, round_rate, scalar_f64, str_values,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterbackStats {
    pub pass_yards: i64,
    pub yards_per_attempt: f64,
    pub attempts: i64,
    pub completions: i64,
    pub completion_pct: f64,
    pub touchdowns: i64,
    pub interceptions: i64,
    pub gains_20_plus: i64,
    pub gains_40_plus: i64,
    pub longest: i64,
    pub sacks: i64,
    pub sack_yards: i64,
}

impl KpiSource for QuarterbackStats {
    fn kpis(&self) -> Vec<Kpi> {
        vec![
            Kpi::whole("Pass Yds", self.pass_yards),
            Kpi::tenths("Yds/Att", self.yards_per_attempt),
            Kpi::whole("Attempts", self.attempts),
            Kpi::whole("Completions", self.completions),
            Kpi::tenths("Cmp %", self.completion_pct),
            Kpi::whole("TD", self.touchdowns),
            Kpi::whole("INT", self.interceptions).inverse(),
            Kpi::whole("20+ Yds", self.gains_20_plus),
            Kpi::whole("40+ Yds", self.gains_40_plus),
            Kpi::whole("Long", self.longest),
            Kpi::whole("Sacks", self.sacks).inverse(),
            Kpi::whole("Sack Yds", self.sack_yards),
        ]
    }
}

/// One completed pass, with the air distance split out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassPlay {
    pub week: i32,
    pub qtr: Option<i64>,
    pub receiver: Option<String>,
    pub yrdln: Option<String>,
    pub yardline_100: Option<f64>,
    pub pass_length: Option<String>,
    pub pass_location: Option<String>,
    pub touchdown: bool,
    pub yards_gained: f64,
    pub yards_after_catch: Option<f64>,
    pub air_yards: Option<f64>,
}

/// Entry of the passer selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasserSummary {
    pub name: String,
    pub team: Option<String>,
    pub attempts: i64,
}

/// Aggregate the dropbacks of one passer
///
/// `plays` must already be narrowed to the passer (see [`passer_filter`]).
pub fn quarterback_stats(plays: &DataFrame) -> Result<Aggregate<QuarterbackStats>> {
    let thrown = pass_attempted;
    let sacked = || is_set("pass_attempt").and(is_set("sack"));

    let row = plays
        .clone()
        .lazy()
        .select([
            num("yards_gained").filter(thrown().and(is_set("complete_pass"))).sum().alias("pass_yards"),
            count_where(thrown()).alias("attempts"),
            count_where(thrown().and(is_set("complete_pass"))).alias("completions"),
            count_where(thrown().and(is_set("pass_touchdown"))).alias("touchdowns"),
            count_where(thrown().and(is_set("interception"))).alias("interceptions"),
            count_where(thrown().and(num("yards_gained").gt_eq(lit(20.0)))).alias("gains_20_plus"),
            count_where(thrown().and(num("yards_gained").gt_eq(lit(40.0)))).alias("gains_40_plus"),
            num("yards_gained").filter(thrown()).max().alias("longest"),
            count_where(sacked()).alias("sacks"),
            num("yards_gained").filter(sacked()).sum().alias("sack_yards"),
        ])
        .with_columns([
            ratio(col("pass_yards"), col("attempts")).alias("yards_per_attempt"),
            (ratio(col("completions"), col("attempts")) * lit(100.0)).alias("completion_pct"),
        ])
        .collect()
        .context("quarterback: Failed to aggregate passer plays")?;

    let attempts = scalar_f64(&row, "attempts")?.unwrap_or(0.0);
    if attempts <= 0.0 {
        return Ok(Aggregate::NoData);
    }
    let count = |name: &str| -> Result<i64> {
        Ok(round_count(scalar_f64(&row, name)?.unwrap_or(0.0)))
    };
    let rate = |name: &str| -> Result<f64> {
        Ok(round_rate(scalar_f64(&row, name)?.unwrap_or(0.0)))
    };

    Ok(Aggregate::Value(QuarterbackStats {
        pass_yards: count("pass_yards")?,
        yards_per_attempt: rate("yards_per_attempt")?,
        attempts: round_count(attempts),
        completions: count("completions")?,
        completion_pct: rate("completion_pct")?,
        touchdowns: count("touchdowns")?,
        interceptions: count("interceptions")?,
        gains_20_plus: count("gains_20_plus")?,
        gains_40_plus: count("gains_40_plus")?,
        longest: count("longest")?,
        sacks: count("sacks")?,
        sack_yards: count("sack_yards")?,
    }))
}

const PASS_PLAY_COLUMNS: &[&str] = &[
    "week",
    "qtr",
    "receiver",
    "yrdln",
    "yardline_100",
    "pass_length",
    "pass_location",
    "pass_touchdown",
    "yards_gained",
    "yards_after_catch",
    "air_yards",
];

/// Completed passes of one passer in play order
///
/// Sacks, interceptions, incompletions and plays without a pass location are
/// left out.
pub fn completed_passes(plays: &DataFrame, passer: &str) -> Result<Vec<PassPlay>> {
    let lazy = passer_filter(plays, passer)?
        .lazy()
        .filter(
            is_set("pass")
                .and(is_unset("sack"))
                .and(is_unset("interception"))
                .and(is_unset("incomplete_pass"))
                .and(col("pass_location").is_not_null()),
        )
        .with_column((num("yards_gained") - num("yards_after_catch")).alias("air_yards"));

    let df = materialize_with_columns(&lazy, PASS_PLAY_COLUMNS, "completed passes")?;

    let weeks = i64_values(&df, "week")?;
    let quarters = i64_values(&df, "qtr")?;
    let receivers = str_values(&df, "receiver")?;
    let yard_lines = str_values(&df, "yrdln")?;
    let yardline_100 = f64_values(&df, "yardline_100")?;
    let lengths = str_values(&df, "pass_length")?;
    let locations = str_values(&df, "pass_location")?;
    let touchdowns = f64_values(&df, "pass_touchdown")?;
    let gained = f64_values(&df, "yards_gained")?;
    let after_catch = f64_values(&df, "yards_after_catch")?;
    let air = f64_values(&df, "air_yards")?;

    let passes = (0..df.height())
        .map(|i| PassPlay {
            week: weeks[i].unwrap_or_default() as i32,
            qtr: quarters[i],
            receiver: receivers[i].clone(),
            yrdln: yard_lines[i].clone(),
            yardline_100: yardline_100[i],
            pass_length: lengths[i].clone(),
            pass_location: locations[i].clone(),
            touchdown: touchdowns[i] == Some(1.0),
            yards_gained: gained[i].unwrap_or(0.0),
            yards_after_catch: after_catch[i],
            air_yards: air[i],
        })
        .collect();

    Ok(passes)
}

/// Passers with at least `min_attempts` attempts in scope, sorted by name
pub fn passers(plays: &DataFrame, min_attempts: u32) -> Result<Vec<PasserSummary>> {
    let table = plays
        .clone()
        .lazy()
        .filter(col("passer").is_not_null())
        .group_by([col("passer")])
        .agg([
            count_where(pass_attempted()).alias("attempts"),
            col("posteam").drop_nulls().first().alias("team"),
        ])
        .filter(col("attempts").gt_eq(lit(min_attempts as f64)))
        .sort(["passer"], SortMultipleOptions::default())
        .collect()
        .context("quarterback: Failed to list passers")?;

    let names = str_values(&table, "passer")?;
    let teams = str_values(&table, "team")?;
    let attempts = f64_values(&table, "attempts")?;

    Ok(names
        .into_iter()
        .zip(teams)
        .zip(attempts)
        .filter_map(|((name, team), attempts)| {
            Some(PasserSummary {
                name: name?,
                team,
                attempts: round_count(attempts.unwrap_or(0.0)),
            })
        })
        .collect())
}
