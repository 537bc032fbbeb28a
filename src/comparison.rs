//! Subject-vs-baseline comparison for one metric family
//!
//! The baseline is either the league average over the same scope or another
//! team's bundle. Comparisons are computed per request; nothing is cached here.

use anyhow::Result;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fmt;

use crate::metrics::{
    self, pair_kpis, Aggregate, DefenseStats, KpiDelta, KpiSource, PassingStats, ReceivingStats,
    RushingStats, SeasonRecord, TeamOverview,
};

/// Baseline selector: the league average or one specific team
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    #[default]
    League,
    Team(String),
}

impl Comparator {
    /// `"league"` (or empty) selects the league average, anything else a team abbreviation
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("league") || raw.eq_ignore_ascii_case("nfl") {
            Comparator::League
        } else {
            Comparator::Team(raw.to_ascii_uppercase())
        }
    }

    /// Suffix used on delta labels, e.g. `vs NFL`
    pub fn label(&self) -> String {
        match self {
            Comparator::League => "NFL".to_string(),
            Comparator::Team(abbr) => abbr.clone(),
        }
    }

    pub fn slug(&self) -> String {
        match self {
            Comparator::League => "league".to_string(),
            Comparator::Team(abbr) => abbr.clone(),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vs {}", self.label())
    }
}

impl Serialize for Comparator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.slug())
    }
}

/// A metric family with team- and league-scoped aggregators
pub trait MetricFamily {
    type Stats: KpiSource + Clone + Serialize;

    /// Heading of the metric group
    const TITLE: &'static str;

    fn team(plays: &DataFrame, team: &str) -> Result<Aggregate<Self::Stats>>;

    fn league(plays: &DataFrame) -> Result<Aggregate<Self::Stats>>;
}

macro_rules! metric_family {
    ($family:ident, $stats:ty, $title:expr, $team:path, $league:path) => {
        pub struct $family;

        impl MetricFamily for $family {
            type Stats = $stats;
            const TITLE: &'static str = $title;

            fn team(plays: &DataFrame, team: &str) -> Result<Aggregate<Self::Stats>> {
                $team(plays, team)
            }

            fn league(plays: &DataFrame) -> Result<Aggregate<Self::Stats>> {
                $league(plays)
            }
        }
    };
}

metric_family!(Scoring, SeasonRecord, "Season", metrics::team_record, metrics::league_record);
metric_family!(Overview, TeamOverview, "High Level Overall", metrics::team_overview, metrics::league_overview);
metric_family!(Passing, PassingStats, "Passing", metrics::team_passing, metrics::league_passing);
metric_family!(Receiving, ReceivingStats, "Receiving", metrics::team_receiving, metrics::league_receiving);
metric_family!(Rushing, RushingStats, "Rushing", metrics::team_rushing, metrics::league_rushing);
metric_family!(Defense, DefenseStats, "Defense", metrics::team_defense, metrics::league_defense);

/// Subject bundle paired with its baseline
#[derive(Debug, Clone, Serialize)]
pub struct Comparison<T> {
    pub title: &'static str,
    pub comparator: Comparator,
    pub subject: Aggregate<T>,
    pub baseline: Aggregate<T>,
}

impl<T: KpiSource> Comparison<T> {
    /// Per-metric deltas, empty when the subject has no data
    ///
    /// A missing baseline keeps the subject values and drops the deltas.
    pub fn kpi_deltas(&self) -> Vec<KpiDelta> {
        let Some(subject) = self.subject.value() else {
            return Vec::new();
        };
        let baseline = self.baseline.value().map(|b| b.kpis());
        pair_kpis(&subject.kpis(), baseline.as_deref())
    }
}

/// Compare one team against the league average or another team
///
/// `plays` is the full scope (seasons and game type already applied).
pub fn compare<F: MetricFamily>(
    plays: &DataFrame,
    subject: &str,
    comparator: &Comparator,
) -> Result<Comparison<F::Stats>> {
    let subject_stats = F::team(plays, subject)?;
    let baseline = match comparator {
        Comparator::League => F::league(plays)?,
        Comparator::Team(other) => F::team(plays, other)?,
    };

    Ok(Comparison {
        title: F::TITLE,
        comparator: comparator.clone(),
        subject: subject_stats,
        baseline,
    })
}
