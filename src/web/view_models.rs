//! View models for the askama templates
//!
//! Templates only see preformatted strings and flags; all number formatting
//! happens here.

use crate::comparison::Comparison;
use crate::metrics::{format_number, Aggregate, KpiSource, PassPlay, Precision, QuarterbackStats};

/// One metric tile: value plus an optional "x vs NFL" delta
#[derive(Debug, Clone, PartialEq)]
pub struct KpiView {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
    /// `up`, `down` or `flat`, used as the delta CSS class
    pub trend: &'static str,
}

/// A titled row of metric tiles
#[derive(Debug, Clone, PartialEq)]
pub struct KpiGroupView {
    pub title: String,
    pub no_data: bool,
    pub kpis: Vec<KpiView>,
}

fn signed(delta: f64, precision: Precision) -> String {
    let formatted = format_number(Some(delta), precision);
    if delta > 0.0 {
        format!("+{}", formatted)
    } else {
        formatted
    }
}

impl KpiGroupView {
    pub fn from_comparison<T: KpiSource>(comparison: &Comparison<T>) -> Self {
        let suffix = comparison.comparator.to_string();
        let kpis = comparison
            .kpi_deltas()
            .into_iter()
            .map(|paired| KpiView {
                label: paired.kpi.label.to_string(),
                value: paired.kpi.format_value(),
                delta: paired
                    .delta
                    .map(|d| format!("{} {}", signed(d, paired.kpi.precision), suffix)),
                trend: match paired.is_improvement() {
                    Some(true) => "up",
                    Some(false) => "down",
                    None => "flat",
                },
            })
            .collect::<Vec<_>>();

        Self {
            title: comparison.title.to_string(),
            no_data: kpis.is_empty(),
            kpis,
        }
    }

    pub fn from_quarterback(stats: &Aggregate<QuarterbackStats>) -> Self {
        let kpis = stats
            .value()
            .map(|s| {
                s.kpis()
                    .into_iter()
                    .map(|kpi| KpiView {
                        label: kpi.label.to_string(),
                        value: kpi.format_value(),
                        delta: None,
                        trend: "flat",
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            title: "Passing".to_string(),
            no_data: kpis.is_empty(),
            kpis,
        }
    }
}

/// Completed-pass table row
#[derive(Debug, Clone, PartialEq)]
pub struct PassRowView {
    pub week: i32,
    pub qtr: String,
    pub receiver: String,
    pub yrdln: String,
    pub pass_length: String,
    pub pass_location: String,
    pub yards_gained: String,
    pub yards_after_catch: String,
    pub air_yards: String,
    pub touchdown: bool,
}

impl From<&PassPlay> for PassRowView {
    fn from(play: &PassPlay) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        let yards = |value: Option<f64>| format_number(value, Precision::Whole);

        Self {
            week: play.week,
            qtr: play.qtr.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
            receiver: text(&play.receiver),
            yrdln: text(&play.yrdln),
            pass_length: text(&play.pass_length),
            pass_location: text(&play.pass_location),
            yards_gained: yards(Some(play.yards_gained)),
            yards_after_catch: yards(play.yards_after_catch),
            air_yards: yards(play.air_yards),
            touchdown: play.touchdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Comparator;
    use crate::metrics::RushingStats;

    fn rushing(rushes: i64, yards_per_rush: f64) -> Aggregate<RushingStats> {
        Aggregate::Value(RushingStats {
            rushes,
            yards_per_rush,
            yards: 1800,
            touchdowns: 14,
        })
    }

    #[test]
    fn test_group_deltas_formatted() {
        let comparison = Comparison {
            title: "Rushing",
            comparator: Comparator::League,
            subject: rushing(450, 4.6),
            baseline: rushing(430, 4.6),
        };

        let view = KpiGroupView::from_comparison(&comparison);
        assert!(!view.no_data);
        assert_eq!(view.kpis[0].value, "450");
        assert_eq!(view.kpis[0].delta.as_deref(), Some("+20 vs NFL"));
        assert_eq!(view.kpis[0].trend, "up");
        assert_eq!(view.kpis[1].delta.as_deref(), Some("0.0 vs NFL"));
        assert_eq!(view.kpis[1].trend, "flat");
    }

    #[test]
    fn test_group_without_subject() {
        let comparison: Comparison<RushingStats> = Comparison {
            title: "Rushing",
            comparator: Comparator::Team("DAL".to_string()),
            subject: Aggregate::NoData,
            baseline: rushing(400, 4.1),
        };
        assert!(KpiGroupView::from_comparison(&comparison).no_data);
    }
}
