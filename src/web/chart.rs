//! Grouped bar chart rendered as plain HTML/CSS bars
//!
//! Bars are scaled against the largest absolute value so negative weeks
//! (a run game that lost yards) still draw, below the axis.

use crate::metrics::WeeklyYards;
use crate::teams::Team;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
    /// Height as a percentage of the tallest bar
    pub height_pct: f64,
    pub negative: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub groups: Vec<BarGroup>,
    pub legend: Vec<(String, String)>,
}

const SERIES: [(&str, &str); 2] = [("run", "Run"), ("pass", "Pass")];

impl BarChart {
    /// Weekly run and pass yards in the team's colours
    pub fn weekly_yards(team: &Team, weekly: &[WeeklyYards]) -> Self {
        let colors = [team.color, team.color2];
        let multi_season = weekly
            .first()
            .map(|first| weekly.iter().any(|w| w.season != first.season))
            .unwrap_or(false);
        let max = weekly
            .iter()
            .map(|w| w.yards.unsigned_abs())
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut groups: Vec<BarGroup> = Vec::new();
        let mut current: Option<(i32, i32)> = None;
        for row in weekly {
            if current != Some((row.season, row.week)) {
                current = Some((row.season, row.week));
                let label = if multi_season {
                    format!("{} W{}", row.season, row.week)
                } else {
                    format!("W{}", row.week)
                };
                groups.push(BarGroup { label, bars: Vec::new() });
            }

            let Some(series) = SERIES.iter().position(|(key, _)| *key == row.play_type) else {
                continue;
            };
            if let Some(group) = groups.last_mut() {
                group.bars.push(Bar {
                    label: SERIES[series].1.to_string(),
                    value: row.yards,
                    height_pct: (row.yards.unsigned_abs() as f64 / max * 1000.0).round() / 10.0,
                    negative: row.yards < 0,
                    color: colors[series].to_string(),
                });
            }
        }

        let legend = SERIES
            .iter()
            .zip(colors)
            .map(|((_, label), color)| (label.to_string(), color.to_string()))
            .collect();

        Self {
            title: "Yards Gained by Week".to_string(),
            groups,
            legend,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::TeamRegistry;

    fn week(week: i32, play_type: &str, yards: i64) -> WeeklyYards {
        WeeklyYards {
            season: 2021,
            week,
            play_type: play_type.to_string(),
            yards,
        }
    }

    #[test]
    fn test_bars_grouped_by_week_and_scaled() {
        let registry = TeamRegistry::new();
        let team = registry.resolve("GB").unwrap();
        let weekly = vec![
            week(1, "pass", 300),
            week(1, "run", 150),
            week(2, "pass", 200),
            week(2, "run", -30),
        ];

        let chart = BarChart::weekly_yards(team, &weekly);
        assert_eq!(chart.groups.len(), 2);
        assert_eq!(chart.groups[0].label, "W1");
        assert_eq!(chart.groups[0].bars[0].height_pct, 100.0);
        assert_eq!(chart.groups[0].bars[1].height_pct, 50.0);
        assert!(chart.groups[1].bars[1].negative);
        assert_eq!(chart.groups[1].bars[1].height_pct, 10.0);
        assert_eq!(chart.legend[0], ("Run".to_string(), team.color.to_string()));
    }

    #[test]
    fn test_empty_chart() {
        let registry = TeamRegistry::new();
        let chart = BarChart::weekly_yards(registry.resolve("NE").unwrap(), &[]);
        assert!(chart.is_empty());
    }
}
