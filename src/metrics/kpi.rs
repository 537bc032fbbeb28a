//! Labelled KPI lists for the presentation layer
//!
//! Every metric bundle lists its values in a fixed order. Pairing a subject
//! list with a baseline list by position gives the "vs NFL" / "vs team" deltas.

use serde::Serialize;

use crate::utils::round_rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Whole,
    Tenths,
}

/// One labelled metric value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: Option<f64>,
    pub precision: Precision,
    /// Deltas render green when negative (points allowed, interceptions)
    pub lower_is_better: bool,
}

impl Kpi {
    pub fn whole(label: &'static str, value: i64) -> Self {
        Self {
            label,
            value: Some(value as f64),
            precision: Precision::Whole,
            lower_is_better: false,
        }
    }

    pub fn tenths(label: &'static str, value: f64) -> Self {
        Self::optional_tenths(label, Some(value))
    }

    pub fn optional_tenths(label: &'static str, value: Option<f64>) -> Self {
        Self {
            label,
            value,
            precision: Precision::Tenths,
            lower_is_better: false,
        }
    }

    pub fn inverse(mut self) -> Self {
        self.lower_is_better = true;
        self
    }

    pub fn format_value(&self) -> String {
        format_number(self.value, self.precision)
    }
}

/// Format a metric value at its display precision
pub fn format_number(value: Option<f64>, precision: Precision) -> String {
    match (value, precision) {
        (None, _) => "n/a".to_string(),
        (Some(v), Precision::Whole) => format!("{}", v.round() as i64),
        (Some(v), Precision::Tenths) => format!("{:.1}", v),
    }
}

/// Metric bundles that can be listed as KPIs
pub trait KpiSource {
    fn kpis(&self) -> Vec<Kpi>;
}

/// Subject KPI with its baseline and difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDelta {
    pub kpi: Kpi,
    pub baseline: Option<f64>,
    pub delta: Option<f64>,
}

impl KpiDelta {
    /// Whether the delta moves in the good direction for this metric
    pub fn is_improvement(&self) -> Option<bool> {
        self.delta.filter(|d| *d != 0.0).map(|d| {
            if self.kpi.lower_is_better {
                d < 0.0
            } else {
                d > 0.0
            }
        })
    }
}

/// Pair subject and baseline KPIs by position
pub fn pair_kpis(subject: &[Kpi], baseline: Option<&[Kpi]>) -> Vec<KpiDelta> {
    subject
        .iter()
        .enumerate()
        .map(|(idx, kpi)| {
            let base = baseline
                .and_then(|b| b.get(idx))
                .and_then(|b| b.value);
            let delta = match (kpi.value, base) {
                (Some(v), Some(b)) => Some(match kpi.precision {
                    Precision::Whole => (v - b).round(),
                    Precision::Tenths => round_rate(v - b),
                }),
                _ => None,
            };
            KpiDelta {
                kpi: kpi.clone(),
                baseline: base,
                delta,
            }
        })
        .collect()
}
