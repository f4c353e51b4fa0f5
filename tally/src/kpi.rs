//! KPI summaries: a headline number, summary statistics of the metric field
//! and the trend between the two most recent records.

use crate::aggregations::metric::{reduce_metric, reduce_stats};
use crate::aggregations::types::{Metric, StatsResult};
use crate::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    /// `None` when `previous` is zero
    pub percent_change: Option<f64>,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn between(previous: f64, current: f64) -> Self {
        let delta = current - previous;
        let direction = if delta > 0.0 {
            TrendDirection::Up
        } else if delta < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };
        let percent_change = (previous != 0.0).then(|| delta / previous.abs() * 100.0);

        Trend {
            previous,
            current,
            delta,
            percent_change,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub value: f64,
    pub stats: StatsResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Trend of `field` across the last two records in chronological order.
///
/// With a `date_field`, records without a parsable date are ignored and the
/// rest are ordered by date (ties keep input order). Without one, input
/// order is taken as chronological.
pub fn trend(records: &[Record], field: &str, date_field: Option<&str>) -> Option<Trend> {
    let ordered: Vec<&Record> = match date_field {
        Some(date_field) => {
            let mut dated: Vec<_> = records
                .iter()
                .filter_map(|r| r.get(date_field).as_datetime().map(|dt| (dt, r)))
                .collect();
            dated.sort_by_key(|(dt, _)| *dt);
            dated.into_iter().map(|(_, r)| r).collect()
        }
        None => records.iter().collect(),
    };

    match ordered.as_slice() {
        [.., previous, current] => {
            let value = |r: &Record| r.get(field).as_number().unwrap_or(0.0);
            Some(Trend::between(value(*previous), value(*current)))
        }
        _ => None,
    }
}

pub fn summarize(records: &[Record], metric: &Metric, date_field: Option<&str>) -> KpiSummary {
    KpiSummary {
        value: reduce_metric(records, metric),
        stats: reduce_stats(records, &metric.field),
        trend: trend(records, &metric.field, date_field),
    }
}
