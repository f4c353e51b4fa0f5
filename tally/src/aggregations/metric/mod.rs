//! Aggregator: reduce a group of records to one number.
//!
//! Total by construction. Empty input, missing fields and non-numeric
//! values all degrade to `0.0`, never to NaN or an error.

mod avg;
mod count;
mod minmax;
mod representative;
mod sum;

pub use avg::AvgAgg;
pub use count::CountAgg;
pub use minmax::{MinMaxAgg, MinMaxMode};
pub use representative::{FirstAgg, RepresentativeAgg};
pub use sum::SumAgg;

use crate::aggregations::agg_trait::reduce_with;
use crate::aggregations::types::{AggregationPolicy, Metric, StatsResult};
use crate::record::Record;

/// Reduce `field` over `records` under `policy`
pub fn reduce(records: &[Record], field: &str, policy: AggregationPolicy) -> f64 {
    match policy {
        AggregationPolicy::Sum => reduce_with(SumAgg::new(), records, field),
        AggregationPolicy::Average => reduce_with(AvgAgg::new(), records, field),
        AggregationPolicy::Min => reduce_with(MinMaxAgg::min(), records, field),
        AggregationPolicy::Max => reduce_with(MinMaxAgg::max(), records, field),
        AggregationPolicy::Count => reduce_with(CountAgg::new(), records, field),
        AggregationPolicy::Representative => reduce_with(RepresentativeAgg::new(), records, field),
        AggregationPolicy::First => reduce_with(FirstAgg::new(), records, field),
    }
}

pub fn reduce_metric(records: &[Record], metric: &Metric) -> f64 {
    reduce(records, &metric.field, metric.aggregation)
}

/// Summary statistics over the valid numeric values of `field`.
///
/// `count` counts rows; the other figures are `None` when no row holds a
/// valid number.
pub fn reduce_stats(records: &[Record], field: &str) -> StatsResult {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.get(field).as_number())
        .collect();

    if values.is_empty() {
        return StatsResult {
            count: records.len() as u64,
            ..Default::default()
        };
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    StatsResult {
        count: records.len() as u64,
        min: Some(min),
        max: Some(max),
        sum: Some(sum),
        avg: Some(sum / values.len() as f64),
    }
}
