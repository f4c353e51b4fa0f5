//! Value Extractor: one number per label for a metric.

use crate::aggregations::metric::reduce_metric;
use crate::aggregations::types::{Metric, PipelineResult, SplitItem};
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Values aligned with `result.labels`.
///
/// Without bucket levels the single value is the metric over `records`,
/// the caller's filtered input. Otherwise each level-0 item is reduced.
pub fn extract(result: &PipelineResult, records: &[Record], metric: &Metric) -> Vec<f64> {
    match result.levels.first() {
        None => vec![reduce_metric(records, metric)],
        Some(level) => level
            .items
            .iter()
            .map(|item| reduce_metric(&item.members, metric))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub metric: Metric,
    pub values: Vec<f64>,
}

pub fn extract_series(
    result: &PipelineResult,
    records: &[Record],
    metrics: &[Metric],
) -> Vec<MetricSeries> {
    metrics
        .iter()
        .map(|metric| MetricSeries {
            name: metric.display_name(),
            metric: metric.clone(),
            values: extract(result, records, metric),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionValue {
    pub key: String,
    pub value: f64,
}

/// Reduce each split partition's members to one number
pub fn extract_partitions(items: &[SplitItem], metric: &Metric) -> Vec<PartitionValue> {
    items
        .iter()
        .map(|item| PartitionValue {
            key: item.key.clone(),
            value: reduce_metric(&item.members, metric),
        })
        .collect()
}
