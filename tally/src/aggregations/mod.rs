mod agg_trait;
mod builder;
pub mod bucket;
pub mod extract;
pub mod labels;
pub mod metric;
pub mod pipeline;
pub mod split;
pub mod types;

pub use agg_trait::{reduce_with, MetricAgg};
pub use bucket::group;
pub use extract::{extract, extract_partitions, extract_series, MetricSeries, PartitionValue};
pub use labels::{derive_labels, format_date_key};
pub use metric::{reduce, reduce_metric, reduce_stats};
pub use pipeline::{run, run_stage, Pipeline};
pub use split::route_splits;
pub use types::{
    AggregationPolicy, BucketDefinition, BucketItem, BucketKind, BucketLevel, DateInterval,
    EngineOptions, Metric, Partitions, PipelineResult, RangeEntry, SortOrder, SplitItem,
    SplitKind, StatsResult,
};
