//! Bucket Pipeline
//!
//! Applies bucket definitions left to right. Each stage groups the records
//! that the previous stage kept (the concatenation of its items' members),
//! then labels and partitions are derived from the finished levels.

use crate::aggregations::bucket::group;
use crate::aggregations::labels::derive_labels;
use crate::aggregations::split::route_splits;
use crate::aggregations::types::{
    BucketDefinition, BucketLevel, EngineOptions, PipelineResult,
};
use crate::record::Record;

/// One grouping stage
pub fn run_stage(
    records: &[Record],
    definition: &BucketDefinition,
    depth: usize,
    options: &EngineOptions,
) -> BucketLevel {
    BucketLevel {
        definition: definition.clone(),
        depth,
        items: group(records, definition, options),
        input_records: records.to_vec(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: EngineOptions,
}

impl Pipeline {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, records: &[Record], definitions: &[BucketDefinition]) -> PipelineResult {
        let span = tracing::debug_span!(
            "bucket_pipeline",
            records = records.len(),
            stages = definitions.len()
        );
        let _guard = span.enter();

        let (levels, surviving_records) = definitions.iter().enumerate().fold(
            (Vec::with_capacity(definitions.len()), records.to_vec()),
            |(mut levels, input), (depth, definition)| {
                let level = run_stage(&input, definition, depth, &self.options);
                let surviving = level.flatten();
                tracing::debug!(
                    depth,
                    kind = definition.kind.as_str(),
                    field = %definition.field,
                    input = input.len(),
                    buckets = level.items.len(),
                    surviving = surviving.len(),
                    "Bucket stage complete"
                );
                levels.push(level);
                (levels, surviving)
            },
        );

        let labels = derive_labels(&levels);
        let partitions = route_splits(&levels);

        PipelineResult {
            surviving_records,
            labels,
            levels,
            partitions,
        }
    }
}

/// Run `definitions` over `records` with default options
pub fn run(records: &[Record], definitions: &[BucketDefinition]) -> PipelineResult {
    Pipeline::default().run(records, definitions)
}
