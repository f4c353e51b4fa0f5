//! Bucketizer: partition records into ordered groups for one definition.
//!
//! Each kind filters by `min_doc_count`, orders and truncates to `size`
//! itself. Split kinds group like terms; routing them into partitions is
//! the split router's job.

mod date_histogram;
mod histogram;
mod range;
mod terms;

pub use date_histogram::aggregate_date_histogram;
pub use histogram::aggregate_histogram;
pub use range::{aggregate_range, range_key};
pub use terms::{aggregate_terms, collect_terms};

use crate::aggregations::types::{BucketDefinition, BucketItem, BucketKind, EngineOptions};
use crate::record::Record;

pub fn group(
    records: &[Record],
    definition: &BucketDefinition,
    options: &EngineOptions,
) -> Vec<BucketItem> {
    match definition.kind {
        BucketKind::Terms | BucketKind::Split(_) => {
            aggregate_terms(records, definition, options.terms_size)
        }
        BucketKind::Histogram => aggregate_histogram(records, definition, options.histogram_size),
        BucketKind::DateHistogram => aggregate_date_histogram(
            records,
            definition,
            options.date_histogram_size,
            options.locale,
        ),
        BucketKind::Range => aggregate_range(records, definition),
    }
}
