//! Split Router
//!
//! Republishes the groups of split-flagged levels into the series, rows
//! and chart partitions. Several split levels feed the same collections,
//! in level order then item order.

use crate::aggregations::types::{BucketLevel, Partitions, SplitItem};

pub fn route_splits(levels: &[BucketLevel]) -> Partitions {
    levels.iter().fold(Partitions::default(), |mut partitions, level| {
        if let Some(kind) = level.definition.effective_split() {
            let target = partitions.get_mut(kind);
            target.extend(level.items.iter().map(|item| SplitItem {
                key: item.key.clone(),
                members: item.members.clone(),
                source_definition: level.definition.clone(),
            }));
        }
        partitions
    })
}
