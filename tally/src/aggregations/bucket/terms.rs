use crate::aggregations::types::{BucketDefinition, BucketItem, SortOrder};
use crate::record::Record;
use std::collections::HashMap;

/// Group records by the string form of `field`, keeping first-seen order
pub fn collect_terms(records: &[Record], field: &str) -> Vec<BucketItem> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();

    for record in records {
        let key = record.get(field).to_key_string();
        match index.get(&key) {
            Some(&i) => groups[i].1.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record.clone()]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| BucketItem::new(key, members))
        .collect()
}

/// Terms buckets ordered by group cardinality.
///
/// `order` applies to the number of members, not to the key. The sort is
/// stable so equal-sized groups keep first-seen order.
pub fn aggregate_terms(
    records: &[Record],
    definition: &BucketDefinition,
    default_size: usize,
) -> Vec<BucketItem> {
    let min_doc_count = definition.min_doc_count_or_default();
    let mut buckets: Vec<BucketItem> = collect_terms(records, &definition.field)
        .into_iter()
        .filter(|b| b.count >= min_doc_count)
        .collect();

    match definition.order {
        SortOrder::Desc => buckets.sort_by(|a, b| b.count.cmp(&a.count)),
        SortOrder::Asc => buckets.sort_by(|a, b| a.count.cmp(&b.count)),
    }
    buckets.truncate(definition.size.unwrap_or(default_size));
    buckets
}
