use crate::aggregations::types::{BucketDefinition, BucketItem};
use crate::record::{format_number, Record};
use std::collections::HashMap;

/// Fixed-width numeric buckets keyed `"{start}-{start + interval}"`.
///
/// Values that are not numeric fall into the bucket containing `0`.
/// Buckets are ordered by ascending start.
pub fn aggregate_histogram(
    records: &[Record],
    definition: &BucketDefinition,
    default_size: usize,
) -> Vec<BucketItem> {
    let interval = definition.interval_or_default();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(f64, String, Vec<Record>)> = Vec::new();

    for record in records {
        let value = record.get(&definition.field).as_number().unwrap_or(0.0);
        let start = (value / interval).floor() * interval + 0.0;
        let key = format!(
            "{}-{}",
            format_number(start),
            format_number(start + interval)
        );
        match index.get(&key) {
            Some(&i) => groups[i].2.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((start, key, vec![record.clone()]));
            }
        }
    }

    let min_doc_count = definition.min_doc_count_or_default();
    groups.retain(|(_, _, members)| members.len() >= min_doc_count);
    groups.sort_by(|a, b| a.0.total_cmp(&b.0));
    groups.truncate(definition.size.unwrap_or(default_size));

    groups
        .into_iter()
        .map(|(_, key, members)| BucketItem::new(key, members))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::types::DEFAULT_HISTOGRAM_SIZE;

    fn values(vs: &[f64]) -> Vec<Record> {
        vs.iter().map(|v| Record::new().with("price", *v)).collect()
    }

    #[test]
    fn test_histogram_keys_and_order() {
        let records = values(&[120.0, 5.0, 49.9, 50.0, 101.0]);
        let def = BucketDefinition::histogram("price", 50.0);
        let buckets = aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE);

        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["0-50", "50-100", "100-150"]);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[2].count, 2);
    }

    #[test]
    fn test_histogram_negative_values() {
        let records = values(&[-0.5, -10.0, 3.0]);
        let def = BucketDefinition::histogram("price", 10.0);
        let keys: Vec<_> = aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(keys, vec!["-10-0", "0-10"]);
    }

    #[test]
    fn test_histogram_non_numeric_lands_at_zero() {
        let records = vec![
            Record::new().with("price", "free"),
            Record::new(),
            Record::new().with("price", 0.5),
        ];
        let def = BucketDefinition::histogram("price", 1.0);
        let buckets = aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "0-1");
        assert_eq!(buckets[0].count, 3);
    }

    #[test]
    fn test_histogram_size_and_min_doc_count() {
        let records = values(&[1.0, 1.5, 2.0, 3.0, 4.0, 4.2]);
        let def = BucketDefinition::histogram("price", 1.0).min_doc_count(2);
        let keys: Vec<_> = aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(keys, vec!["1-2", "4-5"]);

        let def = BucketDefinition::histogram("price", 1.0).size(2);
        assert_eq!(aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE).len(), 2);
    }

    #[test]
    fn test_histogram_fractional_interval() {
        let records = values(&[0.2, 2.6]);
        let def = BucketDefinition::histogram("price", 2.5);
        let keys: Vec<_> = aggregate_histogram(&records, &def, DEFAULT_HISTOGRAM_SIZE)
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(keys, vec!["0-2.5", "2.5-5"]);
    }
}
