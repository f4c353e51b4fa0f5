use crate::aggregations::types::{BucketDefinition, BucketItem, RangeEntry};
use crate::record::{format_number, Record};

/// Key of a range bucket: its label, else `"{from}-{to}"` with `*` for an
/// open bound.
pub fn range_key(range: &RangeEntry) -> String {
    if let Some(label) = &range.label {
        return label.clone();
    }
    let bound = |b: Option<f64>| b.map(format_number).unwrap_or_else(|| "*".to_string());
    format!("{}-{}", bound(range.from), bound(range.to))
}

/// Whether `value` falls in `[from, to)`. A fully open range accepts every
/// record, even one without a numeric value.
fn contains(range: &RangeEntry, value: Option<f64>) -> bool {
    if range.from.is_none() && range.to.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    range.from.map_or(true, |from| v >= from) && range.to.map_or(true, |to| v < to)
}

/// One bucket per declared range, in declaration order. Ranges are
/// evaluated independently, so overlapping ranges share records.
pub fn aggregate_range(records: &[Record], definition: &BucketDefinition) -> Vec<BucketItem> {
    let min_doc_count = definition.min_doc_count_or_default();

    definition
        .ranges
        .iter()
        .map(|range| {
            let members: Vec<Record> = records
                .iter()
                .filter(|r| contains(range, r.get(&definition.field).as_number()))
                .cloned()
                .collect();
            BucketItem::new(range_key(range), members)
        })
        .filter(|b| b.count >= min_doc_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(vs: &[f64]) -> Vec<Record> {
        vs.iter().map(|v| Record::new().with("score", *v)).collect()
    }

    #[test]
    fn test_labeled_ranges_keep_declaration_order() {
        let def = BucketDefinition::range(
            "score",
            vec![
                RangeEntry::labeled(Some(100.0), Some(200.0), "High"),
                RangeEntry::labeled(Some(0.0), Some(100.0), "Low"),
            ],
        );
        let buckets = aggregate_range(&scores(&[50.0, 150.0, 175.0]), &def);
        assert_eq!(buckets[0].key, "High");
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].key, "Low");
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_half_open_bounds() {
        let def = BucketDefinition::range(
            "score",
            vec![
                RangeEntry::new(None, Some(10.0)),
                RangeEntry::new(Some(10.0), None),
            ],
        );
        let buckets = aggregate_range(&scores(&[9.99, 10.0]), &def);
        assert_eq!(buckets[0].key, "*-10");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].key, "10-*");
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_overlapping_ranges() {
        let def = BucketDefinition::range(
            "score",
            vec![
                RangeEntry::new(Some(0.0), Some(10.0)),
                RangeEntry::new(Some(5.0), Some(15.0)),
            ],
        );
        let buckets = aggregate_range(&scores(&[7.0]), &def);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().all(|b| b.count == 1));
    }

    #[test]
    fn test_empty_ranges_dropped_unless_min_doc_count_zero() {
        let ranges = vec![
            RangeEntry::new(Some(0.0), Some(10.0)),
            RangeEntry::new(Some(100.0), Some(200.0)),
        ];
        let def = BucketDefinition::range("score", ranges.clone());
        assert_eq!(aggregate_range(&scores(&[1.0]), &def).len(), 1);

        let def = BucketDefinition::range("score", ranges).min_doc_count(0);
        assert_eq!(aggregate_range(&scores(&[1.0]), &def).len(), 2);
    }

    #[test]
    fn test_non_numeric_values_excluded_from_bounded_ranges() {
        let records = vec![Record::new().with("score", "n/a"), Record::new()];
        let def = BucketDefinition::range(
            "score",
            vec![RangeEntry::new(Some(0.0), None), RangeEntry::new(None, None)],
        );
        let buckets = aggregate_range(&records, &def);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "*-*");
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_no_ranges() {
        let def = BucketDefinition::range("score", vec![]);
        assert!(aggregate_range(&scores(&[1.0]), &def).is_empty());
    }
}
