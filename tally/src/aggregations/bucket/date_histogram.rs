use crate::aggregations::labels::format_date_key;
use crate::aggregations::types::{BucketDefinition, BucketItem, DateInterval};
use crate::record::Record;
use chrono::{DateTime, Datelike, Locale, Utc};
use std::collections::HashMap;

impl DateInterval {
    /// Bucket token for a timestamp.
    ///
    /// Tokens of one interval kind sort lexicographically in time order;
    /// week numbers are zero-padded for that reason.
    pub fn bucket_key(&self, dt: DateTime<Utc>) -> String {
        match self {
            DateInterval::Year => format!("{:04}", dt.year()),
            DateInterval::Month => dt.format("%Y-%m").to_string(),
            DateInterval::Week => {
                let week = dt.iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            DateInterval::Day => dt.format("%Y-%m-%d").to_string(),
            DateInterval::Hour => dt.format("%Y-%m-%dT%H:00:00Z").to_string(),
            DateInterval::Minute => dt.format("%Y-%m-%dT%H:%M:00Z").to_string(),
        }
    }
}

/// Calendar buckets ordered chronologically.
///
/// Records whose field does not parse as a date are left out of this
/// stage entirely.
pub fn aggregate_date_histogram(
    records: &[Record],
    definition: &BucketDefinition,
    default_size: usize,
    locale: Locale,
) -> Vec<BucketItem> {
    let interval = definition.date_interval.unwrap_or_default();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(dt) = record.get(&definition.field).as_datetime() else {
            dropped += 1;
            continue;
        };
        let key = interval.bucket_key(dt);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record.clone()]));
            }
        }
    }

    if dropped > 0 {
        tracing::debug!(
            field = %definition.field,
            dropped,
            "Skipped records without a parsable date"
        );
    }

    let min_doc_count = definition.min_doc_count_or_default();
    groups.retain(|(_, members)| members.len() >= min_doc_count);
    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups.truncate(definition.size.unwrap_or(default_size));

    groups
        .into_iter()
        .map(|(key, members)| {
            let label = format_date_key(&key, interval, locale);
            BucketItem::new(key, members).with_display_label(label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::types::DEFAULT_DATE_HISTOGRAM_SIZE;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn dated(dates: &[&str]) -> Vec<Record> {
        dates.iter().map(|d| Record::new().with("ts", *d)).collect()
    }

    fn run(records: &[Record], interval: DateInterval) -> Vec<BucketItem> {
        let def = BucketDefinition::date_histogram("ts", interval);
        aggregate_date_histogram(records, &def, DEFAULT_DATE_HISTOGRAM_SIZE, Locale::en_US)
    }

    #[test]
    fn test_bucket_keys() {
        let dt = at(2024, 3, 5, 14, 35);
        assert_eq!(DateInterval::Year.bucket_key(dt), "2024");
        assert_eq!(DateInterval::Month.bucket_key(dt), "2024-03");
        assert_eq!(DateInterval::Week.bucket_key(dt), "2024-W10");
        assert_eq!(DateInterval::Day.bucket_key(dt), "2024-03-05");
        assert_eq!(DateInterval::Hour.bucket_key(dt), "2024-03-05T14:00:00Z");
        assert_eq!(DateInterval::Minute.bucket_key(dt), "2024-03-05T14:35:00Z");
    }

    #[test]
    fn test_iso_week_crosses_year() {
        // 2021-01-01 is a Friday in ISO week 53 of 2020
        assert_eq!(DateInterval::Week.bucket_key(at(2021, 1, 1, 0, 0)), "2020-W53");
        // 2024-12-30 is a Monday in ISO week 1 of 2025
        assert_eq!(DateInterval::Week.bucket_key(at(2024, 12, 30, 0, 0)), "2025-W01");
    }

    #[test]
    fn test_month_buckets_ignore_day() {
        let records = dated(&["2024-01-03", "2024-01-28", "2024-02-14", "2024-01-15T10:00:00Z"]);
        let buckets = run(&records, DateInterval::Month);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "2024-01");
        assert_eq!(buckets[0].count, 3);
        assert_eq!(buckets[0].display_label.as_deref(), Some("January 2024"));
        assert_eq!(buckets[1].display_label.as_deref(), Some("February 2024"));
    }

    #[test]
    fn test_buckets_sorted_chronologically() {
        let records = dated(&["2024-03-03", "2024-01-01", "2024-02-02"]);
        let buckets = run(&records, DateInterval::Day);
        assert!(buckets[0].key < buckets[1].key);
        assert!(buckets[1].key < buckets[2].key);
    }

    #[test]
    fn test_week_keys_sort_across_padding() {
        let records = dated(&["2024-03-05", "2024-01-10"]);
        let buckets = run(&records, DateInterval::Week);
        assert_eq!(buckets[0].key, "2024-W02");
        assert_eq!(buckets[1].key, "2024-W10");
        assert_eq!(buckets[0].display_label.as_deref(), Some("Week 2, 2024"));
    }

    #[test]
    fn test_unparsable_dates_dropped() {
        let mut records = dated(&["2024-01-01", "yesterday", ""]);
        records.push(Record::new());
        let buckets = run(&records, DateInterval::Day);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn test_hour_buckets() {
        let records = dated(&[
            "2024-03-05T14:10:00Z",
            "2024-03-05T14:50:00Z",
            "2024-03-05T15:05:00Z",
        ]);
        let buckets = run(&records, DateInterval::Hour);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn test_size_truncates_oldest_first_kept() {
        let records = dated(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        let def = BucketDefinition::date_histogram("ts", DateInterval::Day).size(2);
        let buckets =
            aggregate_date_histogram(&records, &def, DEFAULT_DATE_HISTOGRAM_SIZE, Locale::en_US);
        let keys: Vec<_> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-02"]);
    }
}
