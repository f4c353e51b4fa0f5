//! Label Deriver
//!
//! Labels come from the first bucket level only: one per item, in item
//! order, using the item's display label when it has one.

use crate::aggregations::types::{BucketLevel, DateInterval, TOTAL_LABEL};
use chrono::{DateTime, Locale, NaiveDate, Utc};

/// Ordered chart labels for a pipeline's levels
pub fn derive_labels(levels: &[BucketLevel]) -> Vec<String> {
    match levels.first() {
        Some(level) => level
            .items
            .iter()
            .map(|item| item.label().to_string())
            .collect(),
        None => vec![TOTAL_LABEL.to_string()],
    }
}

/// Human label for a date bucket token produced by
/// [`DateInterval::bucket_key`]. Returns `None` if the token does not parse.
pub fn format_date_key(key: &str, interval: DateInterval, locale: Locale) -> Option<String> {
    match interval {
        DateInterval::Year => Some(key.to_string()),
        DateInterval::Month => {
            let dt = parse_day(&format!("{key}-01"))?;
            Some(dt.format_localized("%B %Y", locale).to_string())
        }
        DateInterval::Week => {
            let (year, week) = key.split_once("-W")?;
            let year: i32 = year.parse().ok()?;
            let week: u32 = week.parse().ok()?;
            Some(format!("Week {week}, {year}"))
        }
        DateInterval::Day => {
            let dt = parse_day(key)?;
            Some(dt.format_localized("%B %-d, %Y", locale).to_string())
        }
        DateInterval::Hour => {
            let dt = DateTime::parse_from_rfc3339(key).ok()?.with_timezone(&Utc);
            Some(dt.format_localized("%b %-d, %Y %H:00", locale).to_string())
        }
        DateInterval::Minute => {
            let dt = DateTime::parse_from_rfc3339(key).ok()?.with_timezone(&Utc);
            Some(dt.format_localized("%b %-d, %Y %H:%M", locale).to_string())
        }
    }
}

fn parse_day(s: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::types::{BucketDefinition, BucketItem};
    use crate::record::Record;

    #[test]
    fn test_no_levels_is_total() {
        assert_eq!(derive_labels(&[]), vec!["Total".to_string()]);
    }

    #[test]
    fn test_labels_prefer_display_label() {
        let level = BucketLevel {
            definition: BucketDefinition::terms("cat"),
            depth: 0,
            items: vec![
                BucketItem::new("2024-01", vec![Record::new()])
                    .with_display_label(Some("January 2024".into())),
                BucketItem::new("B", vec![Record::new()]),
            ],
            input_records: vec![Record::new(), Record::new()],
        };
        assert_eq!(derive_labels(&[level]), vec!["January 2024", "B"]);
    }

    #[test]
    fn test_format_date_keys() {
        let en = Locale::en_US;
        assert_eq!(format_date_key("2024", DateInterval::Year, en).as_deref(), Some("2024"));
        assert_eq!(
            format_date_key("2024-03", DateInterval::Month, en).as_deref(),
            Some("March 2024")
        );
        assert_eq!(
            format_date_key("2024-W09", DateInterval::Week, en).as_deref(),
            Some("Week 9, 2024")
        );
        assert_eq!(
            format_date_key("2024-03-05", DateInterval::Day, en).as_deref(),
            Some("March 5, 2024")
        );
        assert_eq!(
            format_date_key("2024-03-05T14:00:00Z", DateInterval::Hour, en).as_deref(),
            Some("Mar 5, 2024 14:00")
        );
        assert_eq!(
            format_date_key("2024-03-05T14:35:00Z", DateInterval::Minute, en).as_deref(),
            Some("Mar 5, 2024 14:35")
        );
    }

    #[test]
    fn test_localized_month() {
        assert_eq!(
            format_date_key("2024-03", DateInterval::Month, Locale::de_DE).as_deref(),
            Some("März 2024")
        );
    }

    #[test]
    fn test_garbage_key() {
        assert!(format_date_key("soon", DateInterval::Month, Locale::en_US).is_none());
        assert!(format_date_key("2024-Wxx", DateInterval::Week, Locale::en_US).is_none());
    }
}
