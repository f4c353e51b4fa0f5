//! Widget requests: bucket definitions plus metrics, as read from JSON or
//! TOML configuration.
//!
//! The engine accepts any request and degrades; [`DashboardRequest::validate`]
//! is the place to reject configurations a widget editor should not save.

use crate::aggregations::types::{BucketDefinition, BucketKind, Metric};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub buckets: Vec<BucketDefinition>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    /// Date field used to order records for KPI trends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_field: Option<String>,
}

impl DashboardRequest {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a request file, choosing the format by extension (`.toml`,
    /// anything else is JSON).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(Error::Validation("at least one metric required".to_string()));
        }
        for (i, metric) in self.metrics.iter().enumerate() {
            if metric.field.trim().is_empty() {
                return Err(Error::Validation(format!("metric {} has no field", i)));
            }
        }
        for (i, bucket) in self.buckets.iter().enumerate() {
            validate_bucket(i, bucket)?;
        }
        Ok(())
    }
}

fn validate_bucket(index: usize, bucket: &BucketDefinition) -> Result<()> {
    if bucket.field.trim().is_empty() {
        return Err(Error::Validation(format!("bucket {} has no field", index)));
    }
    if bucket.size == Some(0) {
        return Err(Error::Validation(format!(
            "bucket {} ({}) has size 0",
            index, bucket.field
        )));
    }
    match bucket.kind {
        BucketKind::Range if bucket.ranges.is_empty() => Err(Error::Validation(format!(
            "range bucket {} ({}) needs at least one range",
            index, bucket.field
        ))),
        BucketKind::Histogram => match bucket.interval {
            Some(i) if !i.is_finite() || i <= 0.0 => Err(Error::Validation(format!(
                "histogram bucket {} ({}) has invalid interval {}",
                index, bucket.field, i
            ))),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::types::{AggregationPolicy, DateInterval};

    fn valid() -> DashboardRequest {
        DashboardRequest {
            buckets: vec![BucketDefinition::terms("cat")],
            metrics: vec![Metric::new("v", AggregationPolicy::Sum)],
            trend_field: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_requires_metric() {
        let mut req = valid();
        req.metrics.clear();
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("at least one metric required"));
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let mut req = valid();
        req.buckets = vec![BucketDefinition::range("score", vec![])];
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_bad_interval_and_size() {
        let mut req = valid();
        req.buckets = vec![BucketDefinition::histogram("v", -1.0)];
        assert!(req.validate().is_err());

        req.buckets = vec![BucketDefinition::terms("cat").size(0)];
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let req = DashboardRequest::from_toml(
            r#"
trend_field = "created"

[[buckets]]
field = "created"
kind = "date_histogram"
date_interval = "month"

[[metrics]]
field = "amount"
aggregation = "avg"
label = "Average order"
"#,
        )
        .unwrap();

        assert_eq!(req.buckets[0].date_interval, Some(DateInterval::Month));
        assert_eq!(req.metrics[0].aggregation, AggregationPolicy::Average);
        assert_eq!(req.trend_field.as_deref(), Some("created"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            DashboardRequest::from_json("{not json"),
            Err(Error::Json(_))
        ));
    }
}
