use crate::record::Record;
use chrono::Locale;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TERMS_SIZE: usize = 10;
pub const DEFAULT_HISTOGRAM_SIZE: usize = 50;
pub const DEFAULT_DATE_HISTOGRAM_SIZE: usize = 100;
pub const DEFAULT_MIN_DOC_COUNT: usize = 1;
pub const DEFAULT_HISTOGRAM_INTERVAL: f64 = 1.0;

/// Label used when a pipeline has no bucket levels
pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => SortOrder::Asc,
            "desc" | "descending" => SortOrder::Desc,
            _ => {
                tracing::warn!("Unknown sort order '{}', using desc", s);
                SortOrder::Desc
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl From<String> for SortOrder {
    fn from(s: String) -> Self {
        SortOrder::parse(&s)
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.as_str().to_string()
    }
}

/// Calendar interval for date histograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateInterval {
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl DateInterval {
    pub fn parse_interval(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minute" => Some(DateInterval::Minute),
            "hour" => Some(DateInterval::Hour),
            "day" => Some(DateInterval::Day),
            "week" => Some(DateInterval::Week),
            "month" => Some(DateInterval::Month),
            "year" => Some(DateInterval::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateInterval::Minute => "minute",
            DateInterval::Hour => "hour",
            DateInterval::Day => "day",
            DateInterval::Week => "week",
            DateInterval::Month => "month",
            DateInterval::Year => "year",
        }
    }
}

impl From<String> for DateInterval {
    fn from(s: String) -> Self {
        DateInterval::parse_interval(&s).unwrap_or_else(|| {
            tracing::warn!("Unknown date interval '{}', using day", s);
            DateInterval::Day
        })
    }
}

impl From<DateInterval> for String {
    fn from(interval: DateInterval) -> Self {
        interval.as_str().to_string()
    }
}

/// Which partition collection a split level feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SplitKind {
    Series,
    Rows,
    Chart,
}

impl SplitKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "series" => Some(SplitKind::Series),
            "rows" => Some(SplitKind::Rows),
            "chart" => Some(SplitKind::Chart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitKind::Series => "series",
            SplitKind::Rows => "rows",
            SplitKind::Chart => "chart",
        }
    }
}

/// Grouping semantic of one bucket stage.
///
/// Serialized as a string tag (`terms`, `histogram`, `date_histogram`,
/// `range`, `split_series`, `split_rows`, `split_chart`). Unknown tags are
/// read as `Terms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BucketKind {
    #[default]
    Terms,
    Histogram,
    DateHistogram,
    Range,
    Split(SplitKind),
}

impl BucketKind {
    pub fn parse(s: &str) -> Self {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "terms" => BucketKind::Terms,
            "histogram" => BucketKind::Histogram,
            "date_histogram" => BucketKind::DateHistogram,
            "range" => BucketKind::Range,
            _ => match lower.strip_prefix("split_").and_then(SplitKind::parse) {
                Some(split) => BucketKind::Split(split),
                None => {
                    tracing::warn!("Unknown bucket kind '{}', grouping as terms", s);
                    BucketKind::Terms
                }
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKind::Terms => "terms",
            BucketKind::Histogram => "histogram",
            BucketKind::DateHistogram => "date_histogram",
            BucketKind::Range => "range",
            BucketKind::Split(SplitKind::Series) => "split_series",
            BucketKind::Split(SplitKind::Rows) => "split_rows",
            BucketKind::Split(SplitKind::Chart) => "split_chart",
        }
    }
}

impl From<SplitKind> for String {
    fn from(split: SplitKind) -> Self {
        split.as_str().to_string()
    }
}

/// Reads an optional split tag; unknown tags mean "no split".
fn deserialize_split_kind<'de, D>(deserializer: D) -> Result<Option<SplitKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.and_then(|s| {
        let split = SplitKind::parse(&s);
        if split.is_none() {
            tracing::warn!("Unknown split kind '{}', ignoring", s);
        }
        split
    }))
}

impl From<String> for BucketKind {
    fn from(s: String) -> Self {
        BucketKind::parse(&s)
    }
}

impl From<BucketKind> for String {
    fn from(kind: BucketKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Half-open numeric interval `[from, to)`; a missing bound is unbounded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "key")]
    pub label: Option<String>,
}

/// One grouping stage of a bucket pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketDefinition {
    pub field: String,
    #[serde(default, alias = "type")]
    pub kind: BucketKind,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "minDocCount")]
    pub min_doc_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "dateInterval")]
    pub date_interval: Option<DateInterval>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeEntry>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "splitKind",
        deserialize_with = "deserialize_split_kind"
    )]
    pub split_kind: Option<SplitKind>,
}

impl BucketDefinition {
    /// Partition this level feeds, if any. An explicit `split_kind` wins
    /// over the one implied by a `split_*` kind.
    pub fn effective_split(&self) -> Option<SplitKind> {
        match (self.split_kind, self.kind) {
            (Some(split), _) => Some(split),
            (None, BucketKind::Split(split)) => Some(split),
            (None, _) => None,
        }
    }

    pub fn min_doc_count_or_default(&self) -> usize {
        self.min_doc_count.unwrap_or(DEFAULT_MIN_DOC_COUNT)
    }

    /// Histogram width; non-positive or non-finite widths fall back to 1.
    pub fn interval_or_default(&self) -> f64 {
        match self.interval {
            Some(i) if i.is_finite() && i > 0.0 => i,
            _ => DEFAULT_HISTOGRAM_INTERVAL,
        }
    }
}

/// One realized group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketItem {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    pub count: usize,
    pub members: Vec<Record>,
}

impl BucketItem {
    pub fn new(key: impl Into<String>, members: Vec<Record>) -> Self {
        Self {
            key: key.into(),
            display_label: None,
            count: members.len(),
            members,
        }
    }

    pub fn with_display_label(mut self, label: Option<String>) -> Self {
        self.display_label = label;
        self
    }

    pub fn label(&self) -> &str {
        self.display_label.as_deref().unwrap_or(&self.key)
    }
}

/// Result of applying one definition to the records surviving earlier stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketLevel {
    pub definition: BucketDefinition,
    pub depth: usize,
    pub items: Vec<BucketItem>,
    pub input_records: Vec<Record>,
}

impl BucketLevel {
    /// Members of every item, concatenated in item order
    pub fn flatten(&self) -> Vec<Record> {
        self.items
            .iter()
            .flat_map(|item| item.members.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitItem {
    pub key: String,
    pub members: Vec<Record>,
    pub source_definition: BucketDefinition,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Partitions {
    pub series_partitions: Vec<SplitItem>,
    pub row_partitions: Vec<SplitItem>,
    pub chart_partitions: Vec<SplitItem>,
}

impl Partitions {
    pub fn get(&self, kind: SplitKind) -> &[SplitItem] {
        match kind {
            SplitKind::Series => &self.series_partitions,
            SplitKind::Rows => &self.row_partitions,
            SplitKind::Chart => &self.chart_partitions,
        }
    }

    pub fn get_mut(&mut self, kind: SplitKind) -> &mut Vec<SplitItem> {
        match kind {
            SplitKind::Series => &mut self.series_partitions,
            SplitKind::Rows => &mut self.row_partitions,
            SplitKind::Chart => &mut self.chart_partitions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series_partitions.is_empty()
            && self.row_partitions.is_empty()
            && self.chart_partitions.is_empty()
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub surviving_records: Vec<Record>,
    pub labels: Vec<String>,
    pub levels: Vec<BucketLevel>,
    pub partitions: Partitions,
}

/// Reduction rule applied to a group of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AggregationPolicy {
    Sum,
    Average,
    Min,
    Max,
    Count,
    /// Single record's value, or the first non-null value among many
    Representative,
    /// First record's value, whatever it holds
    #[default]
    First,
}

impl AggregationPolicy {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sum" => AggregationPolicy::Sum,
            "average" | "avg" | "mean" => AggregationPolicy::Average,
            "min" => AggregationPolicy::Min,
            "max" => AggregationPolicy::Max,
            "count" => AggregationPolicy::Count,
            "none" | "representative" => AggregationPolicy::Representative,
            "first" => AggregationPolicy::First,
            _ => {
                tracing::warn!("Unknown aggregation '{}', using first value", s);
                AggregationPolicy::First
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationPolicy::Sum => "sum",
            AggregationPolicy::Average => "average",
            AggregationPolicy::Min => "min",
            AggregationPolicy::Max => "max",
            AggregationPolicy::Count => "count",
            AggregationPolicy::Representative => "none",
            AggregationPolicy::First => "first",
        }
    }
}

impl From<String> for AggregationPolicy {
    fn from(s: String) -> Self {
        AggregationPolicy::parse(&s)
    }
}

impl From<AggregationPolicy> for String {
    fn from(policy: AggregationPolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// Field plus reduction rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub field: String,
    #[serde(default)]
    pub aggregation: AggregationPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Metric {
    pub fn new(field: impl Into<String>, aggregation: AggregationPolicy) -> Self {
        Self {
            field: field.into(),
            aggregation,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Series name shown next to the metric's values
    pub fn display_name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("{} of {}", self.aggregation.as_str(), self.field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsResult {
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: Option<f64>,
    pub avg: Option<f64>,
}

/// Knobs shared by every stage of a run
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub locale: Locale,
    pub terms_size: usize,
    pub histogram_size: usize,
    pub date_histogram_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            terms_size: DEFAULT_TERMS_SIZE,
            histogram_size: DEFAULT_HISTOGRAM_SIZE,
            date_histogram_size: DEFAULT_DATE_HISTOGRAM_SIZE,
        }
    }
}
