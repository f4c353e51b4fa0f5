use crate::aggregations::types::{
    BucketDefinition, BucketKind, DateInterval, RangeEntry, SortOrder, SplitKind,
};

impl BucketDefinition {
    fn with_kind(field: impl Into<String>, kind: BucketKind) -> Self {
        BucketDefinition {
            field: field.into(),
            kind,
            order: SortOrder::Desc,
            size: None,
            min_doc_count: None,
            interval: None,
            date_interval: None,
            ranges: Vec::new(),
            split_kind: None,
        }
    }

    pub fn terms(field: impl Into<String>) -> Self {
        Self::with_kind(field, BucketKind::Terms)
    }

    pub fn histogram(field: impl Into<String>, interval: f64) -> Self {
        let mut def = Self::with_kind(field, BucketKind::Histogram);
        def.interval = Some(interval);
        def
    }

    pub fn date_histogram(field: impl Into<String>, interval: DateInterval) -> Self {
        let mut def = Self::with_kind(field, BucketKind::DateHistogram);
        def.date_interval = Some(interval);
        def
    }

    pub fn range(field: impl Into<String>, ranges: Vec<RangeEntry>) -> Self {
        let mut def = Self::with_kind(field, BucketKind::Range);
        def.ranges = ranges;
        def
    }

    pub fn split(field: impl Into<String>, split: SplitKind) -> Self {
        Self::with_kind(field, BucketKind::Split(split))
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn min_doc_count(mut self, min_doc_count: usize) -> Self {
        self.min_doc_count = Some(min_doc_count);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Route this level's groups into a partition regardless of its kind
    pub fn split_into(mut self, split: SplitKind) -> Self {
        self.split_kind = Some(split);
        self
    }
}

impl RangeEntry {
    pub fn new(from: Option<f64>, to: Option<f64>) -> Self {
        RangeEntry {
            from,
            to,
            label: None,
        }
    }

    pub fn labeled(from: Option<f64>, to: Option<f64>, label: impl Into<String>) -> Self {
        RangeEntry {
            from,
            to,
            label: Some(label.into()),
        }
    }
}
