use crate::aggregations::agg_trait::MetricAgg;
use crate::record::Value;

/// Counts rows, not valid values
#[derive(Debug, Clone, Default)]
pub struct CountAgg(u64);

impl CountAgg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricAgg for CountAgg {
    fn collect(&mut self, _: &Value) {
        self.0 += 1;
    }

    fn finish(&self) -> f64 {
        self.0 as f64
    }
}
