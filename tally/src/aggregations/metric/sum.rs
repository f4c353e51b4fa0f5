use crate::aggregations::agg_trait::MetricAgg;
use crate::record::Value;

#[derive(Debug, Clone, Default)]
pub struct SumAgg {
    sum: f64,
}

impl SumAgg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricAgg for SumAgg {
    fn collect(&mut self, value: &Value) {
        if let Some(v) = value.as_number() {
            self.sum += v;
        }
    }

    fn finish(&self) -> f64 {
        self.sum
    }
}
