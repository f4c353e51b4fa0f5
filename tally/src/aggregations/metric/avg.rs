use crate::aggregations::agg_trait::MetricAgg;
use crate::record::Value;

#[derive(Debug, Clone, Default)]
pub struct AvgAgg {
    sum: f64,
    count: u64,
}

impl AvgAgg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricAgg for AvgAgg {
    fn collect(&mut self, value: &Value) {
        if let Some(v) = value.as_number() {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }
}
