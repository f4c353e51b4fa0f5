use crate::aggregations::agg_trait::MetricAgg;
use crate::record::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxMode {
    Min,
    Max,
}

#[derive(Debug, Clone)]
pub struct MinMaxAgg {
    mode: MinMaxMode,
    value: Option<f64>,
}

impl MinMaxAgg {
    pub fn min() -> Self {
        Self {
            mode: MinMaxMode::Min,
            value: None,
        }
    }

    pub fn max() -> Self {
        Self {
            mode: MinMaxMode::Max,
            value: None,
        }
    }
}

impl MetricAgg for MinMaxAgg {
    fn collect(&mut self, value: &Value) {
        let Some(v) = value.as_number() else {
            return;
        };
        self.value = Some(match (self.value, self.mode) {
            (None, _) => v,
            (Some(cur), MinMaxMode::Min) => cur.min(v),
            (Some(cur), MinMaxMode::Max) => cur.max(v),
        });
    }

    fn finish(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}
