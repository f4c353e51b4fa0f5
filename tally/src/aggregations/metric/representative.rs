use crate::aggregations::agg_trait::MetricAgg;
use crate::record::Value;

/// "No aggregation": the value a single record stands for.
///
/// With one record this is that record's numeric value. With several it is
/// the numeric value of the first record whose field is not null. Anything
/// non-numeric reads as `0`.
#[derive(Debug, Clone, Default)]
pub struct RepresentativeAgg {
    picked: Option<Value>,
}

impl RepresentativeAgg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricAgg for RepresentativeAgg {
    fn collect(&mut self, value: &Value) {
        if self.picked.is_none() && !value.is_null() {
            self.picked = Some(value.clone());
        }
    }

    fn finish(&self) -> f64 {
        self.picked
            .as_ref()
            .and_then(Value::as_number)
            .unwrap_or(0.0)
    }
}

/// Value of the first record, null or not
#[derive(Debug, Clone, Default)]
pub struct FirstAgg {
    first: Option<Value>,
}

impl FirstAgg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricAgg for FirstAgg {
    fn collect(&mut self, value: &Value) {
        if self.first.is_none() {
            self.first = Some(value.clone());
        }
    }

    fn finish(&self) -> f64 {
        self.first.as_ref().and_then(Value::as_number).unwrap_or(0.0)
    }
}
