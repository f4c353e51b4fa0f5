use crate::record::{Record, Value};

/// Streaming reduction of one field over a group of records.
///
/// Every policy sees every record's value (null included) so that
/// row-counting policies can count rows rather than valid values.
pub trait MetricAgg {
    fn collect(&mut self, value: &Value);

    /// Final value; policies with nothing valid to report return `0.0`.
    fn finish(&self) -> f64;
}

/// Feed `field` of every record into `agg` and return its result
pub fn reduce_with<A: MetricAgg>(mut agg: A, records: &[Record], field: &str) -> f64 {
    for record in records {
        agg.collect(record.get(field));
    }
    agg.finish()
}
