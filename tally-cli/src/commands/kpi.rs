use super::records::load_records;
use anyhow::Result;
use std::path::Path;
use tally::aggregations::{AggregationPolicy, Metric};
use tally::kpi::summarize;

pub fn run_kpi(
    records_path: &Path,
    field: &str,
    aggregation: AggregationPolicy,
    date_field: Option<&str>,
) -> Result<()> {
    let records = load_records(records_path)?;
    let metric = Metric::new(field, aggregation);
    let summary = summarize(&records, &metric, date_field);

    tracing::debug!(
        metric = %metric.display_name(),
        value = summary.value,
        has_trend = summary.trend.is_some(),
        "KPI computed"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
