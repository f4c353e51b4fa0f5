use super::records::load_records;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tally::aggregations::{
    extract_partitions, extract_series, EngineOptions, MetricSeries, PartitionValue, Pipeline,
    PipelineResult, SplitKind,
};
use tally::kpi::{summarize, KpiSummary};
use tally::{DashboardRequest, Record};

#[derive(Debug, Serialize)]
struct BucketSummary {
    key: String,
    label: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct LevelSummary {
    depth: usize,
    field: String,
    kind: &'static str,
    buckets: Vec<BucketSummary>,
}

#[derive(Debug, Serialize)]
struct PartitionSummary {
    split: &'static str,
    metric: String,
    values: Vec<PartitionValue>,
}

#[derive(Debug, Serialize)]
struct RunOutput {
    labels: Vec<String>,
    series: Vec<MetricSeries>,
    levels: Vec<LevelSummary>,
    partitions: Vec<PartitionSummary>,
    surviving_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    kpis: Vec<KpiSummary>,
}

fn summarize_run(
    result: &PipelineResult,
    records: &[Record],
    request: &DashboardRequest,
) -> RunOutput {
    let levels = result
        .levels
        .iter()
        .map(|level| LevelSummary {
            depth: level.depth,
            field: level.definition.field.clone(),
            kind: level.definition.kind.as_str(),
            buckets: level
                .items
                .iter()
                .map(|item| BucketSummary {
                    key: item.key.clone(),
                    label: item.label().to_string(),
                    count: item.count,
                })
                .collect(),
        })
        .collect();

    let mut partitions = Vec::new();
    for split in [SplitKind::Series, SplitKind::Rows, SplitKind::Chart] {
        let items = result.partitions.get(split);
        if items.is_empty() {
            continue;
        }
        for metric in &request.metrics {
            partitions.push(PartitionSummary {
                split: split.as_str(),
                metric: metric.display_name(),
                values: extract_partitions(items, metric),
            });
        }
    }

    let kpis = match &request.trend_field {
        Some(date_field) => request
            .metrics
            .iter()
            .map(|metric| summarize(records, metric, Some(date_field)))
            .collect(),
        None => Vec::new(),
    };

    RunOutput {
        labels: result.labels.clone(),
        series: extract_series(result, records, &request.metrics),
        levels,
        partitions,
        surviving_records: result.surviving_records.len(),
        kpis,
    }
}

pub fn run_pipeline(
    records_path: &Path,
    request_path: &Path,
    options: EngineOptions,
    full: bool,
) -> Result<()> {
    let request = DashboardRequest::from_file(request_path)
        .with_context(|| format!("Failed to read request {:?}", request_path))?;
    if let Err(e) = request.validate() {
        tracing::warn!("Request {:?} has problems: {}", request_path, e);
    }

    let records = load_records(records_path)?;
    let result = Pipeline::new(options).run(&records, &request.buckets);
    tracing::info!(
        "Pipeline produced {} label(s) over {} level(s)",
        result.labels.len(),
        result.levels.len()
    );

    let json = if full {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string_pretty(&summarize_run(&result, &records, &request))?
    };
    println!("{}", json);
    Ok(())
}
