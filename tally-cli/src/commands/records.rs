use anyhow::{Context, Result};
use std::path::Path;
use tally::Record;

/// Load records from a JSON array file, or one object per line for `.jsonl`
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {:?}", path))?;

    let records: Vec<Record> = match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl") | Some("ndjson") => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid record on line {} of {:?}", i + 1, path))
            })
            .collect::<Result<_>>()?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Expected a JSON array of objects in {:?}", path))?,
    };

    tracing::info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}
