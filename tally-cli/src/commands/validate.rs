use anyhow::{Context, Result};
use std::path::Path;
use tally::DashboardRequest;

pub fn run_validate(request_path: &Path) -> Result<()> {
    let request = DashboardRequest::from_file(request_path)
        .with_context(|| format!("Failed to read request {:?}", request_path))?;
    request
        .validate()
        .with_context(|| format!("Request {:?} is not usable", request_path))?;

    println!(
        "OK: {} bucket level(s), {} metric(s)",
        request.buckets.len(),
        request.metrics.len()
    );
    Ok(())
}
