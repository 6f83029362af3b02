//! Command handlers. Each one performs a single client call and writes the
//! result to stdout or a file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use storelens_client::InsightsClient;
use storelens_core::ExportReceipt;

pub(crate) async fn run_analyze_store(
    client: &InsightsClient,
    url: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let insights = client
        .analyze_store(url)
        .await
        .with_context(|| format!("failed to analyze store {url}"))?;

    tracing::info!(
        url = %insights.url,
        total_products = insights.product_catalog.total_products,
        hero_products = insights.hero_products.len(),
        faqs = insights.faqs.len(),
        "store analysis complete"
    );
    write_json(&insights, output).await
}

pub(crate) async fn run_analyze_competitors(
    client: &InsightsClient,
    url: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let result = client
        .analyze_competitors(url)
        .await
        .with_context(|| format!("failed to analyze competitors of {url}"))?;

    if result.is_truncated() {
        tracing::info!(
            returned = result.competitors.len(),
            total_found = result.total_found,
            "service returned a subset of the competitors it found"
        );
    }
    write_json(&result, output).await
}

pub(crate) async fn run_export(
    client: &InsightsClient,
    format: &str,
    data_types: &[String],
    download_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let data_types: Vec<&str> = data_types.iter().map(String::as_str).collect();

    let Some(dir) = download_dir else {
        let value = client
            .export_data(format, &data_types)
            .await
            .with_context(|| format!("failed to export {format} data"))?;
        return write_json(&value, None).await;
    };

    let receipt = client
        .export_receipt(format, &data_types)
        .await
        .with_context(|| format!("failed to export {format} data"))?;
    let destination = export_destination(dir, &receipt)?;

    let bytes = client
        .download_file(&receipt.download_url)
        .await
        .with_context(|| format!("failed to download {}", receipt.download_url))?;
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;
    tokio::fs::write(&destination, &bytes)
        .await
        .with_context(|| format!("failed to write {}", destination.display()))?;

    tracing::info!(
        export_id = %receipt.export_id,
        path = %destination.display(),
        bytes = bytes.len(),
        "export downloaded"
    );
    write_json(&receipt, None).await
}

pub(crate) async fn run_download(
    client: &InsightsClient,
    path: &str,
    output: &Path,
) -> anyhow::Result<()> {
    let bytes = client
        .download_file(path)
        .await
        .with_context(|| format!("failed to download {path}"))?;
    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), bytes = bytes.len(), "file downloaded");
    Ok(())
}

pub(crate) async fn run_health(client: &InsightsClient) -> anyhow::Result<()> {
    let health = client
        .health()
        .await
        .with_context(|| format!("health check against {} failed", client.base_url()))?;
    write_json(&health, None).await?;
    if !health.is_healthy() {
        anyhow::bail!("analysis service reported status \"{}\"", health.status);
    }
    Ok(())
}

/// Local path an export's file is written to inside `dir`.
pub(crate) fn export_destination(dir: &Path, receipt: &ExportReceipt) -> anyhow::Result<PathBuf> {
    let name = receipt.file_name().with_context(|| {
        format!(
            "export {} has no file name in download URL \"{}\"",
            receipt.export_id, receipt.download_url
        )
    })?;
    Ok(dir.join(name))
}

async fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
