use anyhow::{Context, Result};
use cvscrub_core::Mapping;
use std::path::Path;

pub async fn handle(scrubbed: &Path, mapping: &Path) -> Result<()> {
    print!("{}", restore(scrubbed, mapping).await?);
    Ok(())
}

/// Scrubbed text with every known label replaced by its original
pub async fn restore(scrubbed: &Path, mapping: &Path) -> Result<String> {
    let text = tokio::fs::read_to_string(scrubbed)
        .await
        .with_context(|| format!("Failed to read {}", scrubbed.display()))?;
    let json = tokio::fs::read_to_string(mapping)
        .await
        .with_context(|| format!("Failed to read mapping {}", mapping.display()))?;

    let mapping = Mapping::from_json(&json)
        .with_context(|| format!("Invalid mapping {}", mapping.display()))?;

    tracing::debug!(labels = mapping.len(), "restoring");
    Ok(mapping.restore(&text))
}
