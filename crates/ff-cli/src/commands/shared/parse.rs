use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse `--metadata`; it must be a JSON object.
pub fn parse_metadata(raw: &str) -> anyhow::Result<Value> {
    let value: Value =
        serde_json::from_str(raw).map_err(|error| anyhow::anyhow!("invalid metadata '{raw}': {error}"))?;
    if !value.is_object() {
        anyhow::bail!("invalid metadata '{raw}': expected a JSON object");
    }
    Ok(value)
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}
