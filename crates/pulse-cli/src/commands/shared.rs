use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON file, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = read_text(path, what)?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} JSON at {}", path.display()))
}

/// Read a UTF-8 text file, naming the file in any error.
pub fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file at {}", path.display()))
}
