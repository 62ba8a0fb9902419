use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Topic to kind-name table, in document order.
pub type TopicTable = IndexMap<String, String>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProtocolDocument {
    /// `topics` table inside a larger configuration file.
    Nested { topics: TopicTable },
    Flat(TopicTable),
}

impl From<ProtocolDocument> for TopicTable {
    fn from(document: ProtocolDocument) -> Self {
        match document {
            ProtocolDocument::Nested { topics } => topics,
            ProtocolDocument::Flat(topics) => topics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(anyhow!(
                "unsupported protocol configuration format: {} (expected .json, .yaml, .yml or .toml)",
                path.display()
            )),
        }
    }

    fn parse(self, contents: &str) -> Result<ProtocolDocument> {
        let document = match self {
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        };
        Ok(document)
    }
}

/// Load the protocol configuration. The format follows the file extension.
pub fn load_topic_table(path: &Path) -> Result<TopicTable> {
    let format = ConfigFormat::from_path(path)?;
    debug!(config_path = %path.display(), ?format, "loading protocol configuration");

    let contents = fs::read_to_string(path)
        .with_context(|| format!("unable to read protocol configuration {}", path.display()))?;
    let document = format
        .parse(&contents)
        .with_context(|| format!("failed to parse protocol configuration {}", path.display()))?;

    Ok(document.into())
}
