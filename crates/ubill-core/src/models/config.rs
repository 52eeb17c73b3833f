//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the ubill pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UbillConfig {
    /// Azure Document Intelligence connection settings.
    pub azure: AzureConfig,

    /// Extraction behavior.
    pub extraction: ExtractionConfig,
}

/// Azure Document Intelligence connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Service endpoint, e.g. "https://myresource.cognitiveservices.azure.com".
    pub endpoint: String,

    /// Subscription key for the resource.
    pub api_key: String,

    /// REST API version to request.
    pub api_version: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: "2024-11-30".to_string(),
        }
    }
}

/// Extraction behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Custom model identifier used for analysis when none is given on the
    /// command line.
    pub model_id: String,

    /// Seconds to wait between result polls.
    pub poll_interval_secs: u64,

    /// Maximum number of result polls before giving up.
    pub poll_attempts: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            poll_interval_secs: 2,
            poll_attempts: 60,
        }
    }
}

impl UbillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
