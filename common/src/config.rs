use crate::error::ConfigError;
use crate::protocol::{CompletionOptions, GenerationSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_INIT_DELAY_MS: u64 = 2000;
pub const DEFAULT_ANALYZE_DELAY_MS: u64 = 1500;
pub const DEFAULT_COMPLETE_DELAY_MS: u64 = 1800;
pub const DEFAULT_EXPLAIN_DELAY_MS: u64 = 1200;
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StudyBuddyConfig {
    pub assistant: Option<AssistantConfig>,
}

impl StudyBuddyConfig {
    /// Loads the config from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Config loaded from {:?}", path);
        Ok(config)
    }

    pub fn assistant(&self) -> AssistantConfig {
        self.assistant.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssistantConfig {
    pub init_delay_ms: Option<u64>,
    pub analyze_delay_ms: Option<u64>,
    pub complete_delay_ms: Option<u64>,
    pub explain_delay_ms: Option<u64>,
    pub notice_duration_ms: Option<u64>,
    pub defaults: Option<CompletionOptions>,
}

impl AssistantConfig {
    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms.unwrap_or(DEFAULT_INIT_DELAY_MS))
    }

    pub fn analyze_delay(&self) -> Duration {
        Duration::from_millis(self.analyze_delay_ms.unwrap_or(DEFAULT_ANALYZE_DELAY_MS))
    }

    pub fn complete_delay(&self) -> Duration {
        Duration::from_millis(self.complete_delay_ms.unwrap_or(DEFAULT_COMPLETE_DELAY_MS))
    }

    pub fn explain_delay(&self) -> Duration {
        Duration::from_millis(self.explain_delay_ms.unwrap_or(DEFAULT_EXPLAIN_DELAY_MS))
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms.unwrap_or(DEFAULT_NOTICE_DURATION_MS))
    }

    pub fn generation_defaults(&self) -> GenerationSettings {
        self.defaults
            .unwrap_or_default()
            .merged_over(GenerationSettings::default())
    }
}
