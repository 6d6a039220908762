/// Harness configuration
///
/// Layered from an optional `museq.toml` and `MUSEQ_` environment variables,
/// e.g. `MUSEQ_STUDIO__BAR_COUNT=120` or `MUSEQ_REALTIME__OVERSAMPLE=2`.
use crate::error::{Result, StudioAppError};
use museq_audio::RealtimeConfig;
use museq_playback::StudioConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, read from the working directory
pub const CONFIG_FILE: &str = "museq.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub studio: StudioConfig,
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Load configuration from `museq.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path` (if it exists) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        // Double underscore separates sections, since keys contain single ones
        settings = settings.add_source(
            config::Environment::with_prefix("MUSEQ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without the environment
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| StudioAppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.studio.bar_count == 0 {
            return Err(StudioAppError::Config("studio.bar_count must be positive".to_string()));
        }
        if self.realtime.bar_count == 0 {
            return Err(StudioAppError::Config("realtime.bar_count must be positive".to_string()));
        }
        self.realtime
            .validate()
            .map_err(|e| StudioAppError::Config(e.to_string()))
    }
}
