use crate::error::AppError;
use photo_gallery::{GalleryConfig, RuntimeMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings read from the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the database and the photo files
    pub data_dir: Option<PathBuf>,
    /// Key of the gallery list in the preferences table
    pub storage_key: Option<String>,
    /// `native` or `web`
    pub mode: Option<RuntimeMode>,
}

impl AppConfig {
    /// Loads `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&text)?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::filesystem::get_app_data_dir)
    }

    pub fn gallery_config(&self) -> GalleryConfig {
        let mut config = GalleryConfig::default();
        if let Some(key) = &self.storage_key {
            config.storage_key = key.clone();
        }
        config
    }
}
