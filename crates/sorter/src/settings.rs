//! Settings file handling.

use std::path::{Path, PathBuf};

use sorter_core::SorterConfig;
use tracing::{debug, warn};

/// Path of the settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sorter")
        .join("settings.json")
}

/// Load sorter settings from file. A missing file means defaults.
pub async fn load_settings(settings_path: &Path) -> Result<SorterConfig, String> {
    if !settings_path.exists() {
        return Ok(SorterConfig::default());
    }

    let contents = tokio::fs::read_to_string(settings_path)
        .await
        .map_err(|e| e.to_string())?;

    let config: SorterConfig = serde_json::from_str(&contents).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    debug!("Settings loaded from {:?}", settings_path);
    Ok(config)
}

/// Load sorter settings, falling back to defaults if the file is unusable.
pub async fn load_settings_or_default(settings_path: &Path) -> SorterConfig {
    match load_settings(settings_path).await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load settings, using defaults: {}", e);
            SorterConfig::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    fn write_settings(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("settings.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        assert_eq!(load_settings(&path).await.unwrap(), SorterConfig::default());
        assert_eq!(load_settings_or_default(&path).await, SorterConfig::default());
    }

    #[tokio::test]
    async fn test_valid_file_is_applied() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_settings(
            &temp_dir,
            r#"{"return_delay_ms": 250, "fallback_category": "Other"}"#,
        );

        let config = load_settings_or_default(&path).await;
        assert_eq!(config.return_delay, Duration::from_millis(250));
        assert_eq!(config.fallback_category.as_str(), "Other");
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_settings(&temp_dir, "{ not json");

        assert!(load_settings(&path).await.is_err());
        assert_eq!(load_settings_or_default(&path).await, SorterConfig::default());
    }

    #[tokio::test]
    async fn test_invalid_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_settings(&temp_dir, r#"{"fallback_category": "  "}"#);

        assert!(load_settings(&path).await.is_err());
        assert_eq!(load_settings_or_default(&path).await, SorterConfig::default());
    }
}
