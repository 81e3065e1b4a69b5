use crate::utils::error::{Result, WpMobileError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Service for managing configuration persistence
pub struct ConfigService {
    config_dir: PathBuf,
}

impl ConfigService {
    /// Create a new config service with default directory
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);

            // Preferences may hold experiment state, keep them private
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(&config_dir)?.permissions();
                perms.set_mode(0o700);
                fs::set_permissions(&config_dir, perms)?;
            }
        }

        Ok(Self { config_dir })
    }

    /// Create a config service with custom directory
    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }
        Ok(Self { config_dir })
    }

    /// Get default config directory
    fn get_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("org", "wordpress", "wpmobile")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| WpMobileError::ConfigError("Failed to get config directory".to_string()))
    }

    fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.toml")
    }

    /// Path of the persisted preference store
    pub fn prefs_file(&self) -> PathBuf {
        self.config_dir.join("prefs.toml")
    }

    /// Load application settings
    pub fn load_settings(&self) -> Result<AppSettings> {
        let path = self.settings_file();

        if !path.exists() {
            tracing::info!("No settings file found, using defaults");
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&path)?;
        let settings: AppSettings = toml::from_str(&content)
            .map_err(|e| WpMobileError::ConfigError(format!("Failed to parse settings: {}", e)))?;

        tracing::debug!("Loaded settings: language={}", settings.language);
        Ok(settings)
    }

    /// Save application settings
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let content = toml::to_string_pretty(settings).map_err(|e| {
            WpMobileError::ConfigError(format!("Failed to serialize settings: {}", e))
        })?;

        let path = self.settings_file();
        fs::write(&path, content)?;

        tracing::info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// UI language (e.g., "en", "zh-CN"); empty follows the system locale
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub features: FeatureSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

/// Locally configured values of the remote feature flags
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureSettings {
    #[serde(default)]
    pub my_site_dashboard_tabs: bool,

    #[serde(default)]
    pub my_site_default_tab_experiment: bool,

    /// Bucket decided by the remote config provider
    #[serde(default)]
    pub my_site_default_tab_experiment_variation_dashboard: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Maximum tracked events kept in memory
    #[serde(default = "default_max_events")]
    pub max_events: usize,

    /// Optional JSON-lines file receiving every tracked event
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_language() -> String {
    String::new()
}

fn default_max_events() -> usize {
    500
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
            log_file: None,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            features: FeatureSettings::default(),
            analytics: AnalyticsSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_service() -> (ConfigService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_dir(temp_dir.path().to_path_buf()).unwrap();
        (service, temp_dir)
    }

    #[test]
    fn test_load_settings_default() {
        let (service, _temp) = create_test_service();
        let settings = service.load_settings().unwrap();

        assert!(settings.language.is_empty());
        assert_eq!(settings.features, FeatureSettings::default());
        assert_eq!(settings.analytics.max_events, 500);
        assert!(settings.analytics.log_file.is_none());
    }

    #[test]
    fn test_save_and_load_settings() {
        let (service, _temp) = create_test_service();

        let mut settings = AppSettings::default();
        settings.language = "zh-CN".to_string();
        settings.features.my_site_dashboard_tabs = true;
        settings.features.my_site_default_tab_experiment = true;
        settings.analytics.max_events = 10;

        service.save_settings(&settings).unwrap();
        let loaded = service.load_settings().unwrap();

        assert_eq!(loaded.language, "zh-CN");
        assert!(loaded.features.my_site_dashboard_tabs);
        assert!(loaded.features.my_site_default_tab_experiment);
        assert!(!loaded.features.my_site_default_tab_experiment_variation_dashboard);
        assert_eq!(loaded.analytics.max_events, 10);
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let (service, temp) = create_test_service();
        fs::write(
            temp.path().join("settings.toml"),
            "[features]\nmy_site_dashboard_tabs = true\n",
        )
        .unwrap();

        let loaded = service.load_settings().unwrap();
        assert!(loaded.language.is_empty());
        assert!(loaded.features.my_site_dashboard_tabs);
        assert!(!loaded.features.my_site_default_tab_experiment);
    }

    #[test]
    fn test_invalid_settings_file() {
        let (service, temp) = create_test_service();
        fs::write(temp.path().join("settings.toml"), "language = [").unwrap();

        let err = service.load_settings().unwrap_err();
        assert!(matches!(err, WpMobileError::ConfigError(_)));
    }

    #[test]
    fn test_config_dir() {
        let (service, temp) = create_test_service();
        assert_eq!(service.config_dir(), temp.path());
        assert_eq!(service.prefs_file(), temp.path().join("prefs.toml"));
    }
}
