use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use litreview_core::OutputLanguage;
use litreview_engine::{AtomicFileWriter, ClientSettings};
use litreview_logging::{review_error, review_info, review_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "settings.ron";
const APP_DIR_NAME: &str = "litreview";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub default_language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            default_language: OutputLanguage::default().wire_value().to_string(),
        }
    }
}

impl AppSettings {
    /// `endpoint` overrides the configured base URL when given.
    pub fn client_settings(&self, endpoint: Option<&str>) -> ClientSettings {
        ClientSettings {
            base_url: endpoint.unwrap_or(&self.endpoint).to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn language(&self) -> OutputLanguage {
        self.default_language.parse().unwrap_or_else(|err| {
            review_warn!("Ignoring default_language in settings: {}", err);
            OutputLanguage::default()
        })
    }
}

/// `override_dir`, else `<config dir>/litreview`, else `./.litreview`.
pub(crate) fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    dirs::config_dir()
        .map(|base| base.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")))
}

/// Reads `settings.ron`, falling back to defaults on any problem. A missing
/// file is created with the defaults so it can be edited.
pub(crate) fn load_settings(dir: &Path) -> AppSettings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let defaults = AppSettings::default();
            save_settings(dir, &defaults);
            return defaults;
        }
        Err(err) => {
            review_warn!("Failed to read settings from {:?}: {}", path, err);
            return AppSettings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            review_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            review_warn!("Failed to parse settings from {:?}: {}", path, err);
            AppSettings::default()
        }
    }
}

pub(crate) fn save_settings(dir: &Path, settings: &AppSettings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(content) => content,
        Err(err) => {
            review_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    match AtomicFileWriter::new(dir.to_path_buf()).write(SETTINGS_FILENAME, &content) {
        Ok(path) => review_info!("Wrote settings to {:?}", path),
        Err(err) => review_error!("Failed to write settings to {:?}: {}", dir, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults_and_writes_them() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(dir.path());

        assert_eq!(settings, AppSettings::default());
        assert!(dir.path().join(SETTINGS_FILENAME).exists());
    }

    #[test]
    fn saved_settings_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            endpoint: "http://review.internal:9000".to_string(),
            connect_timeout_secs: 3,
            request_timeout_secs: 60,
            default_language: "english".to_string(),
        };
        save_settings(dir.path(), &settings);

        let loaded = load_settings(dir.path());
        assert_eq!(loaded, settings);
        assert_eq!(loaded.language(), OutputLanguage::English);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            "(endpoint: \"http://10.0.0.5:8000\")",
        )
        .unwrap();

        let loaded = load_settings(dir.path());
        assert_eq!(loaded.endpoint, "http://10.0.0.5:8000");
        assert_eq!(loaded.request_timeout_secs, 300);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILENAME), "not ron at all {").unwrap();

        assert_eq!(load_settings(dir.path()), AppSettings::default());
    }

    #[test]
    fn endpoint_override_wins() {
        let client = AppSettings::default().client_settings(Some("http://127.0.0.1:1"));
        assert_eq!(client.base_url, "http://127.0.0.1:1");
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn unknown_language_falls_back_to_turkish() {
        let settings = AppSettings {
            default_language: "latin".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.language(), OutputLanguage::Turkish);
    }
}
