//! Runtime configuration: API credential, provider base URL, log file
//!
//! Values come from the command line (which also reads the environment) and
//! fall back to an optional TOML file, then to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const APP_DIR: &str = "city-weather";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(
        "no OpenWeatherMap API key configured; pass --api-key, set OPENWEATHER_API_KEY, \
         or add `api_key = \"...\"` to {0}"
    )]
    MissingApiKey(String),
}

/// Contents of `config.toml`. Every key is optional.
///
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// log_file = "/tmp/city-weather.log"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or an empty config when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }
}

/// Values given on the command line or through the environment.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// What the weather client needs
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api: ApiConfig,
    pub log_file: PathBuf,
}

impl Settings {
    /// Merge overrides over the file; overrides win key by key.
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        config_path: &Path,
    ) -> Result<Self, ConfigError> {
        let api_key = overrides
            .api_key
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(config_path.display().to_string()))?;
        let base_url = overrides
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let log_file = overrides
            .log_file
            .or(file.log_file)
            .unwrap_or_else(default_log_file);

        Ok(Self {
            api: ApiConfig { base_url, api_key },
            log_file,
        })
    }
}

/// `<config_dir>/city-weather/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// `<data_local_dir>/city-weather/city-weather.log`
pub fn default_log_file() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("city-weather.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn test_parse_file() {
        let file = FileConfig::parse(
            "api_key = \"FILE\"\nbase_url = \"http://localhost:9000\"\n",
            &path(),
        )
        .unwrap();
        assert_eq!(file.api_key.as_deref(), Some("FILE"));
        assert_eq!(file.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(file.log_file, None);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = FileConfig::parse("api_key = ", &path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = Overrides {
            api_key: Some("CLI".into()),
            ..Default::default()
        };
        let file = FileConfig {
            api_key: Some("FILE".into()),
            base_url: Some("http://localhost:9000".into()),
            log_file: Some(PathBuf::from("/tmp/w.log")),
        };

        let settings = Settings::resolve(overrides, file, &path()).unwrap();

        assert_eq!(settings.api.api_key, "CLI");
        assert_eq!(settings.api.base_url, "http://localhost:9000");
        assert_eq!(settings.log_file, PathBuf::from("/tmp/w.log"));
    }

    #[test]
    fn test_defaults_apply() {
        let overrides = Overrides {
            api_key: Some("CLI".into()),
            ..Default::default()
        };

        let settings = Settings::resolve(overrides, FileConfig::default(), &path()).unwrap();

        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.log_file, default_log_file());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = Settings::resolve(Overrides::default(), FileConfig::default(), &path())
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
        assert!(err.to_string().contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let overrides = Overrides {
            api_key: Some("  ".into()),
            ..Default::default()
        };
        assert!(Settings::resolve(overrides, FileConfig::default(), &path()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.toml");
        std::fs::write(&file_path, "api_key = \"ON_DISK\"\n").unwrap();

        let file = FileConfig::load(&file_path).unwrap();

        assert_eq!(file.api_key.as_deref(), Some("ON_DISK"));
    }
}
