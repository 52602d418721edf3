use crate::domain::CalculatorConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct ConfigRepository;

impl ConfigRepository {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn load_config(path: impl AsRef<Path>) -> Result<CalculatorConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Writes `config` as pretty-printed JSON, returning the path written.
    pub fn save_config(config: &CalculatorConfig, path: impl AsRef<Path>) -> Result<String, ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r##"{{"precision": 4, "theme": {{"focus": "#123456"}}}}"##).unwrap();

        let config = ConfigRepository::load_config(file.path()).unwrap();
        assert_eq!(config.precision, 4);
        assert_eq!(config.theme.focus, "#123456");
        assert_eq!(config.theme.accent_button, "#FF9500");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigRepository::load_config(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = ConfigRepository::load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scicalc.json");
        let config = CalculatorConfig { precision: 3, ..Default::default() };

        let written = ConfigRepository::save_config(&config, &path).unwrap();
        assert_eq!(written, path.display().to_string());
        assert_eq!(ConfigRepository::load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scicalc.json");

        let err = ConfigRepository::save_config(&CalculatorConfig::default(), &path).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert!(err.to_string().starts_with("failed to write"));
    }
}
