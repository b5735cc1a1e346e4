//! Optional user settings at ~/.config/calert/config.toml

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CalertError, CalertResult};

static DEFAULT_RULES_FILE: &str = "rules.txt";
static DEFAULT_LOG_FILE: &str = "log.txt";

fn default_rules_file() -> PathBuf {
    PathBuf::from(DEFAULT_RULES_FILE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

/// Defaults for the CLI. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Rule file read when `--rules` is not given
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,

    /// Where the CLI writes its log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Directory for `Alerts.txt` when none is given on the command line
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rules_file: default_rules_file(),
            log_file: default_log_file(),
            output_dir: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> CalertResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalertError::Settings("Could not determine config directory".into()))?
            .join("calert");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings from the default location, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> CalertResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalertResult<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CalertError::Settings(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::parse(&contents)
            .map_err(|e| CalertError::Settings(format!("Could not parse {}: {e}", path.display())))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let settings: Settings = toml::from_str(contents)?;
        Ok(Settings {
            rules_file: expand_path(&settings.rules_file),
            log_file: expand_path(&settings.log_file),
            output_dir: settings.output_dir.as_deref().map(expand_path),
        })
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.rules_file, PathBuf::from("rules.txt"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output_dir = \"/tmp/alerts\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.output_dir, Some(PathBuf::from("/tmp/alerts")));
        assert_eq!(settings.log_file, PathBuf::from("log.txt"));
    }

    #[test]
    fn test_invalid_file_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rules_file = [").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Settings);
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path(Path::new("~/alerts")), home.join("alerts"));
        }
        assert_eq!(expand_path(Path::new("/abs/path")), PathBuf::from("/abs/path"));
    }
}
