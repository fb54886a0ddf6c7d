//! Configuration handling for bundlescope
//!
//! Settings are layered, highest priority first:
//! - command line flags
//! - environment variables (`BUNDLESCOPE_*`, bound through clap)
//! - the first configuration file found (see [`file::search_paths`])
//! - built-in defaults

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{BundlescopeError, Result, config};

pub mod file;

pub use file::ConfigFile;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = BundlescopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(config::invalid(format!(
                "unknown log level '{s}' (expected trace, debug, info, warn or error)"
            ))),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Explicit configuration file
    pub config: Option<PathBuf>,

    pub registry: Option<PathBuf>,

    pub log_level: Option<String>,

    pub log_json: Option<bool>,
}

/// Effective settings after layering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Registry snapshot, if one is configured anywhere
    pub registry: Option<PathBuf>,

    pub log_level: LogLevel,

    pub log_json: bool,

    /// Configuration file the settings were read from
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Load settings for the given overrides
    ///
    /// An explicit `--config` file must exist; otherwise the default search
    /// paths are tried and missing files are skipped.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let found = match &overrides.config {
            Some(path) => {
                let file = ConfigFile::read(path)?
                    .ok_or_else(|| config::not_found(path.display().to_string()))?;
                Some((path.clone(), file))
            }
            None => ConfigFile::discover()?,
        };

        match found {
            Some((path, file)) => Self::resolve(overrides, file, Some(path)),
            None => Self::resolve(overrides, ConfigFile::default(), None),
        }
    }

    /// Layer `overrides` on top of `file`
    pub fn resolve(
        overrides: &Overrides,
        file: ConfigFile,
        source: Option<PathBuf>,
    ) -> Result<Self> {
        let log_level = match overrides.log_level.as_deref().or(file.logging.level.as_deref()) {
            Some(level) => level.parse()?,
            None => LogLevel::default(),
        };

        Ok(Self {
            registry: overrides.registry.clone().or(file.registry),
            log_level,
            log_json: overrides.log_json.or(file.logging.json).unwrap_or(false),
            source,
        })
    }

    /// The configured registry snapshot, or an error explaining how to set one
    pub fn registry_path(&self) -> Result<&PathBuf> {
        self.registry
            .as_ref()
            .ok_or(BundlescopeError::RegistryNotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, create_test_files};

    fn file(yaml: &str) -> ConfigFile {
        ConfigFile::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(&Overrides::default(), ConfigFile::default(), None).unwrap();
        assert_eq!(settings.log_level, LogLevel::Info);
        assert!(!settings.log_json);
        assert!(settings.registry.is_none());
    }

    #[test]
    fn test_file_values_used_without_overrides() {
        let settings = Settings::resolve(
            &Overrides::default(),
            file("registry: /data/reg.yaml\nlogging:\n  level: debug\n  json: true\n"),
            None,
        )
        .unwrap();
        assert_eq!(settings.registry, Some(PathBuf::from("/data/reg.yaml")));
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert!(settings.log_json);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = Overrides {
            registry: Some(PathBuf::from("/cli/reg.yaml")),
            log_level: Some("error".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(
            &overrides,
            file("registry: /data/reg.yaml\nlogging:\n  level: debug\n"),
            None,
        )
        .unwrap();
        assert_eq!(settings.registry, Some(PathBuf::from("/cli/reg.yaml")));
        assert_eq!(settings.log_level, LogLevel::Error);
    }

    #[test]
    fn test_log_json_override_disables_file_setting() {
        let overrides = Overrides {
            log_json: Some(false),
            ..Overrides::default()
        };
        let settings =
            Settings::resolve(&overrides, file("logging:\n  json: true\n"), None).unwrap();
        assert!(!settings.log_json);

        let overrides = Overrides {
            log_json: Some(true),
            ..Overrides::default()
        };
        let settings =
            Settings::resolve(&overrides, file("logging:\n  json: false\n"), None).unwrap();
        assert!(settings.log_json);
    }

    #[test]
    fn test_invalid_level_in_file_is_error() {
        let result = Settings::resolve(
            &Overrides::default(),
            file("logging:\n  level: chatty\n"),
            None,
        );
        assert!(matches!(result, Err(BundlescopeError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_registry_path_required() {
        let settings = Settings::default();
        assert!(matches!(
            settings.registry_path(),
            Err(BundlescopeError::RegistryNotConfigured)
        ));
    }

    #[test]
    fn test_load_explicit_config() {
        let temp = create_temp_dir();
        create_test_files(
            &temp,
            &[("config.yaml", &b"registry: reg.yaml\nlogging:\n  json: true\n"[..])],
        );
        let path = temp.path().join("config.yaml");

        let settings = Settings::load(&Overrides {
            config: Some(path.clone()),
            ..Overrides::default()
        })
        .unwrap();

        assert_eq!(settings.registry, Some(temp.path().join("reg.yaml")));
        assert!(settings.log_json);
        assert_eq!(settings.source, Some(path));
    }

    #[test]
    fn test_load_explicit_config_missing() {
        let temp = create_temp_dir();
        let result = Settings::load(&Overrides {
            config: Some(temp.path().join("nope.yaml")),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(BundlescopeError::ConfigNotFound { .. })));
    }
}
