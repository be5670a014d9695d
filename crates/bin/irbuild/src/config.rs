//! Configuration loading — TOML build file with environment variable overrides.
//!
//! The build file holds both the settings of the tool (`[build]`,
//! `[logging]`) and the component declarations (`[[sensor]]`,
//! `[[remote_transmitter]]`, `[[remote_receiver]]`, `[[climate]]`). Every
//! section has a default, so `irbuild.toml` may be left out; a file named on
//! the command line may not. Environment variables take precedence over file
//! values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use irbuild_domain::declaration::{ComponentDomain, Declaration};
use irbuild_domain::option_value::RawRecord;
use irbuild_domain::platform::{TargetPlatform, UnknownTargetPlatform};

/// Build file read when neither the command line nor `IRBUILD_CONFIG` names one.
pub const DEFAULT_PATH: &str = "irbuild.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target settings.
    pub build: BuildConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    pub sensor: Vec<RawRecord>,
    pub remote_transmitter: Vec<RawRecord>,
    pub remote_receiver: Vec<RawRecord>,
    pub climate: Vec<RawRecord>,
}

/// Target configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Board family the firmware is generated for.
    pub platform: TargetPlatform,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load the build file then apply environment-variable overrides.
    ///
    /// With `None`, [`DEFAULT_PATH`] is read if present and defaults are used
    /// otherwise. A path the operator named must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file is missing, if the file is
    /// malformed, or if an override holds an unknown target platform.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_file()?,
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn from_default_file() -> Result<Self, ConfigError> {
        match Self::from_file(Path::new(DEFAULT_PATH)) {
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("IRBUILD_PLATFORM") {
            self.build.platform = val.parse()?;
        }
        if let Ok(val) = std::env::var("IRBUILD_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    /// Component declarations, section by section, in file order.
    #[must_use]
    pub fn declarations(&self) -> Vec<Declaration> {
        [
            (ComponentDomain::Sensor, &self.sensor),
            (ComponentDomain::RemoteTransmitter, &self.remote_transmitter),
            (ComponentDomain::RemoteReceiver, &self.remote_receiver),
            (ComponentDomain::Climate, &self.climate),
        ]
        .into_iter()
        .flat_map(|(domain, records)| {
            records
                .iter()
                .map(move |options| Declaration::new(domain, options.clone()))
        })
        .collect()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "irbuild=info,irbuild_app=info".to_string(),
        }
    }
}

/// Why the build file could not be turned into a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read build file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("build file {} is not valid TOML", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// `IRBUILD_PLATFORM` names no known board family.
    #[error("IRBUILD_PLATFORM override rejected")]
    Platform(#[from] UnknownTargetPlatform),
}
