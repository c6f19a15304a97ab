use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Part of the configuration a rejected setting belongs to. Matches the
/// `config.toml` tables, plus the config directory itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Directory,
    Server,
    Database,
    Auth,
    Limits,
    Logging,
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directory => "config directory",
            Self::Server => "[server]",
            Self::Database => "[database]",
            Self::Auth => "[auth]",
            Self::Limits => "[limits]",
            Self::Logging => "[logging]",
        };
        f.write_str(name)
    }
}

#[derive(ThisError, Debug)]
pub enum ConfigError {
    /// A setting loaded fine but failed validation
    #[error("Invalid {section} setting: {message} {location}")]
    Invalid {
        section: ConfigSection,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot access {}: {source} {location}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Cannot parse {}: {source} {location}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(section: ConfigSection, message: S) -> Self {
        ConfigError::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Auth, message)
    }

    #[track_caller]
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Database, message)
    }

    #[track_caller]
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Directory, message)
    }

    #[track_caller]
    pub fn limits<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Limits, message)
    }

    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Logging, message)
    }

    #[track_caller]
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::invalid(ConfigSection::Server, message)
    }

    #[track_caller]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn toml(path: &Path, source: toml::de::Error) -> Self {
        ConfigError::Toml {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section of a failed validation; `None` for read and parse failures.
    pub fn section(&self) -> Option<ConfigSection> {
        match self {
            ConfigError::Invalid { section, .. } => Some(*section),
            ConfigError::Io { .. } | ConfigError::Toml { .. } => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
