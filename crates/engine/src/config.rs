//! Export configuration via `css-export.toml`
//!
//! Everything an export run needs besides the entity source: where the
//! table files go, how they are named, the load date stamped on every row,
//! the waveform sample format and the base of each synthetic key sequence.

use crate::emit::wfdisc::SampleFormat;
use crate::keys::KeyBases;
use chrono::{DateTime, Utc};
use css_core::ExportError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "css-export.toml";

/// Export configuration loaded from `css-export.toml`.
///
/// # Example
///
/// ```toml
/// output_dir = "out"
/// file_prefix = "css"
/// load_date = "2018-07-04T09:30:05Z"
/// sample_format = "t4"
///
/// [keys]
/// chanid = 1000
/// orid = 5000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving table files and sidecars
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Table files are named `<file_prefix>.<table>`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Value of every `lddate` column; absent writes the NA sentinel so
    /// repeated runs stay byte-identical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_date: Option<DateTime<Utc>>,
    /// Encoding of waveform sidecar samples
    #[serde(default)]
    pub sample_format: SampleFormat,
    /// First value of each key sequence
    #[serde(default)]
    pub keys: KeyBases,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_prefix() -> String {
    "css".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            load_date: None,
            sample_format: SampleFormat::default(),
            keys: KeyBases::default(),
        }
    }
}

impl ExportConfig {
    /// Config writing into `dir` with all other settings at their defaults
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        ExportConfig {
            output_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the table file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the load date
    pub fn with_load_date(mut self, load_date: DateTime<Utc>) -> Self {
        self.load_date = Some(load_date);
        self
    }

    /// Set the waveform sample format
    pub fn with_sample_format(mut self, format: SampleFormat) -> Self {
        self.sample_format = format;
        self
    }

    /// Set the key bases
    pub fn with_keys(mut self, keys: KeyBases) -> Self {
        self.keys = keys;
        self
    }

    /// Path of a file inside the output directory
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("file_prefix is empty".to_string()));
        }
        if self.file_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "file_prefix '{}' contains a path separator",
                self.file_prefix
            )));
        }
        self.keys.validate()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# CSS3.0 export configuration
#
# Directory receiving the table files and binary sidecars (default: ".")
output_dir = "."

# Table files are named <file_prefix>.<table>, e.g. css.site (default: "css")
file_prefix = "css"

# Load date stamped into every lddate column. Leave unset to write the NA
# sentinel, which keeps repeated exports byte-identical.
# load_date = "2018-07-04T09:30:05Z"

# Waveform sample encoding: s4, i4, t4, f4, t8 or f8 (default: "t4")
sample_format = "t4"

# First value of each synthetic key sequence.
[keys]
chanid = 1000
inid = 2000
wfid = 3000
evid = 4000
orid = 5000
arid = 6000
"#
    }

    /// Read and parse config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ExportConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config file '{}': {message}", path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Config file could not be written
    #[error("Failed to write config file '{}': {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A setting is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for ExportError {
    fn from(e: ConfigError) -> Self {
        ExportError::Config(e.to_string())
    }
}
