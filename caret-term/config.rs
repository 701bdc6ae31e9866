use std::{
  fs,
  io::{
    self,
    ErrorKind,
  },
  path::{
    Path,
    PathBuf,
  },
};

use caret_core::DEFAULT_MARKER;
use serde::Deserialize;
use thiserror::Error;

use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Byte rendered at the cursor position.
  pub marker: u8,
  /// Validate the chain after every command.
  pub check:  bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      marker: DEFAULT_MARKER,
      check:  false,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigRaw {
  marker: Option<String>,
  check:  Option<bool>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkerError {
  #[error("marker must be exactly one character, got {0:?}")]
  Length(String),
  #[error("marker must be a visible ASCII character, got {0:?}")]
  NotAscii(char),
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("failed to parse config: {0}")]
  BadConfig(#[from] toml::de::Error),
  #[error("invalid config: {0}")]
  BadMarker(#[from] MarkerError),
  #[error("failed to read config file '{}': {source}", path.display())]
  Error { path: PathBuf, source: io::Error },
}

/// Parses a marker given as text into its byte.
pub fn parse_marker(value: &str) -> Result<u8, MarkerError> {
  let mut chars = value.chars();
  let (Some(ch), None) = (chars.next(), chars.next()) else {
    return Err(MarkerError::Length(value.to_string()));
  };
  if !ch.is_ascii_graphic() {
    return Err(MarkerError::NotAscii(ch));
  }
  Ok(ch as u8)
}

impl Config {
  pub fn from_toml(text: &str) -> Result<Self, ConfigLoadError> {
    let raw: ConfigRaw = toml::from_str(text)?;
    let defaults = Self::default();

    let marker = match raw.marker {
      Some(marker) => parse_marker(&marker)?,
      None => defaults.marker,
    };

    Ok(Self {
      marker,
      check: raw.check.unwrap_or(defaults.check),
    })
  }

  /// Loads the configuration from an explicit path, which must exist.
  pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
    let text = fs::read_to_string(path).map_err(|source| {
      ConfigLoadError::Error {
        path: path.to_path_buf(),
        source,
      }
    })?;
    Self::from_toml(&text)
  }

  /// Loads `path` when given, otherwise the default config file. A missing
  /// default file yields [`Config::default`].
  pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
    if let Some(path) = path {
      return Self::load(path);
    }

    let Some(path) = paths::config_file() else {
      log::debug!("no config directory available, using defaults");
      return Ok(Self::default());
    };

    match Self::load(&path) {
      Err(ConfigLoadError::Error { source, .. }) if source.kind() == ErrorKind::NotFound => {
        log::debug!("no config at {}, using defaults", path.display());
        Ok(Self::default())
      },
      result => result,
    }
  }
}
