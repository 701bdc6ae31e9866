use std::{
  ffi::OsString,
  path::PathBuf,
};

use anyhow::Result;
use clap::{
  ArgAction,
  Parser,
};

use crate::config;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
  Stdin,
  File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct CliOptions {
  pub verbosity:   u8,
  pub log_file:    Option<PathBuf>,
  pub config_file: Option<PathBuf>,
  pub marker:      Option<u8>,
  pub check:       bool,
  pub input:       Input,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }

  pub fn try_parse_from<I, T>(args: I) -> Result<Self>
  where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
  {
    let raw = RawCli::try_parse_from(args)?;
    raw.try_into()
  }
}

#[derive(Parser, Debug)]
#[command(name = "caret", about, version, long_about = None)]
struct RawCli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file instead of stderr
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,

  /// Character rendered at the cursor position
  #[arg(short = 'm', long = "marker", value_name = "CHAR", value_parser = parse_marker)]
  marker: Option<u8>,

  /// Validate buffer invariants after every command
  #[arg(long = "check")]
  check: bool,

  /// Command script to run ("-" or absent reads stdin)
  #[arg(value_name = "INPUT")]
  input: Option<PathBuf>,
}

impl TryFrom<RawCli> for CliOptions {
  type Error = anyhow::Error;

  fn try_from(raw: RawCli) -> Result<Self> {
    let input = match raw.input {
      Some(path) if path.as_os_str() != "-" => Input::File(path),
      _ => Input::Stdin,
    };

    Ok(Self {
      verbosity: raw.verbosity,
      log_file: raw.log_file,
      config_file: raw.config_file,
      marker: raw.marker,
      check: raw.check,
      input,
    })
  }
}

fn parse_marker(value: &str) -> std::result::Result<u8, String> {
  config::parse_marker(value).map_err(|err| err.to_string())
}
