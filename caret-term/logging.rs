use std::path::Path;

use anyhow::{
  Context,
  Result,
};
use log::LevelFilter;

pub fn level_for(verbosity: u8) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Installs the global logger. Records go to `log_file` when given and to
/// stderr otherwise; stdout carries only the buffer.
pub fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<()> {
  let base_config = fern::Dispatch::new()
    .level(level_for(verbosity))
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    });

  let base_config = match log_file {
    Some(path) => {
      let file = fern::log_file(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;
      base_config.chain(file)
    },
    None => base_config.chain(std::io::stderr()),
  };

  base_config.apply()?;
  Ok(())
}
