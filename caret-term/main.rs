use std::io;

use anyhow::{
  Context,
  Result,
};

use crate::{
  application::Application,
  cli::CliOptions,
  config::Config,
};

mod application;
mod cli;
mod config;
mod logging;
mod paths;

fn main() -> Result<()> {
  let args = CliOptions::parse()?;

  logging::setup_logging(args.verbosity, args.log_file.as_deref())
    .context("failed to initialize logging")?;

  let mut config = Config::load_or_default(args.config_file.as_deref())
    .context("could not load configuration")?;
  if let Some(marker) = args.marker {
    config.marker = marker;
  }
  config.check |= args.check;
  log::debug!("effective configuration: {config:?}");

  let input = application::read_input(&args.input)?;

  let stdout = io::stdout();
  Application::new(&config).execute(&input, &mut stdout.lock())?;

  Ok(())
}
