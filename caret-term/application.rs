use std::{
  fs,
  io::{
    self,
    Read,
    Write,
  },
};

use anyhow::{
  Context,
  Result,
};
use caret_core::{
  Buffer,
  Script,
};

use crate::{
  cli::Input,
  config::Config,
};

/// Drives a single run: parse the script, apply it, print once.
#[derive(Debug)]
pub struct Application {
  buffer: Buffer,
  check:  bool,
}

impl Application {
  pub fn new(config: &Config) -> Self {
    Self {
      buffer: Buffer::with_marker(config.marker),
      check:  config.check,
    }
  }

  pub fn buffer(&self) -> &Buffer {
    &self.buffer
  }

  /// Applies every command of `input` in order. The first parse error or
  /// invariant violation aborts the run.
  pub fn run_script(&mut self, input: &[u8]) -> Result<usize> {
    let script = Script::parse(input)?;
    log::info!("running {} command(s)", script.len());

    let mut applied = 0;
    for command in script {
      let command = command?;
      self.buffer.apply(command);
      applied += 1;

      if self.check {
        self
          .buffer
          .validate()
          .with_context(|| format!("buffer corrupted by command {applied} ({command})"))?;
      }
    }

    log::info!(
      "applied {applied} command(s), buffer holds {} byte(s)",
      self.buffer.len()
    );
    Ok(applied)
  }

  /// Writes the buffer as a single line.
  pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
    out.write_all(&self.buffer.to_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
  }

  /// Runs `input` and prints the result. Nothing reaches `out` unless every
  /// command was applied.
  pub fn execute<W: Write>(&mut self, input: &[u8], out: &mut W) -> Result<usize> {
    let applied = self
      .run_script(input)
      .context("failed to run commands")?;
    self.print(out).context("failed to write buffer")?;
    Ok(applied)
  }
}

/// Reads the whole script as raw bytes; no text encoding is assumed.
pub fn read_input(input: &Input) -> Result<Vec<u8>> {
  match input {
    Input::Stdin => {
      let mut bytes = Vec::new();
      io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("failed to read commands from stdin")?;
      Ok(bytes)
    },
    Input::File(path) => {
      fs::read(path)
        .with_context(|| format!("failed to read commands from '{}'", path.display()))
    },
  }
}
