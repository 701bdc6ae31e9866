//! Parsing of command scripts.
//!
//! A script is a line holding the number of commands, followed by one command
//! per line:
//!
//! ```text
//! 3
//! INSERT a
//! INSERT b
//! LEFT
//! ```
//!
//! Scripts are raw bytes, not text: lines end at `\n` (with an optional
//! `\r`), and each command line is split on ASCII whitespace into a name and
//! an optional argument. Names are matched exactly. `INSERT` uses the first
//! byte of its argument whatever that byte is; anything after the expected
//! tokens is ignored with a warning. Lines past the declared count are never
//! read.
//!
//! Parsing works on borrowed input only. Reading it is left to callers.

use std::{
  fmt,
  str::FromStr,
};

use thiserror::Error;

use crate::command::Command;

/// Reason a command line could not be turned into a [`Command`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
  #[error("invalid command '{0}'")]
  Unknown(String),
  #[error(transparent)]
  Malformed(#[from] Malformed),
}

/// Why a script was rejected. Every variant is fatal to the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
  #[error("missing command count")]
  MissingCount,
  #[error("line {line}: invalid command count '{text}'")]
  InvalidCount { line: usize, text: String },
  #[error("line {line}: invalid command '{name}'")]
  InvalidCommand { line: usize, name: String },
  #[error("line {line}: {reason}")]
  MalformedInput { line: usize, reason: Malformed },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Malformed {
  #[error("{} requires a character argument", Command::INSERT)]
  MissingArgument,
  #[error("empty command line")]
  EmptyLine,
  #[error("expected {expected} commands, input ended after {found}")]
  MissingCommand { expected: usize, found: usize },
}

impl ScriptError {
  /// One-based line the error was detected on, if any.
  pub fn line(&self) -> Option<usize> {
    match self {
      Self::MissingCount => None,
      Self::InvalidCount { line, .. }
      | Self::InvalidCommand { line, .. }
      | Self::MalformedInput { line, .. } => Some(*line),
    }
  }

  fn at_line(err: CommandError, line: usize) -> Self {
    match err {
      CommandError::Unknown(name) => Self::InvalidCommand { line, name },
      CommandError::Malformed(reason) => Self::MalformedInput { line, reason },
    }
  }
}

/// Splits raw input at `\n`, dropping one trailing `\r` per line. A final
/// newline does not start an extra empty line.
#[derive(Debug, Clone)]
struct Lines<'a> {
  rest: &'a [u8],
}

impl<'a> Iterator for Lines<'a> {
  type Item = &'a [u8];

  fn next(&mut self) -> Option<Self::Item> {
    let rest = self.rest;
    if rest.is_empty() {
      return None;
    }

    let line = match rest.iter().position(|&byte| byte == b'\n') {
      Some(end) => {
        self.rest = &rest[end + 1..];
        &rest[..end]
      },
      None => {
        self.rest = &[];
        rest
      },
    };

    Some(line.strip_suffix(b"\r").unwrap_or(line))
  }
}

fn tokens(line: &[u8]) -> impl Iterator<Item = &[u8]> {
  line
    .split(u8::is_ascii_whitespace)
    .filter(|token| !token.is_empty())
}

/// A command together with whatever text followed it on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedLine {
  command: Command,
  surplus: Option<String>,
}

fn parse_line(line: &[u8]) -> Result<ParsedLine, CommandError> {
  let mut tokens = tokens(line);
  let name = tokens.next().ok_or(Malformed::EmptyLine)?;

  let command = match std::str::from_utf8(name) {
    Ok(Command::INSERT) => {
      // Tokens are never empty, so the argument always has a first byte.
      let arg = tokens.next().ok_or(Malformed::MissingArgument)?;
      Command::Insert(arg[0])
    },
    Ok(Command::LEFT) => Command::Left,
    Ok(Command::RIGHT) => Command::Right,
    Ok(Command::BACKSPACE) => Command::Backspace,
    _ => {
      return Err(CommandError::Unknown(
        String::from_utf8_lossy(name).into_owned(),
      ));
    },
  };

  let rest = tokens
    .map(String::from_utf8_lossy)
    .collect::<Vec<_>>();
  let surplus = (!rest.is_empty()).then(|| rest.join(" "));

  Ok(ParsedLine { command, surplus })
}

impl Command {
  /// Parses a single command line, ignoring surplus tokens.
  pub fn parse(line: impl AsRef<[u8]>) -> Result<Self, CommandError> {
    parse_line(line.as_ref()).map(|parsed| parsed.command)
  }
}

impl FromStr for Command {
  type Err = CommandError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

/// Reads a command count the way an integer scan would: any signed decimal
/// is accepted and values at or below zero declare no commands.
fn parse_count(text: &[u8]) -> Option<usize> {
  let count = std::str::from_utf8(text).ok()?.parse::<i64>().ok()?;
  Some(usize::try_from(count.max(0)).unwrap_or(usize::MAX))
}

/// Lazily parsed command script.
///
/// Yields at most [`Script::len`] items. After the first error the iterator
/// is fused and yields nothing more.
pub struct Script<'a> {
  lines:    Lines<'a>,
  line:     usize,
  expected: usize,
  parsed:   usize,
  failed:   bool,
}

impl<'a> Script<'a> {
  /// Reads the command count. Blank lines before it are skipped.
  pub fn parse<T: AsRef<[u8]> + ?Sized>(input: &'a T) -> Result<Self, ScriptError> {
    let mut lines = Lines {
      rest: input.as_ref(),
    };
    let mut line = 0;

    let count = loop {
      let Some(current) = lines.next() else {
        return Err(ScriptError::MissingCount);
      };
      line += 1;
      let trimmed = current.trim_ascii();
      if !trimmed.is_empty() {
        break trimmed;
      }
    };

    let expected = parse_count(count).ok_or_else(|| {
      ScriptError::InvalidCount {
        line,
        text: String::from_utf8_lossy(count).into_owned(),
      }
    })?;

    log::debug!("script declares {expected} command(s)");

    Ok(Self {
      lines,
      line,
      expected,
      parsed: 0,
      failed: false,
    })
  }

  /// Number of commands declared by the count line.
  pub fn len(&self) -> usize {
    self.expected
  }

  pub fn is_empty(&self) -> bool {
    self.expected == 0
  }

  /// Parses every declared command, stopping at the first error.
  pub fn into_commands(self) -> Result<Vec<Command>, ScriptError> {
    self.collect()
  }
}

impl fmt::Debug for Script<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Script")
      .field("line", &self.line)
      .field("expected", &self.expected)
      .field("parsed", &self.parsed)
      .field("failed", &self.failed)
      .finish_non_exhaustive()
  }
}

impl Iterator for Script<'_> {
  type Item = Result<Command, ScriptError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.parsed == self.expected {
      return None;
    }

    let Some(text) = self.lines.next() else {
      self.failed = true;
      return Some(Err(ScriptError::MalformedInput {
        line:   self.line + 1,
        reason: Malformed::MissingCommand {
          expected: self.expected,
          found:    self.parsed,
        },
      }));
    };
    self.line += 1;

    match parse_line(text) {
      Ok(ParsedLine { command, surplus }) => {
        if let Some(surplus) = surplus {
          log::warn!("line {}: ignoring trailing input '{surplus}'", self.line);
        }
        self.parsed += 1;
        Some(Ok(command))
      },
      Err(err) => {
        self.failed = true;
        Some(Err(ScriptError::at_line(err, self.line)))
      },
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.failed {
      (0, Some(0))
    } else {
      (0, Some(self.expected - self.parsed))
    }
  }
}
