//! Edit commands and their dispatch onto a [`Buffer`].

use std::fmt;

use crate::buffer::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
  /// Type one byte to the left of the cursor.
  Insert(u8),
  Left,
  Right,
  /// Delete the byte to the left of the cursor.
  Backspace,
}

impl Command {
  pub const INSERT: &'static str = "INSERT";
  pub const LEFT: &'static str = "LEFT";
  pub const RIGHT: &'static str = "RIGHT";
  pub const BACKSPACE: &'static str = "BACKSPACE";

  pub const fn name(self) -> &'static str {
    match self {
      Self::Insert(_) => Self::INSERT,
      Self::Left => Self::LEFT,
      Self::Right => Self::RIGHT,
      Self::Backspace => Self::BACKSPACE,
    }
  }
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Insert(ch) => write!(f, "{} {}", self.name(), char::from(*ch)),
      _ => f.write_str(self.name()),
    }
  }
}

impl Buffer {
  /// Applies `command` at the cursor. Returns `false` when the command was a
  /// no-op because the cursor sat at the relevant end of the buffer.
  pub fn apply(&mut self, command: Command) -> bool {
    let changed = match command {
      Command::Insert(ch) => self.insert(ch),
      Command::Left => self.move_left(),
      Command::Right => self.move_right(),
      Command::Backspace => self.backspace(),
    };
    log::trace!("{command}: changed={changed} buffer={}", self);
    changed
  }
}
