use caret_core::Command;

const MAX_OPS: usize = 4096;

/// Decodes fuzzer bytes into a command sequence, one command per byte pair.
pub fn commands_from_bytes(data: &[u8]) -> Vec<Command> {
  let mut cursor = ByteCursor::new(data);
  let count = cursor.next_usize(MAX_OPS);
  let mut commands = Vec::with_capacity(count);
  for _ in 0..count {
    if cursor.is_exhausted() {
      break;
    }
    commands.push(match cursor.next_u8() % 4 {
      0 => Command::Insert(cursor.next_u8()),
      1 => Command::Left,
      2 => Command::Right,
      _ => Command::Backspace,
    });
  }
  commands
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn is_exhausted(&self) -> bool {
    self.pos >= self.data.len()
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8() as u16;
    let hi = self.next_u8() as u16;
    lo | (hi << 8)
  }

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u16() as usize) % (max + 1)
  }
}
