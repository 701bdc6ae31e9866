//! The edited byte sequence and its cursor.
//!
//! A [`Buffer`] stores no head or tail handle. The head is recomputed from the
//! cursor by following `prev` links each time it is needed, so it can never
//! fall out of sync with the chain.

use std::fmt::{
  self,
  Write as _,
};

use thiserror::Error;

use crate::{
  cursor::Cursor,
  node::{
    Node,
    NodeId,
    Nodes,
  },
};

/// Marker byte used when none is configured.
pub const DEFAULT_MARKER: u8 = b'|';

/// Ways in which a chain can be found inconsistent by [`Buffer::validate`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
  #[error("cursor refers to a node that is not in the arena")]
  MissingCursor,
  #[error("a link points at a node that is not in the arena")]
  DanglingLink,
  #[error("links between neighbouring nodes are not symmetric")]
  AsymmetricLink,
  #[error("the chain contains a cycle")]
  Cycle,
  #[error("{unreachable} node(s) are not reachable from the cursor")]
  UnreachableNode { unreachable: usize },
  #[error("cursor node holds {found:?} instead of the marker {marker:?}")]
  MarkerMismatch { marker: char, found: char },
}

/// A chain of single-byte nodes with one node distinguished as the cursor.
#[derive(Debug, Clone)]
pub struct Buffer {
  nodes:  Nodes,
  cursor: Cursor,
  marker: u8,
}

impl Default for Buffer {
  fn default() -> Self {
    Self::new()
  }
}

impl Buffer {
  /// Creates a buffer holding only the [`DEFAULT_MARKER`].
  pub fn new() -> Self {
    Self::with_marker(DEFAULT_MARKER)
  }

  /// Creates a buffer holding only `marker`.
  pub fn with_marker(marker: u8) -> Self {
    let mut nodes = Nodes::default();
    let node = nodes.alloc(marker);
    Self {
      nodes,
      cursor: Cursor::new(node),
      marker,
    }
  }

  pub fn marker(&self) -> u8 {
    self.marker
  }

  pub fn cursor(&self) -> Cursor {
    self.cursor
  }

  pub fn nodes(&self) -> &Nodes {
    &self.nodes
  }

  /// Number of nodes in the chain, the marker included.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// A buffer always holds at least its marker.
  pub fn is_empty(&self) -> bool {
    false
  }

  pub fn head(&self) -> NodeId {
    self.nodes.head_from(self.cursor.node())
  }

  pub fn tail(&self) -> NodeId {
    self.nodes.tail_from(self.cursor.node())
  }

  /// Number of nodes to the left of the cursor.
  pub fn cursor_offset(&self) -> usize {
    let mut offset = 0;
    let mut current = self.cursor.node();
    while let Some(prev) = self.nodes.prev(current) {
      offset += 1;
      current = prev;
    }
    offset
  }

  pub fn insert(&mut self, ch: u8) -> bool {
    self.cursor.insert(&mut self.nodes, ch)
  }

  pub fn move_left(&mut self) -> bool {
    self.cursor.move_left(&mut self.nodes)
  }

  pub fn move_right(&mut self) -> bool {
    self.cursor.move_right(&mut self.nodes)
  }

  pub fn backspace(&mut self) -> bool {
    self.cursor.backspace(&mut self.nodes)
  }

  /// Bytes from head to tail, the marker included.
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      nodes: &self.nodes,
      next:  Some(self.head()),
    }
  }

  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(self.len());
    bytes.extend(self.iter());
    bytes
  }

  /// Checks every structural invariant of the chain.
  ///
  /// Walks are bounded by the arena size so a corrupted chain is reported
  /// instead of looping forever.
  pub fn validate(&self) -> Result<(), InvariantError> {
    let cursor = self.cursor.node();
    let node = self
      .nodes
      .get(cursor)
      .ok_or(InvariantError::MissingCursor)?;
    if node.value() != self.marker {
      return Err(InvariantError::MarkerMismatch {
        marker: char::from(self.marker),
        found:  char::from(node.value()),
      });
    }

    let total = self.nodes.len();

    let mut head = cursor;
    let mut steps = 0;
    while let Some(prev) = self.link(head, |node| node.prev())? {
      if self.link(prev, |node| node.next())? != Some(head) {
        return Err(InvariantError::AsymmetricLink);
      }
      steps += 1;
      if steps >= total {
        return Err(InvariantError::Cycle);
      }
      head = prev;
    }

    let mut visited = 1;
    let mut current = head;
    while let Some(next) = self.link(current, |node| node.next())? {
      if self.link(next, |node| node.prev())? != Some(current) {
        return Err(InvariantError::AsymmetricLink);
      }
      visited += 1;
      if visited > total {
        return Err(InvariantError::Cycle);
      }
      current = next;
    }

    if visited != total {
      return Err(InvariantError::UnreachableNode {
        unreachable: total - visited,
      });
    }

    Ok(())
  }

  fn link(
    &self,
    id: NodeId,
    select: impl FnOnce(&Node) -> Option<NodeId>,
  ) -> Result<Option<NodeId>, InvariantError> {
    self
      .nodes
      .get(id)
      .map(select)
      .ok_or(InvariantError::DanglingLink)
  }
}

/// Renders ASCII bytes as-is and every other byte as a `\xNN` escape instead
/// of reinterpreting it as a character. Use [`Buffer::to_bytes`] for the exact
/// output.
impl fmt::Display for Buffer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for byte in self.iter() {
      if byte.is_ascii() {
        f.write_char(char::from(byte))?;
      } else {
        write!(f, "\\x{byte:02x}")?;
      }
    }
    Ok(())
  }
}

/// Iterator over the bytes of a [`Buffer`], head first.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
  nodes: &'a Nodes,
  next:  Option<NodeId>,
}

impl Iterator for Iter<'_> {
  type Item = u8;

  fn next(&mut self) -> Option<u8> {
    let node = self.nodes.get(self.next?)?;
    self.next = node.next();
    Some(node.value())
  }
}

impl<'a> IntoIterator for &'a Buffer {
  type IntoIter = Iter<'a>;
  type Item = u8;

  fn into_iter(self) -> Iter<'a> {
    self.iter()
  }
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    Arbitrary,
    Gen,
  };

  use super::*;

  #[derive(Debug, Clone, Copy)]
  enum Op {
    Insert(u8),
    Left,
    Right,
    Backspace,
  }

  impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
      match g.choose(&[0u8, 1, 2, 3]).copied().unwrap_or(0) {
        0 => Op::Insert(*g.choose(b"abcxyz01 ").unwrap_or(&b'a')),
        1 => Op::Left,
        2 => Op::Right,
        _ => Op::Backspace,
      }
    }
  }

  fn run(buffer: &mut Buffer, op: Op) -> bool {
    match op {
      Op::Insert(ch) => buffer.insert(ch),
      Op::Left => buffer.move_left(),
      Op::Right => buffer.move_right(),
      Op::Backspace => buffer.backspace(),
    }
  }

  fn buffer_from(ops: &[Op]) -> Buffer {
    let mut buffer = Buffer::new();
    for op in ops {
      run(&mut buffer, *op);
    }
    buffer
  }

  quickcheck::quickcheck! {
      fn chain_stays_valid_after_every_op(ops: Vec<Op>) -> bool {
          let mut buffer = Buffer::new();
          ops.into_iter().all(|op| {
              run(&mut buffer, op);
              buffer.validate().is_ok()
          })
      }

      fn len_matches_serialized_output(ops: Vec<Op>) -> bool {
          let buffer = buffer_from(&ops);
          buffer.len() == buffer.to_bytes().len()
      }

      fn cursor_offset_locates_marker(ops: Vec<Op>) -> bool {
          let buffer = buffer_from(&ops);
          let bytes = buffer.to_bytes();
          bytes.iter().position(|&b| b == DEFAULT_MARKER) == Some(buffer.cursor_offset())
      }

      fn backspace_undoes_insert(ops: Vec<Op>, ch: u8) -> bool {
          let mut buffer = buffer_from(&ops);
          let before = buffer.to_bytes();
          let cursor = buffer.cursor();

          buffer.insert(ch);
          buffer.backspace();

          buffer.to_bytes() == before && buffer.cursor() == cursor
      }

      fn backspace_undoes_insert_after_round_trip(ops: Vec<Op>, ch: u8) -> bool {
          let mut buffer = buffer_from(&ops);
          let before = buffer.to_bytes();
          let offset = buffer.cursor_offset();

          buffer.insert(ch);
          buffer.move_left();
          buffer.move_right();
          buffer.backspace();

          buffer.to_bytes() == before && buffer.cursor_offset() == offset
      }

      fn insert_left_right_restores_position(ops: Vec<Op>, ch: u8) -> bool {
          let mut buffer = buffer_from(&ops);
          buffer.insert(ch);
          let before = buffer.to_bytes();
          let offset = buffer.cursor_offset();

          buffer.move_left();
          buffer.move_right();

          buffer.to_bytes() == before
            && buffer.cursor_offset() == offset
            && buffer.validate().is_ok()
      }
  }

  #[test]
  fn fresh_buffer_prints_marker_alone() {
    let buffer = Buffer::new();
    assert_eq!(buffer.to_string(), "|");
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.cursor_offset(), 0);
    assert_eq!(buffer.head(), buffer.cursor().node());
    assert_eq!(buffer.tail(), buffer.cursor().node());
    assert_eq!(buffer.validate(), Ok(()));
  }

  #[test]
  fn insert_insert_left_scenario() {
    let mut buffer = Buffer::new();

    buffer.insert(b'a');
    assert_eq!(buffer.to_string(), "a|");
    buffer.insert(b'b');
    assert_eq!(buffer.to_string(), "ab|");
    buffer.move_left();
    assert_eq!(buffer.to_string(), "a|b");
    assert_eq!(buffer.validate(), Ok(()));
  }

  #[test]
  fn insert_left_right_on_fresh_buffer() {
    let mut buffer = Buffer::new();
    buffer.insert(b'x');
    let after_insert = (buffer.to_string(), buffer.cursor_offset());

    assert!(buffer.move_left());
    assert!(buffer.move_right());
    assert_eq!((buffer.to_string(), buffer.cursor_offset()), after_insert);
  }

  #[test]
  fn backspace_at_head_is_noop() {
    let mut buffer = Buffer::new();
    buffer.insert(b'a');
    buffer.move_left();
    let cursor = buffer.cursor();

    assert!(!buffer.backspace());
    assert_eq!(buffer.to_string(), "|a");
    assert_eq!(buffer.cursor(), cursor);
  }

  #[test]
  fn move_right_at_tail_is_noop() {
    let mut buffer = Buffer::new();
    buffer.insert(b'a');
    let cursor = buffer.cursor();

    assert!(!buffer.move_right());
    assert_eq!(buffer.to_string(), "a|");
    assert_eq!(buffer.cursor(), cursor);
  }

  #[test]
  fn head_follows_deletions_at_the_front() {
    let mut buffer = Buffer::new();
    buffer.insert(b'a');
    buffer.insert(b'b');
    let first = buffer.head();

    buffer.move_left();
    buffer.backspace();
    assert_ne!(buffer.head(), first);
    assert_eq!(buffer.head(), buffer.cursor().node());
    assert_eq!(buffer.to_string(), "|b");
  }

  #[test]
  fn custom_marker_is_rendered() {
    let mut buffer = Buffer::with_marker(b'^');
    buffer.insert(b'a');
    assert_eq!(buffer.marker(), b'^');
    assert_eq!(buffer.to_string(), "a^");
    assert_eq!(buffer.validate(), Ok(()));
  }

  #[test]
  fn display_escapes_non_ascii_bytes() {
    let buffer = buffer_from(&[
      Op::Insert(0xc3),
      Op::Insert(0xa9),
      Op::Insert(b'\\'),
    ]);
    assert_eq!(buffer.to_bytes(), b"\xc3\xa9\\|");
    assert_eq!(buffer.to_string(), "\\xc3\\xa9\\|");
  }

  #[test]
  fn iter_walks_head_to_tail() {
    let buffer = buffer_from(&[
      Op::Insert(b'h'),
      Op::Insert(b'i'),
      Op::Left,
      Op::Left,
    ]);
    assert_eq!(buffer.iter().collect::<Vec<_>>(), b"|hi".to_vec());
    assert_eq!((&buffer).into_iter().count(), 3);
  }

  #[test]
  fn validate_reports_marker_mismatch() {
    let mut buffer = Buffer::new();
    buffer.insert(b'a');
    buffer.marker = b'#';

    assert_eq!(
      buffer.validate(),
      Err(InvariantError::MarkerMismatch {
        marker: '#',
        found:  '|',
      })
    );
  }

  #[test]
  fn validate_reports_unreachable_nodes() {
    let mut buffer = Buffer::new();
    buffer.insert(b'a');
    buffer.nodes.alloc(b'z');

    assert_eq!(
      buffer.validate(),
      Err(InvariantError::UnreachableNode { unreachable: 1 })
    );
  }

  #[test]
  fn validate_reports_missing_cursor() {
    let mut buffer = Buffer::new();
    let other = Buffer::new();
    buffer.cursor = other.cursor();
    buffer.nodes = Nodes::default();

    assert_eq!(buffer.validate(), Err(InvariantError::MissingCursor));
  }
}
