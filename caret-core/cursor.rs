//! The movable edit position inside a buffer chain.

use crate::node::{
  NodeId,
  Nodes,
};

/// Handle to the node carrying the marker byte.
///
/// The cursor never owns its node. Moving it swaps the marker with a
/// neighbour's value and reseats the handle, so the node under the cursor
/// always holds the marker and no link is rewired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
  node: NodeId,
}

impl Cursor {
  pub(crate) const fn new(node: NodeId) -> Self {
    Self { node }
  }

  pub const fn node(self) -> NodeId {
    self.node
  }

  /// Types `ch` to the left of the cursor. The cursor stays where it is.
  pub(crate) fn insert(&mut self, nodes: &mut Nodes, ch: u8) -> bool {
    nodes.splice_before(self.node, ch).is_some()
  }

  /// Moves one position toward the head. No-op at the head.
  pub(crate) fn move_left(&mut self, nodes: &mut Nodes) -> bool {
    let Some(prev) = nodes.prev(self.node) else {
      return false;
    };
    if !nodes.swap_values(self.node, prev) {
      return false;
    }
    self.node = prev;
    true
  }

  /// Moves one position toward the tail. No-op at the tail.
  pub(crate) fn move_right(&mut self, nodes: &mut Nodes) -> bool {
    let Some(next) = nodes.next(self.node) else {
      return false;
    };
    if !nodes.swap_values(self.node, next) {
      return false;
    }
    self.node = next;
    true
  }

  /// Deletes the byte immediately left of the cursor. No-op at the head.
  pub(crate) fn backspace(&mut self, nodes: &mut Nodes) -> bool {
    let Some(prev) = nodes.prev(self.node) else {
      return false;
    };
    nodes.unlink(prev).is_some()
  }
}
