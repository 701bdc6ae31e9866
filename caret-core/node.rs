//! Arena storage for the nodes of a buffer chain.
//!
//! Every node lives in a [`Nodes`] arena and refers to its neighbours through
//! [`NodeId`] handles instead of references. The arena is the only owner; a
//! cursor is just another handle into it.

use slotmap::SlotMap;

slotmap::new_key_type! {
  /// Generational handle to a [`Node`] stored in a [`Nodes`] arena.
  pub struct NodeId;
}

/// A single byte together with its links to the neighbouring nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
  value: u8,
  prev:  Option<NodeId>,
  next:  Option<NodeId>,
}

impl Node {
  pub const fn new(value: u8) -> Self {
    Self {
      value,
      prev: None,
      next: None,
    }
  }

  pub const fn value(&self) -> u8 {
    self.value
  }

  pub const fn prev(&self) -> Option<NodeId> {
    self.prev
  }

  pub const fn next(&self) -> Option<NodeId> {
    self.next
  }
}

/// Owner of every node in a chain.
///
/// Mutation is crate-private: splices and removals keep `prev`/`next`
/// symmetric before returning, so no caller can observe a half-linked chain.
#[derive(Debug, Clone, Default)]
pub struct Nodes {
  slots: SlotMap<NodeId, Node>,
}

impl Nodes {
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn contains(&self, id: NodeId) -> bool {
    self.slots.contains_key(id)
  }

  pub fn get(&self, id: NodeId) -> Option<&Node> {
    self.slots.get(id)
  }

  pub fn value(&self, id: NodeId) -> Option<u8> {
    self.slots.get(id).map(Node::value)
  }

  pub fn prev(&self, id: NodeId) -> Option<NodeId> {
    self.slots.get(id).and_then(Node::prev)
  }

  pub fn next(&self, id: NodeId) -> Option<NodeId> {
    self.slots.get(id).and_then(Node::next)
  }

  /// Walks `prev` links from `id` until a node without a predecessor.
  pub fn head_from(&self, id: NodeId) -> NodeId {
    let mut head = id;
    while let Some(prev) = self.prev(head) {
      head = prev;
    }
    head
  }

  /// Walks `next` links from `id` until a node without a successor.
  pub fn tail_from(&self, id: NodeId) -> NodeId {
    let mut tail = id;
    while let Some(next) = self.next(tail) {
      tail = next;
    }
    tail
  }

  /// Allocates an unlinked node.
  pub(crate) fn alloc(&mut self, value: u8) -> NodeId {
    self.slots.insert(Node::new(value))
  }

  /// Links a new node holding `value` immediately before `at`.
  ///
  /// Returns `None` if `at` is not a live node.
  pub(crate) fn splice_before(&mut self, at: NodeId, value: u8) -> Option<NodeId> {
    let prev = self.slots.get(at)?.prev;
    let id = self.slots.insert(Node {
      value,
      prev,
      next: Some(at),
    });

    if let Some(node) = prev.and_then(|prev| self.slots.get_mut(prev)) {
      node.next = Some(id);
    }
    if let Some(node) = self.slots.get_mut(at) {
      node.prev = Some(id);
    }

    Some(id)
  }

  /// Detaches `id` from the chain and frees it.
  ///
  /// The former neighbours are joined to each other (or lose the link when
  /// `id` sat at an extremity) before the node is released.
  pub(crate) fn unlink(&mut self, id: NodeId) -> Option<Node> {
    let Node { prev, next, .. } = *self.slots.get(id)?;

    if let Some(node) = prev.and_then(|prev| self.slots.get_mut(prev)) {
      node.next = next;
    }
    if let Some(node) = next.and_then(|next| self.slots.get_mut(next)) {
      node.prev = prev;
    }

    self.slots.remove(id)
  }

  /// Exchanges the values held by `a` and `b`. Links are untouched.
  pub(crate) fn swap_values(&mut self, a: NodeId, b: NodeId) -> bool {
    let (Some(a_value), Some(b_value)) = (self.value(a), self.value(b)) else {
      return false;
    };

    if let Some(node) = self.slots.get_mut(a) {
      node.value = b_value;
    }
    if let Some(node) = self.slots.get_mut(b) {
      node.value = a_value;
    }
    true
  }
}
