//! Cursor-based byte buffer engine.
//!
//! A [`Buffer`] is a doubly linked chain of single-byte [`node::Node`]s held
//! in an arena and addressed by [`NodeId`] handles. One node is the
//! [`Cursor`]; it always carries the marker byte, so printing the buffer shows
//! where the cursor sits.
//!
//! # Usage
//!
//! ```
//! use caret_core::{
//!   Buffer,
//!   Command,
//!   Script,
//! };
//!
//! let mut buffer = Buffer::new();
//! for command in Script::parse("3\nINSERT a\nINSERT b\nLEFT\n")? {
//!   buffer.apply(command?);
//! }
//! assert_eq!(buffer.to_string(), "a|b");
//!
//! buffer.apply(Command::Backspace);
//! assert_eq!(buffer.to_string(), "|b");
//! # Ok::<(), caret_core::ScriptError>(())
//! ```

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod node;
pub mod script;

pub use buffer::{
  Buffer,
  DEFAULT_MARKER,
  InvariantError,
};
pub use command::Command;
pub use cursor::Cursor;
pub use node::NodeId;
pub use script::{
  CommandError,
  Malformed,
  Script,
  ScriptError,
};
