#![no_main]

mod common;

use caret_core::{
  Buffer,
  Command,
};
use libfuzzer_sys::fuzz_target;

use crate::common::commands_from_bytes;

fuzz_target!(|data: &[u8]| {
  let mut buffer = Buffer::new();
  let mut expected_len = 1usize;

  for command in commands_from_bytes(data) {
    let changed = buffer.apply(command);
    match (command, changed) {
      (Command::Insert(_), true) => expected_len += 1,
      (Command::Backspace, true) => expected_len -= 1,
      _ => {},
    }

    if let Err(err) = buffer.validate() {
      panic!("{command} broke the chain: {err}");
    }
    assert_eq!(buffer.len(), expected_len);
  }

  assert_eq!(buffer.to_bytes().len(), buffer.len());
  assert_eq!(buffer.head(), buffer.nodes().head_from(buffer.tail()));
});
