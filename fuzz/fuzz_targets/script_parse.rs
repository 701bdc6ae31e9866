#![no_main]

use caret_core::{
  Buffer,
  Script,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let Ok(script) = Script::parse(data) else {
    return;
  };

  let declared = script.len();
  let mut buffer = Buffer::new();
  let mut applied = 0;
  for command in script {
    let Ok(command) = command else {
      break;
    };
    buffer.apply(command);
    applied += 1;
  }

  assert!(applied <= declared);
  assert!(buffer.validate().is_ok());
});
