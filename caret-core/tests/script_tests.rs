use caret_core::{
  Buffer,
  Command,
  Malformed,
  Script,
  ScriptError,
};

fn run(text: impl AsRef<[u8]>) -> Result<Buffer, ScriptError> {
  let mut buffer = Buffer::new();
  for command in Script::parse(text.as_ref())? {
    buffer.apply(command?);
    assert_eq!(buffer.validate(), Ok(()));
  }
  Ok(buffer)
}

fn output(text: &str) -> String {
  run(text).expect("script runs").to_string()
}

#[test]
fn test_empty_script_prints_marker() {
  assert_eq!(output("0\n"), "|");
}

#[test]
fn test_negative_count_runs_nothing() {
  assert_eq!(output("-1\nINSERT a\n"), "|");
}

#[test]
fn test_non_ascii_bytes_are_inserted_verbatim() {
  let buffer = run(b"3\nINSERT \xe9\nINSERT \xff\nLEFT\n").expect("script runs");
  assert_eq!(buffer.to_bytes(), b"\xe9|\xff");
  assert_eq!(buffer.len(), 3);
}

#[test]
fn test_insert_then_left() {
  assert_eq!(output("3\nINSERT a\nINSERT b\nLEFT\n"), "a|b");
}

#[test]
fn test_typing_a_word_and_fixing_a_typo() {
  let script = "\
8
INSERT h
INSERT e
INSERT k
BACKSPACE
INSERT l
INSERT l
INSERT o
LEFT
";
  assert_eq!(output(script), "hell|o");
}

#[test]
fn test_editing_in_the_middle() {
  let script = "\
9
INSERT a
INSERT c
LEFT
INSERT b
RIGHT
RIGHT
INSERT d
LEFT
BACKSPACE
";
  assert_eq!(output(script), "ab|d");
}

#[test]
fn test_moves_past_either_end_are_silent() {
  let script = "\
7
LEFT
RIGHT
BACKSPACE
INSERT x
RIGHT
LEFT
LEFT
";
  assert_eq!(output(script), "|x");
}

#[test]
fn test_backspace_everything() {
  let script = "\
6
INSERT a
INSERT b
INSERT c
BACKSPACE
BACKSPACE
BACKSPACE
";
  let buffer = run(script).expect("script runs");
  assert_eq!(buffer.to_string(), "|");
  assert_eq!(buffer.len(), 1);
}

#[test]
fn test_invalid_command_aborts() {
  let err = run("2\nINSERT a\nDELETE\n").unwrap_err();
  assert_eq!(err, ScriptError::InvalidCommand {
    line: 3,
    name: "DELETE".to_string(),
  });
}

#[test]
fn test_insert_without_argument_aborts() {
  let err = run("1\nINSERT\n").unwrap_err();
  assert_eq!(err, ScriptError::MalformedInput {
    line:   2,
    reason: Malformed::MissingArgument,
  });
}

#[test]
fn test_commands_stop_at_first_error() {
  let mut buffer = Buffer::new();
  let mut applied = Vec::new();
  for command in Script::parse("3\nINSERT a\nJUMP\nINSERT b\n").expect("count") {
    match command {
      Ok(command) => {
        buffer.apply(command);
        applied.push(command);
      },
      Err(err) => {
        assert_eq!(err.line(), Some(3));
      },
    }
  }

  assert_eq!(applied, vec![Command::Insert(b'a')]);
}

#[test]
fn test_parsed_commands_round_trip_through_display() {
  let commands = Script::parse("4\nINSERT z\nLEFT\nRIGHT\nBACKSPACE\n")
    .expect("count")
    .into_commands()
    .expect("commands");
  let text = commands
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("\n");
  let script = format!("{}\n{text}\n", commands.len());

  assert_eq!(
    Script::parse(&script).expect("count").into_commands(),
    Ok(commands)
  );
}
