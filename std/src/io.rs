use larch_interpreter::{RuntimeError, Value};

/// Prints its arguments space-separated on one line and passes the last one
/// through, so a print can wrap any expression
pub fn print(args: &[Value]) -> Result<Value, RuntimeError> {
  let line = args
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" ");
  println!("{line}");

  Ok(args.last().cloned().unwrap_or_default())
}
