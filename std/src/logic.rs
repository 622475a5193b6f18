use crate::maths::as_float;
use larch_interpreter::{RuntimeError, Value};

fn comparison(
  operation: &'static str,
  args: &[Value],
  compare: fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
  match args {
    [a, b] => Ok(Value::Bool(compare(
      as_float(operation, a)?,
      as_float(operation, b)?,
    ))),
    _ => Err(RuntimeError::ArgumentError(format!(
      "'{operation}' expects exactly two operands"
    ))),
  }
}

pub fn less_than(args: &[Value]) -> Result<Value, RuntimeError> {
  comparison("less-than?", args, |a, b| a < b)
}

pub fn greater_than(args: &[Value]) -> Result<Value, RuntimeError> {
  comparison("greater-than?", args, |a, b| a > b)
}

pub fn less_equal(args: &[Value]) -> Result<Value, RuntimeError> {
  comparison("less-equal?", args, |a, b| a <= b)
}

pub fn greater_equal(args: &[Value]) -> Result<Value, RuntimeError> {
  comparison("greater-equal?", args, |a, b| a >= b)
}

/// Numbers compare by value across Integer and Float; anything else
/// compares structurally
pub fn equals(args: &[Value]) -> Result<Value, RuntimeError> {
  match args {
    [a, b] => {
      let numeric = |value: &Value| matches!(value, Value::Integer(_) | Value::Float(_));
      if numeric(a) && numeric(b) {
        return comparison("equals?", args, |a, b| a == b);
      }
      Ok(Value::Bool(a == b))
    }
    _ => Err(RuntimeError::ArgumentError(
      "'equals?' expects exactly two operands".to_string(),
    )),
  }
}

pub fn not(args: &[Value]) -> Result<Value, RuntimeError> {
  match args {
    [Value::Bool(value)] => Ok(Value::Bool(!value)),
    _ => Err(RuntimeError::ArgumentError(
      "'not' expects a single Bool argument".to_string(),
    )),
  }
}

pub fn and(args: &[Value]) -> Result<Value, RuntimeError> {
  for value in args {
    match value {
      Value::Bool(false) => return Ok(Value::Bool(false)),
      Value::Bool(true) => {}
      other => return Err(bool_operand("and", other)),
    }
  }
  Ok(Value::Bool(true))
}

pub fn or(args: &[Value]) -> Result<Value, RuntimeError> {
  for value in args {
    match value {
      Value::Bool(true) => return Ok(Value::Bool(true)),
      Value::Bool(false) => {}
      other => return Err(bool_operand("or", other)),
    }
  }
  Ok(Value::Bool(false))
}

fn bool_operand(operation: &str, value: &Value) -> RuntimeError {
  RuntimeError::ArgumentError(format!(
    "'{operation}' expects Bool operands, but received {}",
    value.value_type()
  ))
}
