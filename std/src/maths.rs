use larch_interpreter::{RuntimeError, Value};

#[allow(clippy::cast_precision_loss)]
pub fn as_float(operation: &str, value: &Value) -> Result<f64, RuntimeError> {
  match value {
    Value::Integer(value) => Ok(*value as f64),
    Value::Float(value) => Ok(*value),
    other => Err(RuntimeError::ArgumentError(format!(
      "'{operation}' expects numeric operands, but received {}",
      other.value_type()
    ))),
  }
}

/// All-integer operands keep integer arithmetic; any float operand switches
/// the whole operation to floats
fn all_integers(args: &[Value]) -> Option<Vec<i64>> {
  args
    .iter()
    .map(|value| match value {
      Value::Integer(value) => Some(*value),
      _ => None,
    })
    .collect()
}

pub fn add(args: &[Value]) -> Result<Value, RuntimeError> {
  if let Some(integers) = all_integers(args) {
    return Ok(Value::Integer(integers.iter().sum()));
  }

  let mut total = 0.0;
  for value in args {
    total += as_float("+", value)?;
  }
  Ok(Value::Float(total))
}

pub fn subtract(args: &[Value]) -> Result<Value, RuntimeError> {
  if let Some(integers) = all_integers(args) {
    return match integers.split_first() {
      Some((first, [])) => Ok(Value::Integer(-first)),
      Some((first, rest)) => Ok(Value::Integer(rest.iter().fold(*first, |total, value| {
        total - value
      }))),
      None => Err(missing_operands("-")),
    };
  }

  let Some((first, rest)) = args.split_first() else {
    return Err(missing_operands("-"));
  };
  let mut total = as_float("-", first)?;
  if rest.is_empty() {
    return Ok(Value::Float(-total));
  }
  for value in rest {
    total -= as_float("-", value)?;
  }
  Ok(Value::Float(total))
}

pub fn multiply(args: &[Value]) -> Result<Value, RuntimeError> {
  if let Some(integers) = all_integers(args) {
    return Ok(Value::Integer(integers.iter().product()));
  }

  let mut total = 1.0;
  for value in args {
    total *= as_float("*", value)?;
  }
  Ok(Value::Float(total))
}

pub fn divide(args: &[Value]) -> Result<Value, RuntimeError> {
  let Some((first, rest)) = args.split_first() else {
    return Err(missing_operands("/"));
  };

  if let Some(integers) = all_integers(args) {
    let mut total = integers[0];
    for value in &integers[1..] {
      if *value == 0 {
        return Err(division_by_zero());
      }
      total /= value;
    }
    return Ok(Value::Integer(total));
  }

  let mut total = as_float("/", first)?;
  for value in rest {
    let divisor = as_float("/", value)?;
    if divisor == 0.0 {
      return Err(division_by_zero());
    }
    total /= divisor;
  }
  Ok(Value::Float(total))
}

pub fn sqrt(args: &[Value]) -> Result<Value, RuntimeError> {
  match args {
    [Value::Float(value)] => Ok(Value::Float(value.sqrt())),
    _ => Err(RuntimeError::ArgumentError(
      "'sqrt' expects a single Float argument".to_string(),
    )),
  }
}

fn missing_operands(operation: &str) -> RuntimeError {
  RuntimeError::ArgumentError(format!("'{operation}' expects at least one operand"))
}

fn division_by_zero() -> RuntimeError {
  RuntimeError::ArgumentError("division by zero".to_string())
}
