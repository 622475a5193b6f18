use larch_interpreter::{RuntimeError, Value};

/// Builds a FloatVector; the typed variadic signature has already widened
/// integer operands to floats by the time this runs
pub fn make_vector(args: &[Value]) -> Result<Value, RuntimeError> {
  let elements = args
    .iter()
    .map(|value| match value {
      Value::Float(value) => Some(*value),
      _ => None,
    })
    .collect::<Option<Vec<f64>>>();

  match elements {
    Some(elements) => Ok(Value::FloatVector(elements)),
    None => Err(RuntimeError::ArgumentError(
      "'make-vector' expects Float elements".to_string(),
    )),
  }
}

#[allow(clippy::cast_possible_wrap)]
pub fn length(args: &[Value]) -> Result<Value, RuntimeError> {
  match args {
    [Value::IntegerVector(values)] => Ok(Value::Integer(values.len() as i64)),
    [Value::FloatVector(values)] => Ok(Value::Integer(values.len() as i64)),
    [Value::StringVector(values)] => Ok(Value::Integer(values.len() as i64)),
    [Value::BoolVector(values)] => Ok(Value::Integer(values.len() as i64)),
    [Value::String(value)] => Ok(Value::Integer(value.len() as i64)),
    [other] => Err(RuntimeError::ArgumentError(format!(
      "'length' expects a vector, but received {}",
      other.value_type()
    ))),
    _ => Err(RuntimeError::ArgumentError(
      "'length' expects a single argument".to_string(),
    )),
  }
}

pub fn nth(args: &[Value]) -> Result<Value, RuntimeError> {
  let [collection, Value::Integer(index)] = args else {
    return Err(RuntimeError::ArgumentError(
      "'nth' expects a vector and an Integer index".to_string(),
    ));
  };

  let out_of_range = |len: usize| {
    RuntimeError::ArgumentError(format!(
      "index {index} is out of range for a vector of length {len}"
    ))
  };
  let position = usize::try_from(*index).ok();

  match collection {
    Value::IntegerVector(values) => position
      .and_then(|index| values.get(index))
      .map(|value| Value::Integer(*value))
      .ok_or_else(|| out_of_range(values.len())),
    Value::FloatVector(values) => position
      .and_then(|index| values.get(index))
      .map(|value| Value::Float(*value))
      .ok_or_else(|| out_of_range(values.len())),
    Value::StringVector(values) => position
      .and_then(|index| values.get(index))
      .map(|value| Value::String(value.clone()))
      .ok_or_else(|| out_of_range(values.len())),
    Value::BoolVector(values) => position
      .and_then(|index| values.get(index))
      .map(|value| Value::Bool(*value))
      .ok_or_else(|| out_of_range(values.len())),
    other => Err(RuntimeError::ArgumentError(format!(
      "'nth' expects a vector, but received {}",
      other.value_type()
    ))),
  }
}
