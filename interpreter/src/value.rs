use crate::error::RuntimeError;
use itertools::Itertools;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
  Integer,
  Float,
  String,
  Bool,
  IntegerVector,
  FloatVector,
  StringVector,
  BoolVector,
}

impl ValueType {
  pub fn name(self) -> &'static str {
    match self {
      Self::Integer => "Integer",
      Self::Float => "Float",
      Self::String => "String",
      Self::Bool => "Bool",
      Self::IntegerVector => "IntegerVector",
      Self::FloatVector => "FloatVector",
      Self::StringVector => "StringVector",
      Self::BoolVector => "BoolVector",
    }
  }

  /// Resolve a type name as written in source
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "Integer" => Some(Self::Integer),
      "Float" => Some(Self::Float),
      "String" => Some(Self::String),
      "Bool" => Some(Self::Bool),
      "IntegerVector" => Some(Self::IntegerVector),
      "FloatVector" => Some(Self::FloatVector),
      "StringVector" => Some(Self::StringVector),
      "BoolVector" => Some(Self::BoolVector),
      _ => None,
    }
  }
}

impl fmt::Display for ValueType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A runtime value. Values are copied on assignment and argument binding, so
/// two named bindings never alias the same storage.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Integer(i64),
  Float(f64),
  String(String),
  Bool(bool),
  IntegerVector(Vec<i64>),
  FloatVector(Vec<f64>),
  StringVector(Vec<String>),
  BoolVector(Vec<bool>),
}

impl Value {
  pub fn value_type(&self) -> ValueType {
    match self {
      Self::Integer(_) => ValueType::Integer,
      Self::Float(_) => ValueType::Float,
      Self::String(_) => ValueType::String,
      Self::Bool(_) => ValueType::Bool,
      Self::IntegerVector(_) => ValueType::IntegerVector,
      Self::FloatVector(_) => ValueType::FloatVector,
      Self::StringVector(_) => ValueType::StringVector,
      Self::BoolVector(_) => ValueType::BoolVector,
    }
  }

  pub fn is_type(&self, target: ValueType) -> bool {
    self.value_type() == target
  }

  /// Identity for matching types, widening for Integer to Float (scalar and
  /// element-wise). Every other conversion fails; there is deliberately no
  /// string to number or bool to number coercion.
  #[allow(clippy::cast_precision_loss)]
  pub fn convert_to(&self, target: ValueType) -> Result<Value, RuntimeError> {
    if self.is_type(target) {
      return Ok(self.clone());
    }

    match (self, target) {
      (Self::Integer(value), ValueType::Float) => Ok(Self::Float(*value as f64)),
      (Self::IntegerVector(values), ValueType::FloatVector) => Ok(Self::FloatVector(
        values.iter().map(|&value| value as f64).collect(),
      )),
      _ => Err(RuntimeError::TypeConversion {
        from: self.value_type().name(),
        to: target.name(),
      }),
    }
  }
}

impl Default for Value {
  fn default() -> Self {
    Self::Integer(0)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Integer(value) => write!(f, "{value}"),
      Self::Float(value) => write!(f, "{value}"),
      Self::String(value) => write!(f, "{value}"),
      Self::Bool(value) => write!(f, "{value}"),
      Self::IntegerVector(values) => write!(f, "[{}]", values.iter().join(", ")),
      Self::FloatVector(values) => write!(f, "[{}]", values.iter().join(", ")),
      Self::StringVector(values) => write!(f, "[{}]", values.iter().join(", ")),
      Self::BoolVector(values) => write!(f, "[{}]", values.iter().join(", ")),
    }
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Self::Integer(value)
  }
}
impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}
impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}
impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}
impl From<String> for Value {
  fn from(value: String) -> Self {
    Self::String(value)
  }
}
impl From<Vec<i64>> for Value {
  fn from(values: Vec<i64>) -> Self {
    Self::IntegerVector(values)
  }
}
impl From<Vec<f64>> for Value {
  fn from(values: Vec<f64>) -> Self {
    Self::FloatVector(values)
  }
}
