use std::{error, fmt};

/// Every way an evaluation can fail. All of these are fatal to the current
/// evaluation and propagate to the host; nothing is caught internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeError {
  UndefinedSymbol(String),
  UndefinedFunction(String),
  ArgumentError(String),
  TypeError {
    expected: &'static str,
    found: &'static str,
  },
  TypeConversion {
    from: &'static str,
    to: &'static str,
  },
}

impl fmt::Display for RuntimeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UndefinedSymbol(name) => write!(f, "Undefined symbol '{name}'"),
      Self::UndefinedFunction(name) => write!(f, "Undefined function '{name}'"),
      Self::ArgumentError(message) => write!(f, "{message}"),
      Self::TypeError { expected, found } => {
        write!(f, "Expected a {expected} value, but found {found}")
      }
      Self::TypeConversion { from, to } => {
        write!(f, "Cannot convert from {from} to {to}")
      }
    }
  }
}
impl error::Error for RuntimeError {}
