mod environment;
mod error;
mod evaluator;
mod function;
mod value;

// The scope chain which scripts execute against
pub use environment::{Environment, ScopeId};

// Evaluate a parsed script
pub use evaluator::evaluate;

// Host-registered and user-defined functions
pub use function::{
  Function, NativeFn, NativeFunction, Parameter, ParameterType, Parameters, UserFunction,
};

// Runtime values and their types
pub use error::RuntimeError;
pub use value::{Value, ValueType};
