use crate::{
  environment::{Environment, ScopeId},
  error::RuntimeError,
  evaluator,
  value::{Value, ValueType},
};
use larch_syntax::ast::Node;
use smallvec::SmallVec;
use smartstring::alias::String;

/// What a parameter will accept. User-defined functions always declare one
/// of the eight value types; `Any` is reserved for host builtins such as
/// `print` which take whatever they are given.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParameterType {
  Any,
  Typed(ValueType),
}

#[derive(Clone, Debug)]
pub struct Parameter {
  pub name: String,
  pub parameter_type: ParameterType,
  pub variadic: bool,
}

impl Parameter {
  pub fn new(name: &str, value_type: ValueType) -> Self {
    Self {
      name: name.into(),
      parameter_type: ParameterType::Typed(value_type),
      variadic: false,
    }
  }

  pub fn variadic(name: &str, value_type: ValueType) -> Self {
    Self {
      name: name.into(),
      parameter_type: ParameterType::Typed(value_type),
      variadic: true,
    }
  }

  pub fn any(name: &str) -> Self {
    Self {
      name: name.into(),
      parameter_type: ParameterType::Any,
      variadic: false,
    }
  }

  pub fn any_variadic(name: &str) -> Self {
    Self {
      name: name.into(),
      parameter_type: ParameterType::Any,
      variadic: true,
    }
  }
}

pub type Parameters = SmallVec<[Parameter; 4]>;
pub type NativeFn = fn(&[Value]) -> Result<Value, RuntimeError>;

pub struct NativeFunction {
  pub name: &'static str,
  pub parameters: Parameters,
  pub func: NativeFn,
}

impl NativeFunction {
  pub fn new(
    name: &'static str,
    parameters: impl IntoIterator<Item = Parameter>,
    func: NativeFn,
  ) -> Self {
    Self {
      name,
      parameters: parameters.into_iter().collect(),
      func,
    }
  }
}

pub struct UserFunction {
  pub name: String,
  pub parameters: Parameters,
  pub return_type: ValueType,
  pub body: Vec<Node>,
  /// The scope the function was declared in; calls run in a fresh child of
  /// this scope, not of the caller's scope
  pub scope: ScopeId,
}

pub enum Function {
  Native(NativeFunction),
  User(UserFunction),
}

impl Function {
  pub fn name(&self) -> &str {
    match self {
      Self::Native(native) => native.name,
      Self::User(user) => &user.name,
    }
  }

  pub fn parameters(&self) -> &[Parameter] {
    match self {
      Self::Native(native) => &native.parameters,
      Self::User(user) => &user.parameters,
    }
  }

  /// Validation is shared between builtins and user functions, so every
  /// call is checked the same way before any of its body runs
  pub fn execute(
    &self,
    env: &mut Environment,
    arguments: Vec<Value>,
  ) -> Result<Value, RuntimeError> {
    let arguments = self.validate_arguments(arguments)?;

    match self {
      Self::Native(native) => (native.func)(&arguments),
      Self::User(user) => user.call(env, arguments),
    }
  }

  /// Checks arity against the fixed parameter count, then checks (and where
  /// needed converts) every argument against its parameter's declared type.
  /// Returns the arguments with conversions applied.
  fn validate_arguments(&self, mut arguments: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
    let parameters = self.parameters();

    let Some(last) = parameters.last() else {
      if arguments.is_empty() {
        return Ok(arguments);
      }
      return Err(RuntimeError::ArgumentError(format!(
        "'{}' takes no arguments, but {} were provided",
        self.name(),
        arguments.len()
      )));
    };

    let fixed = parameters.len() - usize::from(last.variadic);

    if arguments.len() < fixed {
      return Err(RuntimeError::ArgumentError(format!(
        "'{}' expects at least {} arguments, but {} were provided",
        self.name(),
        fixed,
        arguments.len()
      )));
    }
    if !last.variadic && arguments.len() > parameters.len() {
      return Err(RuntimeError::ArgumentError(format!(
        "'{}' expects {} arguments, but {} were provided",
        self.name(),
        parameters.len(),
        arguments.len()
      )));
    }

    for index in 0..arguments.len() {
      let parameter = if index < fixed {
        &parameters[index]
      } else {
        last
      };
      let argument = std::mem::take(&mut arguments[index]);
      arguments[index] = check_argument(self.name(), parameter, argument)?;
    }

    Ok(arguments)
  }
}

fn check_argument(
  function: &str,
  parameter: &Parameter,
  argument: Value,
) -> Result<Value, RuntimeError> {
  match parameter.parameter_type {
    ParameterType::Any => Ok(argument),
    ParameterType::Typed(expected) if argument.is_type(expected) => Ok(argument),
    ParameterType::Typed(expected) => argument.convert_to(expected).map_err(|_| {
      RuntimeError::ArgumentError(format!(
        "argument '{}' of '{}' expects {}, but received {}",
        parameter.name,
        function,
        expected.name(),
        argument.value_type().name()
      ))
    }),
  }
}

impl UserFunction {
  fn call(&self, env: &mut Environment, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
    let scope = env.push_scope(&self.name, self.scope);
    let result = self.run(env, scope, arguments);
    env.pop_scope();
    result
  }

  fn run(
    &self,
    env: &mut Environment,
    scope: ScopeId,
    mut arguments: Vec<Value>,
  ) -> Result<Value, RuntimeError> {
    let variadic = self
      .parameters
      .last()
      .is_some_and(|parameter| parameter.variadic);
    let fixed = self.parameters.len() - usize::from(variadic);

    let rest = arguments.split_off(fixed.min(arguments.len()));
    for (parameter, value) in self.parameters.iter().zip(arguments) {
      env.declare_variable(scope, &parameter.name, value);
    }
    if variadic {
      let parameter = &self.parameters[fixed];
      let collected = collect_variadic(parameter, rest)?;
      env.declare_variable(scope, &parameter.name, collected);
    }

    let mut result = Value::default();
    for statement in &self.body {
      result = evaluator::evaluate(statement, env, scope)?;
    }
    Ok(result)
  }
}

/// The arguments beyond the fixed parameters become one vector value, so the
/// variadic parameter must declare a scalar element type
fn collect_variadic(parameter: &Parameter, values: Vec<Value>) -> Result<Value, RuntimeError> {
  let scalar_error = || {
    RuntimeError::ArgumentError(format!(
      "variadic parameter '{}' must declare a scalar element type",
      parameter.name
    ))
  };
  let mismatch = |value: &Value| {
    RuntimeError::ArgumentError(format!(
      "variadic parameter '{}' received a {} element",
      parameter.name,
      value.value_type().name()
    ))
  };

  let ParameterType::Typed(element_type) = parameter.parameter_type else {
    return Err(scalar_error());
  };

  match element_type {
    ValueType::Integer => {
      let mut elements = Vec::with_capacity(values.len());
      for value in &values {
        match value {
          Value::Integer(element) => elements.push(*element),
          other => return Err(mismatch(other)),
        }
      }
      Ok(Value::IntegerVector(elements))
    }
    ValueType::Float => {
      let mut elements = Vec::with_capacity(values.len());
      for value in &values {
        match value {
          Value::Float(element) => elements.push(*element),
          other => return Err(mismatch(other)),
        }
      }
      Ok(Value::FloatVector(elements))
    }
    ValueType::String => {
      let mut elements = Vec::with_capacity(values.len());
      for value in values {
        match value {
          Value::String(element) => elements.push(element),
          other => return Err(mismatch(&other)),
        }
      }
      Ok(Value::StringVector(elements))
    }
    ValueType::Bool => {
      let mut elements = Vec::with_capacity(values.len());
      for value in &values {
        match value {
          Value::Bool(element) => elements.push(*element),
          other => return Err(mismatch(other)),
        }
      }
      Ok(Value::BoolVector(elements))
    }
    _ => Err(scalar_error()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn double(args: &[Value]) -> Result<Value, RuntimeError> {
    match args {
      [Value::Integer(value)] => Ok(Value::Integer(value * 2)),
      _ => Err(RuntimeError::ArgumentError("expected an Integer".into())),
    }
  }

  fn native(parameters: impl IntoIterator<Item = Parameter>) -> Function {
    Function::Native(NativeFunction::new("double", parameters, double))
  }

  #[test]
  fn should_execute_native_function() {
    let mut env = Environment::new();
    let function = native([Parameter::new("value", ValueType::Integer)]);

    assert_eq!(
      function.execute(&mut env, vec![Value::Integer(4)]),
      Ok(Value::Integer(8))
    );
  }

  #[test]
  fn should_reject_arguments_to_zero_parameter_function() {
    let mut env = Environment::new();
    let function = native([]);

    let result = function.execute(&mut env, vec![Value::Integer(1)]);
    assert!(matches!(result, Err(RuntimeError::ArgumentError(_))));
  }

  #[test]
  fn should_reject_too_few_arguments() {
    let mut env = Environment::new();
    let function = native([
      Parameter::new("a", ValueType::Integer),
      Parameter::new("b", ValueType::Integer),
    ]);

    let result = function.execute(&mut env, vec![Value::Integer(1)]);
    assert!(matches!(result, Err(RuntimeError::ArgumentError(_))));
  }

  #[test]
  fn should_reject_too_many_arguments() {
    let mut env = Environment::new();
    let function = native([Parameter::new("value", ValueType::Integer)]);

    let result = function.execute(
      &mut env,
      vec![Value::Integer(1), Value::Integer(2)],
    );
    assert!(matches!(result, Err(RuntimeError::ArgumentError(_))));
  }

  #[test]
  fn should_reject_mismatched_argument_type() {
    let mut env = Environment::new();
    let function = native([Parameter::new("value", ValueType::Integer)]);

    let result = function.execute(&mut env, vec![Value::from("x")]);
    assert!(matches!(result, Err(RuntimeError::ArgumentError(_))));
  }

  #[test]
  fn should_widen_integer_arguments_for_float_parameters() {
    fn halve(args: &[Value]) -> Result<Value, RuntimeError> {
      match args {
        [Value::Float(value)] => Ok(Value::Float(value / 2.0)),
        _ => Err(RuntimeError::ArgumentError("expected a Float".into())),
      }
    }

    let mut env = Environment::new();
    let function = Function::Native(NativeFunction::new(
      "halve",
      [Parameter::new("value", ValueType::Float)],
      halve,
    ));

    assert_eq!(
      function.execute(&mut env, vec![Value::Integer(5)]),
      Ok(Value::Float(2.5))
    );
  }

  #[test]
  fn should_check_every_variadic_argument() {
    fn sum(args: &[Value]) -> Result<Value, RuntimeError> {
      let mut total = 0;
      for value in args {
        if let Value::Integer(value) = value {
          total += value;
        }
      }
      Ok(Value::Integer(total))
    }

    let mut env = Environment::new();
    let function = Function::Native(NativeFunction::new(
      "sum",
      [Parameter::variadic("values", ValueType::Integer)],
      sum,
    ));

    assert_eq!(
      function.execute(
        &mut env,
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
      ),
      Ok(Value::Integer(6))
    );

    let result = function.execute(
      &mut env,
      vec![Value::Integer(1), Value::Bool(true)],
    );
    assert!(matches!(result, Err(RuntimeError::ArgumentError(_))));
  }

  #[test]
  fn should_collect_variadic_tail_into_vector() {
    // (define tail ((first Integer) (rest Integer...)) IntegerVector rest)
    let function = Function::User(UserFunction {
      name: "tail".into(),
      parameters: [
        Parameter::new("first", ValueType::Integer),
        Parameter::variadic("rest", ValueType::Integer),
      ]
      .into_iter()
      .collect(),
      return_type: ValueType::IntegerVector,
      body: vec![Node::Symbol {
        name: "rest".into(),
      }],
      scope: Environment::GLOBAL,
    });

    let mut env = Environment::new();
    assert_eq!(
      function.execute(
        &mut env,
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
      ),
      Ok(Value::IntegerVector(vec![2, 3]))
    );

    // no excess arguments leaves an empty vector
    assert_eq!(
      function.execute(&mut env, vec![Value::Integer(1)]),
      Ok(Value::IntegerVector(vec![]))
    );
  }

  #[test]
  fn should_bind_parameters_positionally() {
    // (define pick ((a Integer) (b Integer)) Integer b)
    let function = Function::User(UserFunction {
      name: "pick".into(),
      parameters: [
        Parameter::new("a", ValueType::Integer),
        Parameter::new("b", ValueType::Integer),
      ]
      .into_iter()
      .collect(),
      return_type: ValueType::Integer,
      body: vec![Node::Symbol { name: "b".into() }],
      scope: Environment::GLOBAL,
    });

    let mut env = Environment::new();
    assert_eq!(
      function.execute(&mut env, vec![Value::Integer(1), Value::Integer(2)]),
      Ok(Value::Integer(2))
    );
  }

  #[test]
  fn should_return_default_for_empty_body() {
    let function = Function::User(UserFunction {
      name: "nothing".into(),
      parameters: Parameters::new(),
      body: vec![],
      return_type: ValueType::Integer,
      scope: Environment::GLOBAL,
    });

    let mut env = Environment::new();
    assert_eq!(function.execute(&mut env, vec![]), Ok(Value::default()));
  }

  #[test]
  fn should_pop_call_scope_after_execution() {
    let function = Function::User(UserFunction {
      name: "leaky".into(),
      parameters: [Parameter::new("local", ValueType::Integer)]
        .into_iter()
        .collect(),
      return_type: ValueType::Integer,
      body: vec![Node::Symbol {
        name: "local".into(),
      }],
      scope: Environment::GLOBAL,
    });

    let mut env = Environment::new();
    function
      .execute(&mut env, vec![Value::Integer(1)])
      .unwrap();

    assert_eq!(
      env.get_variable(Environment::GLOBAL, "local"),
      Err(RuntimeError::UndefinedSymbol("local".to_string()))
    );
  }
}
