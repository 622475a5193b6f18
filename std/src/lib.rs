//! The builtin functions a host registers before running a script. The
//! language core ships none of these; everything a program can call beyond
//! its own definitions comes from here.

use larch_interpreter::{
  Environment, Function, NativeFn, NativeFunction, Parameter, ValueType,
};

mod io;
mod logic;
mod maths;
mod vectors;

fn register(
  env: &mut Environment,
  name: &'static str,
  parameters: impl IntoIterator<Item = Parameter>,
  func: NativeFn,
) {
  env.declare_function(
    Environment::GLOBAL,
    name,
    Function::Native(NativeFunction::new(name, parameters, func)),
  );
}

pub fn register_globals(env: &mut Environment) {
  // arithmetic keeps Integer results for all-Integer operands, and switches
  // to Float as soon as any operand is a Float
  register(env, "+", [Parameter::any_variadic("operands")], maths::add);
  register(env, "add", [Parameter::any_variadic("operands")], maths::add);
  register(
    env,
    "-",
    [Parameter::any("from"), Parameter::any_variadic("operands")],
    maths::subtract,
  );
  register(
    env,
    "subtract",
    [Parameter::any("from"), Parameter::any_variadic("operands")],
    maths::subtract,
  );
  register(
    env,
    "multiply",
    [Parameter::any_variadic("operands")],
    maths::multiply,
  );
  register(
    env,
    "divide",
    [Parameter::any("value"), Parameter::any_variadic("operands")],
    maths::divide,
  );
  register(
    env,
    "sqrt",
    [Parameter::new("value", ValueType::Float)],
    maths::sqrt,
  );

  register(
    env,
    "less-than?",
    [Parameter::any("a"), Parameter::any("b")],
    logic::less_than,
  );
  register(
    env,
    "greater-than?",
    [Parameter::any("a"), Parameter::any("b")],
    logic::greater_than,
  );
  register(
    env,
    "less-equal?",
    [Parameter::any("a"), Parameter::any("b")],
    logic::less_equal,
  );
  register(
    env,
    "greater-equal?",
    [Parameter::any("a"), Parameter::any("b")],
    logic::greater_equal,
  );
  register(
    env,
    "equals?",
    [Parameter::any("a"), Parameter::any("b")],
    logic::equals,
  );
  register(
    env,
    "not",
    [Parameter::new("value", ValueType::Bool)],
    logic::not,
  );
  register(
    env,
    "and",
    [Parameter::variadic("conditions", ValueType::Bool)],
    logic::and,
  );
  register(
    env,
    "or",
    [Parameter::variadic("conditions", ValueType::Bool)],
    logic::or,
  );

  register(
    env,
    "make-vector",
    [Parameter::variadic("elements", ValueType::Float)],
    vectors::make_vector,
  );
  register(
    env,
    "length",
    [Parameter::any("collection")],
    vectors::length,
  );
  register(
    env,
    "nth",
    [
      Parameter::any("collection"),
      Parameter::new("index", ValueType::Integer),
    ],
    vectors::nth,
  );

  register(env, "print", [Parameter::any_variadic("values")], io::print);
}
