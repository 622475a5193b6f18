use crate::{error::RuntimeError, function::Function, value::Value};
use ahash::AHashMap as HashMap;
use smartstring::alias::String;
use std::rc::Rc;

/// Index of a scope in the [`Environment`] arena.
///
/// Scopes are referenced by index instead of by pointer, so a scope can
/// never be used after the call frame that created it has been popped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScopeId(usize);

struct Scope {
  name: String,
  parent: Option<ScopeId>,
  variables: HashMap<String, Value>,
  functions: HashMap<String, Rc<Function>>,
}

/// The scope arena. The global scope lives at index 0 for the lifetime of
/// the environment; call scopes are pushed on function entry and popped on
/// return, so the arena behaves as a scope stack.
pub struct Environment {
  scopes: Vec<Scope>,
}

impl Environment {
  pub const GLOBAL: ScopeId = ScopeId(0);

  pub fn new() -> Self {
    Self {
      scopes: vec![Scope {
        name: "global".into(),
        parent: None,
        variables: HashMap::new(),
        functions: HashMap::new(),
      }],
    }
  }

  pub fn push_scope(&mut self, name: &str, parent: ScopeId) -> ScopeId {
    self.scopes.push(Scope {
      name: name.into(),
      parent: Some(parent),
      variables: HashMap::new(),
      functions: HashMap::new(),
    });
    ScopeId(self.scopes.len() - 1)
  }

  pub fn pop_scope(&mut self) {
    debug_assert!(self.scopes.len() > 1, "the global scope is never popped");
    self.scopes.pop();
  }

  /// The scope's name prefixed by its ancestors, e.g. `global.fibonacci`
  pub fn scope_name(&self, scope: ScopeId) -> std::string::String {
    let mut names = Vec::new();
    let mut current = Some(scope);
    while let Some(ScopeId(index)) = current {
      names.push(self.scopes[index].name.as_str());
      current = self.scopes[index].parent;
    }
    names.reverse();
    names.join(".")
  }

  pub fn get_variable(&self, scope: ScopeId, name: &str) -> Result<&Value, RuntimeError> {
    let mut current = Some(scope);
    while let Some(ScopeId(index)) = current {
      if let Some(value) = self.scopes[index].variables.get(name) {
        return Ok(value);
      }
      current = self.scopes[index].parent;
    }
    Err(RuntimeError::UndefinedSymbol(name.to_string()))
  }

  /// Declares (or silently overwrites) a binding in the given scope only;
  /// never touches an outer scope
  pub fn declare_variable(&mut self, scope: ScopeId, name: &str, value: Value) {
    self.scopes[scope.0].variables.insert(name.into(), value);
  }

  /// Overwrites an existing binding wherever in the chain it was declared;
  /// assignment can reach outer scopes, declaration cannot
  pub fn assign_variable(
    &mut self,
    scope: ScopeId,
    name: &str,
    value: Value,
  ) -> Result<(), RuntimeError> {
    let mut current = Some(scope);
    while let Some(ScopeId(index)) = current {
      if let Some(binding) = self.scopes[index].variables.get_mut(name) {
        *binding = value;
        return Ok(());
      }
      current = self.scopes[index].parent;
    }
    Err(RuntimeError::UndefinedSymbol(name.to_string()))
  }

  pub fn get_function(&self, scope: ScopeId, name: &str) -> Result<Rc<Function>, RuntimeError> {
    let mut current = Some(scope);
    while let Some(ScopeId(index)) = current {
      if let Some(function) = self.scopes[index].functions.get(name) {
        return Ok(Rc::clone(function));
      }
      current = self.scopes[index].parent;
    }
    Err(RuntimeError::UndefinedFunction(name.to_string()))
  }

  pub fn declare_function(&mut self, scope: ScopeId, name: &str, function: Function) {
    self.scopes[scope.0]
      .functions
      .insert(name.into(), Rc::new(function));
  }
}

impl Default for Environment {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn should_resolve_variables_through_parent_chain() {
    let mut env = Environment::new();
    env.declare_variable(Environment::GLOBAL, "x", Value::Integer(1));

    let inner = env.push_scope("inner", Environment::GLOBAL);
    assert_eq!(env.get_variable(inner, "x"), Ok(&Value::Integer(1)));
  }

  #[test]
  fn should_fail_lookup_at_root() {
    let env = Environment::new();
    assert_eq!(
      env.get_variable(Environment::GLOBAL, "missing"),
      Err(RuntimeError::UndefinedSymbol("missing".to_string()))
    );
  }

  #[test]
  fn should_shadow_in_local_scope_without_touching_parent() {
    let mut env = Environment::new();
    env.declare_variable(Environment::GLOBAL, "x", Value::Integer(1));

    let inner = env.push_scope("inner", Environment::GLOBAL);
    env.declare_variable(inner, "x", Value::Integer(2));

    assert_eq!(env.get_variable(inner, "x"), Ok(&Value::Integer(2)));
    assert_eq!(
      env.get_variable(Environment::GLOBAL, "x"),
      Ok(&Value::Integer(1))
    );
  }

  #[test]
  fn should_assign_at_the_scope_where_declared() {
    let mut env = Environment::new();
    env.declare_variable(Environment::GLOBAL, "x", Value::Integer(1));

    let inner = env.push_scope("inner", Environment::GLOBAL);
    env.assign_variable(inner, "x", Value::Integer(5)).unwrap();

    assert_eq!(
      env.get_variable(Environment::GLOBAL, "x"),
      Ok(&Value::Integer(5))
    );
  }

  #[test]
  fn should_fail_assignment_to_undeclared_name() {
    let mut env = Environment::new();
    assert_eq!(
      env.assign_variable(Environment::GLOBAL, "x", Value::Integer(1)),
      Err(RuntimeError::UndefinedSymbol("x".to_string()))
    );
  }

  #[test]
  fn should_redeclare_in_same_scope_silently() {
    let mut env = Environment::new();
    env.declare_variable(Environment::GLOBAL, "x", Value::Integer(1));
    env.declare_variable(Environment::GLOBAL, "x", Value::Integer(2));
    assert_eq!(
      env.get_variable(Environment::GLOBAL, "x"),
      Ok(&Value::Integer(2))
    );
  }

  #[test]
  fn should_name_scopes_with_ancestry() {
    let mut env = Environment::new();
    let call = env.push_scope("fibonacci", Environment::GLOBAL);
    assert_eq!(env.scope_name(call), "global.fibonacci");
  }

  #[test]
  fn should_pop_scopes_in_stack_order() {
    let mut env = Environment::new();
    let first = env.push_scope("first", Environment::GLOBAL);
    let _second = env.push_scope("second", first);
    env.pop_scope();
    env.pop_scope();

    let again = env.push_scope("again", Environment::GLOBAL);
    assert_eq!(again, first);
  }
}
