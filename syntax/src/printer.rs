//! Renders an AST back to canonical, indented source. Re-parsing the output
//! produces a structurally equal tree, which makes the printer usable both
//! for debugging dumps and for round-trip tests.

use crate::ast::{Node, Visitor};
use std::fmt::Write;

const INDENT: &str = "  ";

pub fn print(node: &Node) -> String {
  let mut printer = AstPrinter::new();
  node.visit(&mut printer);
  printer.finish()
}

pub struct AstPrinter {
  output: String,
  depth: usize,
}

impl AstPrinter {
  pub fn new() -> Self {
    Self {
      output: String::new(),
      depth: 0,
    }
  }

  pub fn finish(self) -> String {
    self.output
  }

  fn pad(&mut self) {
    for _ in 0..self.depth {
      self.output.push_str(INDENT);
    }
  }

  fn statement(&mut self, node: &Node) {
    match node {
      Node::Script { statements } => {
        for statement in statements {
          self.statement(statement);
        }
      }
      Node::FunctionDeclaration {
        name,
        parameters,
        return_type,
        body,
      } => {
        self.pad();
        let _ = write!(self.output, "(define {name} (");
        for (index, parameter) in parameters.iter().enumerate() {
          if index > 0 {
            self.output.push(' ');
          }
          let _ = write!(self.output, "({} {})", parameter.name, parameter.type_name);
        }
        let _ = writeln!(self.output, ") {return_type}");

        self.body(body);
        self.pad();
        self.output.push_str(")\n");
      }
      Node::For {
        index,
        start,
        end,
        step,
        body,
      } => {
        self.pad();
        let _ = write!(self.output, "(for {index} ");
        self.inline(start);
        self.output.push(' ');
        self.inline(end);
        self.output.push(' ');
        self.inline(step);
        self.output.push('\n');

        self.body(body);
        self.pad();
        self.output.push_str(")\n");
      }
      Node::While { condition, body } => {
        self.pad();
        self.output.push_str("(while ");
        self.inline(condition);
        self.output.push('\n');

        self.body(body);
        self.pad();
        self.output.push_str(")\n");
      }
      _ => {
        self.pad();
        self.inline(node);
        self.output.push('\n');
      }
    }
  }

  fn body(&mut self, body: &[Node]) {
    self.depth += 1;
    for statement in body {
      self.statement(statement);
    }
    self.depth -= 1;
  }

  fn inline(&mut self, node: &Node) {
    match node {
      Node::Symbol { name } => self.output.push_str(name),
      Node::Integer { value } => {
        let _ = write!(self.output, "{value}");
      }
      Node::Float { value } => {
        // keep a decimal point so the literal is read back as a float
        if value.fract() == 0.0 && value.is_finite() {
          let _ = write!(self.output, "{value:.1}");
        } else {
          let _ = write!(self.output, "{value}");
        }
      }
      Node::Boolean { value } => {
        let _ = write!(self.output, "{value}");
      }
      Node::String { value } => {
        let _ = write!(self.output, "\"{value}\"");
      }
      Node::VariableDeclaration {
        name,
        type_name,
        value,
      } => {
        let _ = write!(self.output, "(let ({name} {type_name}) ");
        self.inline(value);
        self.output.push(')');
      }
      Node::VariableAssignment { name, value } => {
        let _ = write!(self.output, "(set {name} ");
        self.inline(value);
        self.output.push(')');
      }
      Node::FunctionCall { name, arguments } => {
        let _ = write!(self.output, "({name}");
        for argument in arguments {
          self.output.push(' ');
          self.inline(argument);
        }
        self.output.push(')');
      }
      Node::If {
        condition,
        then_branch,
        else_branch,
      } => {
        self.output.push_str("(if ");
        self.inline(condition);
        self.output.push(' ');
        self.inline(then_branch);
        self.output.push(' ');
        self.inline(else_branch);
        self.output.push(')');
      }
      Node::FunctionDeclaration {
        name,
        parameters,
        return_type,
        body,
      } => {
        let _ = write!(self.output, "(define {name} (");
        for (index, parameter) in parameters.iter().enumerate() {
          if index > 0 {
            self.output.push(' ');
          }
          let _ = write!(self.output, "({} {})", parameter.name, parameter.type_name);
        }
        let _ = write!(self.output, ") {return_type}");
        for statement in body {
          self.output.push(' ');
          self.inline(statement);
        }
        self.output.push(')');
      }
      Node::For {
        index,
        start,
        end,
        step,
        body,
      } => {
        let _ = write!(self.output, "(for {index} ");
        self.inline(start);
        self.output.push(' ');
        self.inline(end);
        self.output.push(' ');
        self.inline(step);
        for statement in body {
          self.output.push(' ');
          self.inline(statement);
        }
        self.output.push(')');
      }
      Node::While { condition, body } => {
        self.output.push_str("(while ");
        self.inline(condition);
        for statement in body {
          self.output.push(' ');
          self.inline(statement);
        }
        self.output.push(')');
      }
      Node::Script { statements } => {
        for (index, statement) in statements.iter().enumerate() {
          if index > 0 {
            self.output.push(' ');
          }
          self.inline(statement);
        }
      }
    }
  }
}

impl Default for AstPrinter {
  fn default() -> Self {
    Self::new()
  }
}

impl Visitor for AstPrinter {
  fn visit(&mut self, node: &Node) {
    self.statement(node);
  }
}
