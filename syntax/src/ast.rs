use smallvec::SmallVec;
use smartstring::alias::String;

/// A function parameter: a name together with the name of its declared type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
  pub name: String,
  pub type_name: String,
}

/// The AST is a closed set of node kinds. Each node owns its children, so a
/// tree can be kept alive (for example inside a declared function) after the
/// source it was parsed from has been dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
  Symbol {
    name: String,
  },
  Integer {
    value: i64,
  },
  Float {
    value: f64,
  },
  Boolean {
    value: bool,
  },
  String {
    value: std::string::String,
  },
  VariableDeclaration {
    name: String,
    type_name: String,
    value: Box<Node>,
  },
  VariableAssignment {
    name: String,
    value: Box<Node>,
  },
  FunctionDeclaration {
    name: String,
    parameters: SmallVec<[Parameter; 4]>,
    return_type: String,
    body: Vec<Node>,
  },
  FunctionCall {
    name: String,
    arguments: Vec<Node>,
  },
  If {
    condition: Box<Node>,
    then_branch: Box<Node>,
    else_branch: Box<Node>,
  },
  For {
    index: String,
    start: Box<Node>,
    end: Box<Node>,
    step: Box<Node>,
    body: Vec<Node>,
  },
  While {
    condition: Box<Node>,
    body: Vec<Node>,
  },
  Script {
    statements: Vec<Node>,
  },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
  Symbol,
  Integer,
  Float,
  Boolean,
  String,
  VariableDeclaration,
  VariableAssignment,
  FunctionDeclaration,
  FunctionCall,
  If,
  For,
  While,
  Script,
}

impl Node {
  pub fn kind(&self) -> NodeKind {
    match self {
      Self::Symbol { .. } => NodeKind::Symbol,
      Self::Integer { .. } => NodeKind::Integer,
      Self::Float { .. } => NodeKind::Float,
      Self::Boolean { .. } => NodeKind::Boolean,
      Self::String { .. } => NodeKind::String,
      Self::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
      Self::VariableAssignment { .. } => NodeKind::VariableAssignment,
      Self::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
      Self::FunctionCall { .. } => NodeKind::FunctionCall,
      Self::If { .. } => NodeKind::If,
      Self::For { .. } => NodeKind::For,
      Self::While { .. } => NodeKind::While,
      Self::Script { .. } => NodeKind::Script,
    }
  }

  pub fn visit(&self, visitor: &mut dyn Visitor) {
    visitor.visit(self);
  }
}

/// External traversals (printers, analysers) hook in here; the visitor
/// receives each node and recurses through the public children itself
pub trait Visitor {
  fn visit(&mut self, node: &Node);
}
