use crate::{
  ast::{Node, Parameter},
  tokens::{ColumnNumber, LexError, Lexer, LineNumber, Token, TokenKind},
};
use smallvec::SmallVec;
use std::{error, fmt};

enum Error {
  Lex(LexError),
  UnexpectedToken,
  MismatchedParentheses,
  MalformedNumber,
  ExpectedOpeningParen,
  ExpectedClosingParen,
  ExpectedVariableName,
  ExpectedTypeName,
  ExpectedFunctionName,
  ExpectedParameterName,
  ExpectedParameterType,
  ExpectedReturnType,
  ExpectedIndexName,
  NestedFunctionDefinition,
}
impl Error {
  fn title(&self) -> &'static str {
    match self {
      Self::Lex(LexError::UnknownCharacter) => "Unknown Character",
      Self::Lex(LexError::UnterminatedString) => "Unterminated String",
      Self::Lex(LexError::InvalidScientificNotation) => "Invalid Scientific Notation",
      Self::Lex(LexError::MalformedNumber) | Self::MalformedNumber => "Malformed Number",
      Self::UnexpectedToken => "Unexpected Token",
      Self::MismatchedParentheses => "Mismatched Parentheses",
      Self::ExpectedOpeningParen => "Expected '('",
      Self::ExpectedClosingParen => "Expected ')'",
      Self::ExpectedVariableName => "Expected Variable Name",
      Self::ExpectedTypeName => "Expected Type Name",
      Self::ExpectedFunctionName => "Expected Function Name",
      Self::ExpectedParameterName => "Expected Parameter Name",
      Self::ExpectedParameterType => "Expected Parameter Type",
      Self::ExpectedReturnType => "Expected Return Type",
      Self::ExpectedIndexName => "Expected Index Variable Name",
      Self::NestedFunctionDefinition => "Nested Function Definition",
    }
  }

  fn message(&self, token: &Token) -> String {
    let text = if token.kind == TokenKind::EndOfFile {
      "end of file"
    } else {
      token.value
    };

    match self {
      Self::Lex(LexError::UnknownCharacter) => format!("unknown character '{text}'"),
      Self::Lex(LexError::UnterminatedString) => "missing closing quote \"".to_string(),
      Self::Lex(LexError::InvalidScientificNotation) => {
        format!("'{text}' is missing digits after the exponent")
      }
      Self::Lex(LexError::MalformedNumber) | Self::MalformedNumber => {
        format!("'{text}' is not a valid number")
      }
      Self::UnexpectedToken => format!("'{text}' was not expected here"),
      Self::MismatchedParentheses => "more opening than closing parentheses".to_string(),
      Self::NestedFunctionDefinition => {
        "a function cannot be defined inside another function".to_string()
      }
      _ => format!("but received '{text}'"),
    }
  }

  fn into_diagnostic(self, token: &Token) -> Diagnostic {
    Diagnostic {
      title: self.title().to_string(),
      message: self.message(token),
      line: token.line,
      column: token.column,
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub title: String,
  pub message: String,
  pub line: LineNumber,
  pub column: ColumnNumber,
}
impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error: {}\n\t{}\nat line {}, column {}",
      self.title, self.message, self.line, self.column
    )
  }
}
impl error::Error for Diagnostic {}

type NodeResult = Result<Node, Error>;

/// Parse a whole source buffer into a single `Script` node.
///
/// The first error aborts the parse; there is no recovery.
pub fn parse(source: &str) -> Result<Node, Diagnostic> {
  Parser::new(source).parse()
}

pub struct Parser<'source> {
  lexer: Lexer<'source>,
  current: Token<'source>,

  // `define` may not nest, tracked with a single flag rather than a depth
  inside_define: bool,
}

impl<'source> Parser<'source> {
  pub fn new(source: &'source str) -> Self {
    let mut lexer = Lexer::new(source);
    let current = lexer.next_token();

    Self {
      lexer,
      current,
      inside_define: false,
    }
  }

  pub fn parse(mut self) -> Result<Node, Diagnostic> {
    let mut statements = Vec::new();

    while self.current.kind != TokenKind::EndOfFile {
      match self.expression() {
        Ok(statement) => statements.push(statement),
        Err(error) => return Err(error.into_diagnostic(&self.current)),
      }
    }

    Ok(Node::Script { statements })
  }

  fn advance(&mut self) {
    self.current = self.lexer.next_token();
  }

  fn consume(&mut self, kind: TokenKind, error: Error) -> Result<Token<'source>, Error> {
    if self.current.kind == TokenKind::Error {
      return Err(Error::Lex(
        self.current.error.unwrap_or(LexError::UnknownCharacter),
      ));
    }

    if self.current.kind == kind {
      let token = self.current;
      self.advance();
      Ok(token)
    } else {
      Err(error)
    }
  }

  fn symbol_text(&mut self, error: Error) -> Result<smartstring::alias::String, Error> {
    let token = self.consume(TokenKind::Symbol, error)?;
    Ok(token.value.into())
  }

  /// Any number of leading `(` may wrap a form, as long as the same number
  /// of `)` follow it; `((foo))` and `(foo)` parse identically
  fn expression(&mut self) -> NodeResult {
    let mut open_parens = 0usize;
    while self.current.kind == TokenKind::LeftParen {
      self.advance();
      open_parens += 1;
    }

    let expression = if self.current.kind == TokenKind::Symbol {
      match self.current.value {
        "let" => self.variable_declaration()?,
        "define" => self.function_declaration()?,
        "set" => self.variable_assignment()?,
        "for" => self.for_loop()?,
        "while" => self.while_loop()?,
        "if" => self.if_expression()?,
        _ if open_parens > 0 => self.function_call()?,
        _ => self.atom()?,
      }
    } else {
      self.atom()?
    };

    while open_parens > 0 && self.current.kind == TokenKind::RightParen {
      self.advance();
      open_parens -= 1;
    }
    if open_parens != 0 {
      return Err(Error::MismatchedParentheses);
    }

    Ok(expression)
  }

  fn atom(&mut self) -> NodeResult {
    let token = self.current;

    let node = match token.kind {
      TokenKind::Symbol => Node::Symbol {
        name: token.value.into(),
      },
      TokenKind::Integer => Node::Integer {
        value: token.value.parse().map_err(|_| Error::MalformedNumber)?,
      },
      TokenKind::Float => Node::Float {
        value: token.value.parse().map_err(|_| Error::MalformedNumber)?,
      },
      TokenKind::True => Node::Boolean { value: true },
      TokenKind::False => Node::Boolean { value: false },
      TokenKind::String => Node::String {
        // the delimiting quotes are dropped, the contents stay raw
        value: token.value[1..token.value.len() - 1].to_string(),
      },
      TokenKind::Error => {
        return Err(Error::Lex(token.error.unwrap_or(LexError::UnknownCharacter)));
      }
      _ => return Err(Error::UnexpectedToken),
    };

    self.advance();
    Ok(node)
  }

  // `let (name type) value`
  fn variable_declaration(&mut self) -> NodeResult {
    self.advance();

    self.consume(TokenKind::LeftParen, Error::ExpectedOpeningParen)?;
    let name = self.symbol_text(Error::ExpectedVariableName)?;
    let type_name = self.symbol_text(Error::ExpectedTypeName)?;
    self.consume(TokenKind::RightParen, Error::ExpectedClosingParen)?;

    let value = Box::new(self.expression()?);

    Ok(Node::VariableDeclaration {
      name,
      type_name,
      value,
    })
  }

  // `set name value`
  fn variable_assignment(&mut self) -> NodeResult {
    self.advance();

    let name = self.symbol_text(Error::ExpectedVariableName)?;
    let value = Box::new(self.expression()?);

    Ok(Node::VariableAssignment { name, value })
  }

  // `define name ((param type)...) returnType body...`
  fn function_declaration(&mut self) -> NodeResult {
    if self.inside_define {
      return Err(Error::NestedFunctionDefinition);
    }
    self.inside_define = true;

    self.advance();
    let name = self.symbol_text(Error::ExpectedFunctionName)?;

    self.consume(TokenKind::LeftParen, Error::ExpectedOpeningParen)?;
    let mut parameters = SmallVec::new();
    while self.current.kind != TokenKind::RightParen {
      self.consume(TokenKind::LeftParen, Error::ExpectedOpeningParen)?;
      let parameter_name = self.symbol_text(Error::ExpectedParameterName)?;
      let parameter_type = self.symbol_text(Error::ExpectedParameterType)?;
      self.consume(TokenKind::RightParen, Error::ExpectedClosingParen)?;

      parameters.push(Parameter {
        name: parameter_name,
        type_name: parameter_type,
      });
    }
    self.consume(TokenKind::RightParen, Error::ExpectedClosingParen)?;

    let return_type = self.symbol_text(Error::ExpectedReturnType)?;

    let mut body = Vec::new();
    while self.current.kind != TokenKind::RightParen {
      body.push(self.expression()?);
    }

    self.inside_define = false;
    Ok(Node::FunctionDeclaration {
      name,
      parameters,
      return_type,
      body,
    })
  }

  // `for index start end step body...`
  fn for_loop(&mut self) -> NodeResult {
    self.advance();

    let index = self.symbol_text(Error::ExpectedIndexName)?;
    let start = Box::new(self.expression()?);
    let end = Box::new(self.expression()?);
    let step = Box::new(self.expression()?);

    let mut body = Vec::new();
    while self.current.kind != TokenKind::RightParen {
      body.push(self.expression()?);
    }

    Ok(Node::For {
      index,
      start,
      end,
      step,
      body,
    })
  }

  // `while condition body...`
  fn while_loop(&mut self) -> NodeResult {
    self.advance();

    let condition = Box::new(self.expression()?);

    let mut body = Vec::new();
    while self.current.kind != TokenKind::RightParen {
      body.push(self.expression()?);
    }

    Ok(Node::While { condition, body })
  }

  // `if condition then else`, both branches are single expressions
  fn if_expression(&mut self) -> NodeResult {
    self.advance();

    let condition = Box::new(self.expression()?);
    let then_branch = Box::new(self.expression()?);
    let else_branch = Box::new(self.expression()?);

    Ok(Node::If {
      condition,
      then_branch,
      else_branch,
    })
  }

  fn function_call(&mut self) -> NodeResult {
    let name = self.symbol_text(Error::ExpectedFunctionName)?;

    let mut arguments = Vec::new();
    while self.current.kind != TokenKind::RightParen {
      arguments.push(self.expression()?);
    }

    Ok(Node::FunctionCall { name, arguments })
  }
}
