pub type LineNumber = u16;
pub type ColumnNumber = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
  // Brackets
  LeftParen,
  RightParen,

  // Values
  Symbol,
  Integer,
  Float,
  True,
  False,
  String,

  // Terminals
  EndOfFile,
  Error,
}
impl TokenKind {
  pub fn is_terminal(self) -> bool {
    matches!(self, Self::EndOfFile | Self::Error)
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LexError {
  UnknownCharacter,
  UnterminatedString,
  InvalidScientificNotation,
  MalformedNumber,
}
impl LexError {
  pub fn message(self) -> &'static str {
    match self {
      Self::UnknownCharacter => "Unknown character",
      Self::UnterminatedString => "Unterminated string",
      Self::InvalidScientificNotation => "Invalid scientific notation",
      Self::MalformedNumber => "Malformed number",
    }
  }
}

/// A token borrows its text from the source buffer, so the source must
/// outlive every token produced from it.
#[derive(Copy, Clone, Debug)]
pub struct Token<'source> {
  pub kind: TokenKind,
  pub value: &'source str,
  pub line: LineNumber,
  pub column: ColumnNumber,
  pub error: Option<LexError>,
}

pub struct Lexer<'source> {
  source: &'source str,

  position: usize,
  line: LineNumber,
  column: ColumnNumber,
}

impl<'source> Lexer<'source> {
  pub fn new(source: &'source str) -> Self {
    Self {
      source,
      position: 0,
      line: 1,
      column: 1,
    }
  }

  pub fn next_token(&mut self) -> Token<'source> {
    self.skip_blank();

    let Some(&byte) = self.source.as_bytes().get(self.position) else {
      return Token {
        kind: TokenKind::EndOfFile,
        value: "",
        line: self.line,
        column: self.column,
        error: None,
      };
    };

    match byte {
      b'(' => self.single_character(TokenKind::LeftParen),
      b')' => self.single_character(TokenKind::RightParen),
      b'"' => self.string(),
      b'0'..=b'9' => self.number(),
      b'+' | b'-' => self.sign(),
      b'_' | b'a'..=b'z' | b'A'..=b'Z' => self.identifier(),
      _ => self.unknown_character(),
    }
  }

  fn advance(&mut self, length: usize) {
    self.position += length;
    self.column += length as ColumnNumber;
  }

  fn newline(&mut self) {
    self.position += 1;
    self.line += 1;
    self.column = 1;
  }

  fn skip_blank(&mut self) {
    let bytes = self.source.as_bytes();

    while let Some(&byte) = bytes.get(self.position) {
      match byte {
        b'\n' => self.newline(),
        b' ' | b'\t' | b'\r' => self.advance(1),
        b';' => {
          while bytes.get(self.position).is_some_and(|&byte| byte != b'\n') {
            self.advance(1);
          }
        }
        _ => break,
      }
    }
  }

  fn token(
    &self,
    kind: TokenKind,
    start: (usize, LineNumber, ColumnNumber),
    error: Option<LexError>,
  ) -> Token<'source> {
    let (position, line, column) = start;
    Token {
      kind,
      value: &self.source[position..self.position],
      line,
      column,
      error,
    }
  }

  fn start(&self) -> (usize, LineNumber, ColumnNumber) {
    (self.position, self.line, self.column)
  }

  fn single_character(&mut self, kind: TokenKind) -> Token<'source> {
    let start = self.start();
    self.advance(1);
    self.token(kind, start, None)
  }

  fn sign(&mut self) -> Token<'source> {
    // A sign which does not begin a number is an ordinary symbol,
    // so the arithmetic builtins `+` and `-` can be named
    match self.source.as_bytes().get(self.position + 1) {
      Some(b'0'..=b'9' | b'.') => self.number(),
      _ => self.single_character(TokenKind::Symbol),
    }
  }

  fn number(&mut self) -> Token<'source> {
    let start = self.start();
    let bytes = self.source.as_bytes();

    if matches!(bytes[self.position], b'+' | b'-') {
      self.advance(1);
    }

    let mut has_decimal = false;
    let mut has_exponent = false;

    while let Some(&byte) = bytes.get(self.position) {
      match byte {
        b'0'..=b'9' => self.advance(1),
        b'.' if !has_decimal && !has_exponent => {
          has_decimal = true;
          self.advance(1);
        }
        b'.' => {
          self.advance(1);
          return self.token(TokenKind::Error, start, Some(LexError::MalformedNumber));
        }
        b'e' | b'E' if !has_exponent => {
          has_exponent = true;
          self.advance(1);

          if matches!(bytes.get(self.position), Some(b'+' | b'-')) {
            self.advance(1);
          }
          if !matches!(bytes.get(self.position), Some(b'0'..=b'9')) {
            return self.token(
              TokenKind::Error,
              start,
              Some(LexError::InvalidScientificNotation),
            );
          }
        }
        _ => break,
      }
    }

    let kind = if has_decimal || has_exponent {
      TokenKind::Float
    } else {
      TokenKind::Integer
    };
    self.token(kind, start, None)
  }

  fn identifier(&mut self) -> Token<'source> {
    let start = self.start();
    let bytes = self.source.as_bytes();

    while let Some(&byte) = bytes.get(self.position) {
      if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'?') {
        self.advance(1);
      } else {
        break;
      }
    }

    let kind = match &self.source[start.0..self.position] {
      "true" => TokenKind::True,
      "false" => TokenKind::False,
      _ => TokenKind::Symbol,
    };
    self.token(kind, start, None)
  }

  fn string(&mut self) -> Token<'source> {
    let start = self.start();
    self.advance(1); // opening quote

    let bytes = self.source.as_bytes();
    while let Some(&byte) = bytes.get(self.position) {
      match byte {
        b'"' => {
          self.advance(1);
          return self.token(TokenKind::String, start, None);
        }
        b'\n' => self.newline(),
        _ => self.advance(1),
      }
    }

    self.token(TokenKind::Error, start, Some(LexError::UnterminatedString))
  }

  fn unknown_character(&mut self) -> Token<'source> {
    let start = self.start();
    let length = self.source[self.position..]
      .chars()
      .next()
      .map_or(1, char::len_utf8);
    self.advance(length);

    self.token(TokenKind::Error, start, Some(LexError::UnknownCharacter))
  }
}

/// Pulls tokens until the end of the source or the first error,
/// including the terminal token
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
  let mut lexer = Lexer::new(source);
  let mut tokens = Vec::new();

  loop {
    let token = lexer.next_token();
    let is_terminal = token.kind.is_terminal();
    tokens.push(token);

    if is_terminal {
      break tokens;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).iter().map(|token| token.kind).collect()
  }

  #[test]
  fn should_lex_empty_source() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
  }

  #[test]
  fn should_lex_parens() {
    assert_eq!(
      kinds("()"),
      vec![
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::EndOfFile
      ]
    );
  }

  #[test]
  fn should_lex_integers() {
    for source in ["123", "+5", "-5", "0"] {
      let tokens = tokenize(source);
      assert_eq!(tokens.len(), 2, "{source}");
      assert_eq!(tokens[0].kind, TokenKind::Integer);
      assert_eq!(tokens[0].value, source);
    }
  }

  #[test]
  fn should_lex_floats() {
    for source in ["12.5", "1.2e-3", "3.0E-50", "-2.5", "1e9", "7E+2"] {
      let tokens = tokenize(source);
      assert_eq!(tokens.len(), 2, "{source}");
      assert_eq!(tokens[0].kind, TokenKind::Float);
      assert_eq!(tokens[0].value, source);
    }
  }

  #[test]
  fn should_error_on_second_decimal_point() {
    let tokens = tokenize("1.2.3");
    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Error);
    assert_eq!(last.error, Some(LexError::MalformedNumber));
  }

  #[test]
  fn should_error_on_exponent_without_digits() {
    for source in ["1e", "1e+", "4.5E-"] {
      let last = *tokenize(source).last().unwrap();
      assert_eq!(last.kind, TokenKind::Error, "{source}");
      assert_eq!(last.error, Some(LexError::InvalidScientificNotation));
    }
  }

  #[test]
  fn should_lex_solitary_sign_as_symbol() {
    let tokens = tokenize("(+ 1 2)");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "+");

    let tokens = tokenize("(- 5 3)");
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "-");
  }

  #[test]
  fn should_lex_symbols() {
    for source in ["foo", "_bar", "make-vector", "even?", "x2", "A_b-c?"] {
      let tokens = tokenize(source);
      assert_eq!(tokens.len(), 2, "{source}");
      assert_eq!(tokens[0].kind, TokenKind::Symbol);
      assert_eq!(tokens[0].value, source);
    }
  }

  #[test]
  fn should_lex_booleans() {
    let tokens = tokenize("true false truthy");
    assert_eq!(tokens[0].kind, TokenKind::True);
    assert_eq!(tokens[1].kind, TokenKind::False);
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
  }

  #[test]
  fn should_lex_strings() {
    let tokens = tokenize("\"hello world\"");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"hello world\"");

    let tokens = tokenize("\"two\nlines\"");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[1].line, 2);
  }

  #[test]
  fn should_error_on_unterminated_string() {
    let tokens = tokenize("\"hello");
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].error, Some(LexError::UnterminatedString));
  }

  #[test]
  fn should_error_on_unknown_character() {
    for source in ["#", "@", "&"] {
      let tokens = tokenize(source);
      assert_eq!(tokens[0].kind, TokenKind::Error, "{source}");
      assert_eq!(tokens[0].error, Some(LexError::UnknownCharacter));
    }
  }

  #[test]
  fn should_skip_comments() {
    let commented = kinds("; comment\n(foo)");
    let plain = kinds("(foo)");
    assert_eq!(commented, plain);

    let tokens = tokenize("(foo) ; trailing\n(bar)");
    assert_eq!(tokens.len(), 7);
  }

  #[test]
  fn should_track_lines_and_columns() {
    let tokens = tokenize("(foo\n  bar)");

    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
    assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
    assert_eq!((tokens[3].line, tokens[3].column), (2, 6));
  }

  #[test]
  fn should_stop_at_first_error() {
    let tokens = tokenize("foo # bar");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Error);
  }
}
