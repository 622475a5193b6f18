pub mod ast;
mod parser;
pub mod printer;
mod tokens;

pub use parser::{parse, Diagnostic, Parser};
pub use tokens::{tokenize, ColumnNumber, LexError, Lexer, LineNumber, Token, TokenKind};
