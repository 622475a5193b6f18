use larch_syntax::Token;

pub fn print(tokens: &[Token]) {
  let mut line = 0;

  println!("     ╭─[Tokens]");
  for token in tokens {
    if token.line == line {
      print!("     │ ");
    } else {
      print!("{:>4} │ ", token.line);
      line = token.line;
    }

    if let Some(error) = token.error {
      println!("{:?} ({}) - {}", token.kind, token.value, error.message());
    } else {
      println!("{:?} ({})", token.kind, token.value);
    }
  }
  println!("─────╯");
}
