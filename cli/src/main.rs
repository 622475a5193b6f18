use clap::{Arg, Command};
use larch_interpreter::Environment;
use rustyline::{error::ReadlineError, Editor};
use std::fs;

mod print;

fn read_file(filename: &str) -> String {
  if let Ok(file) = fs::read_to_string(filename) {
    file
  } else {
    print::error_message(&format!("Problem reading file: {filename}"));
    String::new()
  }
}

fn run(filename: &str, source: &str) {
  let mut env = Environment::new();
  larch_std::register_globals(&mut env);

  match larch_syntax::parse(source) {
    Ok(ast) => {
      if let Err(error) = larch_interpreter::evaluate(&ast, &mut env, Environment::GLOBAL) {
        print::runtime_error(&error);
      }
    }
    Err(diagnostic) => print::parse_error(filename, source, &diagnostic),
  }
}

fn repl() {
  let Ok(mut editor) = Editor::<()>::new() else {
    print::error_message("Unable to start the REPL");
    return;
  };

  let mut env = Environment::new();
  larch_std::register_globals(&mut env);

  loop {
    match editor.readline("> ") {
      Ok(line) => {
        if line.trim().is_empty() {
          continue;
        }
        editor.add_history_entry(&line);

        match larch_syntax::parse(&line) {
          Ok(ast) => match larch_interpreter::evaluate(&ast, &mut env, Environment::GLOBAL) {
            Ok(value) => println!("{value}"),
            Err(error) => print::runtime_error(&error),
          },
          Err(diagnostic) => print::parse_error("REPL", &line, &diagnostic),
        }
      }
      Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
      Err(error) => {
        println!("Error: {error:?}");
        break;
      }
    }
  }
}

fn main() {
  let version = "v0.1.0";
  let app = Command::new("larch")
    .version(version)
    .subcommand(
      Command::new("run")
        .about("Execute a Larch script")
        .arg(Arg::new("file").help("The file to run").required(true)),
    )
    .subcommand(
      Command::new("ast")
        .about("Display the Abstract Syntax Tree for a file")
        .arg(Arg::new("file").help("The file to parse").required(true)),
    )
    .subcommand(
      Command::new("tokens")
        .about("Display the tokens for a file")
        .arg(Arg::new("file").help("The file to tokenize").required(true)),
    )
    .get_matches();

  if let Some((command @ ("run" | "ast" | "tokens"), subcommand)) = app.subcommand() {
    let Some(filename) = subcommand.get_one::<String>("file") else {
      print::error_message("No file specified");
      return;
    };
    let source = read_file(filename);

    if source.is_empty() {
      return;
    }

    match command {
      "run" => run(filename, &source),
      "ast" => match larch_syntax::parse(&source) {
        Ok(ast) => print!("{}", larch_syntax::printer::print(&ast)),
        Err(diagnostic) => print::parse_error(filename, &source, &diagnostic),
      },
      "tokens" => print::tokens(&larch_syntax::tokenize(&source)),
      _ => unreachable!(),
    }
  } else {
    println!("Larch ({version})");
    repl();
  }
}
