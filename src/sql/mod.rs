/// Statement language: lexer, token source, interpreter, select executor
///
/// Architecture:
/// - Lexer: turns a line of text into tokens
/// - Tokenizer: streams tokens from a reader, line by line
/// - Interpreter: recursive-descent parser executing each statement
/// - Executor: scan / nested-loop join with condition filtering

pub mod token;
pub mod lexer;
pub mod tokenizer;
pub mod condition;
pub mod executor;
pub mod interpreter;

pub use token::{Token, TokenType};
pub use lexer::Lexer;
pub use tokenizer::{TokenSource, Tokenizer};
pub use condition::{Condition, Relation};
pub use executor::QueryExecutor;
pub use interpreter::{Flow, Interpreter};

use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::error::Result;
use std::io::Cursor;

/// Run every statement of `script` in a fresh session. Returns the final
/// catalog and everything the statements printed, error reports included.
pub fn run_script(script: &str, config: SessionConfig) -> Result<(Catalog, String)> {
    let input = Tokenizer::new(Cursor::new(script.as_bytes()));
    let mut interpreter = Interpreter::new(input, Vec::new(), config);
    interpreter.run()?;
    let (catalog, out) = interpreter.into_parts();
    Ok((catalog, String::from_utf8_lossy(&out).into_owned()))
}
