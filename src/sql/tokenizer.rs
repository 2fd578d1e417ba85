/// Streaming token source used by the interpreter
///
/// Input is pulled one line at a time, so an interactive session only blocks
/// when the parser actually needs another token.

use super::lexer::Lexer;
use super::token::{Token, TokenType};
use crate::error::{DbError, Result};
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::warn;

/// What the interpreter needs from a token stream.
pub trait TokenSource {
    /// Next token without consuming it. At end of input this is an `Eof`
    /// token, returned on every call.
    fn peek(&mut self) -> Result<&Token>;

    /// Consume and return the next token. `Eof` is never consumed.
    fn next(&mut self) -> Result<Token>;

    /// True when nothing has been consumed yet or the last consumed token
    /// was `;`.
    fn at_statement_start(&self) -> bool;

    /// Consume the next token if it is of the given kind.
    fn next_if(&mut self, kind: &TokenType) -> Result<bool> {
        if self.peek()?.is(kind) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn peek_is(&mut self, kind: &TokenType) -> Result<bool> {
        Ok(self.peek()?.is(kind))
    }

    /// Consume the next token, which must be of the given kind.
    fn expect(&mut self, kind: &TokenType) -> Result<Token> {
        let token = self.peek()?;
        if token.is(kind) {
            self.next()
        } else {
            Err(DbError::syntax(format!(
                "expected '{}' but found '{}' at line {} column {}",
                kind, token.token_type, token.line, token.column
            )))
        }
    }
}

pub struct Tokenizer<R> {
    reader: R,
    prompter: Option<Box<dyn Write>>,
    /// Lexed tokens in input order. A lexical error sits in the position
    /// where the bad input was found.
    buffer: VecDeque<Result<Token>>,
    line: usize,
    at_eof: bool,
    statement_start: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompter: None,
            buffer: VecDeque::new(),
            line: 0,
            at_eof: false,
            statement_start: true,
        }
    }

    /// Write `> ` before the first line of a statement and `...` before
    /// continuation lines.
    pub fn with_prompter(mut self, prompter: Box<dyn Write>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    fn prompt(&mut self) -> Result<()> {
        if let Some(out) = self.prompter.as_mut() {
            let text = if self.statement_start { "> " } else { "..." };
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }

    /// Make sure the buffer holds at least one entry, then surface a queued
    /// lexical error if it is next. Taking the error counts as consuming
    /// input, so recovery skips the rest of that statement.
    fn fill(&mut self) -> Result<()> {
        while self.buffer.is_empty() {
            if self.at_eof {
                self.buffer
                    .push_back(Ok(Token::new(TokenType::Eof, self.line + 1, 1)));
                break;
            }

            self.prompt()?;
            let mut bytes = Vec::new();
            match self.reader.read_until(b'\n', &mut bytes) {
                Ok(0) => {
                    self.at_eof = true;
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    self.at_eof = true;
                    return Err(e.into());
                }
            }

            self.line += 1;
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    warn!(line = self.line, "input line is not valid UTF-8");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            self.lex_line(&text);
        }

        if matches!(self.buffer.front(), Some(Err(_))) {
            self.statement_start = false;
            if let Some(Err(e)) = self.buffer.pop_front() {
                return Err(e);
            }
        }
        Ok(())
    }

    fn lex_line(&mut self, text: &str) {
        let mut lexer = Lexer::with_line(text, self.line);
        loop {
            match lexer.next_token() {
                Ok(token) if matches!(token.token_type, TokenType::Eof) => break,
                Ok(token) => self.buffer.push_back(Ok(token)),
                Err(e) => self.buffer.push_back(Err(e)),
            }
        }
    }

    fn front(&self) -> Result<&Token> {
        match self.buffer.front() {
            Some(Ok(token)) => Ok(token),
            _ => Err(DbError::syntax("token buffer unexpectedly empty")),
        }
    }
}

impl<R: BufRead> TokenSource for Tokenizer<R> {
    fn peek(&mut self) -> Result<&Token> {
        self.fill()?;
        self.front()
    }

    fn next(&mut self) -> Result<Token> {
        self.fill()?;
        let token = if self.front()?.is(&TokenType::Eof) {
            self.front()?.clone()
        } else {
            match self.buffer.pop_front() {
                Some(Ok(token)) => token,
                _ => return Err(DbError::syntax("token buffer unexpectedly empty")),
            }
        };
        self.statement_start = matches!(token.token_type, TokenType::Semicolon);
        Ok(token)
    }

    fn at_statement_start(&self) -> bool {
        self.statement_start
    }
}
