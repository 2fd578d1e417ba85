/// Statement lexer - converts text into tokens

use super::token::{Token, TokenType};
use crate::error::{DbError, Result};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self::with_line(input, 1)
    }

    /// Lexer whose first line is numbered `line`. Used by the streaming
    /// tokenizer, which feeds one input line at a time.
    pub fn with_line(input: &str, line: usize) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line,
            column: 1,
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        if self.is_eof() {
            return Ok(Token::new(TokenType::Eof, line, column));
        }

        let ch = self.current_char();

        if ch == '-' && self.peek_char() == Some('-') {
            self.skip_line_comment();
            return self.next_token();
        }

        let token_type = match ch {
            '\'' => self.read_literal(line, column)?,
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(),
            '<' | '>' | '=' | '!' => self.read_relation(),
            '(' => {
                self.advance();
                TokenType::LParen
            }
            ')' => {
                self.advance();
                TokenType::RParen
            }
            ',' => {
                self.advance();
                TokenType::Comma
            }
            ';' => {
                self.advance();
                TokenType::Semicolon
            }
            '.' => {
                self.advance();
                TokenType::Dot
            }
            _ => {
                // Step over it so the caller can resume after the error.
                self.advance();
                return Err(DbError::syntax(format!(
                    "unexpected character '{}' at line {} column {}",
                    ch, line, column
                )));
            }
        };

        Ok(Token::new(token_type, line, column))
    }

    fn current_char(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if !self.is_eof() {
            if self.input[self.position] == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_eof() && self.current_char() != '\n' {
            self.advance();
        }
        if !self.is_eof() {
            self.advance();
        }
    }

    /// Literals may not span lines and have no escapes.
    fn read_literal(&mut self, line: usize, column: usize) -> Result<TokenType> {
        self.advance(); // skip opening quote
        let mut value = String::new();

        while !self.is_eof() && self.current_char() != '\'' && self.current_char() != '\n' {
            value.push(self.current_char());
            self.advance();
        }

        if self.current_char() != '\'' {
            return Err(DbError::syntax(format!(
                "unterminated literal at line {} column {}",
                line, column
            )));
        }

        self.advance(); // skip closing quote
        Ok(TokenType::Literal(value.trim().to_string()))
    }

    fn read_identifier(&mut self) -> TokenType {
        let mut value = String::new();

        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::from_keyword(&value).unwrap_or(TokenType::Identifier(value))
    }

    fn read_relation(&mut self) -> TokenType {
        let mut op = String::new();

        while matches!(self.current_char(), '<' | '>' | '=' | '!') {
            op.push(self.current_char());
            self.advance();
        }

        TokenType::Relation(op)
    }
}
