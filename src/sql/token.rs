/// Token types for the statement lexer
use phf::phf_map;
use std::fmt;

// Keywords are looked up after ASCII lowercasing; names keep their case.
static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "create" => TokenType::Create,
    "table" => TokenType::Table,
    "load" => TokenType::Load,
    "store" => TokenType::Store,
    "insert" => TokenType::Insert,
    "into" => TokenType::Into,
    "values" => TokenType::Values,
    "print" => TokenType::Print,
    "select" => TokenType::Select,
    "from" => TokenType::From,
    "where" => TokenType::Where,
    "and" => TokenType::And,
    "as" => TokenType::As,
    "exit" => TokenType::Exit,
    "quit" => TokenType::Quit,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    // Keywords
    Create,
    Table,
    Load,
    Store,
    Insert,
    Into,
    Values,
    Print,
    Select,
    From,
    Where,
    And,
    As,
    Exit,
    Quit,

    // Delimiters
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Semicolon, // ;
    Dot,       // .

    /// Maximal run of `<`, `>`, `=`, `!`. Validated by the condition parser
    /// so that a misspelled operator is reported by name.
    Relation(String),

    /// Single-quoted literal, quotes stripped and contents trimmed.
    Literal(String),
    Identifier(String),

    // Special
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, line: usize, column: usize) -> Self {
        Self { token_type, line, column }
    }

    pub fn is(&self, token_type: &TokenType) -> bool {
        self.token_type.same_kind(token_type)
    }
}

impl TokenType {
    pub fn from_keyword(s: &str) -> Option<Self> {
        let lowercase = s.to_ascii_lowercase();
        KEYWORDS.get(lowercase.as_str()).cloned()
    }

    /// Compare variants only, ignoring any payload.
    pub fn same_kind(&self, other: &TokenType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenType::Create => "create",
            TokenType::Table => "table",
            TokenType::Load => "load",
            TokenType::Store => "store",
            TokenType::Insert => "insert",
            TokenType::Into => "into",
            TokenType::Values => "values",
            TokenType::Print => "print",
            TokenType::Select => "select",
            TokenType::From => "from",
            TokenType::Where => "where",
            TokenType::And => "and",
            TokenType::As => "as",
            TokenType::Exit => "exit",
            TokenType::Quit => "quit",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Dot => ".",
            TokenType::Relation(op) => return write!(f, "{}", op),
            TokenType::Literal(value) => return write!(f, "'{}'", value),
            TokenType::Identifier(name) => return write!(f, "{}", name),
            TokenType::Eof => "end of input",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(TokenType::from_keyword("SELECT"), Some(TokenType::Select));
        assert_eq!(TokenType::from_keyword("Where"), Some(TokenType::Where));
        assert_eq!(TokenType::from_keyword("students"), None);
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        let a = TokenType::Identifier("a".into());
        let b = TokenType::Identifier("b".into());
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&TokenType::Literal("a".into())));
    }
}
