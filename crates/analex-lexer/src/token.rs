use std::fmt;

use serde::Serialize;

/// A position in source text. `start`/`end` are byte offsets, `line` and
/// `column` are one-based and refer to the first character of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token classification.
///
/// The two `Unrecognized*` kinds are produced by the catch-all rules at the
/// end of a grammar and surface as lexical errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Comment,
    ReservedWord,
    LogicalOperator,
    RelationalOperator,
    ArithmeticOperator,
    StringLiteral,
    FloatLiteral,
    IntegerLiteral,
    Identifier,
    Delimiter,
    Whitespace,

    // Catch-alls
    UnrecognizedWord,
    UnrecognizedSymbol,
}

impl TokenKind {
    /// Upper-case name used in token log lines.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "COMMENT",
            TokenKind::ReservedWord => "RESERVED_WORD",
            TokenKind::LogicalOperator => "LOGICAL_OPERATOR",
            TokenKind::RelationalOperator => "RELATIONAL_OPERATOR",
            TokenKind::ArithmeticOperator => "ARITHMETIC_OPERATOR",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::UnrecognizedWord => "UNRECOGNIZED_WORD",
            TokenKind::UnrecognizedSymbol => "UNRECOGNIZED_SYMBOL",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::UnrecognizedWord | TokenKind::UnrecognizedSymbol
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token produced by the scanner.
///
/// For string literals `lexeme` holds the text between the quotes; the span
/// still covers the quotes. Every other kind carries the matched text as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }
}

/// Reserved words of the language.
pub const RESERVED_WORDS: &[&str] = &[
    "entero", "flotante", "cadena", "mientras", "mostrar", "comparar", "si", "sino",
];
