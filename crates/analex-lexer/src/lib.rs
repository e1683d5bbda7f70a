//! Lexical analyzer
//!
//! Scans source text of a small Spanish-keyword teaching language into
//! classified tokens and reports lexical errors (unrecognized words and
//! unrecognized symbols) for the whole input in a single pass.
//!
//! ```text
//! source → Scanner (Grammar rules, in order) → Token* → analyze() → AnalysisResult
//! ```
//!
//! # Example
//!
//! ```
//! use analex_lexer::analyze;
//!
//! let result = analyze("entero x = 3 @");
//! assert_eq!(result.log_lines.len(), 4);
//! assert_eq!(
//!     result.error_lines,
//!     vec!["lexical error at line 1: unexpected character '@' not recognized"]
//! );
//! ```

pub mod classifier;
pub mod grammar;
pub mod scanner;
pub mod token;

pub use classifier::{analyze, analyze_with, AnalysisResult};
pub use grammar::{Grammar, Rule};
pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

use serde::Serialize;

/// A lexical error. These are collected during analysis, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LexicalError {
    #[error("lexical error at line {line}: unrecognized word '{lexeme}' (not a reserved word)")]
    UnrecognizedWord { lexeme: String, line: usize },

    #[error("lexical error at line {line}: unexpected character '{lexeme}' not recognized")]
    UnrecognizedSymbol { lexeme: String, line: usize },
}

impl LexicalError {
    /// Error for a token of one of the catch-all kinds.
    pub fn from_token(token: &Token) -> Option<Self> {
        if !token.kind.is_error() {
            return None;
        }
        let lexeme = token.lexeme.clone();
        let line = token.line();
        Some(if token.kind == TokenKind::UnrecognizedWord {
            Self::UnrecognizedWord { lexeme, line }
        } else {
            Self::UnrecognizedSymbol { lexeme, line }
        })
    }

    pub fn line(&self) -> usize {
        match self {
            Self::UnrecognizedWord { line, .. } | Self::UnrecognizedSymbol { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_token_only_for_catch_alls() {
        let span = Span::new(0, 1, 3, 1);
        assert_eq!(
            LexicalError::from_token(&Token::new(TokenKind::UnrecognizedWord, "x", span)),
            Some(LexicalError::UnrecognizedWord { lexeme: "x".into(), line: 3 })
        );
        assert_eq!(
            LexicalError::from_token(&Token::new(TokenKind::UnrecognizedSymbol, "@", span)),
            Some(LexicalError::UnrecognizedSymbol { lexeme: "@".into(), line: 3 })
        );
        assert_eq!(
            LexicalError::from_token(&Token::new(TokenKind::Identifier, "x", span)),
            None
        );
    }
}
