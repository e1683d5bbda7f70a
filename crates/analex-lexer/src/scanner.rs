use std::iter::FusedIterator;

use log::trace;

use crate::grammar::Grammar;
use crate::token::{Span, Token, TokenKind};

/// Source scanner.
///
/// Walks the source left to right, asking the grammar for the first rule
/// that matches at the current offset. Each token starts exactly where the
/// previous one ended. Whitespace is consumed but never yielded.
///
/// The scanner is a single-pass iterator; scanning the same text again
/// requires a new scanner.
pub struct Scanner<'a> {
    source: &'a str,
    grammar: &'a Grammar,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `source` using the standard grammar.
    pub fn new(source: &'a str) -> Self {
        Self::with_grammar(source, Grammar::standard())
    }

    /// Create a scanner with a specific grammar.
    pub fn with_grammar(source: &'a str, grammar: &'a Grammar) -> Self {
        Self {
            source,
            grammar,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize `source` with the standard grammar.
    pub fn tokenize(source: &'a str) -> Self {
        Self::new(source)
    }

    /// Match the next lexeme. A grammar without a symbol catch-all may leave
    /// an offset unmatched; that character becomes an unrecognized symbol.
    fn next_match(&self) -> (TokenKind, usize) {
        self.grammar
            .match_at(self.source, self.pos)
            .unwrap_or_else(|| {
                let len = self.source[self.pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                (TokenKind::UnrecognizedSymbol, len)
            })
    }

    fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += text.len();
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos < self.source.len() {
            let (kind, len) = self.next_match();
            let start = self.pos;
            let text = &self.source[start..start + len];
            let span = Span::new(start, start + len, self.line, self.column);
            self.advance_over(text);

            if kind == TokenKind::Whitespace {
                continue;
            }

            let lexeme = match kind {
                TokenKind::StringLiteral => strip_quotes(text),
                _ => text,
            };
            trace!("line {}: {} {:?}", span.line, kind, lexeme);
            return Some(Token::new(kind, lexeme, span));
        }
        None
    }
}

impl FusedIterator for Scanner<'_> {}

/// `'abc'` → `abc`. An unterminated literal only loses its opening quote.
fn strip_quotes(text: &str) -> &str {
    let inner = text.strip_prefix('\'').unwrap_or(text);
    inner.strip_suffix('\'').unwrap_or(inner)
}
