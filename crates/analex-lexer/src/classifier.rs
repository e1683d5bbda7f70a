//! Turns the token stream into the two report lists: one log line per
//! reported token and one line per lexical error.

use log::debug;
use serde::Serialize;

use crate::grammar::Grammar;
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::LexicalError;

/// Result of analyzing one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// `line L: [type: KIND, value: '...']` entries, in scan order.
    pub log_lines: Vec<String>,
    /// Rendered `errors`, in the same order.
    pub error_lines: Vec<String>,
    pub errors: Vec<LexicalError>,
}

impl AnalysisResult {
    /// True when no lexical error was found.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log lines joined with newlines, as written to the tokens file.
    pub fn log_text(&self) -> String {
        self.log_lines.join("\n")
    }

    /// Error lines joined with newlines, as written to the errors file.
    pub fn error_text(&self) -> String {
        self.error_lines.join("\n")
    }

    fn push_error(&mut self, error: LexicalError) {
        self.error_lines.push(error.to_string());
        self.errors.push(error);
    }
}

/// Analyze `source` with the standard grammar.
pub fn analyze(source: &str) -> AnalysisResult {
    analyze_with(source, Grammar::standard())
}

/// Analyze `source` with the given grammar.
///
/// Comments are dropped. Error tokens go to the error list only. Every
/// other token is logged, except relational operators whose lexeme is
/// blank, which no built-in rule produces.
pub fn analyze_with(source: &str, grammar: &Grammar) -> AnalysisResult {
    let mut result = AnalysisResult::default();
    let mut scanned = 0usize;

    for token in Scanner::with_grammar(source, grammar) {
        scanned += 1;
        if let Some(error) = LexicalError::from_token(&token) {
            result.push_error(error);
            continue;
        }
        match token.kind {
            TokenKind::Comment | TokenKind::Whitespace => {}
            TokenKind::RelationalOperator if token.lexeme.trim().is_empty() => {}
            _ => result.log_lines.push(log_line(&token)),
        }
    }

    debug!(
        "analyzed with {} grammar: {} tokens, {} logged, {} errors",
        grammar.name(),
        scanned,
        result.log_lines.len(),
        result.errors.len()
    );
    result
}

fn log_line(token: &Token) -> String {
    format!(
        "line {}: [type: {}, value: '{}']",
        token.line(),
        token.kind,
        token.lexeme
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Rule;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_source() {
        let result = analyze("");
        assert_eq!(result, AnalysisResult::default());
        assert!(result.is_success());
    }

    #[test]
    fn test_reserved_word() {
        let result = analyze("si");
        assert_eq!(result.log_lines, vec!["line 1: [type: RESERVED_WORD, value: 'si']"]);
        assert!(result.error_lines.is_empty());
    }

    #[test]
    fn test_double_equals() {
        assert_eq!(
            analyze("==").log_lines,
            vec!["line 1: [type: RELATIONAL_OPERATOR, value: '==']"]
        );
    }

    #[test]
    fn test_comment_is_suppressed() {
        let result = analyze("// hola");
        assert!(result.log_lines.is_empty());
        assert!(result.error_lines.is_empty());
    }

    #[test]
    fn test_unexpected_character() {
        let result = analyze("@");
        assert!(result.log_lines.is_empty());
        assert_eq!(
            result.error_lines,
            vec!["lexical error at line 1: unexpected character '@' not recognized"]
        );
        assert_eq!(
            result.errors,
            vec![LexicalError::UnrecognizedSymbol { lexeme: "@".into(), line: 1 }]
        );
        assert!(!result.is_success());
    }

    #[test]
    fn test_number_then_word_standard() {
        let result = analyze("3x");
        assert_eq!(
            result.log_lines,
            vec![
                "line 1: [type: INTEGER_LITERAL, value: '3']",
                "line 1: [type: IDENTIFIER, value: 'x']",
            ]
        );
        assert!(result.is_success());
    }

    #[test]
    fn test_number_then_word_strict() {
        let result = analyze_with("3x", Grammar::strict());
        assert_eq!(result.log_lines, vec!["line 1: [type: INTEGER_LITERAL, value: '3']"]);
        assert_eq!(
            result.error_lines,
            vec!["lexical error at line 1: unrecognized word 'x' (not a reserved word)"]
        );
    }

    #[test]
    fn test_string_literal() {
        let result = analyze("'hola'");
        assert_eq!(result.log_lines, vec!["line 1: [type: STRING_LITERAL, value: 'hola']"]);
        assert!(result.is_success());
    }

    #[test]
    fn test_line_numbers() {
        assert_eq!(
            analyze("entero x\nmostrar(x)").log_lines,
            vec![
                "line 1: [type: RESERVED_WORD, value: 'entero']",
                "line 1: [type: IDENTIFIER, value: 'x']",
                "line 2: [type: RESERVED_WORD, value: 'mostrar']",
                "line 2: [type: DELIMITER, value: '(']",
                "line 2: [type: IDENTIFIER, value: 'x']",
                "line 2: [type: DELIMITER, value: ')']",
            ]
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let result = analyze_with("x @\ny #", Grammar::strict());
        assert_eq!(
            result.error_lines,
            vec![
                "lexical error at line 1: unrecognized word 'x' (not a reserved word)",
                "lexical error at line 1: unexpected character '@' not recognized",
                "lexical error at line 2: unrecognized word 'y' (not a reserved word)",
                "lexical error at line 2: unexpected character '#' not recognized",
            ]
        );
        assert!(result.log_lines.is_empty());
        assert_eq!(result.errors.iter().map(LexicalError::line).collect::<Vec<_>>(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_program() {
        let source = "\
// calcula el doble
entero n = 21
flotante f = 2.5
mientras (n <= 42 && !listo) {
    mostrar('n vale', n * 2)
}
";
        let result = analyze(source);
        assert!(result.is_success());
        assert_eq!(result.log_lines.len(), 27);
        assert_eq!(result.log_lines[0], "line 2: [type: RESERVED_WORD, value: 'entero']");
        assert_eq!(result.log_lines[6], "line 3: [type: RELATIONAL_OPERATOR, value: '=']");
        assert_eq!(result.log_lines[7], "line 3: [type: FLOAT_LITERAL, value: '2.5']");
        assert_eq!(result.log_lines[26], "line 6: [type: DELIMITER, value: '}']");
    }

    #[test]
    fn test_every_token_is_accounted_for() {
        let source = "si (a >= 1) { b = 'x' } // fin\n@ 2.0";
        let reported = Scanner::tokenize(source)
            .filter(|t| t.kind != TokenKind::Comment)
            .count();
        let result = analyze(source);
        assert_eq!(result.log_lines.len() + result.error_lines.len(), reported);
    }

    #[test]
    fn test_idempotent() {
        let source = "entero x = 3\nmostrar(x) @ ~";
        assert_eq!(analyze(source), analyze(source));
    }

    #[test]
    fn test_concurrent_calls() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || analyze(&format!("entero x{i} = {i} @"))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.log_lines[1], format!("line 1: [type: IDENTIFIER, value: 'x{i}']"));
            assert_eq!(result.errors.len(), 1);
        }
    }

    #[test]
    fn test_blank_relational_lexeme_is_suppressed() {
        let grammar = Grammar::new(
            "blank-relational",
            vec![
                Rule::new(TokenKind::RelationalOperator, " +").unwrap(),
                Rule::new(TokenKind::Identifier, r"\w+").unwrap(),
            ],
        );
        assert_eq!(
            analyze_with("a b", &grammar).log_lines,
            vec![
                "line 1: [type: IDENTIFIER, value: 'a']",
                "line 1: [type: IDENTIFIER, value: 'b']",
            ]
        );
    }

    #[test]
    fn test_joined_text() {
        let result = analyze("si @ sino #");
        assert_eq!(
            result.log_text(),
            "line 1: [type: RESERVED_WORD, value: 'si']\nline 1: [type: RESERVED_WORD, value: 'sino']"
        );
        assert_eq!(result.error_text().lines().count(), 2);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(analyze("@")).unwrap();
        assert_eq!(json["errors"][0]["kind"], "unrecognized_symbol");
        assert_eq!(json["errors"][0]["lexeme"], "@");
        assert_eq!(json["errors"][0]["line"], 1);
        assert_eq!(json["log_lines"].as_array().unwrap().len(), 0);
    }
}
