//! Token grammar: an ordered list of lexical rules.
//!
//! At a given offset the rules are tried in declaration order and the first
//! one that matches wins. Order is therefore the disambiguation policy:
//! reserved words sit before the word rules, and multi-character operators
//! before the single characters they start with (`==` before `=`, `!=`
//! before `!`, `//` before `/`).
//!
//! Both built-in grammars end with the two catch-alls, so every offset of
//! any input is matched by some rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{TokenKind, RESERVED_WORDS};

/// A single lexical rule.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: TokenKind,
    regex: Regex,
    /// Refuse to match right after a word character (leading `\b`).
    bounded: bool,
}

impl Rule {
    /// Build a rule from a pattern. The pattern is anchored at the offset
    /// it is tried at.
    pub fn new(kind: TokenKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            regex: Regex::new(&format!("^(?:{pattern})"))?,
            bounded: false,
        })
    }

    /// Require a word boundary before the match as well as inside the pattern.
    pub fn word_bounded(mut self) -> Self {
        self.bounded = true;
        self
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Byte length of the match starting exactly at `offset`, if any.
    ///
    /// Empty matches count as no match, so a scanner driven by rules always
    /// makes progress.
    pub fn matches_at(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        if self.bounded && text[..offset].chars().next_back().is_some_and(is_word_char) {
            return None;
        }
        self.regex
            .find(rest)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// Same class as the `\w` behind the trailing `\b` of bounded patterns.
static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w$").expect("word class pattern is valid"));

fn is_word_char(c: char) -> bool {
    WORD_CHAR.is_match(c.encode_utf8(&mut [0; 4]))
}

/// An ordered, immutable rule list.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: &'static str,
    rules: Vec<Rule>,
}

static STANDARD: LazyLock<Grammar> = LazyLock::new(|| build("standard", true));
static STRICT: LazyLock<Grammar> = LazyLock::new(|| build("strict", false));

impl Grammar {
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    /// The default grammar: bare words that are not reserved are identifiers.
    pub fn standard() -> &'static Grammar {
        &STANDARD
    }

    /// Grammar without an identifier rule: every word that is not reserved
    /// is reported as an unrecognized word.
    pub fn strict() -> &'static Grammar {
        &STRICT
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching at `offset`, with the byte length it consumes.
    pub fn match_at(&self, text: &str, offset: usize) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matches_at(text, offset).map(|len| (rule.kind, len)))
    }
}

fn build(name: &'static str, identifiers: bool) -> Grammar {
    let reserved = format!(r"(?:{})\b", RESERVED_WORDS.join("|"));

    let mut patterns: Vec<(TokenKind, String, bool)> = vec![
        (TokenKind::Comment, r"//[^\n]*".into(), false),
        (TokenKind::ReservedWord, reserved, true),
        (TokenKind::RelationalOperator, r"==|!=|<=|>=|<|>|=".into(), false),
        (TokenKind::LogicalOperator, r"&&|\|\||!".into(), false),
        (TokenKind::ArithmeticOperator, r"[+\-*/^]".into(), false),
        (TokenKind::StringLiteral, r"'[^']*(?:'|\z)".into(), false),
        (TokenKind::FloatLiteral, r"\d+\.\d+".into(), false),
        (TokenKind::IntegerLiteral, r"\d+".into(), false),
    ];
    if identifiers {
        patterns.push((TokenKind::Identifier, WORD.into(), false));
    }
    patterns.extend([
        (TokenKind::Delimiter, r"[(){},]".into(), false),
        (TokenKind::Whitespace, r"\s+".into(), false),
        (TokenKind::UnrecognizedWord, WORD.into(), false),
        (TokenKind::UnrecognizedSymbol, r"(?s:.)".into(), false),
    ]);

    let rules = patterns
        .into_iter()
        .map(|(kind, pattern, bounded)| {
            let rule = Rule::new(kind, &pattern).expect("built-in token pattern is valid");
            if bounded {
                rule.word_bounded()
            } else {
                rule
            }
        })
        .collect();

    Grammar::new(name, rules)
}

const WORD: &str = r"[\p{L}_]\w*";
