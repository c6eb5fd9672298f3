//! Punchline tokenizing and the common-word lexicon.
//!
//! Tokens alternate between *words* (anything carrying at least one letter)
//! and *delimiters* (runs without letters). Concatenating every token in order
//! gives back the original text, so the blank builder can rebuild the
//! punchline around the hidden words.

use serde::Deserialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// How the punchline is cut into tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerPolicy {
    /// Whitespace and hyphen runs delimit; attached punctuation stays with the word.
    #[default]
    WhitespaceAndHyphens,
    /// Only whitespace delimits, so `well-known` is a single token.
    Whitespace,
    /// Maximal runs of letters are words; everything else is a delimiter.
    LetterRuns,
}

impl TokenizerPolicy {
    fn is_delimiter(self, c: char) -> bool {
        match self {
            TokenizerPolicy::WhitespaceAndHyphens => c.is_whitespace() || c == '-',
            TokenizerPolicy::Whitespace => c.is_whitespace(),
            TokenizerPolicy::LetterRuns => !c.is_alphabetic(),
        }
    }

    /// Split `text` into alternating word / delimiter tokens, preserving order.
    pub fn tokenize(self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_is_delim: Option<bool> = None;
        for c in text.chars() {
            let delim = self.is_delimiter(c);
            if current_is_delim.is_some_and(|d| d != delim) {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(c);
            current_is_delim = Some(delim);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }
}

/// Number of alphabetic characters in a token.
pub fn letter_count(token: &str) -> usize {
    token.chars().filter(|c| c.is_alphabetic()).count()
}

/// Lowercased token with surrounding non-letters stripped (`"Side!"` -> `"side"`).
pub fn lexicon_key(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase()
}

fn lexicon() -> &'static HashSet<String> {
    static LEXICON: OnceLock<HashSet<String>> = OnceLock::new();
    LEXICON.get_or_init(|| crate::COMMON_WORDS.iter().map(|w| w.to_lowercase()).collect())
}

pub fn is_common(token: &str) -> bool {
    lexicon().contains(&lexicon_key(token))
}

/// A token worth hiding: has letters and is not one of the common words.
pub fn is_uncommon(token: &str) -> bool {
    letter_count(token) > 0 && !is_common(token)
}
