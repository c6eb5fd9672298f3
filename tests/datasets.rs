// Additional integration tests for dataset invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use punchline_cat::joke::split_joke;
use punchline_cat::session::Round;
use punchline_cat::words::TokenizerPolicy;
use std::collections::HashSet;

#[test]
fn common_words_are_unique_and_valid() {
    let mut seen = HashSet::new();
    for w in punchline_cat::COMMON_WORDS {
        assert!(seen.insert(w.to_lowercase()), "duplicate word '{}' in COMMON_WORDS", w);
        assert!(!w.is_empty(), "empty entry in COMMON_WORDS");
        for c in w.chars() {
            assert!(c.is_ascii_alphabetic(), "invalid char '{}' in common word '{}'", c, w);
        }
        // only the pronoun I is capitalised
        if *w != "I" {
            assert_eq!(*w, w.to_lowercase(), "common word '{}' should be lowercase", w);
        }
    }
    assert_eq!(seen.len(), 100);
}

#[test]
fn curated_jokes_split_into_playable_rounds() {
    let mut seen = HashSet::new();
    for raw in punchline_cat::CURATED_JOKES {
        assert!(seen.insert(*raw), "duplicate curated joke '{}'", raw);
        let joke = split_joke(raw).unwrap_or_else(|e| panic!("curated joke '{}' does not split: {}", raw, e));
        assert_eq!(format!("{}{}", joke.setup, joke.punchline), *raw);
        for policy in [TokenizerPolicy::WhitespaceAndHyphens, TokenizerPolicy::Whitespace, TokenizerPolicy::LetterRuns] {
            let round = Round::build(raw, 0, policy).unwrap();
            assert!(round.blanks.slot_count() > 0, "curated joke '{}' hides nothing under {:?}", raw, policy);
        }
    }
}
