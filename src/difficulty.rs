//! Choosing which punchline words to hide.
//!
//! The amount hidden ramps with the streak: at score 0 only about a tenth of
//! the uncommon letters need covering (in practice the single longest word),
//! and the share creeps toward all of them as the score grows. Common filler
//! words are never hidden unless nothing else is available.

use crate::words::{is_uncommon, letter_count};

/// Fraction of the uncommon-letter budget that must be hidden at `score`.
///
/// `1 - 0.9 * 1.1^(-score)`: 0.1 at score 0, increasing toward 1. Past a few
/// hundred points it rounds to exactly 1.0, i.e. everything uncommon is hidden.
pub fn difficulty_coefficient(score: u32) -> f64 {
    1.0 - 0.9 * 1.1f64.powf(-f64::from(score))
}

/// Outcome of a selection, kept around for logging and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Token indices to hide, ascending.
    pub hidden: Vec<usize>,
    /// Letters across all uncommon tokens.
    pub total_length: usize,
    pub threshold: f64,
    /// Letters across the hidden tokens.
    pub total_added: usize,
}

pub fn select_hidden_words(tokens: &[String], score: u32) -> Vec<usize> {
    select_with_report(tokens, score).hidden
}

pub fn select_with_report(tokens: &[String], score: u32) -> Selection {
    let mut candidates: Vec<(usize, usize)> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_uncommon(t))
        .map(|(i, t)| (i, letter_count(t)))
        .collect();

    if candidates.is_empty() {
        // Fall back to the longest word, first occurrence on ties.
        let longest = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (i, letter_count(t)))
            .filter(|&(_, n)| n > 0)
            .fold(None, |best: Option<(usize, usize)>, (i, n)| match best {
                Some((_, bn)) if bn >= n => best,
                _ => Some((i, n)),
            });
        return match longest {
            Some((i, n)) => Selection { hidden: vec![i], total_length: 0, threshold: 0.0, total_added: n },
            None => Selection { hidden: Vec::new(), total_length: 0, threshold: 0.0, total_added: 0 },
        };
    }

    candidates.sort_by_key(|&(_, n)| n);
    candidates.reverse();

    let total_length: usize = candidates.iter().map(|&(_, n)| n).sum();
    let threshold = total_length as f64 * difficulty_coefficient(score);

    let mut hidden = Vec::new();
    let mut total_added = 0usize;
    for (i, n) in candidates {
        hidden.push(i);
        total_added += n;
        if total_added as f64 > threshold {
            break;
        }
    }
    hidden.sort_unstable();

    log::debug!(
        "score {score}: hiding {} of {total_length} uncommon letters (threshold {threshold:.2})",
        total_added
    );
    Selection { hidden, total_length, threshold, total_added }
}
