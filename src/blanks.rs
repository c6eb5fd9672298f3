//! Turning hidden words into literal text plus per-letter input slots.

/// Index of a slot within its round, left to right. The browser layer keeps a
/// parallel list of input elements and maps handles onto it.
pub type SlotHandle = usize;

/// One obscured letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputSlot {
    pub handle: SlotHandle,
    /// Lowercased source letter.
    pub expected: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(InputSlot),
}

/// The rendered punchline of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blanks {
    pub segments: Vec<Segment>,
    /// Source letters (original case) behind each slot, by handle.
    solution: Vec<char>,
}

impl Blanks {
    pub fn slots(&self) -> impl Iterator<Item = &InputSlot> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(slot) => Some(slot),
            Segment::Literal(_) => None,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.solution.len()
    }

    pub fn solution(&self) -> &[char] {
        &self.solution
    }

    /// Rebuild the text using `answers[handle]` for each slot (`_` when missing).
    pub fn reconstruct(&self, answers: &[char]) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push(answers.get(slot.handle).copied().unwrap_or('_')),
            }
        }
        out
    }

    fn push_literal(&mut self, c: char) {
        if let Some(Segment::Literal(text)) = self.segments.last_mut() {
            text.push(c);
        } else {
            self.segments.push(Segment::Literal(c.to_string()));
        }
    }

    fn push_slot(&mut self, c: char) {
        let handle = self.solution.len();
        let expected = c.to_lowercase().next().unwrap_or(c);
        self.solution.push(c);
        self.segments.push(Segment::Slot(InputSlot { handle, expected }));
    }
}

/// Lay out `tokens`, turning every letter after the first in each hidden token
/// into a slot. `hidden` holds token indices.
pub fn build_blanks(tokens: &[String], hidden: &[usize]) -> Blanks {
    let mut blanks = Blanks::default();
    for (i, token) in tokens.iter().enumerate() {
        if !hidden.contains(&i) {
            token.chars().for_each(|c| blanks.push_literal(c));
            continue;
        }
        let mut revealed_first = false;
        for c in token.chars() {
            if c.is_alphabetic() && revealed_first {
                blanks.push_slot(c);
            } else {
                revealed_first |= c.is_alphabetic();
                blanks.push_literal(c);
            }
        }
    }
    blanks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::TokenizerPolicy;

    #[test]
    fn test_hidden_word_keeps_first_letter() {
        let tokens = TokenizerPolicy::default().tokenize(" To the Side!");
        let blanks = build_blanks(&tokens, &[5]);
        assert_eq!(blanks.segments[0], Segment::Literal(" To the S".into()));
        let expected: Vec<char> = blanks.slots().map(|s| s.expected).collect();
        assert_eq!(expected, vec!['i', 'd', 'e']);
        assert_eq!(blanks.segments.last(), Some(&Segment::Literal("!".into())));
        assert_eq!(blanks.reconstruct(&['?', '?', '?']), " To the S???!");
    }

    #[test]
    fn test_handles_follow_reading_order() {
        let tokens = TokenizerPolicy::default().tokenize("Big Cats");
        let blanks = build_blanks(&tokens, &[0, 2]);
        let handles: Vec<SlotHandle> = blanks.slots().map(|s| s.handle).collect();
        assert_eq!(handles, vec![0, 1, 2, 3, 4]);
        assert_eq!(blanks.slot_count(), 5);
    }

    #[test]
    fn test_inner_punctuation_is_revealed() {
        let tokens = TokenizerPolicy::Whitespace.tokenize("well-known");
        let blanks = build_blanks(&tokens, &[0]);
        assert_eq!(blanks.slot_count(), 8);
        assert_eq!(blanks.reconstruct(&['_'; 8]), "w___-_____");
    }

    #[test]
    fn test_single_letter_word_has_no_slots() {
        let tokens = TokenizerPolicy::default().tokenize("a");
        let blanks = build_blanks(&tokens, &[0]);
        assert_eq!(blanks.slot_count(), 0);
        assert_eq!(blanks.segments, vec![Segment::Literal("a".into())]);
    }

    #[test]
    fn test_solution_round_trips_punchline() {
        let punchline = " Because it's Purr-fectly ridiculous, Dave!";
        let tokens = TokenizerPolicy::default().tokenize(punchline);
        let all: Vec<usize> = (0..tokens.len()).collect();
        let blanks = build_blanks(&tokens, &all);
        assert_eq!(blanks.reconstruct(blanks.solution()), punchline);
        assert!(blanks.slots().all(|s| s.expected.is_lowercase()));
    }
}
