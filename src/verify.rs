//! Checking a guess and keeping the streak.

use crate::blanks::InputSlot;
use crate::store::HighScoreStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Correctness of each slot, by handle.
    pub per_slot: Vec<bool>,
    pub passed: bool,
}

/// Compare `submitted[handle]` with each slot, ignoring case. A missing entry is wrong.
pub fn verify<'a>(slots: impl IntoIterator<Item = &'a InputSlot>, submitted: &[Option<char>]) -> Verdict {
    let per_slot: Vec<bool> = slots
        .into_iter()
        .map(|slot| {
            submitted
                .get(slot.handle)
                .copied()
                .flatten()
                .and_then(|c| c.to_lowercase().next())
                .is_some_and(|c| c == slot.expected)
        })
        .collect();
    let passed = per_slot.iter().all(|&ok| ok);
    Verdict { per_slot, passed }
}

/// Streak plus the best streak seen; `high_score` is `None` without persistence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub high_score: Option<u32>,
}

impl ScoreBoard {
    pub fn load(store: &impl HighScoreStore) -> Self {
        let high_score = store.is_available().then(|| store.get_high_score().unwrap_or(0));
        Self { score: 0, high_score }
    }

    /// Apply a verdict. Returns true when a new high score was saved.
    pub fn apply(&mut self, verdict: &Verdict, store: &mut impl HighScoreStore) -> bool {
        if !verdict.passed {
            self.score = 0;
            return false;
        }
        self.score += 1;
        match self.high_score {
            Some(best) if self.score > best => {
                store.set_high_score(self.score);
                self.high_score = Some(self.score);
                log::info!("new high score: {}", self.score);
                true
            }
            _ => false,
        }
    }
}
