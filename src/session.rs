//! One player's game: the advance-button state machine and everything it owns.

use crate::blanks::{Blanks, build_blanks};
use crate::difficulty::select_with_report;
use crate::error::{GameError, Result};
use crate::joke::{Joke, split_joke};
use crate::source::{CuratedPool, JokeOrigin, choose_origin};
use crate::store::HighScoreStore;
use crate::verify::{ScoreBoard, Verdict, verify};
use crate::words::TokenizerPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    JokeGiven,
    ResultGiven,
}

/// A joke laid out for guessing.
#[derive(Clone, Debug)]
pub struct Round {
    pub joke: Joke,
    pub tokens: Vec<String>,
    pub hidden: Vec<usize>,
    pub blanks: Blanks,
}

impl Round {
    pub fn build(raw: &str, score: u32, policy: TokenizerPolicy) -> Result<Self> {
        let joke = split_joke(raw)?;
        let tokens = policy.tokenize(&joke.punchline);
        let selection = select_with_report(&tokens, score);
        if selection.hidden.is_empty() {
            return Err(GameError::InvalidJokeFormat(format!(
                "no words to hide in {:?}",
                joke.punchline
            )));
        }
        let blanks = build_blanks(&tokens, &selection.hidden);
        Ok(Self { joke, tokens, hidden: selection.hidden, blanks })
    }
}

/// Result of submitting a guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub score: u32,
    pub high_score: Option<u32>,
    pub new_high_score: bool,
    /// Full punchline, shown when the guess was wrong.
    pub revealed: Option<String>,
}

pub struct GameSession<S: HighScoreStore> {
    state: GameState,
    pending: bool,
    round: Option<Round>,
    scores: ScoreBoard,
    store: S,
    pool: CuratedPool,
    policy: TokenizerPolicy,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(store: S, pool: CuratedPool, policy: TokenizerPolicy) -> Self {
        let scores = ScoreBoard::load(&store);
        Self { state: GameState::NotStarted, pending: false, round: None, scores, store, pool, policy }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn high_score(&self) -> Option<u32> {
        self.scores.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn button_label(&self) -> &'static str {
        match (self.pending, self.state) {
            (true, _) => "Loading...",
            (false, GameState::NotStarted) => "Generate joke",
            (false, GameState::JokeGiven) => "Submit guess",
            (false, GameState::ResultGiven) => "Next joke",
        }
    }

    pub fn button_enabled(&self) -> bool {
        !self.pending
    }

    /// Start fetching a joke. False (and nothing changes) unless a new joke is due.
    pub fn begin_fetch(&mut self) -> bool {
        if self.pending || self.state == GameState::JokeGiven {
            return false;
        }
        self.pending = true;
        true
    }

    /// Decide between the curated pool and the chat model for the pending fetch.
    /// A curated joke is removed from the pool and returned.
    pub fn pick_origin(&mut self, roll: f64, probability: f64, index_roll: f64, chat_enabled: bool) -> (JokeOrigin, Option<String>) {
        match choose_origin(roll, probability, &self.pool, chat_enabled) {
            JokeOrigin::Curated => (JokeOrigin::Curated, self.pool.take(index_roll)),
            JokeOrigin::Chat => (JokeOrigin::Chat, None),
        }
    }

    /// Finish the pending fetch. On error the state is left as it was.
    pub fn complete_fetch(&mut self, fetched: Result<String>) -> Result<&Round> {
        self.pending = false;
        let round = Round::build(&fetched?, self.scores.score, self.policy)?;
        log::info!(
            "new round: {} hidden word(s), {} slot(s)",
            round.hidden.len(),
            round.blanks.slot_count()
        );
        self.state = GameState::JokeGiven;
        Ok(self.round.insert(round))
    }

    /// Check a guess; `None` unless a joke is on screen.
    pub fn submit(&mut self, answers: &[Option<char>]) -> Option<Outcome> {
        if self.pending || self.state != GameState::JokeGiven {
            return None;
        }
        let round = self.round.as_ref()?;
        let verdict = verify(round.blanks.slots(), answers);
        let new_high_score = self.scores.apply(&verdict, &mut self.store);
        let revealed = (!verdict.passed).then(|| round.joke.punchline.trim().to_string());
        log::info!("guess {} (score {})", if verdict.passed { "correct" } else { "wrong" }, self.scores.score);
        self.state = GameState::ResultGiven;
        Some(Outcome {
            verdict,
            score: self.scores.score,
            high_score: self.scores.high_score,
            new_high_score,
            revealed,
        })
    }
}
