// Integration tests (native) for the `punchline-cat` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use punchline_cat::GameState;
use punchline_cat::blanks::build_blanks;
use punchline_cat::difficulty::select_with_report;
use punchline_cat::error::GameError;
use punchline_cat::session::GameSession;
use punchline_cat::source::CuratedPool;
use punchline_cat::store::{HighScoreStore, MemoryStore};
use punchline_cat::words::TokenizerPolicy;

const JOKES: &[&str] = &[
    "Why did the chicken cross the road? To get to the other side!",
    "What do you call a sleeping dinosaur? A dino-snore!",
    "Why do cows wear bells? Because their horns don't work.",
    "I used to be a banker. Then I lost interest in the whole enterprise!",
];

fn new_session(store: MemoryStore) -> GameSession<MemoryStore> {
    GameSession::new(store, CuratedPool::default(), TokenizerPolicy::default())
}

fn play(session: &mut GameSession<MemoryStore>, raw: &str, correct: bool) -> bool {
    assert!(session.begin_fetch());
    let round = session.complete_fetch(Ok(raw.to_string())).unwrap();
    let answers: Vec<Option<char>> = round
        .blanks
        .solution()
        .iter()
        .map(|&c| if correct { Some(c) } else { Some('#') })
        .collect();
    session.submit(&answers).unwrap().verdict.passed
}

// A streak of correct answers persists the best score; a miss resets only the streak.
#[test]
fn streak_updates_persisted_high_score() {
    let mut session = new_session(MemoryStore::new(Some(2)));
    for (i, raw) in JOKES.iter().enumerate() {
        assert!(play(&mut session, raw, true));
        assert_eq!(session.score(), i as u32 + 1);
    }
    assert_eq!(session.high_score(), Some(4));
    assert_eq!(session.store().get_high_score(), Some(4));
    assert_eq!(session.store().writes(), 2);

    assert!(!play(&mut session, JOKES[0], false));
    assert_eq!(session.score(), 0);
    assert_eq!(session.store().get_high_score(), Some(4));
    assert_eq!(session.state(), GameState::ResultGiven);
}

#[test]
fn game_runs_without_persistence() {
    let mut session = new_session(MemoryStore::unavailable());
    assert!(play(&mut session, JOKES[1], true));
    assert_eq!(session.score(), 1);
    assert_eq!(session.high_score(), None);
}

// Difficulty grows with the streak: the hidden share never shrinks as score rises.
#[test]
fn hidden_letters_grow_with_score() {
    let tokens = TokenizerPolicy::default()
        .tokenize(" Because penguins refuse to attend formal banquets without tuxedos!");
    let mut prev = 0;
    for score in 0..60 {
        let sel = select_with_report(&tokens, score);
        assert!(sel.total_added >= prev, "fewer letters hidden at score {}", score);
        assert!(sel.total_added as f64 >= sel.threshold);
        prev = sel.total_added;
    }
    assert_eq!(prev, select_with_report(&tokens, 1000).total_added);
}

#[test]
fn blanks_round_trip_for_every_policy() {
    for raw in JOKES {
        for policy in [TokenizerPolicy::WhitespaceAndHyphens, TokenizerPolicy::Whitespace, TokenizerPolicy::LetterRuns] {
            let punchline = punchline_cat::joke::split_joke(raw).unwrap().punchline;
            let tokens = policy.tokenize(&punchline);
            for score in [0, 3, 30] {
                let hidden = select_with_report(&tokens, score).hidden;
                let blanks = build_blanks(&tokens, &hidden);
                assert_eq!(blanks.reconstruct(blanks.solution()), punchline);
            }
        }
    }
}

#[test]
fn invalid_jokes_do_not_start_a_round() {
    let mut session = new_session(MemoryStore::new(None));
    for bad in ["", "no terminal mark", "Only a setup.", "Huh? ?!"] {
        assert!(session.begin_fetch());
        let err = session.complete_fetch(Ok(bad.to_string())).unwrap_err();
        assert!(matches!(err, GameError::InvalidJokeFormat(_)), "{:?} gave {:?}", bad, err);
        assert_eq!(session.state(), GameState::NotStarted);
        assert_eq!(session.button_label(), "Generate joke");
    }
}
