//! Punchline Cat core crate.
//!
//! A chat model tells a two-sentence joke; the punchline's rarer words are
//! hidden behind per-letter boxes and the player guesses them. Correct
//! guesses grow a streak, and the longer the streak the more of the
//! punchline gets hidden. Everything except `ui` is plain Rust so it can be
//! tested natively with `cargo test`.

use wasm_bindgen::prelude::*;

pub mod blanks;
pub mod chat;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod joke;
pub mod session;
pub mod source;
pub mod store;
pub mod verify;
pub mod words;

mod ui;

pub use config::GameConfig;
pub use error::GameError;
pub use session::{GameSession, GameState};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
}

// -----------------------------------------------------------------------------
// Word lists
// -----------------------------------------------------------------------------

/// The hundred most frequent English words. Punchline words found here are
/// only hidden when nothing rarer is available.
// Source: https://www.ef-australia.com.au/english-resources/english-vocabulary/top-100-words/
pub const COMMON_WORDS: &[&str] = &[
    "a", "about", "all", "also", "and", "as", "at", "be", "because", "but",
    "by", "can", "come", "could", "day", "do", "even", "find", "first", "for",
    "from", "get", "give", "go", "have", "he", "her", "here", "him", "his",
    "how", "I", "if", "in", "into", "it", "its", "just", "know", "like",
    "look", "make", "man", "many", "me", "more", "my", "new", "no", "not",
    "now", "of", "on", "one", "only", "or", "other", "our", "out", "people",
    "say", "see", "she", "so", "some", "take", "tell", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "thing", "think", "this", "those",
    "time", "to", "two", "up", "use", "very", "want", "way", "we", "well",
    "what", "when", "which", "who", "will", "with", "would", "year", "you", "your",
];

/// Jokes occasionally served instead of asking the model, each at most once per session.
pub const CURATED_JOKES: &[&str] = &[
    "Why don't skeletons fight each other? They don't have the guts.",
    "What do you call a fish with no eyes? A fsh.",
    "Why did the scarecrow win an award? He was outstanding in his field.",
    "I told my cat a joke about dogs. She didn't find it pawsitively amusing.",
    "Why can't a bicycle stand up by itself? It is two tired.",
    "What do you call a bear with no teeth? A gummy bear!",
    "Why did the math book look so sad? Because it had too many problems.",
    "I'm reading a book about anti-gravity. It's impossible to put down!",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Mount the game. `config_json` is an optional JSON object of `GameConfig` fields.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    let config = GameConfig::from_json(config_json.as_deref().unwrap_or(""))?;
    ui::start_ui(config)
}
