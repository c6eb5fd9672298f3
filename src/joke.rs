use crate::error::{GameError, Result};
use crate::words::letter_count;

/// Marks that end the setup sentence.
pub const TERMINAL_MARKS: [char; 3] = ['.', '?', '!'];

/// A joke split into its two sentences. Immutable for the lifetime of a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

/// Split raw joke text at the first terminal mark.
///
/// The setup keeps the mark; the punchline is the untrimmed remainder, so
/// `setup + punchline` always equals the trimmed input.
pub fn split_joke(raw: &str) -> Result<Joke> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(GameError::InvalidJokeFormat("empty joke text".into()));
    }
    let cut = text
        .char_indices()
        .find(|(_, c)| TERMINAL_MARKS.contains(c))
        .map(|(i, c)| i + c.len_utf8())
        .ok_or_else(|| {
            GameError::InvalidJokeFormat(format!("no '.', '?' or '!' in {text:?}"))
        })?;
    let (setup, punchline) = text.split_at(cut);
    if letter_count(punchline) == 0 {
        return Err(GameError::InvalidJokeFormat(format!(
            "nothing to guess after {setup:?}"
        )));
    }
    log::debug!("split joke: setup={setup:?} punchline={punchline:?}");
    Ok(Joke {
        setup: setup.to_string(),
        punchline: punchline.to_string(),
    })
}
