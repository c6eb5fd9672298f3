//! Where the next joke comes from: the curated pool or the chat model.

/// Where a joke should come from this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JokeOrigin {
    Curated,
    Chat,
}

/// Hand-picked jokes; each is served at most once per session.
#[derive(Clone, Debug, Default)]
pub struct CuratedPool {
    jokes: Vec<String>,
}

impl CuratedPool {
    pub fn new<I, S>(jokes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { jokes: jokes.into_iter().map(Into::into).collect() }
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }

    /// Remove and return a joke; `roll` in `[0, 1)` picks which one.
    pub fn take(&mut self, roll: f64) -> Option<String> {
        if self.jokes.is_empty() {
            return None;
        }
        let idx = ((roll.clamp(0.0, 1.0) * self.jokes.len() as f64) as usize).min(self.jokes.len() - 1);
        Some(self.jokes.remove(idx))
    }
}

/// Curated when `roll < probability` and jokes remain, chat otherwise.
/// Without a chat backend the pool is used whenever it is non-empty.
pub fn choose_origin(roll: f64, probability: f64, pool: &CuratedPool, chat_enabled: bool) -> JokeOrigin {
    if !pool.is_empty() && (!chat_enabled || roll < probability) {
        JokeOrigin::Curated
    } else {
        JokeOrigin::Chat
    }
}

/// Uniform roll in `[0, 1)`.
pub fn random_unit() -> f64 {
    rand::random::<f64>()
}
