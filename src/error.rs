use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("The joke could not be split into a setup and a punchline: {0}")]
    InvalidJokeFormat(String),
    #[error("No joke could be fetched: {0}")]
    JokeSourceUnavailable(String),
    #[error("High scores cannot be saved in this browser: {0}")]
    PersistenceUnavailable(String),
    #[error("Invalid game configuration: {0}")]
    Config(String),
}

impl GameError {
    /// Wraps a JS exception (fetch rejection, DOM error) as a joke source failure.
    pub fn from_js(context: &str, value: &JsValue) -> Self {
        let detail = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        GameError::JokeSourceUnavailable(format!("{context}: {detail}"))
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
