use crate::error::Result;
use crate::words::TokenizerPolicy;
use serde::Deserialize;

pub const DEFAULT_PROMPT: &str = "Tell me a new joke.
The joke should be two sentences long.
Each sentence should end with a full stop, question mark or exclamation mark.
The first sentence should be the setup and the second should be the punchline.
Limit the entire response to a maximum of 80 words.";

/// Options passed from the host page to `start_game`. Every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Gemini API key; without one only curated jokes are served.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub prompt: String,
    /// Chance of serving a curated joke instead of asking the model.
    pub curated_probability: f64,
    /// Abort the chat request after this long; 0 waits forever.
    pub request_timeout_ms: u32,
    /// Past exchanges resent to the model each turn; 0 keeps the whole chat.
    pub chat_history_limit: usize,
    pub high_score_key: String,
    pub tokenizer: TokenizerPolicy,
    /// Container element id, created under `<body>` if missing.
    pub root_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            prompt: DEFAULT_PROMPT.into(),
            curated_probability: 0.1,
            request_timeout_ms: 20_000,
            chat_history_limit: 10,
            high_score_key: "highScore".into(),
            tokenizer: TokenizerPolicy::default(),
            root_id: "pc-root".into(),
        }
    }
}

impl GameConfig {
    /// Parse host-supplied JSON; blank input gives the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: GameConfig = serde_json::from_str(json)?;
        config.curated_probability = config.curated_probability.clamp(0.0, 1.0);
        if config.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            config.api_key = None;
        }
        Ok(config)
    }

    pub fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_blank_config_is_default() {
        assert_eq!(GameConfig::from_json("").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg = GameConfig::from_json(
            r#"{"api_key":"k","curated_probability":3.0,"tokenizer":"letter_runs"}"#,
        )
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.curated_probability, 1.0);
        assert_eq!(cfg.tokenizer, TokenizerPolicy::LetterRuns);
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.high_score_key, "highScore");
        assert_eq!(cfg.chat_history_limit, 10);
    }

    #[test]
    fn test_empty_api_key_is_dropped() {
        let cfg = GameConfig::from_json(r#"{"api_key":"  "}"#).unwrap();
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(GameConfig::from_json("{nope"), Err(GameError::Config(_))));
    }

    #[test]
    fn test_generate_url() {
        let cfg = GameConfig { endpoint: "https://x/models/".into(), ..GameConfig::default() };
        assert_eq!(cfg.generate_url(), "https://x/models/gemini-1.5-flash:generateContent");
    }
}
