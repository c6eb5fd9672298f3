//! Stateful chat with the Gemini `generateContent` REST endpoint.
//!
//! The whole conversation is sent on every turn so the model remembers which
//! jokes it already told. Turns are only recorded once a reply has arrived.

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn new(role: &str, text: &str) -> Self {
        Self { role: role.into(), parts: vec![Part { text: text.into() }] }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: &'a [Content],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

fn unavailable(detail: impl Into<String>) -> GameError {
    GameError::JokeSourceUnavailable(detail.into())
}

#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    history: Vec<Content>,
    /// Exchanges kept in the history; 0 keeps everything.
    max_exchanges: usize,
}

impl ChatSession {
    pub fn new(max_exchanges: usize) -> Self {
        Self { history: Vec::new(), max_exchanges }
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// JSON body for the next turn: the history plus `prompt` as a user turn.
    pub fn request_body(&self, prompt: &str) -> Result<String> {
        let mut contents = self.history.clone();
        contents.push(Content::new("user", prompt));
        serde_json::to_string(&GenerateRequest { contents: &contents })
            .map_err(|e| unavailable(format!("could not encode request: {e}")))
    }

    pub fn record_exchange(&mut self, prompt: &str, reply: &str) {
        self.history.push(Content::new("user", prompt));
        self.history.push(Content::new("model", reply));
        let keep = self.max_exchanges.saturating_mul(2);
        if keep > 0 && self.history.len() > keep {
            self.history.drain(..self.history.len() - keep);
        }
    }

    /// Send `config.prompt` and return the model's text.
    pub async fn send(&mut self, config: &GameConfig) -> Result<String> {
        let key = config
            .api_key
            .as_deref()
            .ok_or_else(|| unavailable("no API key configured"))?;
        let body = self.request_body(&config.prompt)?;
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;

        let headers = Headers::new().map_err(|e| GameError::from_js("headers", &e))?;
        headers
            .set("Content-Type", "application/json")
            .and_then(|_| headers.set("x-goog-api-key", key))
            .map_err(|e| GameError::from_js("headers", &e))?;

        let controller = AbortController::new().map_err(|e| GameError::from_js("abort controller", &e))?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));
        init.set_headers(&headers);
        init.set_signal(Some(&controller.signal()));

        let timer = if config.request_timeout_ms > 0 {
            let abort = controller.clone();
            let cb = Closure::once(move || abort.abort());
            let id = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.as_ref().unchecked_ref(),
                    config.request_timeout_ms.min(i32::MAX as u32) as i32,
                )
                .map_err(|e| GameError::from_js("timer", &e))?;
            Some((id, cb))
        } else {
            None
        };

        let request = Request::new_with_str_and_init(&config.generate_url(), &init)
            .map_err(|e| GameError::from_js("request", &e))?;
        let outcome = fetch_text(&window, &request).await;

        if let Some((id, _cb)) = timer {
            window.clear_timeout_with_handle(id);
        }
        let (status, text) = outcome.map_err(|e| {
            if controller.signal().aborted() {
                unavailable(format!("request timed out after {} ms", config.request_timeout_ms))
            } else {
                e
            }
        })?;

        let reply = parse_reply(status, &text)?;
        self.record_exchange(&config.prompt, &reply);
        log::debug!("chat history now {} turns", self.history.len());
        Ok(reply)
    }
}

async fn fetch_text(window: &web_sys::Window, request: &Request) -> Result<(u16, String)> {
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| GameError::from_js("fetch", &e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| GameError::from_js("response", &e))?;
    let text_promise = resp.text().map_err(|e| GameError::from_js("response body", &e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| GameError::from_js("response body", &e))?
        .as_string()
        .unwrap_or_default();
    Ok((resp.status(), text))
}

/// Extract the joke text from a `generateContent` response.
pub fn parse_reply(status: u16, body: &str) -> Result<String> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|env| env.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        return Err(unavailable(format!("HTTP {status}: {detail}")));
    }
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| unavailable(format!("malformed reply: {e}")))?;
    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| unavailable("reply had no candidates (blocked prompt?)"))?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(unavailable(format!("empty reply (finish reason {reason})")));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_appends_prompt_to_history() {
        let mut chat = ChatSession::default();
        chat.record_exchange("joke please", "A. B!");
        let body: serde_json::Value = serde_json::from_str(&chat.request_body("another").unwrap()).unwrap();
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "A. B!");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "another");
        assert_eq!(chat.history().len(), 2);
    }

    #[test]
    fn test_history_keeps_latest_exchanges() {
        let mut chat = ChatSession::new(2);
        for i in 0..5 {
            chat.record_exchange("joke please", &format!("Joke {i}. Ha!"));
        }
        let history = chat.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[1].parts[0].text, "Joke 3. Ha!");
        assert_eq!(history[3].parts[0].text, "Joke 4. Ha!");

        let mut unbounded = ChatSession::new(0);
        for _ in 0..30 {
            unbounded.record_exchange("a", "b");
        }
        assert_eq!(unbounded.history().len(), 60);
    }

    #[test]
    fn test_parse_reply_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Why? "},{"text":"Because!\n"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(parse_reply(200, body).unwrap(), "Why? Because!");
    }

    #[test]
    fn test_parse_reply_http_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = parse_reply(400, body).unwrap_err();
        assert_eq!(err, GameError::JokeSourceUnavailable("HTTP 400: API key not valid".into()));
    }

    #[test]
    fn test_parse_reply_blocked() {
        assert!(matches!(parse_reply(200, r#"{"promptFeedback":{}}"#), Err(GameError::JokeSourceUnavailable(_))));
        let empty = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let err = parse_reply(200, empty).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_reply_malformed() {
        assert!(matches!(parse_reply(200, "not json"), Err(GameError::JokeSourceUnavailable(_))));
    }
}
