//! Browser controller: owns the game session and wires it to the page.
//!
//! The page is a setup line, the punchline with per-letter inputs, a status
//! message, the streak display and a single advance button. All state lives in
//! the thread-local `APP`; event closures look it up rather than capturing it.
//! No `RefCell` borrow is held across the chat request's `.await`: the chat
//! session is cloned out, awaited, and written back.
//!
//! Mounting again replaces the running game: the old click listener is
//! detached and a reply still in flight for the old mount is discarded.

mod render;

use crate::chat::ChatSession;
use crate::config::GameConfig;
use crate::error::{GameError, Result as GameResult};
use crate::session::{GameSession, GameState, Outcome, Round};
use crate::source::{CuratedPool, JokeOrigin, random_unit};
use crate::store::LocalStorageStore;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent, window};

struct App {
    config: GameConfig,
    session: GameSession<LocalStorageStore>,
    chat: ChatSession,
    doc: Document,
    setup_el: HtmlElement,
    punchline_el: HtmlElement,
    message_el: HtmlElement,
    score_el: HtmlElement,
    button: HtmlButtonElement,
    inputs: Vec<HtmlInputElement>,
    // Listeners for the current round's inputs; dropped with them.
    slot_listeners: Vec<Closure<dyn FnMut(Event)>>,
    advance_listener: Closure<dyn FnMut(Event)>,
    mount: u32,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static MOUNTS: std::cell::Cell<u32> = const { std::cell::Cell::new(0) };
}

/// Take down a previous mount so its listeners cannot fire into the new game.
fn unmount() {
    let Some(old) = APP.with(|a| a.borrow_mut().take()) else { return };
    old.button
        .remove_event_listener_with_callback("click", old.advance_listener.as_ref().unchecked_ref())
        .ok();
    old.punchline_el.set_inner_html("");
    old.setup_el.set_text_content(Some(""));
    old.message_el.set_text_content(Some(""));
    log::info!("replacing game mount {}", old.mount);
}

pub fn start_ui(config: GameConfig) -> Result<(), JsValue> {
    unmount();
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let root = render::ensure_child(
        &doc,
        &body,
        "div",
        &config.root_id,
        "max-width:640px; margin:48px auto; padding:24px; font-family:'Fira Code', monospace; font-size:20px; line-height:1.8; background:#181818; color:#eee; border:2px solid #222; border-radius:18px; box-shadow:0 0 32px 0 rgba(0,0,0,0.18);",
    )?;
    let score_el = render::ensure_child(&doc, &root, "div", "pc-score", "font-size:15px; color:#ffd166; letter-spacing:0.5px;")?;
    let setup_el = render::ensure_child(&doc, &root, "p", "pc-setup", "margin:16px 0 4px 0;")?;
    let punchline_el = render::ensure_child(&doc, &root, "p", "pc-punchline", "margin:0 0 8px 0; min-height:1.8em;")?;
    let message_el = render::ensure_child(&doc, &root, "div", "pc-message", "font-size:16px; min-height:1.4em; color:#aaa;")?;
    let button = render::ensure_button(&doc, &root, "pc-advance")?;

    let store = LocalStorageStore::probe(&config.high_score_key);
    let session = GameSession::new(store, CuratedPool::new(crate::CURATED_JOKES.iter().copied()), config.tokenizer);
    if config.api_key.is_none() {
        log::warn!("no API key configured; serving curated jokes only");
    }

    let advance_listener = Closure::wrap(Box::new(move |_evt: Event| {
        on_advance();
    }) as Box<dyn FnMut(Event)>);
    button.add_event_listener_with_callback("click", advance_listener.as_ref().unchecked_ref())?;

    let mount = MOUNTS.with(|m| {
        m.set(m.get() + 1);
        m.get()
    });
    let app = App {
        chat: ChatSession::new(config.chat_history_limit),
        config,
        session,
        doc,
        setup_el,
        punchline_el,
        message_el,
        score_el,
        button: button.clone(),
        inputs: Vec::new(),
        slot_listeners: Vec::new(),
        advance_listener,
        mount,
    };
    app.render_status();
    APP.with(|a| a.replace(Some(app)));
    log::info!("game mount {mount} started");
    Ok(())
}

fn on_advance() {
    let request = APP.with(|cell| {
        let mut guard = cell.borrow_mut();
        let app = guard.as_mut()?;
        match app.session.state() {
            GameState::JokeGiven => {
                app.submit_guess();
                None
            }
            GameState::NotStarted | GameState::ResultGiven => app.start_fetch(),
        }
    });

    if let Some((mut chat, config, mount)) = request {
        wasm_bindgen_futures::spawn_local(async move {
            let result = chat.send(&config).await;
            APP.with(|cell| {
                if let Some(app) = cell.borrow_mut().as_mut() {
                    if app.mount != mount {
                        log::info!("dropping reply for replaced mount {mount}");
                        return;
                    }
                    if result.is_ok() {
                        app.chat = chat;
                    }
                    app.finish_fetch(result);
                }
            });
        });
    }
}

fn on_slot_input(handle: usize) {
    APP.with(|cell| {
        let Ok(guard) = cell.try_borrow() else { return };
        let Some(app) = guard.as_ref() else { return };
        let Some(input) = app.inputs.get(handle) else { return };

        // Keep only the last typed letter (covers paste and overtyping).
        let value = input.value();
        let last = value.chars().rev().find(|c| c.is_alphabetic());
        input.set_value(&last.map(String::from).unwrap_or_default());
        if last.is_none() {
            return;
        }
        let next = match app.inputs.get(handle + 1) {
            Some(next) => next.focus(),
            None => app.button.focus(),
        };
        if let Err(e) = next {
            log::warn!("focus failed: {e:?}");
        }
    });
}

fn on_slot_keydown(handle: usize, evt: &KeyboardEvent) {
    if evt.key() != "Backspace" || handle == 0 {
        return;
    }
    APP.with(|cell| {
        let Ok(guard) = cell.try_borrow() else { return };
        let Some(app) = guard.as_ref() else { return };
        let current_empty = app.inputs.get(handle).is_some_and(|i| i.value().is_empty());
        if let (true, Some(prev)) = (current_empty, app.inputs.get(handle - 1)) {
            prev.focus().ok();
        }
    });
}

impl App {
    /// Begin a fetch. Returns the chat session, config and mount id to await,
    /// or `None` when the joke was served synchronously (curated) or nothing was due.
    fn start_fetch(&mut self) -> Option<(ChatSession, GameConfig, u32)> {
        if !self.session.begin_fetch() {
            return None;
        }
        self.show_message("Thinking of a joke...");
        self.render_status();

        let (origin, curated) = self.session.pick_origin(
            random_unit(),
            self.config.curated_probability,
            random_unit(),
            self.config.api_key.is_some(),
        );
        log::info!("joke origin: {origin:?}");
        match (origin, curated) {
            (JokeOrigin::Curated, Some(joke)) => {
                self.finish_fetch(Ok(joke));
                None
            }
            _ => Some((self.chat.clone(), self.config.clone(), self.mount)),
        }
    }

    fn finish_fetch(&mut self, fetched: GameResult<String>) {
        let round = self.session.complete_fetch(fetched).map(Round::clone);
        match round {
            Ok(round) => {
                if let Err(e) = self.render_round(&round) {
                    log::error!("could not render round: {e:?}");
                }
                self.show_message("");
            }
            Err(err) => {
                log::error!("{err}");
                self.show_message(&match err {
                    GameError::InvalidJokeFormat(_) => "The joke came back garbled. Try again!".to_string(),
                    other => other.to_string(),
                });
            }
        }
        self.render_status();
    }

    fn render_round(&mut self, round: &Round) -> Result<(), JsValue> {
        self.setup_el.set_text_content(Some(&round.joke.setup));
        self.inputs = render::render_blanks(&self.doc, &self.punchline_el, &round.blanks)?;
        self.slot_listeners.clear();
        for (handle, input) in self.inputs.iter().enumerate() {
            let on_input = Closure::wrap(Box::new(move |_evt: Event| {
                on_slot_input(handle);
            }) as Box<dyn FnMut(Event)>);
            input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
            let on_key = Closure::wrap(Box::new(move |evt: Event| {
                if let Some(key_evt) = evt.dyn_ref::<KeyboardEvent>() {
                    on_slot_keydown(handle, key_evt);
                }
            }) as Box<dyn FnMut(Event)>);
            input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
            self.slot_listeners.push(on_input);
            self.slot_listeners.push(on_key);
        }
        match self.inputs.first() {
            Some(first) => first.focus(),
            None => self.button.focus(),
        }
    }

    fn submit_guess(&mut self) {
        let answers: Vec<Option<char>> = self.inputs.iter().map(|i| i.value().chars().next()).collect();
        let Some(outcome) = self.session.submit(&answers) else { return };
        for (input, &ok) in self.inputs.iter().zip(&outcome.verdict.per_slot) {
            render::mark_slot(input, ok);
        }
        self.show_message(&outcome_message(&outcome));
        self.render_status();
        self.button.focus().ok();
    }

    fn show_message(&self, text: &str) {
        self.message_el.set_text_content(Some(text));
    }

    fn render_status(&self) {
        self.button.set_text_content(Some(self.session.button_label()));
        self.button.set_disabled(!self.session.button_enabled());
        self.score_el
            .set_text_content(Some(&render::score_text(self.session.score(), self.session.high_score())));
    }
}

fn outcome_message(outcome: &Outcome) -> String {
    match (&outcome.revealed, outcome.new_high_score) {
        (Some(punchline), _) => format!("Not quite! The punchline was: {punchline}"),
        (None, true) => "Correct! New high score!".to_string(),
        (None, false) => "Correct!".to_string(),
    }
}
