// Element construction for the game page. Styling is inline, like the rest of
// the overlay; hosts can override it through the `pc-*` ids and classes.
use crate::blanks::{Blanks, Segment};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlInputElement};

pub const SLOT_STYLE: &str = "width:1.3em; margin:0 1px; text-align:center; font:inherit; text-transform:lowercase; border:none; border-bottom:2px solid #ffd166; background:transparent; color:#fff;";
pub const CORRECT_STYLE: &str = "border-bottom-color:#4caf50; color:#4caf50;";
pub const WRONG_STYLE: &str = "border-bottom-color:#ff4d4d; color:#ff4d4d;";

/// Reuse the element with `id` or append a new `tag` to `parent`.
pub fn ensure_child(doc: &Document, parent: &HtmlElement, tag: &str, id: &str, style: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el.dyn_into::<HtmlElement>().map_err(JsValue::from);
    }
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    parent.append_child(&el)?;
    Ok(el)
}

pub fn ensure_button(doc: &Document, parent: &HtmlElement, id: &str) -> Result<HtmlButtonElement, JsValue> {
    let el = ensure_child(
        doc,
        parent,
        "button",
        id,
        "margin-top:18px; font-family:'Fira Code', monospace; font-size:16px; padding:6px 16px; border-radius:6px; border:1px solid #333; background:#ffd166; color:#181818; cursor:pointer;",
    )?;
    el.dyn_into::<HtmlButtonElement>().map_err(JsValue::from)
}

/// Fill `container` with the punchline: spans for literal text, one input per slot.
/// Returns the inputs ordered by slot handle.
pub fn render_blanks(doc: &Document, container: &HtmlElement, blanks: &Blanks) -> Result<Vec<HtmlInputElement>, JsValue> {
    container.set_inner_html("");
    let mut inputs = Vec::with_capacity(blanks.slot_count());
    for seg in &blanks.segments {
        match seg {
            Segment::Literal(text) => {
                let span = doc.create_element("span")?;
                span.set_text_content(Some(text));
                container.append_child(&span)?;
            }
            Segment::Slot(slot) => {
                let input: HtmlInputElement = doc.create_element("input")?.dyn_into()?;
                input.set_type("text");
                input.set_max_length(1);
                input.set_size(1);
                input.set_autocomplete("off");
                input.set_class_name("pc-slot");
                input.set_attribute("data-handle", &slot.handle.to_string())?;
                input.set_attribute("style", SLOT_STYLE)?;
                container.append_child(&input)?;
                inputs.push(input);
            }
        }
    }
    Ok(inputs)
}

/// Colour a slot after the guess and lock it.
pub fn mark_slot(input: &HtmlInputElement, correct: bool) {
    let (class, extra) = if correct { ("pc-correct", CORRECT_STYLE) } else { ("pc-wrong", WRONG_STYLE) };
    input.class_list().add_1(class).ok();
    input.set_attribute("style", &format!("{SLOT_STYLE} {extra}")).ok();
    input.set_disabled(true);
}

pub fn score_text(score: u32, high_score: Option<u32>) -> String {
    match high_score {
        Some(best) => format!("Streak: {score}  Best: {best}"),
        None => format!("Streak: {score}"),
    }
}
