use crate::dom;
use crate::input::{self, KeyAction};
use card_core::CardStudio;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, studio: &Rc<RefCell<CardStudio>>) {
    // Leave typing in inputs alone.
    if let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) {
        let tag = el.tag_name();
        if tag == "INPUT" || tag == "SELECT" || tag == "TEXTAREA" {
            return;
        }
    }
    match input::key_action(&ev.key()) {
        Some(KeyAction::SelectEffect(effect)) => {
            studio.borrow_mut().select_effect(effect);
        }
        Some(KeyAction::ResetView) => {
            studio.borrow_mut().reset_view();
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(studio: Rc<RefCell<CardStudio>>) {
    if let Some(window) = web::window() {
        dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &studio);
        });
    }
}
