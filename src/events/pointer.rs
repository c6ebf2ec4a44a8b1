use crate::dom;
use crate::input;
use card_core::CardStudio;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub card: web::HtmlElement,
    pub studio: Rc<RefCell<CardStudio>>,
}

pub fn wire_pointer_handlers(w: &PointerWiring) {
    wire_hover(w);
    wire_pointermove(w);
    wire_pointerdown(w);
    wire_pointerup(w);
}

fn wire_hover(w: &PointerWiring) {
    let studio = w.studio.clone();
    dom::listen(&w.card, "pointerenter", move |_ev: web::PointerEvent| {
        studio.borrow_mut().pointer_enter();
    });
    let studio = w.studio.clone();
    dom::listen(&w.card, "pointerleave", move |_ev: web::PointerEvent| {
        studio.borrow_mut().pointer_leave();
    });
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let Some(window) = web::window() else {
        return;
    };
    // Listen on the window so a drag keeps rotating outside the card.
    dom::listen(&window, "pointermove", move |ev: web::PointerEvent| {
        let mut studio = w.studio.borrow_mut();
        let tracker = studio.pointer();
        if !tracker.is_hovering() && !tracker.is_dragging() {
            return;
        }
        let uv = input::pointer_card_uv(&ev, &w.card);
        studio.pointer_move(uv);
    });
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let card = w.card.clone();
    dom::listen(&card, "pointerdown", move |ev: web::PointerEvent| {
        let uv = input::pointer_card_uv(&ev, &w.card);
        w.studio.borrow_mut().pointer_down(uv);
        _ = w.card.set_pointer_capture(ev.pointer_id());
        log::debug!("[pointer] begin drag at ({:.2}, {:.2})", uv.x, uv.y);
        ev.prevent_default();
    });
}

fn wire_pointerup(w: &PointerWiring) {
    let studio = w.studio.clone();
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(&window, "pointerup", move |_ev: web::PointerEvent| {
        studio.borrow_mut().pointer_up();
    });
}
