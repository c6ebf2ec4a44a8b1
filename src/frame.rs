use crate::constants::{APPLYING_ATTR, CARD_PERSPECTIVE_PX, HOVER_ATTR};
use crate::dom;
use crate::input;
use crate::ui;
use card_core::{CardStudio, EffectId, Instant, RenderFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flags raised by bus subscribers and consumed by the frame loop. Handlers
/// run inside a studio borrow, so they only mark work here.
#[derive(Clone, Default)]
pub struct UiFlags {
    pub controls_dirty: Rc<Cell<bool>>,
    pub presets_busy: Rc<Cell<Option<bool>>>,
    pub selection: Rc<Cell<Option<Option<EffectId>>>>,
}

pub struct FrameContext {
    pub studio: Rc<RefCell<CardStudio>>,
    pub document: web::Document,
    pub card: web::HtmlElement,
    pub layers: Vec<(EffectId, web::HtmlElement)>,
    pub flags: UiFlags,

    pub last_revision: Option<u64>,
    pub last_transform: String,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let frame = self.studio.borrow_mut().tick(Instant::now());

        self.write_layers(&frame);
        self.write_card(&frame);

        if let Some(busy) = self.flags.presets_busy.take() {
            ui::set_presets_disabled(&self.document, busy);
        }
        if let Some(selection) = self.flags.selection.take() {
            ui::sync_effect_select(&self.document, selection);
        }
        if self.flags.controls_dirty.take() {
            let studio = self.studio.borrow();
            ui::sync_parameter_controls(&self.document, studio.store().values());
        }
    }

    fn write_layers(&mut self, frame: &RenderFrame) {
        for (effect, el) in &self.layers {
            match frame.layers.iter().find(|s| s.effect == Some(*effect)) {
                Some(style) => {
                    for (name, value) in style.css_properties() {
                        dom::set_style_property(el, name, &value);
                    }
                    dom::set_style_property(el, "display", "block");
                }
                None => dom::set_style_property(el, "display", "none"),
            }
        }
        if self.last_revision != Some(frame.revision) {
            log::debug!(
                "[frame] revision {} with {} active layer(s)",
                frame.revision,
                frame.layers.len()
            );
            self.last_revision = Some(frame.revision);
        }
    }

    fn write_card(&mut self, frame: &RenderFrame) {
        let transform = input::card_css_transform(frame.rotation, CARD_PERSPECTIVE_PX);
        if transform != self.last_transform {
            dom::set_style_property(&self.card, "transform", &transform);
            self.last_transform = transform;
        }
        set_flag_attr(&self.card, APPLYING_ATTR, frame.is_applying_preset);
        set_flag_attr(&self.card, HOVER_ATTR, frame.pointer.is_hovering);
    }
}

fn set_flag_attr(el: &web::HtmlElement, name: &str, on: bool) {
    let res = if on {
        el.set_attribute(name, "")
    } else {
        el.remove_attribute(name)
    };
    if let Err(e) = res {
        log::warn!("[frame] {} update failed: {:?}", name, e);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
