use crate::constants::{
    BRIGHTNESS_INPUT_ID, EFFECT_SELECT_ID, LIGHTING_SELECT_ID, MATERIAL_SELECT_ID,
    PARAM_EFFECT_ATTR, PARAM_NAME_ATTR, PRESET_ATTR, RESET_VIEW_ID, SCENE_SELECT_ID,
};
use crate::dom;
use crate::input;
use card_core::{CardStudio, CoreResult, Instant};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_controls(document: &web::Document, studio: &Rc<RefCell<CardStudio>>) {
    wire_selects(document, studio);
    wire_brightness(document, studio);
    wire_parameter_inputs(document, studio);
    wire_preset_buttons(document, studio);

    let studio_reset = studio.clone();
    dom::add_listener_by_id(document, RESET_VIEW_ID, "click", move |_ev: web::MouseEvent| {
        studio_reset.borrow_mut().reset_view();
    });
}

fn select_value(ev: &web::Event) -> Option<String> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlSelectElement>().ok())
        .map(|s| s.value())
}

fn wire_selects(document: &web::Document, studio: &Rc<RefCell<CardStudio>>) {
    let selects: [(&str, fn(&mut CardStudio, &str) -> CoreResult<()>); 4] = [
        (EFFECT_SELECT_ID, CardStudio::select_effect_by_name),
        (SCENE_SELECT_ID, CardStudio::select_scene),
        (LIGHTING_SELECT_ID, CardStudio::select_lighting),
        (MATERIAL_SELECT_ID, CardStudio::select_material),
    ];
    for (id, apply) in selects {
        let studio = studio.clone();
        dom::add_listener_by_id(document, id, "change", move |ev: web::Event| {
            let Some(value) = select_value(&ev) else {
                return;
            };
            if let Err(e) = apply(&mut *studio.borrow_mut(), &value) {
                log::warn!("[controls] #{}: {}", id, e);
            }
        });
    }
}

fn wire_brightness(document: &web::Document, studio: &Rc<RefCell<CardStudio>>) {
    let studio = studio.clone();
    dom::add_listener_by_id(document, BRIGHTNESS_INPUT_ID, "input", move |ev: web::Event| {
        let Some(el) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Ok(v) = el.value().trim().parse::<f32>() {
            studio.borrow_mut().set_brightness(v);
        }
    });
}

fn wire_parameter_inputs(document: &web::Document, studio: &Rc<RefCell<CardStudio>>) {
    let selector = format!("input[{}][{}]", PARAM_EFFECT_ATTR, PARAM_NAME_ATTR);
    for el in dom::query_all(document, &selector) {
        let (Some(effect), Some(param)) = (
            el.get_attribute(PARAM_EFFECT_ATTR),
            el.get_attribute(PARAM_NAME_ATTR),
        ) else {
            continue;
        };
        let studio = studio.clone();
        dom::listen(&el, "input", move |ev: web::Event| {
            let Some(input_el) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(value) =
                input::parse_param_value(&input_el.type_(), &input_el.value(), input_el.checked())
            else {
                return;
            };
            if let Err(e) = studio.borrow_mut().set_parameter(&effect, &param, value) {
                log::warn!("[controls] {}.{}: {}", effect, param, e);
            }
        });
    }
}

fn wire_preset_buttons(document: &web::Document, studio: &Rc<RefCell<CardStudio>>) {
    for el in dom::query_all(document, &format!("[{}]", PRESET_ATTR)) {
        let Some(preset_id) = el.get_attribute(PRESET_ATTR) else {
            continue;
        };
        let studio = studio.clone();
        dom::listen(&el, "click", move |_ev: web::MouseEvent| {
            let result = studio.borrow_mut().apply_preset(&preset_id, Instant::now());
            if let Err(e) = result {
                log::warn!("[controls] {}", e);
            }
        });
    }
}
