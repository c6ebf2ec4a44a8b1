use crate::constants::{PARAM_EFFECT_ATTR, PARAM_NAME_ATTR, PRESET_ATTR};
use crate::dom;
use crate::input;
use card_core::{EffectId, EffectValues};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Disable preset buttons while an application is in flight.
pub fn set_presets_disabled(document: &web::Document, disabled: bool) {
    for el in dom::query_all(document, &format!("[{}]", PRESET_ATTR)) {
        if disabled {
            _ = el.set_attribute("disabled", "");
            _ = el.class_list().add_1("is-busy");
        } else {
            _ = el.remove_attribute("disabled");
            _ = el.class_list().remove_1("is-busy");
        }
    }
}

/// Write store values back into the parameter inputs, e.g. after a preset.
pub fn sync_parameter_controls(document: &web::Document, values: &EffectValues) {
    let selector = format!("input[{}][{}]", PARAM_EFFECT_ATTR, PARAM_NAME_ATTR);
    for el in dom::query_all(document, &selector) {
        let (Some(effect), Some(param)) = (
            el.get_attribute(PARAM_EFFECT_ATTR),
            el.get_attribute(PARAM_NAME_ATTR),
        ) else {
            continue;
        };
        let Some(value) = effect
            .parse::<EffectId>()
            .ok()
            .and_then(|e| values.get(&e))
            .and_then(|params| params.get(&param))
        else {
            continue;
        };
        if let Some(input_el) = el.dyn_ref::<web::HtmlInputElement>() {
            let (text, checked) = input::param_display_value(value);
            if input_el.type_() == "checkbox" {
                input_el.set_checked(checked);
            } else {
                input_el.set_value(&text);
            }
        }
    }
}

pub fn sync_effect_select(document: &web::Document, effect: Option<EffectId>) {
    if let Some(select) = document
        .get_element_by_id(crate::constants::EFFECT_SELECT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
    {
        select.set_value(effect.map(EffectId::as_str).unwrap_or("none"));
    }
}
