use card_core::{CardRect, EffectId, ParamValue};
use glam::Vec2;
use web_sys as web;

#[inline]
pub fn element_rect(el: &web::Element) -> CardRect {
    let rect = el.get_bounding_client_rect();
    CardRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// Pointer position normalized to the card box.
#[inline]
pub fn pointer_card_uv(ev: &web::PointerEvent, card: &web::Element) -> Vec2 {
    let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
    element_rect(card).normalize(client)
}

// ---------------- Control value parsing ----------------

/// Turn an `<input>`'s type and raw value into a parameter value.
/// Numeric inputs that fail to parse yield `None`.
pub fn parse_param_value(input_type: &str, raw: &str, checked: bool) -> Option<ParamValue> {
    match input_type {
        "checkbox" => Some(ParamValue::Toggle(checked)),
        "range" | "number" => raw.trim().parse::<f32>().ok().map(ParamValue::Number),
        _ => Some(ParamValue::Text(raw.to_string())),
    }
}

/// Inverse of [`parse_param_value`] for syncing controls after a preset.
pub fn param_display_value(value: &ParamValue) -> (String, bool) {
    match value {
        ParamValue::Number(n) => (n.to_string(), false),
        ParamValue::Toggle(b) => (String::new(), *b),
        ParamValue::Text(s) => (s.clone(), false),
    }
}

// ---------------- Keyboard shortcuts ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    SelectEffect(Option<EffectId>),
    ResetView,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "0" => Some(KeyAction::SelectEffect(None)),
        "r" | "R" => Some(KeyAction::ResetView),
        digit => {
            let n: usize = digit.parse().ok()?;
            EffectId::ALL
                .get(n.checked_sub(1)?)
                .map(|&e| KeyAction::SelectEffect(Some(e)))
        }
    }
}

/// CSS transform for the card element from a pitch/yaw rotation in degrees.
#[inline]
pub fn card_css_transform(rotation: Vec2, perspective_px: f32) -> String {
    format!(
        "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg)",
        perspective_px, rotation.x, rotation.y
    )
}
