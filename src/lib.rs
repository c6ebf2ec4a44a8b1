#![cfg(target_arch = "wasm32")]
use card_core::{CardStudio, EffectEvent, EffectId, Instant, ParamValue, TextureState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod ui;

use constants::{CARD_ID, EFFECTS_CONTAINER_ID, EFFECT_LAYER_ATTR, EFFECT_LAYER_BASE_STYLE};
use frame::{FrameContext, UiFlags};

struct App {
    studio: Rc<RefCell<CardStudio>>,
    flags: UiFlags,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    let out = APP.with(|app| app.borrow().as_ref().map(f));
    if out.is_none() {
        log::warn!("card studio called before start");
    }
    out
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-studio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let card = dom::html_element_by_id(&document, CARD_ID)?;
    let container = dom::html_element_by_id(&document, EFFECTS_CONTAINER_ID)?;
    let layers = create_effect_layers(&document, &container)?;

    let flags = UiFlags::default();
    let mut studio = CardStudio::default();
    subscribe_ui(&mut studio, &flags);
    let studio = Rc::new(RefCell::new(studio));

    events::wire_pointer_handlers(&events::PointerWiring {
        card: card.clone(),
        studio: studio.clone(),
    });
    events::wire_global_keydown(studio.clone());
    events::wire_controls(&document, &studio);

    // Push store defaults into the controls on the first frame.
    flags.controls_dirty.set(true);

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        studio: studio.clone(),
        document,
        card,
        layers,
        flags: flags.clone(),
        last_revision: None,
        last_transform: String::new(),
    }));
    frame::start_loop(frame_ctx);

    APP.with(|app| *app.borrow_mut() = Some(App { studio, flags }));
    log::info!("[init] {} effect layers ready", EffectId::ALL.len());
    Ok(())
}

fn create_effect_layers(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<Vec<(EffectId, web::HtmlElement)>> {
    let mut layers = Vec::with_capacity(EffectId::ALL.len());
    for effect in EffectId::ALL {
        let el: web::HtmlElement = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("create layer: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("layer is not an HtmlElement: {:?}", e))?;
        el.set_attribute(EFFECT_LAYER_ATTR, effect.as_str())
            .and_then(|_| el.set_attribute("style", EFFECT_LAYER_BASE_STYLE))
            .and_then(|_| container.append_child(&el).map(|_| ()))
            .map_err(|e| anyhow::anyhow!("attach {} layer: {:?}", effect, e))?;
        layers.push((effect, el));
    }
    Ok(layers)
}

// Bus handlers run while the studio is mutably borrowed; they only raise
// flags for the frame loop.
fn subscribe_ui(studio: &mut CardStudio, flags: &UiFlags) {
    let flags = flags.clone();
    studio.bus_mut().subscribe(move |event| match event {
        EffectEvent::PresetStarted { .. } => flags.presets_busy.set(Some(true)),
        EffectEvent::PresetOverlaid { .. } => flags.controls_dirty.set(true),
        EffectEvent::PresetSettled { .. } => flags.presets_busy.set(Some(false)),
        EffectEvent::EffectSelected(effect) => flags.selection.set(Some(*effect)),
        EffectEvent::TextureChanged { has_texture } => {
            log::info!("[texture] has_texture={}", has_texture);
        }
        EffectEvent::PresetRejected { .. }
        | EffectEvent::ParameterChanged { .. }
        | EffectEvent::ViewReset => {}
    });
}

/// Apply a built-in preset by id. Returns `false` if the id is unknown or a
/// preset is already applying.
#[wasm_bindgen]
pub fn apply_preset(id: &str) -> bool {
    with_app(|app| {
        let result = app.studio.borrow_mut().apply_preset(id, Instant::now());
        result.unwrap_or_else(|e| {
            log::warn!("[preset] {}", e);
            false
        })
    })
    .unwrap_or(false)
}

/// Numbers, booleans and strings map to slider, toggle and text values.
#[wasm_bindgen]
pub fn set_effect_parameter(effect: &str, param: &str, value: JsValue) {
    let value = if let Some(n) = value.as_f64() {
        ParamValue::Number(n as f32)
    } else if let Some(b) = value.as_bool() {
        ParamValue::Toggle(b)
    } else if let Some(s) = value.as_string() {
        ParamValue::Text(s)
    } else {
        log::warn!("[params] unsupported value for {}.{}: {:?}", effect, param, value);
        return;
    };
    with_app(|app| {
        let result = app.studio.borrow_mut().set_parameter(effect, param, value);
        match result {
            Ok(()) => app.flags.controls_dirty.set(true),
            Err(e) => log::warn!("[params] {}", e),
        }
    });
}

#[wasm_bindgen]
pub fn select_effect(id: &str) {
    with_app(|app| {
        let result = app.studio.borrow_mut().select_effect_by_name(id);
        if let Err(e) = result {
            log::warn!("[effects] {}", e);
        }
    });
}

/// Surface parameters for the 3D card, as a plain object.
#[wasm_bindgen]
pub fn card_material() -> JsValue {
    let Some(material) = with_app(|app| app.studio.borrow().material()) else {
        return JsValue::NULL;
    };
    let obj = js_sys::Object::new();
    let fields = [
        ("roughness", material.roughness),
        ("metalness", material.metalness),
        ("envMapIntensity", material.env_map_intensity),
        ("clearcoat", material.clearcoat),
        ("reflectivity", material.reflectivity),
    ];
    for (key, value) in fields {
        set_field(&obj, key, &JsValue::from_f64(value as f64));
    }
    if let Some(color) = material.color {
        let rgb = js_sys::Array::of3(
            &JsValue::from_f64(color.x as f64),
            &JsValue::from_f64(color.y as f64),
            &JsValue::from_f64(color.z as f64),
        );
        set_field(&obj, "color", &rgb);
    }
    obj.into()
}

fn set_field(obj: &js_sys::Object, key: &str, value: &JsValue) {
    if let Err(e) = js_sys::Reflect::set(obj, &key.into(), value) {
        log::warn!("[material] set {} failed: {:?}", key, e);
    }
}

/// Column-major model matrix for the 3D card.
#[wasm_bindgen]
pub fn card_transform() -> js_sys::Float32Array {
    let cols = with_app(|app| app.studio.borrow().pointer().card_transform().to_cols_array())
        .unwrap_or(glam::Mat4::IDENTITY.to_cols_array());
    js_sys::Float32Array::from(&cols[..])
}

#[wasm_bindgen]
pub fn reset_view() {
    with_app(|app| app.studio.borrow_mut().reset_view());
}

#[wasm_bindgen]
pub fn texture_ready() {
    with_app(|app| app.studio.borrow_mut().set_texture_state(TextureState::Ready));
}

#[wasm_bindgen]
pub fn texture_failed(reason: &str) {
    with_app(|app| {
        app.studio
            .borrow_mut()
            .set_texture_state(TextureState::Failed(reason.to_string()))
    });
}
