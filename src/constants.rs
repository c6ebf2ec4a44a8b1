/// DOM hooks and presentation constants for the web front-end.
///
/// Element ids and data attributes are the contract with the host page; the
/// studio panels render these hooks and the wasm module finds them at start.

// Card preview
pub const CARD_ID: &str = "card";
pub const EFFECTS_CONTAINER_ID: &str = "card-effects";
pub const EFFECT_LAYER_ATTR: &str = "data-effect-layer";

// Controls
pub const EFFECT_SELECT_ID: &str = "effect-select";
pub const BRIGHTNESS_INPUT_ID: &str = "brightness";
pub const SCENE_SELECT_ID: &str = "scene-select";
pub const LIGHTING_SELECT_ID: &str = "lighting-select";
pub const MATERIAL_SELECT_ID: &str = "material-select";
pub const RESET_VIEW_ID: &str = "reset-view";
pub const PRESET_ATTR: &str = "data-preset";
pub const PARAM_EFFECT_ATTR: &str = "data-effect";
pub const PARAM_NAME_ATTR: &str = "data-param";

// Card state flags for stylesheet hooks
pub const APPLYING_ATTR: &str = "data-applying";
pub const HOVER_ATTR: &str = "data-hover";

// 3D-looking CSS transform of the card element
pub const CARD_PERSPECTIVE_PX: f32 = 1000.0;

// Effect layer base style; compositor output is written on top each frame
pub const EFFECT_LAYER_BASE_STYLE: &str =
    "position:absolute;inset:0;pointer-events:none;border-radius:inherit;display:none";
