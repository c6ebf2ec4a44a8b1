// Shared tuning constants for the effects pipeline.

// Preset application timing (milliseconds). Tuned against one paint cycle and
// the 3D material recalculation; treat as configuration.
pub const PRESET_OVERLAY_DELAY_MS: u64 = 100;
pub const PRESET_SETTLE_DELAY_MS: u64 = 400;

// Slider scales
pub const INTENSITY_MAX: f32 = 100.0; // intensity slider upper bound
pub const BRIGHTNESS_DEFAULT: f32 = 100.0; // percent

// Pointer / rotation
pub const POINTER_CENTER: [f32; 2] = [0.5, 0.5];
pub const ROTATION_DEG_PER_CARD: f32 = 180.0; // drag across one full card width
pub const MAX_TILT_X_DEG: f32 = 45.0; // pitch clamp
pub const MAX_SPIN_Y_DEG: f32 = 180.0; // yaw clamp
pub const HOVER_TILT_DEG: f32 = 12.0; // tilt at the card edge while hovering

// CSS compositor shaping
pub const PRIZM_INSET_SCALE: f32 = 20.0; // clip-path inset percent per unit light distance
pub const FOIL_SPREAD_BASE: f32 = 30.0; // radial stop percent at the card center
pub const FOIL_SPREAD_SPAN: f32 = 40.0; // extra spread at the card corner
pub const VINTAGE_SEPIA_MAX: f32 = 0.8;
pub const VINTAGE_CONTRAST_SPAN: f32 = 0.2;

// Material baselines
pub const TEXTURED_ROUGHNESS: f32 = 0.1;
pub const TEXTURED_METALNESS: f32 = 0.05;
pub const TEXTURED_ENV_INTENSITY: f32 = 1.2;
pub const FALLBACK_ROUGHNESS: f32 = 0.3;
pub const FALLBACK_METALNESS: f32 = 0.1;
pub const FALLBACK_ENV_INTENSITY: f32 = 1.0;
pub const FALLBACK_GRAY: [f32; 3] = [0.6, 0.6, 0.6];
