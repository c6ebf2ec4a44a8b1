//! Effect identifiers, parameter values and the per-viewer parameter store.
//!
//! The store holds one parameter map per effect. Every known effect keeps an
//! entry at all times; a disabled effect simply has `intensity == 0`.

use crate::error::{CoreError, CoreResult};
use fnv::FnvHashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectId {
    Holographic,
    FoilSpray,
    Prizm,
    Chrome,
    Interference,
    BrushedMetal,
    Crystal,
    Vintage,
}

impl EffectId {
    pub const ALL: [EffectId; 8] = [
        EffectId::Holographic,
        EffectId::FoilSpray,
        EffectId::Prizm,
        EffectId::Chrome,
        EffectId::Interference,
        EffectId::BrushedMetal,
        EffectId::Crystal,
        EffectId::Vintage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EffectId::Holographic => "holographic",
            EffectId::FoilSpray => "foilspray",
            EffectId::Prizm => "prizm",
            EffectId::Chrome => "chrome",
            EffectId::Interference => "interference",
            EffectId::BrushedMetal => "brushedmetal",
            EffectId::Crystal => "crystal",
            EffectId::Vintage => "vintage",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EffectId::Holographic => "Holographic",
            EffectId::FoilSpray => "Foil Spray",
            EffectId::Prizm => "Prizm",
            EffectId::Chrome => "Chrome",
            EffectId::Interference => "Interference",
            EffectId::BrushedMetal => "Brushed Metal",
            EffectId::Crystal => "Crystal",
            EffectId::Vintage => "Vintage",
        }
    }

    /// Effects whose 3D material pushes metalness up with intensity.
    pub fn is_metallic(self) -> bool {
        matches!(
            self,
            EffectId::Holographic | EffectId::FoilSpray | EffectId::Chrome
        )
    }

    /// Parameter names and defaults for this effect. `intensity` is always
    /// present and always zero.
    pub fn default_params(self) -> EffectParams {
        let entries: Vec<(&str, ParamValue)> = match self {
            EffectId::Holographic => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("shiftSpeed", ParamValue::Number(100.0)),
                ("rainbowSpread", ParamValue::Number(180.0)),
                ("animated", ParamValue::Toggle(true)),
            ],
            EffectId::FoilSpray => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("density", ParamValue::Number(50.0)),
                ("direction", ParamValue::Number(45.0)),
            ],
            EffectId::Prizm => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("complexity", ParamValue::Number(5.0)),
                ("colorSeparation", ParamValue::Number(60.0)),
            ],
            EffectId::Chrome => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("sharpness", ParamValue::Number(70.0)),
                ("highlightSize", ParamValue::Number(40.0)),
            ],
            EffectId::Interference => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("frequency", ParamValue::Number(10.0)),
                ("thickness", ParamValue::Number(3.0)),
            ],
            EffectId::BrushedMetal => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("direction", ParamValue::Number(45.0)),
                ("grainDensity", ParamValue::Number(8.0)),
            ],
            EffectId::Crystal => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("facets", ParamValue::Number(8.0)),
                ("dispersion", ParamValue::Number(60.0)),
            ],
            EffectId::Vintage => vec![
                ("intensity", ParamValue::Number(0.0)),
                ("aging", ParamValue::Number(40.0)),
                ("patina", ParamValue::Text("#8b7355".to_string())),
            ],
        };
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectId {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        EffectId::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEffect(s.to_string()))
    }
}

/// A single effect parameter as written by a slider, toggle or color picker.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Toggle(bool),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Toggle(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Toggle(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Toggle(b) => write!(f, "{b}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

pub type EffectParams = FnvHashMap<String, ParamValue>;
pub type EffectValues = FnvHashMap<EffectId, EffectParams>;

/// The all-defaults baseline: every effect present and disabled.
pub fn default_effect_values() -> EffectValues {
    EffectId::ALL
        .iter()
        .map(|&e| (e, e.default_params()))
        .collect()
}

/// Reads the `intensity` parameter; anything missing or non-numeric reads as 0.
pub fn intensity_of(values: &EffectValues, effect: EffectId) -> f32 {
    values
        .get(&effect)
        .and_then(|p| p.get("intensity"))
        .and_then(ParamValue::as_number)
        .unwrap_or(0.0)
}

/// Current effect parameters for one viewer instance.
///
/// Range checks are left to the input widgets. Every mutation bumps
/// [`EffectParameterStore::revision`] so renderers can tell when to recompute.
#[derive(Clone, Debug)]
pub struct EffectParameterStore {
    values: EffectValues,
    revision: u64,
}

impl Default for EffectParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectParameterStore {
    pub fn new() -> Self {
        Self {
            values: default_effect_values(),
            revision: 0,
        }
    }

    pub fn values(&self) -> &EffectValues {
        &self.values
    }

    pub fn params(&self, effect: EffectId) -> Option<&EffectParams> {
        self.values.get(&effect)
    }

    pub fn intensity(&self, effect: EffectId) -> f32 {
        intensity_of(&self.values, effect)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace every value. Effects missing from `values` are restored to
    /// their defaults so each known effect keeps an entry.
    pub fn set(&mut self, mut values: EffectValues) {
        for effect in EffectId::ALL {
            values
                .entry(effect)
                .or_insert_with(|| effect.default_params());
        }
        self.values = values;
        self.revision += 1;
    }

    /// Functional update: `f` receives the previous values and returns the next.
    pub fn update(&mut self, f: impl FnOnce(&EffectValues) -> EffectValues) {
        let next = f(&self.values);
        self.set(next);
    }

    pub fn set_parameter(&mut self, effect: EffectId, name: &str, value: ParamValue) {
        self.values
            .entry(effect)
            .or_insert_with(|| effect.default_params())
            .insert(name.to_string(), value);
        self.revision += 1;
    }
}
