//! Named presets and the time-sliced preset applicator.
//!
//! Switching presets goes through `Idle -> Resetting -> Settling -> Idle`:
//! the store is first reset to defaults, the reset is presented for at least
//! one frame, then the preset is overlaid on a fresh set of defaults. The lock
//! is held until the settle delay has passed so overlapping switches cannot
//! interleave.

use crate::constants::{PRESET_OVERLAY_DELAY_MS, PRESET_SETTLE_DELAY_MS};
use crate::effects::{default_effect_values, EffectId, EffectParameterStore, EffectValues, ParamValue};
use crate::error::{CoreError, CoreResult};
use fnv::FnvHashMap;
use instant::Instant;
use std::time::Duration;

/// Immutable snapshot of effect values keyed by effect id string.
///
/// Keys are strings because presets come from static configuration; entries
/// naming an unknown effect or parameter are ignored when applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub values: FnvHashMap<String, FnvHashMap<String, ParamValue>>,
}

impl Preset {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            values: FnvHashMap::default(),
        }
    }

    pub fn with<'a>(
        mut self,
        effect: &str,
        params: impl IntoIterator<Item = (&'a str, ParamValue)>,
    ) -> Self {
        let entry = self.values.entry(effect.to_string()).or_default();
        for (name, value) in params {
            entry.insert(name.to_string(), value);
        }
        self
    }

    /// Defaults with this preset's known entries written over them.
    pub fn overlay_on_defaults(&self) -> EffectValues {
        let mut out = default_effect_values();
        for (effect_key, params) in &self.values {
            let Ok(effect) = effect_key.parse::<EffectId>() else {
                log::debug!("[preset] {}: ignoring unknown effect {:?}", self.id, effect_key);
                continue;
            };
            let Some(target) = out.get_mut(&effect) else {
                continue;
            };
            for (name, value) in params {
                match target.get_mut(name) {
                    Some(slot) => *slot = value.clone(),
                    None => log::debug!(
                        "[preset] {}: ignoring unknown parameter {}.{}",
                        self.id,
                        effect_key,
                        name
                    ),
                }
            }
        }
        out
    }
}

/// The fixed set of looks offered in the studio sidebar.
#[derive(Clone, Debug)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    pub fn builtin() -> Self {
        use ParamValue::{Number, Text};
        Self::new(vec![
            Preset::new("holographic-burst", "Holographic Burst")
                .with(
                    "holographic",
                    [
                        ("intensity", Number(85.0)),
                        ("shiftSpeed", Number(150.0)),
                        ("rainbowSpread", Number(270.0)),
                    ],
                )
                .with("prizm", [("intensity", Number(30.0))]),
            Preset::new("chrome-mirror", "Chrome Mirror")
                .with(
                    "chrome",
                    [
                        ("intensity", Number(90.0)),
                        ("sharpness", Number(90.0)),
                        ("highlightSize", Number(30.0)),
                    ],
                )
                .with("brushedmetal", [("intensity", Number(20.0))]),
            Preset::new("golden-foil", "Golden Foil")
                .with(
                    "foilspray",
                    [("intensity", Number(75.0)), ("density", Number(70.0))],
                )
                .with(
                    "vintage",
                    [
                        ("intensity", Number(25.0)),
                        ("aging", Number(20.0)),
                        ("patina", Text("#c9a227".to_string())),
                    ],
                ),
            Preset::new("cyberpunk", "Cyberpunk")
                .with(
                    "holographic",
                    [("intensity", Number(60.0)), ("shiftSpeed", Number(200.0))],
                )
                .with(
                    "interference",
                    [("intensity", Number(70.0)), ("frequency", Number(14.0))],
                )
                .with("chrome", [("intensity", Number(35.0))]),
            Preset::new("vintage-classic", "Vintage Classic").with(
                "vintage",
                [("intensity", Number(80.0)), ("aging", Number(70.0))],
            ),
            Preset::new("crystal-prism", "Crystal Prism")
                .with(
                    "crystal",
                    [("intensity", Number(80.0)), ("facets", Number(12.0))],
                )
                .with(
                    "prizm",
                    [("intensity", Number(55.0)), ("complexity", Number(8.0))],
                ),
            Preset::new("clean", "Clean"),
        ])
    }

    pub fn get(&self, id: &str) -> CoreResult<&Preset> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::UnknownPreset(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Delays between the reset, overlay and unlock steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetTiming {
    pub overlay_delay: Duration,
    pub settle_delay: Duration,
}

impl Default for PresetTiming {
    fn default() -> Self {
        Self {
            overlay_delay: Duration::from_millis(PRESET_OVERLAY_DELAY_MS),
            settle_delay: Duration::from_millis(PRESET_SETTLE_DELAY_MS),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetApplicationState {
    pub is_applying: bool,
    pub is_locked: bool,
    pub preset_id: Option<String>,
    pub started_at: Option<Instant>,
}

/// Reported by [`PresetApplicator::poll`] when a step commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresetTransition {
    Overlaid { preset_id: String },
    Settled { preset_id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetPhase {
    Idle,
    Resetting,
    Settling,
}

#[derive(Debug)]
enum Pending {
    Idle,
    Resetting {
        overlay_at: Instant,
        target: EffectValues,
        presented: bool,
    },
    Settling {
        unlock_at: Instant,
    },
}

#[derive(Debug)]
pub struct PresetApplicator {
    timing: PresetTiming,
    state: PresetApplicationState,
    pending: Pending,
}

impl Default for PresetApplicator {
    fn default() -> Self {
        Self::new(PresetTiming::default())
    }
}

impl PresetApplicator {
    pub fn new(timing: PresetTiming) -> Self {
        Self {
            timing,
            state: PresetApplicationState::default(),
            pending: Pending::Idle,
        }
    }

    pub fn timing(&self) -> PresetTiming {
        self.timing
    }

    pub fn state(&self) -> &PresetApplicationState {
        &self.state
    }

    pub fn phase(&self) -> PresetPhase {
        match self.pending {
            Pending::Idle => PresetPhase::Idle,
            Pending::Resetting { .. } => PresetPhase::Resetting,
            Pending::Settling { .. } => PresetPhase::Settling,
        }
    }

    pub fn is_applying_preset(&self) -> bool {
        self.state.is_applying
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked
    }

    /// Start switching to `preset`. Returns `false` without touching the store
    /// while a previous application still holds the lock.
    ///
    /// The store is reset to defaults immediately; the overlay and unlock are
    /// committed by later [`poll`](Self::poll) calls.
    pub fn apply(
        &mut self,
        store: &mut EffectParameterStore,
        preset: &Preset,
        preset_id: Option<&str>,
        now: Instant,
    ) -> bool {
        let id = preset_id.unwrap_or(preset.id.as_str()).to_string();
        if self.state.is_locked {
            log::debug!(
                "[preset] ignoring {} while {:?} is applying",
                id,
                self.state.preset_id
            );
            return false;
        }

        self.pending = Pending::Idle;
        store.set(default_effect_values());
        log::info!("[preset] applying {}", id);

        self.state = PresetApplicationState {
            is_applying: true,
            is_locked: true,
            preset_id: Some(id),
            started_at: Some(now),
        };
        self.pending = Pending::Resetting {
            overlay_at: now + self.timing.overlay_delay,
            target: preset.overlay_on_defaults(),
            presented: false,
        };
        true
    }

    /// Advance the transition. Call once per frame, before rendering.
    ///
    /// The overlay never commits on the first poll after `apply`, so the reset
    /// values reach at least one rendered frame even with a zero delay.
    pub fn poll(
        &mut self,
        store: &mut EffectParameterStore,
        now: Instant,
    ) -> Option<PresetTransition> {
        let preset_id = self.state.preset_id.clone().unwrap_or_default();
        match &mut self.pending {
            Pending::Idle => None,
            Pending::Resetting {
                overlay_at,
                target,
                presented,
            } => {
                if !*presented || now < *overlay_at {
                    *presented = true;
                    return None;
                }
                store.set(std::mem::take(target));
                self.pending = Pending::Settling {
                    unlock_at: now + self.timing.settle_delay,
                };
                log::debug!("[preset] overlaid {}", preset_id);
                Some(PresetTransition::Overlaid { preset_id })
            }
            Pending::Settling { unlock_at } => {
                if now < *unlock_at {
                    return None;
                }
                self.pending = Pending::Idle;
                self.state.is_applying = false;
                self.state.is_locked = false;
                log::info!("[preset] settled {}", preset_id);
                Some(PresetTransition::Settled { preset_id })
            }
        }
    }

    /// Drop any scheduled step and release the lock. The store keeps whatever
    /// was last committed.
    pub fn cancel(&mut self) {
        if !matches!(self.pending, Pending::Idle) {
            log::debug!("[preset] cancelled {:?}", self.state.preset_id);
        }
        self.pending = Pending::Idle;
        self.state.is_applying = false;
        self.state.is_locked = false;
    }
}
