//! One viewer instance: parameter store, preset applicator, pointer tracker
//! and scene selections behind a single owner, producing a [`RenderFrame`]
//! per animation frame.

use crate::bus::{EffectBus, EffectEvent};
use crate::constants::BRIGHTNESS_DEFAULT;
use crate::effects::{EffectId, EffectParameterStore, ParamValue};
use crate::environment::{
    find_lighting, find_material, find_scene, EnvironmentScene, LightingPreset, MaterialSettings,
    ENVIRONMENT_SCENES, LIGHTING_PRESETS,
};
use crate::error::CoreResult;
use crate::material::{material_for, SurfaceMaterial, TextureState};
use crate::pointer::{PointerState, PointerTracker};
use crate::presets::{Preset, PresetApplicator, PresetCatalog, PresetTiming, PresetTransition};
use crate::style::{compute_effect_style, EffectStyle};
use glam::{Mat4, Vec2};
use instant::Instant;
use smallvec::SmallVec;

/// Everything the DOM preview and the 3D scene need for one frame.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    /// One style per effect with non-zero intensity, in [`EffectId::ALL`] order.
    pub layers: SmallVec<[EffectStyle; 4]>,
    pub dominant_effect: Option<EffectId>,
    pub material: SurfaceMaterial,
    pub pointer: PointerState,
    /// Drag rotation plus hover tilt, in degrees.
    pub rotation: Vec2,
    pub transform: Mat4,
    pub scene: EnvironmentScene,
    pub lighting: LightingPreset,
    pub is_applying_preset: bool,
    pub revision: u64,
}

pub struct CardStudio {
    store: EffectParameterStore,
    applicator: PresetApplicator,
    pointer: PointerTracker,
    bus: EffectBus,
    catalog: PresetCatalog,
    selected: Option<EffectId>,
    scene: EnvironmentScene,
    lighting: LightingPreset,
    material_settings: MaterialSettings,
    brightness: f32,
    texture: TextureState,
}

impl Default for CardStudio {
    fn default() -> Self {
        Self::new(PresetTiming::default())
    }
}

impl CardStudio {
    pub fn new(timing: PresetTiming) -> Self {
        Self {
            store: EffectParameterStore::new(),
            applicator: PresetApplicator::new(timing),
            pointer: PointerTracker::new(),
            bus: EffectBus::new(),
            catalog: PresetCatalog::builtin(),
            selected: None,
            scene: ENVIRONMENT_SCENES[0],
            lighting: LIGHTING_PRESETS[0],
            material_settings: MaterialSettings::default(),
            brightness: BRIGHTNESS_DEFAULT,
            texture: TextureState::default(),
        }
    }

    pub fn store(&self) -> &EffectParameterStore {
        &self.store
    }

    pub fn applicator(&self) -> &PresetApplicator {
        &self.applicator
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn bus_mut(&mut self) -> &mut EffectBus {
        &mut self.bus
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn selected_effect(&self) -> Option<EffectId> {
        self.selected
    }

    pub fn texture(&self) -> &TextureState {
        &self.texture
    }

    pub fn is_applying_preset(&self) -> bool {
        self.applicator.is_applying_preset()
    }

    pub fn select_effect(&mut self, effect: Option<EffectId>) {
        if self.selected == effect {
            return;
        }
        self.selected = effect;
        self.bus.emit(&EffectEvent::EffectSelected(effect));
    }

    /// Empty string and `"none"` clear the selection.
    pub fn select_effect_by_name(&mut self, effect_id: &str) -> CoreResult<()> {
        let effect = match effect_id {
            "" | "none" => None,
            id => Some(id.parse::<EffectId>()?),
        };
        self.select_effect(effect);
        Ok(())
    }

    /// Single-parameter write from a slider, toggle or picker. Values are not
    /// range-checked here.
    pub fn set_parameter(
        &mut self,
        effect_id: &str,
        parameter: &str,
        value: ParamValue,
    ) -> CoreResult<()> {
        let effect: EffectId = effect_id.parse()?;
        self.store.set_parameter(effect, parameter, value.clone());
        self.bus.emit(&EffectEvent::ParameterChanged {
            effect,
            parameter: parameter.to_string(),
            value,
        });
        Ok(())
    }

    /// Apply a catalog preset. `Ok(false)` means another preset is still
    /// applying and this request was dropped.
    pub fn apply_preset(&mut self, preset_id: &str, now: Instant) -> CoreResult<bool> {
        let preset = self.catalog.get(preset_id)?;
        let accepted = self
            .applicator
            .apply(&mut self.store, preset, Some(preset_id), now);
        self.emit_preset_request(preset_id, accepted);
        Ok(accepted)
    }

    pub fn apply_preset_values(
        &mut self,
        preset: &Preset,
        preset_id: Option<&str>,
        now: Instant,
    ) -> bool {
        let accepted = self.applicator.apply(&mut self.store, preset, preset_id, now);
        self.emit_preset_request(preset_id.unwrap_or(preset.id.as_str()), accepted);
        accepted
    }

    fn emit_preset_request(&mut self, preset_id: &str, accepted: bool) {
        let preset_id = preset_id.to_string();
        let event = if accepted {
            EffectEvent::PresetStarted { preset_id }
        } else {
            EffectEvent::PresetRejected { preset_id }
        };
        self.bus.emit(&event);
    }

    pub fn select_scene(&mut self, id: &str) -> CoreResult<()> {
        self.scene = *find_scene(id)?;
        Ok(())
    }

    pub fn select_lighting(&mut self, id: &str) -> CoreResult<()> {
        self.lighting = *find_lighting(id)?;
        Ok(())
    }

    pub fn select_material(&mut self, id: &str) -> CoreResult<()> {
        self.material_settings = find_material(id)?;
        Ok(())
    }

    pub fn set_material_settings(&mut self, settings: MaterialSettings) {
        self.material_settings = settings;
    }

    /// Preview brightness in percent (100 = unchanged).
    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
    }

    /// Brightness after the lighting preset's intensity is applied.
    pub fn effective_brightness(&self) -> f32 {
        self.brightness * self.lighting.intensity
    }

    pub fn set_texture_state(&mut self, texture: TextureState) {
        if let TextureState::Failed(reason) = &texture {
            log::warn!("[texture] card image failed to load, using flat material: {}", reason);
        }
        let had = self.texture.has_texture();
        self.texture = texture;
        let has = self.texture.has_texture();
        if had != has {
            self.bus.emit(&EffectEvent::TextureChanged { has_texture: has });
        }
    }

    pub fn pointer_enter(&mut self) {
        self.pointer.pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.pointer_leave();
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer.pointer_move(pos);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer.pointer_down(pos);
    }

    pub fn pointer_up(&mut self) {
        self.pointer.pointer_up();
    }

    pub fn reset_view(&mut self) {
        self.pointer.reset_view();
        self.bus.emit(&EffectEvent::ViewReset);
    }

    /// The selected effect when it is active, otherwise the most intense one.
    pub fn dominant_effect(&self) -> Option<EffectId> {
        if let Some(selected) = self.selected {
            if self.store.intensity(selected) > 0.0 {
                return Some(selected);
            }
        }
        EffectId::ALL
            .iter()
            .copied()
            .filter(|&e| self.store.intensity(e) > 0.0)
            .max_by(|&a, &b| self.store.intensity(a).total_cmp(&self.store.intensity(b)))
    }

    pub fn material(&self) -> SurfaceMaterial {
        let effect = self.dominant_effect();
        let intensity = effect.map(|e| self.store.intensity(e)).unwrap_or(0.0);
        material_for(effect, intensity, self.texture.has_texture())
            .finish(&self.material_settings, &self.scene)
    }

    /// Advance any preset transition, then compose the frame.
    pub fn tick(&mut self, now: Instant) -> RenderFrame {
        if let Some(transition) = self.applicator.poll(&mut self.store, now) {
            let event = match transition {
                PresetTransition::Overlaid { preset_id } => EffectEvent::PresetOverlaid { preset_id },
                PresetTransition::Settled { preset_id } => EffectEvent::PresetSettled { preset_id },
            };
            self.bus.emit(&event);
        }
        self.frame()
    }

    /// Compose the current state without advancing time.
    pub fn frame(&self) -> RenderFrame {
        let pointer = self.pointer.state();
        let brightness = self.effective_brightness();
        let layers = EffectId::ALL
            .iter()
            .copied()
            .filter_map(|effect| {
                let intensity = self.store.intensity(effect);
                (intensity > 0.0).then(|| {
                    compute_effect_style(effect, pointer.position, intensity, brightness)
                })
            })
            .collect();
        RenderFrame {
            layers,
            dominant_effect: self.dominant_effect(),
            material: self.material(),
            pointer,
            rotation: self.pointer.effective_rotation(),
            transform: self.pointer.card_transform(),
            scene: self.scene,
            lighting: self.lighting,
            is_applying_preset: self.applicator.is_applying_preset(),
            revision: self.store.revision(),
        }
    }
}

impl std::fmt::Debug for CardStudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStudio")
            .field("selected", &self.selected)
            .field("revision", &self.store.revision())
            .field("applying", &self.applicator.is_applying_preset())
            .finish()
    }
}
