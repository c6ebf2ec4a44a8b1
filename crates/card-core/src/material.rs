//! PBR material compositor for the 3D card viewer.
//!
//! Mirrors the CSS compositor's intent on the channels a
//! `MeshStandardMaterial`-style renderer consumes. The two are computed
//! independently; keep them reading alike when changing either.

use crate::constants::{
    FALLBACK_ENV_INTENSITY, FALLBACK_GRAY, FALLBACK_METALNESS, FALLBACK_ROUGHNESS, INTENSITY_MAX,
    TEXTURED_ENV_INTENSITY, TEXTURED_METALNESS, TEXTURED_ROUGHNESS,
};
use crate::effects::EffectId;
use crate::environment::{EnvironmentScene, MaterialSettings};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    /// Linear RGB tint; `None` keeps the texture's own color.
    pub color: Option<Vec3>,
}

impl MaterialParams {
    /// Starting point before any effect is applied.
    pub fn baseline(has_texture: bool) -> Self {
        if has_texture {
            Self {
                roughness: TEXTURED_ROUGHNESS,
                metalness: TEXTURED_METALNESS,
                env_map_intensity: TEXTURED_ENV_INTENSITY,
                color: None,
            }
        } else {
            Self {
                roughness: FALLBACK_ROUGHNESS,
                metalness: FALLBACK_METALNESS,
                env_map_intensity: FALLBACK_ENV_INTENSITY,
                color: Some(Vec3::from(FALLBACK_GRAY)),
            }
        }
    }

    /// Layer the user's surface settings and the scene's environment strength
    /// on top. [`MaterialSettings::default`] leaves the effect channels as-is.
    pub fn finish(&self, settings: &MaterialSettings, scene: &EnvironmentScene) -> SurfaceMaterial {
        SurfaceMaterial {
            roughness: (self.roughness * (0.5 + settings.roughness)).clamp(0.0, 1.0),
            metalness: (self.metalness * (0.5 + settings.metalness)).clamp(0.0, 1.0),
            env_map_intensity: self.env_map_intensity
                * (0.5 + settings.reflectivity)
                * scene.environment_intensity,
            clearcoat: settings.clearcoat,
            reflectivity: settings.reflectivity,
            color: self.color,
        }
    }
}

/// Final material handed to the 3D scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub clearcoat: f32,
    pub reflectivity: f32,
    pub color: Option<Vec3>,
}

/// String-keyed entry point: unknown ids return the baseline unchanged.
pub fn compute_material(effect_id: &str, intensity: f32, has_texture: bool) -> MaterialParams {
    material_for(effect_id.parse().ok(), intensity, has_texture)
}

pub fn material_for(effect: Option<EffectId>, intensity: f32, has_texture: bool) -> MaterialParams {
    let base = MaterialParams::baseline(has_texture);
    let t = (intensity / INTENSITY_MAX).clamp(0.0, 1.0);
    let Some(effect) = effect else {
        return base;
    };
    if t <= 0.0 {
        return base;
    }

    match effect {
        EffectId::Holographic => MaterialParams {
            roughness: 0.05,
            metalness: 0.8,
            env_map_intensity: 2.0 + t,
            color: if has_texture {
                base.color
            } else {
                Some(hsl_to_rgb(t * 0.8, 0.8, 0.6))
            },
        },
        EffectId::FoilSpray => MaterialParams {
            roughness: 0.02,
            metalness: 0.9,
            env_map_intensity: 1.5 + t,
            ..base
        },
        EffectId::Chrome => MaterialParams {
            roughness: 0.01,
            metalness: 0.95,
            env_map_intensity: 2.5 + t,
            color: if has_texture {
                base.color
            } else {
                Some(Vec3::splat(0.8 + 0.2 * t))
            },
        },
        // Satin finish that still polishes up as intensity rises.
        EffectId::BrushedMetal => MaterialParams {
            roughness: base.roughness * (1.0 - 0.4 * t),
            metalness: 0.85,
            env_map_intensity: 1.2 + t * 0.5,
            ..base
        },
        EffectId::Prizm | EffectId::Crystal => MaterialParams {
            roughness: 0.03,
            env_map_intensity: 1.8 + t,
            ..base
        },
        EffectId::Interference => MaterialParams {
            roughness: 0.08,
            metalness: 0.5,
            env_map_intensity: 1.6 + t * 0.8,
            ..base
        },
        // Sepia is a color treatment only; the surface channels stay put.
        EffectId::Vintage => MaterialParams {
            color: if has_texture {
                base.color
            } else {
                Some(Vec3::new(0.44, 0.26, 0.08).lerp(Vec3::from(FALLBACK_GRAY), 1.0 - t))
            },
            ..base
        },
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h * 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Vec3::new(r + m, g + m, b + m)
}

/// Loading state of the card image used as the 3D texture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TextureState {
    #[default]
    Missing,
    Loading,
    Ready,
    Failed(String),
}

impl TextureState {
    /// Whether the textured baseline applies. A failed load falls back to the
    /// flat material.
    pub fn has_texture(&self) -> bool {
        matches!(self, TextureState::Ready)
    }
}
