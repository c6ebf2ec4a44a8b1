//! Static scene catalogs picked wholesale in the viewer sidebar.

use crate::error::{CoreError, CoreResult};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentScene {
    pub id: &'static str,
    pub name: &'static str,
    pub background: [f32; 3],
    /// Multiplier on the material's environment-map intensity.
    pub environment_intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub color: [f32; 3],
    /// Also scales the 2D preview brightness.
    pub intensity: f32,
    pub elevation_deg: f32,
    pub azimuth_deg: f32,
}

impl LightingPreset {
    /// Unit vector pointing from the card towards the key light (+Y up, +Z
    /// towards the viewer).
    pub fn direction(&self) -> Vec3 {
        let el = self.elevation_deg.to_radians();
        let az = self.azimuth_deg.to_radians();
        Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos())
    }
}

/// Surface finish chosen by the user; each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialSettings {
    pub roughness: f32,
    pub metalness: f32,
    pub reflectivity: f32,
    pub clearcoat: f32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        MATERIAL_PRESETS[0].1
    }
}

pub static ENVIRONMENT_SCENES: [EnvironmentScene; 4] = [
    EnvironmentScene {
        id: "studio",
        name: "Studio",
        background: [0.08, 0.08, 0.1],
        environment_intensity: 1.0,
    },
    EnvironmentScene {
        id: "sunset",
        name: "Sunset",
        background: [0.35, 0.15, 0.1],
        environment_intensity: 1.2,
    },
    EnvironmentScene {
        id: "forest",
        name: "Forest",
        background: [0.05, 0.15, 0.08],
        environment_intensity: 0.8,
    },
    EnvironmentScene {
        id: "neon-city",
        name: "Neon City",
        background: [0.1, 0.02, 0.2],
        environment_intensity: 1.4,
    },
];

pub static LIGHTING_PRESETS: [LightingPreset; 4] = [
    LightingPreset {
        id: "studio",
        name: "Studio",
        color: [1.0, 1.0, 1.0],
        intensity: 1.0,
        elevation_deg: 45.0,
        azimuth_deg: 0.0,
    },
    LightingPreset {
        id: "dramatic",
        name: "Dramatic",
        color: [1.0, 0.95, 0.85],
        intensity: 1.3,
        elevation_deg: 70.0,
        azimuth_deg: 35.0,
    },
    LightingPreset {
        id: "soft",
        name: "Soft",
        color: [0.95, 0.97, 1.0],
        intensity: 0.8,
        elevation_deg: 30.0,
        azimuth_deg: -20.0,
    },
    LightingPreset {
        id: "golden-hour",
        name: "Golden Hour",
        color: [1.0, 0.8, 0.55],
        intensity: 1.1,
        elevation_deg: 15.0,
        azimuth_deg: 60.0,
    },
];

pub static MATERIAL_PRESETS: [(&str, MaterialSettings); 4] = [
    (
        "default",
        MaterialSettings {
            roughness: 0.5,
            metalness: 0.5,
            reflectivity: 0.5,
            clearcoat: 0.3,
        },
    ),
    (
        "glossy",
        MaterialSettings {
            roughness: 0.2,
            metalness: 0.5,
            reflectivity: 0.8,
            clearcoat: 1.0,
        },
    ),
    (
        "matte",
        MaterialSettings {
            roughness: 0.9,
            metalness: 0.2,
            reflectivity: 0.2,
            clearcoat: 0.0,
        },
    ),
    (
        "metallic",
        MaterialSettings {
            roughness: 0.3,
            metalness: 0.9,
            reflectivity: 0.7,
            clearcoat: 0.6,
        },
    ),
];

pub fn find_scene(id: &str) -> CoreResult<&'static EnvironmentScene> {
    ENVIRONMENT_SCENES
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CoreError::UnknownScene(id.to_string()))
}

pub fn find_lighting(id: &str) -> CoreResult<&'static LightingPreset> {
    LIGHTING_PRESETS
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| CoreError::UnknownLighting(id.to_string()))
}

pub fn find_material(id: &str) -> CoreResult<MaterialSettings> {
    MATERIAL_PRESETS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, settings)| *settings)
        .ok_or_else(|| CoreError::UnknownMaterial(id.to_string()))
}
