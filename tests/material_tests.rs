// Host-side integration tests for the 3D material compositor and scene catalogs.

use card_core::*;
use glam::Vec3;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn unknown_effect_returns_the_textured_baseline() {
    let params = compute_material("not-a-real-effect", 50.0, true);
    assert_eq!(params, MaterialParams::baseline(true));
    assert_eq!(params.roughness, 0.1);
    assert_eq!(params.metalness, 0.05);
    assert_eq!(params.env_map_intensity, 1.2);
    assert_eq!(params.color, None);
}

#[test]
fn zero_intensity_returns_the_baseline() {
    for effect in EffectId::ALL {
        assert_eq!(
            material_for(Some(effect), 0.0, true),
            MaterialParams::baseline(true),
            "{effect}"
        );
        assert_eq!(
            material_for(Some(effect), 0.0, false),
            MaterialParams::baseline(false),
            "{effect}"
        );
    }
}

#[test]
fn missing_texture_falls_back_to_flat_gray() {
    let params = MaterialParams::baseline(false);
    assert_eq!(params.roughness, 0.3);
    assert_eq!(params.metalness, 0.1);
    assert_eq!(params.env_map_intensity, 1.0);
    assert_eq!(params.color, Some(Vec3::splat(0.6)));
    assert_eq!(compute_material("sparkle", 80.0, false), params);
}

#[test]
fn metallic_effects_raise_metalness_and_lower_roughness() {
    for effect in EffectId::ALL.iter().copied().filter(|e| e.is_metallic()) {
        let base = MaterialParams::baseline(true);
        let on = material_for(Some(effect), 50.0, true);
        assert!(on.metalness > base.metalness, "{effect}");
        assert!(on.roughness < base.roughness, "{effect}");
    }
}

#[test]
fn roughness_never_rises_with_intensity() {
    for has_texture in [true, false] {
        for effect in EffectId::ALL {
            let mut prev = material_for(Some(effect), 0.0, has_texture).roughness;
            for step in 1..=10 {
                let next = material_for(Some(effect), step as f32 * 10.0, has_texture).roughness;
                assert!(next <= prev, "{effect} at {step}, textured={has_texture}");
                prev = next;
            }
        }
    }
}

#[test]
fn metalness_and_environment_never_drop_as_intensity_rises() {
    for has_texture in [true, false] {
        for effect in EffectId::ALL {
            let start = material_for(Some(effect), 0.0, has_texture);
            let (mut metal, mut env) = (start.metalness, start.env_map_intensity);
            for step in 1..=10 {
                let next = material_for(Some(effect), step as f32 * 10.0, has_texture);
                assert!(next.metalness >= metal, "{effect} at {step}, textured={has_texture}");
                assert!(
                    next.env_map_intensity >= env,
                    "{effect} at {step}, textured={has_texture}"
                );
                metal = next.metalness;
                env = next.env_map_intensity;
            }
        }
    }
}

#[test]
fn brushed_metal_polishes_up_with_intensity() {
    let base = MaterialParams::baseline(true);
    let full = material_for(Some(EffectId::BrushedMetal), 100.0, true);
    assert!(full.roughness < base.roughness);
    assert!(full.metalness > base.metalness);
}

#[test]
fn chrome_tints_only_without_a_texture() {
    assert_eq!(material_for(Some(EffectId::Chrome), 100.0, true).color, None);
    assert_eq!(
        material_for(Some(EffectId::Chrome), 100.0, false).color,
        Some(Vec3::splat(1.0))
    );
}

#[test]
fn vintage_keeps_surface_channels() {
    let base = MaterialParams::baseline(false);
    let vintage = material_for(Some(EffectId::Vintage), 100.0, false);
    assert_eq!(vintage.roughness, base.roughness);
    assert_eq!(vintage.metalness, base.metalness);
    assert_ne!(vintage.color, base.color);
}

#[test]
fn default_settings_in_the_studio_scene_leave_channels_unchanged() {
    let params = material_for(Some(EffectId::Holographic), 60.0, true);
    let scene = find_scene("studio").expect("builtin scene");
    let finished = params.finish(&MaterialSettings::default(), scene);
    assert!(close(finished.roughness, params.roughness));
    assert!(close(finished.metalness, params.metalness));
    assert!(close(finished.env_map_intensity, params.env_map_intensity));
    assert_eq!(finished.clearcoat, MaterialSettings::default().clearcoat);
    assert_eq!(finished.color, params.color);
}

#[test]
fn brighter_scenes_strengthen_reflections() {
    let params = material_for(Some(EffectId::Chrome), 80.0, true);
    let settings = MaterialSettings::default();
    let studio = params.finish(&settings, find_scene("studio").expect("scene"));
    let neon = params.finish(&settings, find_scene("neon-city").expect("scene"));
    assert!(neon.env_map_intensity > studio.env_map_intensity);
}

#[test]
fn catalog_lookups_report_unknown_ids() {
    assert_eq!(
        find_scene("moon").map(|s| s.id),
        Err(CoreError::UnknownScene("moon".to_string()))
    );
    assert_eq!(
        find_lighting("strobe").map(|l| l.id),
        Err(CoreError::UnknownLighting("strobe".to_string()))
    );
    assert_eq!(
        find_material("velvet"),
        Err(CoreError::UnknownMaterial("velvet".to_string()))
    );
    assert!(find_material("metallic").is_ok());
}

#[test]
fn lighting_direction_is_unit_length() {
    for preset in LIGHTING_PRESETS.iter() {
        assert!(close(preset.direction().length(), 1.0), "{}", preset.id);
    }
}

#[test]
fn texture_state_only_counts_a_ready_image() {
    assert!(!TextureState::Missing.has_texture());
    assert!(!TextureState::Loading.has_texture());
    assert!(TextureState::Ready.has_texture());
    assert!(!TextureState::Failed("404".to_string()).has_texture());
}
