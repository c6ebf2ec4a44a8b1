// Host-side integration tests for the CSS compositor.

use card_core::*;
use glam::Vec2;

fn alphas(style: &EffectStyle) -> Vec<f32> {
    style.alphas().collect()
}

#[test]
fn same_inputs_give_the_same_style() {
    let pointer = Vec2::new(0.3, 0.8);
    for effect in EffectId::ALL {
        let a = compute_effect_style(effect, pointer, 65.0, 100.0);
        let b = compute_effect_style(effect, pointer, 65.0, 100.0);
        assert_eq!(a, b, "{effect}");
        assert_eq!(a.css_properties(), b.css_properties());
    }
}

#[test]
fn raising_intensity_never_lowers_an_alpha() {
    let pointer = Vec2::new(0.7, 0.25);
    for effect in EffectId::ALL {
        let mut prev = alphas(&compute_effect_style(effect, pointer, 0.0, 100.0));
        for step in 1..=20 {
            let next = alphas(&compute_effect_style(effect, pointer, step as f32 * 5.0, 100.0));
            assert_eq!(prev.len(), next.len());
            for (a, b) in prev.iter().zip(&next) {
                assert!(b >= a, "{effect} at step {step}: {b} < {a}");
            }
            prev = next;
        }
    }
}

#[test]
fn zero_intensity_layers_are_fully_transparent() {
    for effect in EffectId::ALL {
        let style = compute_effect_style(effect, Vec2::splat(0.5), 0.0, 100.0);
        assert!(style.alphas().all(|a| a == 0.0), "{effect}");
    }
}

#[test]
fn alphas_stay_within_unit_range_past_the_slider_max() {
    for effect in EffectId::ALL {
        let style = compute_effect_style(effect, Vec2::new(1.0, 0.0), 250.0, 100.0);
        assert!(style.alphas().all(|a| (0.0..=1.0).contains(&a)), "{effect}");
    }
}

#[test]
fn vintage_at_zero_intensity_is_a_neutral_filter() {
    let style = compute_effect_style(EffectId::Vintage, Vec2::splat(0.5), 0.0, 100.0);
    assert!(style.layers.is_empty());
    assert_eq!(style.background(), None);
    assert_eq!(
        style.filter_css().as_deref(),
        Some("sepia(0) contrast(1) brightness(1)")
    );
}

#[test]
fn vintage_at_full_intensity() {
    let style = compute_effect_style(EffectId::Vintage, Vec2::splat(0.5), 100.0, 100.0);
    assert_eq!(
        style.filter_css().as_deref(),
        Some("sepia(0.8) contrast(1.2) brightness(1)")
    );
}

#[test]
fn vintage_filters_the_card_beneath_its_layer() {
    let style = compute_effect_style(EffectId::Vintage, Vec2::splat(0.5), 80.0, 100.0);
    assert_eq!(style.filter_property(), "backdrop-filter");
    let props: Vec<(&str, String)> = style.css_properties().into_iter().collect();
    assert_eq!(
        props,
        vec![(
            "backdrop-filter",
            "sepia(0.64) contrast(1.16) brightness(1)".to_string()
        )]
    );
}

#[test]
fn layered_effects_filter_their_own_gradients() {
    for effect in EffectId::ALL.iter().copied().filter(|&e| e != EffectId::Vintage) {
        let style = compute_effect_style(effect, Vec2::splat(0.5), 80.0, 100.0);
        assert_eq!(style.filter_property(), "filter", "{effect}");
        assert!(style.css_properties().iter().any(|(k, _)| *k == "background"));
    }
}

#[test]
fn brightness_is_carried_by_every_effect() {
    for effect in EffectId::ALL {
        let style = compute_effect_style(effect, Vec2::splat(0.5), 50.0, 150.0);
        let filter = style.filter_css().unwrap_or_default();
        assert!(filter.ends_with("brightness(1.5)"), "{effect}: {filter}");
    }
}

#[test]
fn holographic_renders_three_blended_layers() {
    let style = compute_effect_style(EffectId::Holographic, Vec2::new(0.25, 0.5), 80.0, 100.0);
    assert_eq!(style.effect, Some(EffectId::Holographic));
    assert_eq!(style.layers.len(), 3);
    assert_eq!(
        style.background_blend_mode().as_deref(),
        Some("color-dodge, screen, overlay")
    );
    let background = style.background().unwrap_or_default();
    assert!(background.starts_with("conic-gradient(from 180deg at 25% 50%"));
    assert!(background.contains("radial-gradient(circle at 25% 50%"));
    assert!(background.contains("repeating-linear-gradient("));

    let names: Vec<&str> = style.css_properties().iter().map(|(k, _)| *k).collect();
    assert_eq!(names, vec!["background", "background-blend-mode", "filter"]);
}

#[test]
fn prizm_clip_path_tightens_away_from_center() {
    let clip_x = |pointer: Vec2| {
        let style = compute_effect_style(EffectId::Prizm, pointer, 50.0, 100.0);
        style.clip_path.map(|p| p[0].x).unwrap_or(f32::NAN)
    };
    assert_eq!(clip_x(Vec2::splat(0.5)), 0.0);
    let near = clip_x(Vec2::new(0.6, 0.5));
    let far = clip_x(Vec2::new(1.0, 1.0));
    assert!(near > 0.0);
    assert!(far > near);

    let centered = compute_effect_style(EffectId::Prizm, Vec2::splat(0.5), 50.0, 100.0);
    assert_eq!(
        centered.clip_path_css().as_deref(),
        Some("polygon(0% 0%, 100% 0%, 100% 0%, 100% 100%, 100% 100%, 0% 100%, 0% 100%, 0% 0%)")
    );
}

#[test]
fn foil_spread_grows_with_light_distance() {
    let spread = |pointer: Vec2| {
        let style = compute_effect_style(EffectId::FoilSpray, pointer, 50.0, 100.0);
        match style.layers[0].stops().last().map(|s| s.position) {
            Some(StopPosition::Percent(p)) => p,
            other => panic!("unexpected stop {other:?}"),
        }
    };
    assert_eq!(spread(Vec2::splat(0.5)), FOIL_SPREAD_BASE);
    assert!(spread(Vec2::new(0.9, 0.9)) > spread(Vec2::new(0.6, 0.6)));
}

#[test]
fn light_geometry_follows_the_pointer() {
    let light = LightGeometry::from_pointer(Vec2::new(1.0, 0.5));
    assert_eq!(light.highlight, Vec2::new(100.0, 50.0));
    assert_eq!(light.angle_deg, 0.0);
    assert!((light.distance - 0.5).abs() < 1e-6);
}

#[test]
fn unknown_effect_name_gives_an_empty_style() {
    let style = compute_effect_style_by_name("sparkle", Vec2::splat(0.5), 100.0, 100.0);
    assert_eq!(style, EffectStyle::default());
    assert!(style.css_properties().is_empty());

    let known = compute_effect_style_by_name("chrome", Vec2::splat(0.5), 100.0, 100.0);
    assert_eq!(known.effect, Some(EffectId::Chrome));
}

#[test]
fn rgba_formats_as_css() {
    assert_eq!(Rgba::new(255, 0, 128, 0.25).to_string(), "rgba(255, 0, 128, 0.25)");
    assert_eq!(Rgba::transparent().to_string(), "rgba(0, 0, 0, 0)");
}
