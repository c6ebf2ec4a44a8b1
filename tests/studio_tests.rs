// Host-side integration tests for the event bus and the studio facade.

use card_core::*;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn recording_studio() -> (CardStudio, Rc<RefCell<Vec<EffectEvent>>>) {
    let mut studio = CardStudio::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    studio
        .bus_mut()
        .subscribe(move |ev| sink.borrow_mut().push(ev.clone()));
    (studio, events)
}

fn started(id: &str) -> EffectEvent {
    EffectEvent::PresetStarted {
        preset_id: id.to_string(),
    }
}

#[test]
fn bus_delivers_in_subscription_order_until_unsubscribed() {
    let mut bus = EffectBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let first = log.clone();
    let a = bus.subscribe(move |_| first.borrow_mut().push("a"));
    let second = log.clone();
    bus.subscribe(move |_| second.borrow_mut().push("b"));
    assert_eq!(bus.subscriber_count(), 2);

    bus.emit(&EffectEvent::ViewReset);
    assert_eq!(*log.borrow(), vec!["a", "b"]);

    assert!(bus.unsubscribe(a));
    assert!(!bus.unsubscribe(a));
    bus.emit(&EffectEvent::ViewReset);
    assert_eq!(*log.borrow(), vec!["a", "b", "b"]);
}

#[test]
fn preset_lifecycle_is_published_from_tick() {
    let (mut studio, events) = recording_studio();
    let t0 = Instant::now();

    assert_eq!(studio.apply_preset("cyberpunk", t0), Ok(true));
    assert_eq!(*events.borrow(), vec![started("cyberpunk")]);

    let frame = studio.tick(t0);
    assert!(frame.is_applying_preset);
    assert!(frame.layers.is_empty());

    studio.tick(t0 + ms(100));
    studio.tick(t0 + ms(300));
    studio.tick(t0 + ms(500));
    assert_eq!(
        *events.borrow(),
        vec![
            started("cyberpunk"),
            EffectEvent::PresetOverlaid {
                preset_id: "cyberpunk".to_string()
            },
            EffectEvent::PresetSettled {
                preset_id: "cyberpunk".to_string()
            },
        ]
    );
    assert!(!studio.is_applying_preset());
}

#[test]
fn overlapping_preset_request_is_rejected() {
    let (mut studio, events) = recording_studio();
    let t0 = Instant::now();
    assert_eq!(studio.apply_preset("golden-foil", t0), Ok(true));
    assert_eq!(studio.apply_preset("chrome-mirror", t0 + ms(30)), Ok(false));
    assert_eq!(
        events.borrow().last(),
        Some(&EffectEvent::PresetRejected {
            preset_id: "chrome-mirror".to_string()
        })
    );
    assert_eq!(
        studio.apply_preset("does-not-exist", t0 + ms(40)),
        Err(CoreError::UnknownPreset("does-not-exist".to_string()))
    );
}

#[test]
fn frame_has_one_layer_per_active_effect_in_catalog_order() {
    let mut studio = CardStudio::default();
    let t0 = Instant::now();
    assert_eq!(studio.apply_preset("cyberpunk", t0), Ok(true));
    studio.tick(t0);
    let frame = studio.tick(t0 + ms(100));

    let order: Vec<Option<EffectId>> = frame.layers.iter().map(|l| l.effect).collect();
    assert_eq!(
        order,
        vec![
            Some(EffectId::Holographic),
            Some(EffectId::Chrome),
            Some(EffectId::Interference),
        ]
    );
    assert_eq!(frame.dominant_effect, Some(EffectId::Interference));
    assert_eq!(frame.revision, studio.store().revision());
}

#[test]
fn selected_effect_wins_only_while_active() {
    let mut studio = CardStudio::default();
    studio
        .set_parameter("chrome", "intensity", ParamValue::Number(30.0))
        .expect("known effect");
    studio
        .set_parameter("crystal", "intensity", ParamValue::Number(60.0))
        .expect("known effect");
    assert_eq!(studio.dominant_effect(), Some(EffectId::Crystal));

    studio.select_effect(Some(EffectId::Chrome));
    assert_eq!(studio.dominant_effect(), Some(EffectId::Chrome));

    studio.select_effect(Some(EffectId::Vintage));
    assert_eq!(studio.dominant_effect(), Some(EffectId::Crystal));

    let idle = CardStudio::default();
    assert_eq!(idle.dominant_effect(), None);
}

#[test]
fn selection_events_fire_on_change_only() {
    let (mut studio, events) = recording_studio();
    studio.select_effect(Some(EffectId::Prizm));
    studio.select_effect(Some(EffectId::Prizm));
    studio.select_effect_by_name("none").expect("none clears");
    assert_eq!(
        *events.borrow(),
        vec![
            EffectEvent::EffectSelected(Some(EffectId::Prizm)),
            EffectEvent::EffectSelected(None),
        ]
    );
    assert_eq!(
        studio.select_effect_by_name("glitter"),
        Err(CoreError::UnknownEffect("glitter".to_string()))
    );
    assert_eq!(studio.selected_effect(), None);
}

#[test]
fn set_parameter_publishes_the_change() {
    let (mut studio, events) = recording_studio();
    studio
        .set_parameter("holographic", "shiftSpeed", ParamValue::Number(42.0))
        .expect("known effect");
    assert_eq!(
        *events.borrow(),
        vec![EffectEvent::ParameterChanged {
            effect: EffectId::Holographic,
            parameter: "shiftSpeed".to_string(),
            value: ParamValue::Number(42.0),
        }]
    );
    assert_eq!(
        studio.set_parameter("sparkle", "intensity", ParamValue::Number(1.0)),
        Err(CoreError::UnknownEffect("sparkle".to_string()))
    );
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn lighting_scales_preview_brightness() {
    let mut studio = CardStudio::default();
    studio
        .set_parameter("vintage", "intensity", ParamValue::Number(50.0))
        .expect("known effect");
    studio.select_lighting("dramatic").expect("builtin lighting");
    assert!((studio.effective_brightness() - 130.0).abs() < 1e-3);

    let frame = studio.frame();
    let filter = frame.layers[0].filter.expect("vintage filter");
    assert!((filter.brightness - 1.3).abs() < 1e-5);
    assert_eq!(frame.lighting.id, "dramatic");

    assert_eq!(
        studio.select_scene("moon"),
        Err(CoreError::UnknownScene("moon".to_string()))
    );
    assert_eq!(frame.scene.id, "studio");
}

#[test]
fn texture_changes_switch_the_material_baseline() {
    let (mut studio, events) = recording_studio();
    let flat = studio.material();
    assert_eq!(flat.color, Some(glam::Vec3::splat(0.6)));

    studio.set_texture_state(TextureState::Loading);
    assert!(events.borrow().is_empty());

    studio.set_texture_state(TextureState::Ready);
    let textured = studio.material();
    assert_eq!(textured.color, None);
    assert!((textured.roughness - 0.1).abs() < 1e-6);

    studio.set_texture_state(TextureState::Failed("404".to_string()));
    assert_eq!(studio.material(), flat);
    assert_eq!(
        *events.borrow(),
        vec![
            EffectEvent::TextureChanged { has_texture: true },
            EffectEvent::TextureChanged { has_texture: false },
        ]
    );
}

#[test]
fn material_follows_the_dominant_effect_and_settings() {
    let mut studio = CardStudio::default();
    studio.set_texture_state(TextureState::Ready);
    studio
        .set_parameter("chrome", "intensity", ParamValue::Number(100.0))
        .expect("known effect");
    let default_finish = studio.material();
    assert!((default_finish.metalness - 0.95).abs() < 1e-5);

    studio.select_material("matte").expect("builtin material");
    let matte = studio.material();
    assert!(matte.metalness < default_finish.metalness);
    assert!(matte.roughness > default_finish.roughness);
    assert_eq!(matte.clearcoat, 0.0);
}

#[test]
fn pointer_forwarding_and_view_reset() {
    let (mut studio, events) = recording_studio();
    studio.pointer_enter();
    studio.pointer_down(Vec2::new(0.5, 0.5));
    studio.pointer_move(Vec2::new(0.6, 0.5));
    let frame = studio.frame();
    assert!(frame.pointer.is_hovering);
    assert!(frame.pointer.is_dragging);
    assert!((frame.rotation.y - 18.0).abs() < 1e-3);

    studio.pointer_up();
    studio.pointer_leave();
    studio.reset_view();
    let frame = studio.frame();
    assert_eq!(frame.rotation, Vec2::ZERO);
    assert_eq!(frame.pointer.position, Vec2::splat(0.5));
    assert_eq!(*events.borrow(), vec![EffectEvent::ViewReset]);
}

#[test]
fn custom_preset_values_go_through_the_same_lock() {
    let (mut studio, events) = recording_studio();
    let preset = Preset::new("mine", "Mine").with("prizm", [("intensity", ParamValue::Number(20.0))]);
    let t0 = Instant::now();
    assert!(studio.apply_preset_values(&preset, None, t0));
    assert!(!studio.apply_preset_values(&preset, Some("again"), t0));
    studio.tick(t0);
    studio.tick(t0 + ms(100));
    assert_eq!(studio.store().intensity(EffectId::Prizm), 20.0);
    assert_eq!(
        events.borrow()[..2],
        [
            started("mine"),
            EffectEvent::PresetRejected {
                preset_id: "again".to_string()
            }
        ]
    );
}
