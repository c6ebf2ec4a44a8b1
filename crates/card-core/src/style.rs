//! CSS compositor for the 2D card preview.
//!
//! Each effect becomes a stack of gradient layers plus blend modes and a
//! filter, all derived from the pointer position relative to the card center.
//! Every non-transparent stop alpha is `base * t` with `t` the normalized
//! intensity, so raising intensity never dims a layer. The output is plain
//! data; [`EffectStyle::css_properties`] renders it to property/value pairs.

use crate::constants::{
    FOIL_SPREAD_BASE, FOIL_SPREAD_SPAN, INTENSITY_MAX, PRIZM_INSET_SCALE, VINTAGE_CONTRAST_SPAN,
    VINTAGE_SEPIA_MAX,
};
use crate::effects::EffectId;
use glam::Vec2;
use smallvec::{smallvec, SmallVec};
use std::fmt;

// Distance from the card center to a corner in normalized units.
const MAX_LIGHT_DISTANCE: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Rounds to three decimals so emitted CSS stays short and stable.
#[inline]
fn css_num(v: f32) -> f32 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[inline]
fn normalized_intensity(intensity: f32) -> f32 {
    (intensity / INTENSITY_MAX).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0.0)
    }

    /// Same color with alpha `base * t`, capped at 1.
    fn scaled(r: u8, g: u8, b: u8, base: f32, t: f32) -> Self {
        Self::new(r, g, b, (base * t).min(1.0))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, css_num(self.a))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopPosition {
    Percent(f32),
    Px(f32),
    Deg(f32),
}

impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopPosition::Percent(v) => write!(f, "{}%", css_num(*v)),
            StopPosition::Px(v) => write!(f, "{}px", css_num(*v)),
            StopPosition::Deg(v) => write!(f, "{}deg", css_num(*v)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub color: Rgba,
    pub position: StopPosition,
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.position)
    }
}

fn pct(color: Rgba, at: f32) -> ColorStop {
    ColorStop {
        color,
        position: StopPosition::Percent(at),
    }
}

fn px(color: Rgba, at: f32) -> ColorStop {
    ColorStop {
        color,
        position: StopPosition::Px(at),
    }
}

fn deg(color: Rgba, at: f32) -> ColorStop {
    ColorStop {
        color,
        position: StopPosition::Deg(at),
    }
}

pub type Stops = SmallVec<[ColorStop; 8]>;

#[derive(Clone, Debug, PartialEq)]
pub enum GradientLayer {
    /// Circle centered at `center` (percent of the card box).
    Radial { center: Vec2, stops: Stops },
    Conic { from_deg: f32, center: Vec2, stops: Stops },
    Linear { angle_deg: f32, stops: Stops },
    RepeatingLinear { angle_deg: f32, stops: Stops },
}

impl GradientLayer {
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            GradientLayer::Radial { stops, .. }
            | GradientLayer::Conic { stops, .. }
            | GradientLayer::Linear { stops, .. }
            | GradientLayer::RepeatingLinear { stops, .. } => stops,
        }
    }
}

fn write_stops(f: &mut fmt::Formatter<'_>, stops: &[ColorStop]) -> fmt::Result {
    for stop in stops {
        write!(f, ", {stop}")?;
    }
    Ok(())
}

impl fmt::Display for GradientLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientLayer::Radial { center, stops } => {
                write!(
                    f,
                    "radial-gradient(circle at {}% {}%",
                    css_num(center.x),
                    css_num(center.y)
                )?;
                write_stops(f, stops)?;
            }
            GradientLayer::Conic {
                from_deg,
                center,
                stops,
            } => {
                write!(
                    f,
                    "conic-gradient(from {}deg at {}% {}%",
                    css_num(*from_deg),
                    css_num(center.x),
                    css_num(center.y)
                )?;
                write_stops(f, stops)?;
            }
            GradientLayer::Linear { angle_deg, stops } => {
                write!(f, "linear-gradient({}deg", css_num(*angle_deg))?;
                write_stops(f, stops)?;
            }
            GradientLayer::RepeatingLinear { angle_deg, stops } => {
                write!(f, "repeating-linear-gradient({}deg", css_num(*angle_deg))?;
                write_stops(f, stops)?;
            }
        }
        f.write_str(")")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Screen,
    Overlay,
    ColorDodge,
    Multiply,
    SoftLight,
}

impl BlendMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::Multiply => "multiply",
            BlendMode::SoftLight => "soft-light",
        }
    }
}

/// CSS `filter` functions in the order they are emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterStack {
    pub sepia: Option<f32>,
    pub contrast: Option<f32>,
    pub brightness: f32,
}

impl fmt::Display for FilterStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(s) = self.sepia {
            write!(f, "sepia({}) ", css_num(s))?;
        }
        if let Some(c) = self.contrast {
            write!(f, "contrast({}) ", css_num(c))?;
        }
        write!(f, "brightness({})", css_num(self.brightness))
    }
}

/// Where the virtual light sits, derived from the pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightGeometry {
    /// Pointer position in percent of the card box.
    pub highlight: Vec2,
    /// Direction from the card center to the pointer, in degrees.
    pub angle_deg: f32,
    /// Distance from the card center in normalized units.
    pub distance: f32,
}

impl LightGeometry {
    pub fn from_pointer(pointer: Vec2) -> Self {
        let offset = pointer - Vec2::splat(0.5);
        Self {
            highlight: pointer * 100.0,
            angle_deg: offset.y.atan2(offset.x).to_degrees(),
            distance: offset.length(),
        }
    }
}

/// Renderable description of one effect layer over the card.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct EffectStyle {
    pub effect: Option<EffectId>,
    pub layers: SmallVec<[GradientLayer; 3]>,
    pub blend_modes: SmallVec<[BlendMode; 3]>,
    pub filter: Option<FilterStack>,
    /// Polygon vertices in percent of the card box.
    pub clip_path: Option<SmallVec<[Vec2; 8]>>,
}

impl EffectStyle {
    pub fn background(&self) -> Option<String> {
        if self.layers.is_empty() {
            return None;
        }
        let parts: Vec<String> = self.layers.iter().map(ToString::to_string).collect();
        Some(parts.join(", "))
    }

    pub fn background_blend_mode(&self) -> Option<String> {
        if self.blend_modes.is_empty() {
            return None;
        }
        let parts: Vec<&str> = self.blend_modes.iter().map(|m| m.as_str()).collect();
        Some(parts.join(", "))
    }

    pub fn filter_css(&self) -> Option<String> {
        self.filter.map(|f| f.to_string())
    }

    /// A style without gradients has nothing of its own to filter, so its
    /// filter acts on the card underneath the layer instead.
    pub fn filter_property(&self) -> &'static str {
        if self.layers.is_empty() {
            "backdrop-filter"
        } else {
            "filter"
        }
    }

    pub fn clip_path_css(&self) -> Option<String> {
        let points = self.clip_path.as_ref()?;
        let parts: Vec<String> = points
            .iter()
            .map(|p| format!("{}% {}%", css_num(p.x), css_num(p.y)))
            .collect();
        Some(format!("polygon({})", parts.join(", ")))
    }

    /// `(property, value)` pairs using CSS property names.
    pub fn css_properties(&self) -> SmallVec<[(&'static str, String); 4]> {
        let mut out = SmallVec::new();
        if let Some(bg) = self.background() {
            out.push(("background", bg));
        }
        if let Some(bm) = self.background_blend_mode() {
            out.push(("background-blend-mode", bm));
        }
        if let Some(filter) = self.filter_css() {
            out.push((self.filter_property(), filter));
        }
        if let Some(clip) = self.clip_path_css() {
            out.push(("clip-path", clip));
        }
        out
    }

    /// Iterates every stop alpha across all layers.
    pub fn alphas(&self) -> impl Iterator<Item = f32> + '_ {
        self.layers
            .iter()
            .flat_map(|l| l.stops().iter().map(|s| s.color.a))
    }
}

/// Compose the CSS layer stack for `effect`.
///
/// `pointer` is normalized to the card box, `intensity` is the 0..100 slider
/// value and `brightness` a percentage (100 = unchanged).
pub fn compute_effect_style(
    effect: EffectId,
    pointer: Vec2,
    intensity: f32,
    brightness: f32,
) -> EffectStyle {
    let light = LightGeometry::from_pointer(pointer);
    let t = normalized_intensity(intensity);
    let brightness = (brightness / 100.0).max(0.0);

    let mut style = match effect {
        EffectId::Holographic => holographic(&light, t),
        EffectId::FoilSpray => foil_spray(&light, t),
        EffectId::Prizm => prizm(&light, t),
        EffectId::Chrome => chrome(&light, t),
        EffectId::Interference => interference(&light, t),
        EffectId::BrushedMetal => brushed_metal(&light, t),
        EffectId::Crystal => crystal(&light, t),
        EffectId::Vintage => vintage(t),
    };
    style.effect = Some(effect);
    let filter = style.filter.get_or_insert(FilterStack {
        sepia: None,
        contrast: None,
        brightness,
    });
    filter.brightness = brightness;
    style
}

/// String-keyed entry point; unknown ids produce an empty style.
pub fn compute_effect_style_by_name(
    effect_id: &str,
    pointer: Vec2,
    intensity: f32,
    brightness: f32,
) -> EffectStyle {
    match effect_id.parse::<EffectId>() {
        Ok(effect) => compute_effect_style(effect, pointer, intensity, brightness),
        Err(_) => EffectStyle::default(),
    }
}

fn rainbow(t: f32, alpha: f32) -> Stops {
    const HUES: [(u8, u8, u8); 7] = [
        (255, 0, 128),
        (255, 160, 0),
        (255, 255, 0),
        (0, 255, 128),
        (0, 200, 255),
        (160, 0, 255),
        (255, 0, 128),
    ];
    HUES.iter()
        .enumerate()
        .map(|(i, &(r, g, b))| deg(Rgba::scaled(r, g, b, alpha, t), i as f32 * 60.0))
        .collect()
}

fn highlight(light: &LightGeometry, alpha: f32, t: f32, radius_pct: f32) -> GradientLayer {
    GradientLayer::Radial {
        center: light.highlight,
        stops: smallvec![
            pct(Rgba::scaled(255, 255, 255, alpha, t), 0.0),
            pct(Rgba::transparent(), radius_pct),
        ],
    }
}

fn holographic(light: &LightGeometry, t: f32) -> EffectStyle {
    EffectStyle {
        layers: smallvec![
            GradientLayer::Conic {
                from_deg: light.angle_deg,
                center: light.highlight,
                stops: rainbow(t, 0.45),
            },
            highlight(light, 0.5, t, 55.0),
            GradientLayer::RepeatingLinear {
                angle_deg: light.angle_deg + 90.0,
                stops: smallvec![
                    px(Rgba::scaled(255, 255, 255, 0.12, t), 0.0),
                    px(Rgba::transparent(), 2.0),
                    px(Rgba::transparent(), 4.0),
                ],
            },
        ],
        blend_modes: smallvec![BlendMode::ColorDodge, BlendMode::Screen, BlendMode::Overlay],
        ..EffectStyle::default()
    }
}

fn foil_spray(light: &LightGeometry, t: f32) -> EffectStyle {
    let spread =
        FOIL_SPREAD_BASE + FOIL_SPREAD_SPAN * (light.distance / MAX_LIGHT_DISTANCE).min(1.0);
    EffectStyle {
        layers: smallvec![
            GradientLayer::Radial {
                center: light.highlight,
                stops: smallvec![
                    pct(Rgba::scaled(230, 230, 240, 0.6, t), 0.0),
                    pct(Rgba::scaled(180, 180, 200, 0.3, t), spread * 0.5),
                    pct(Rgba::transparent(), spread),
                ],
            },
            GradientLayer::RepeatingLinear {
                angle_deg: light.angle_deg,
                stops: smallvec![
                    px(Rgba::scaled(255, 255, 255, 0.18, t), 0.0),
                    px(Rgba::transparent(), 1.0),
                    px(Rgba::scaled(200, 200, 220, 0.1, t), 2.0),
                    px(Rgba::transparent(), 3.0),
                ],
            },
        ],
        blend_modes: smallvec![BlendMode::Screen, BlendMode::Overlay],
        ..EffectStyle::default()
    }
}

fn prizm(light: &LightGeometry, t: f32) -> EffectStyle {
    let inset = light.distance * PRIZM_INSET_SCALE;
    let far = 100.0 - inset;
    EffectStyle {
        layers: smallvec![
            GradientLayer::Conic {
                from_deg: light.angle_deg,
                center: light.highlight,
                stops: rainbow(t, 0.35),
            },
            GradientLayer::Linear {
                angle_deg: light.angle_deg + 45.0,
                stops: smallvec![
                    pct(Rgba::scaled(255, 0, 150, 0.25, t), 0.0),
                    pct(Rgba::transparent(), 50.0),
                    pct(Rgba::scaled(0, 200, 255, 0.25, t), 100.0),
                ],
            },
        ],
        blend_modes: smallvec![BlendMode::ColorDodge, BlendMode::Overlay],
        clip_path: Some(smallvec![
            Vec2::new(inset, 0.0),
            Vec2::new(far, 0.0),
            Vec2::new(100.0, inset),
            Vec2::new(100.0, far),
            Vec2::new(far, 100.0),
            Vec2::new(inset, 100.0),
            Vec2::new(0.0, far),
            Vec2::new(0.0, inset),
        ]),
        ..EffectStyle::default()
    }
}

fn chrome(light: &LightGeometry, t: f32) -> EffectStyle {
    EffectStyle {
        layers: smallvec![
            GradientLayer::Linear {
                angle_deg: light.angle_deg,
                stops: smallvec![
                    pct(Rgba::scaled(255, 255, 255, 0.65, t), 0.0),
                    pct(Rgba::scaled(160, 170, 180, 0.35, t), 35.0),
                    pct(Rgba::scaled(250, 250, 255, 0.6, t), 50.0),
                    pct(Rgba::scaled(120, 130, 140, 0.35, t), 70.0),
                    pct(Rgba::scaled(255, 255, 255, 0.5, t), 100.0),
                ],
            },
            highlight(light, 0.7, t, 35.0),
        ],
        blend_modes: smallvec![BlendMode::Screen, BlendMode::Overlay],
        ..EffectStyle::default()
    }
}

fn interference(light: &LightGeometry, t: f32) -> EffectStyle {
    EffectStyle {
        layers: smallvec![
            GradientLayer::RepeatingLinear {
                angle_deg: light.angle_deg,
                stops: smallvec![
                    px(Rgba::scaled(255, 0, 128, 0.2, t), 0.0),
                    px(Rgba::scaled(0, 255, 200, 0.2, t), 6.0),
                    px(Rgba::scaled(120, 0, 255, 0.2, t), 12.0),
                ],
            },
            highlight(light, 0.3, t, 60.0),
        ],
        blend_modes: smallvec![BlendMode::Overlay, BlendMode::Screen],
        ..EffectStyle::default()
    }
}

fn brushed_metal(light: &LightGeometry, t: f32) -> EffectStyle {
    EffectStyle {
        layers: smallvec![
            GradientLayer::RepeatingLinear {
                angle_deg: 90.0,
                stops: smallvec![
                    px(Rgba::scaled(255, 255, 255, 0.08, t), 0.0),
                    px(Rgba::scaled(0, 0, 0, 0.06, t), 1.0),
                    px(Rgba::scaled(255, 255, 255, 0.08, t), 2.0),
                ],
            },
            GradientLayer::Linear {
                angle_deg: light.angle_deg,
                stops: smallvec![
                    pct(Rgba::transparent(), 0.0),
                    pct(Rgba::scaled(255, 255, 255, 0.45, t), 50.0),
                    pct(Rgba::transparent(), 100.0),
                ],
            },
        ],
        blend_modes: smallvec![BlendMode::Overlay, BlendMode::SoftLight],
        ..EffectStyle::default()
    }
}

fn crystal(light: &LightGeometry, t: f32) -> EffectStyle {
    let facets: Stops = (0..8)
        .map(|i| {
            let color = if i % 2 == 0 {
                Rgba::scaled(255, 255, 255, 0.35, t)
            } else {
                Rgba::scaled(200, 230, 255, 0.1, t)
            };
            deg(color, i as f32 * 45.0)
        })
        .collect();
    EffectStyle {
        layers: smallvec![
            GradientLayer::Conic {
                from_deg: light.angle_deg * 2.0,
                center: Vec2::splat(50.0),
                stops: facets,
            },
            GradientLayer::Radial {
                center: light.highlight,
                stops: smallvec![
                    pct(Rgba::scaled(255, 255, 255, 0.6, t), 0.0),
                    pct(Rgba::scaled(180, 220, 255, 0.2, t), 20.0),
                    pct(Rgba::transparent(), 45.0),
                ],
            },
        ],
        blend_modes: smallvec![BlendMode::Screen, BlendMode::ColorDodge],
        ..EffectStyle::default()
    }
}

fn vintage(t: f32) -> EffectStyle {
    EffectStyle {
        filter: Some(FilterStack {
            sepia: Some(VINTAGE_SEPIA_MAX * t),
            contrast: Some(1.0 + VINTAGE_CONTRAST_SPAN * t),
            brightness: 1.0,
        }),
        ..EffectStyle::default()
    }
}
