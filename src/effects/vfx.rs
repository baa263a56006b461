use crate::{
    animation::ease::{Ease, Extrapolate, interpolate, interpolate_stops},
    animation::spring::Spring,
    composition::model::{PhraseContent, VfxStyle},
    foundation::core::{Fps, Vec2},
    foundation::math::{JitterSource, clamp01},
};

const ENTRANCE_MAX_FRAMES: i64 = 25;
const ENTRANCE_FRACTION: f64 = 0.2;
const EXIT_MAX_FRAMES: i64 = 20;
const EXIT_FRACTION: f64 = 0.15;

/// Everything a style needs to shape one frame of one phrase.
#[derive(Clone, Copy, Debug)]
pub struct VfxInput<'a> {
    pub style: VfxStyle,
    pub rel_frame: i64,
    pub duration_frames: i64,
    pub blur_intensity: f64,
    pub glow_tint: &'a str,
    /// Full phrase content; Word Swapper slots its motion per word.
    pub content: &'a PhraseContent,
    pub fps: Fps,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShadowLayer {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_px: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextShadow {
    pub layers: Vec<ShadowLayer>,
}

impl TextShadow {
    pub fn glow(radius_px: f64, color: &str) -> Self {
        Self {
            layers: vec![ShadowLayer {
                offset_x: 0.0,
                offset_y: 0.0,
                blur_px: radius_px,
                color: color.to_string(),
            }],
        }
    }

    /// Red/cyan split plus glow, the glitch look.
    pub fn chromatic(glow_px: f64, color: &str) -> Self {
        let split = |dx: f64, c: &str| ShadowLayer {
            offset_x: dx,
            offset_y: 0.0,
            blur_px: 0.0,
            color: c.to_string(),
        };
        let mut layers = vec![
            split(3.0, "rgba(255,0,0,0.7)"),
            split(-3.0, "rgba(0,255,255,0.7)"),
        ];
        layers.extend(Self::glow(glow_px, color).layers);
        Self { layers }
    }

    pub fn css(&self) -> String {
        self.layers
            .iter()
            .map(|l| {
                format!(
                    "{}px {}px {}px {}",
                    l.offset_x, l.offset_y, l.blur_px, l.color
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Visual state of a phrase on one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VfxFrame {
    pub opacity: f64,
    pub scale: f64,
    pub blur_px: f64,
    pub offset: Vec2, // px, applied after scale
    pub text_shadow: TextShadow,
}

impl VfxFrame {
    fn resting(glow_tint: &str) -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            blur_px: 0.0,
            offset: Vec2::ZERO,
            text_shadow: TextShadow::glow(10.0, glow_tint),
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate(-50%, -50%) scale({}) translate({}px, {}px)",
            self.scale, self.offset.x, self.offset.y
        )
    }

    pub fn css_filter(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }
}

/// Entrance and exit windows shared by every style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phases {
    pub entrance_frames: i64,
    pub exit_frames: i64,
    pub exit_start: i64,
    pub duration_frames: i64,
}

impl Phases {
    pub fn new(duration_frames: i64) -> Self {
        let d = duration_frames as f64;
        let entrance_frames = ENTRANCE_MAX_FRAMES
            .min((d * ENTRANCE_FRACTION).floor() as i64)
            .max(0);
        let exit_frames = EXIT_MAX_FRAMES.min((d * EXIT_FRACTION).floor() as i64).max(0);
        Self {
            entrance_frames,
            exit_frames,
            exit_start: duration_frames - exit_frames,
            duration_frames,
        }
    }

    pub fn is_exiting(&self, rel_frame: i64) -> bool {
        rel_frame >= self.exit_start
    }

    /// 0 before the exit window, ramping linearly to 1 at the phrase end.
    pub fn exit_progress(&self, rel_frame: i64) -> f64 {
        if !self.is_exiting(rel_frame) {
            return 0.0;
        }
        interpolate(
            rel_frame as f64,
            [self.exit_start as f64, self.duration_frames as f64],
            [0.0, 1.0],
            Ease::Linear,
            Extrapolate::Clamp,
        )
    }
}

/// Compute the transform for one phrase frame.
///
/// Pure apart from `jitter`, which only Glitch Flicker draws from.
pub fn evaluate<J>(input: &VfxInput<'_>, jitter: &mut J) -> VfxFrame
where
    J: JitterSource + ?Sized,
{
    let phases = Phases::new(input.duration_frames);
    let mut out = match input.style {
        VfxStyle::CinematicResolve => cinematic_resolve(input, &phases),
        VfxStyle::RisingBlur => rising_blur(input, &phases),
        VfxStyle::EtherealPulse => ethereal_pulse(input, &phases),
        VfxStyle::FlareZoom => flare_zoom(input, &phases),
        VfxStyle::HeavyDrop => heavy_drop(input, &phases),
        VfxStyle::GlitchFlicker => glitch_flicker(input, &phases, jitter),
        VfxStyle::ElasticPop => elastic_pop(input, &phases),
        VfxStyle::WordSwapper => word_swapper(input, &phases),
        VfxStyle::Fade => fade(input, &phases),
    };
    out.opacity = clamp01(out.opacity);
    out.blur_px = out.blur_px.max(0.0);
    out
}

fn lerp_clamped(x: f64, input: [f64; 2], output: [f64; 2], ease: Ease) -> f64 {
    interpolate(x, input, output, ease, Extrapolate::ClampRight)
}

fn unit_wave(v: f64, lo: f64, hi: f64) -> f64 {
    interpolate(v, [-1.0, 1.0], [lo, hi], Ease::Linear, Extrapolate::Extend)
}

fn cinematic_resolve(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    let x = input.rel_frame as f64;
    let e = ph.entrance_frames as f64;
    let p = ph.exit_progress(input.rel_frame);

    let ent_opacity = lerp_clamped(x, [0.0, e], [0.0, 1.0], Ease::OUT_EXPO);
    let ent_blur = lerp_clamped(x, [0.0, e], [input.blur_intensity, 0.0], Ease::Linear);
    let ent_scale = lerp_clamped(x, [0.0, e], [0.7, 1.0], Ease::OUT_EXPO);
    let idle_scale = interpolate(
        x,
        [0.0, ph.duration_frames as f64],
        [1.0, 1.1],
        Ease::Linear,
        Extrapolate::Extend,
    );
    let idle_glow = unit_wave((x / 10.0).sin(), 5.0, 15.0);

    let exiting = ph.is_exiting(input.rel_frame);
    VfxFrame {
        opacity: if exiting { 1.0 - p } else { ent_opacity },
        scale: if exiting {
            idle_scale - p * 0.1
        } else {
            ent_scale * idle_scale
        },
        blur_px: if exiting { p * 20.0 } else { ent_blur },
        offset: Vec2::ZERO,
        text_shadow: TextShadow::glow(idle_glow, input.glow_tint),
    }
}

fn rising_blur(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    let x = input.rel_frame as f64;
    let e = ph.entrance_frames as f64;
    let p = ph.exit_progress(input.rel_frame);

    let ent_y = lerp_clamped(x, [0.0, e], [40.0, 0.0], Ease::OUT_EXPO);
    let ent_opacity = lerp_clamped(x, [0.0, e * 0.6], [0.0, 1.0], Ease::Linear);
    let idle_y = interpolate(
        x,
        [0.0, ph.duration_frames as f64],
        [0.0, -20.0],
        Ease::Linear,
        Extrapolate::Extend,
    );
    let ent_blur = lerp_clamped(x, [0.0, 10.0], [input.blur_intensity, 0.0], Ease::Linear);

    let exiting = ph.is_exiting(input.rel_frame);
    VfxFrame {
        opacity: if exiting { 1.0 - p } else { ent_opacity },
        offset: Vec2::new(0.0, if exiting { idle_y - p * 40.0 } else { ent_y + idle_y }),
        blur_px: if exiting { p * 15.0 } else { ent_blur },
        ..VfxFrame::resting(input.glow_tint)
    }
}

fn ethereal_pulse(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    // 40-frame period.
    let pulse = (input.rel_frame as f64 / 20.0 * std::f64::consts::PI).sin();
    let p = ph.exit_progress(input.rel_frame);
    let exiting = ph.is_exiting(input.rel_frame);

    VfxFrame {
        opacity: if exiting {
            1.0 - p
        } else {
            unit_wave(pulse, 0.7, 1.0)
        },
        scale: unit_wave(pulse, 0.98, 1.05),
        blur_px: if exiting { p * 10.0 } else { 0.0 },
        offset: Vec2::ZERO,
        text_shadow: TextShadow::glow(unit_wave(pulse, 2.0, 25.0), input.glow_tint),
    }
}

fn flare_zoom(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    let x = input.rel_frame as f64;
    let p = ph.exit_progress(input.rel_frame);
    let exiting = ph.is_exiting(input.rel_frame);

    let ent_scale = lerp_clamped(x, [0.0, 15.0], [0.1, 1.0], Ease::BACK_OUT);
    let ent_blur = lerp_clamped(x, [0.0, 15.0], [20.0, 0.0], Ease::Linear);
    let idle_glow = unit_wave((x / 5.0).sin(), 10.0, 40.0);

    VfxFrame {
        opacity: if exiting { 1.0 - p } else { 1.0 },
        scale: if exiting { 1.0 + p * 0.5 } else { ent_scale },
        blur_px: if exiting { p * 30.0 } else { ent_blur },
        offset: Vec2::ZERO,
        text_shadow: TextShadow::glow(idle_glow, input.glow_tint),
    }
}

const DROP_FRAMES: i64 = 12;
const SHAKE_FRAMES: i64 = 10;

fn heavy_drop(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    let x = input.rel_frame as f64;
    let p = ph.exit_progress(input.rel_frame);
    let exiting = ph.is_exiting(input.rel_frame);

    let drop_y = lerp_clamped(x, [0.0, DROP_FRAMES as f64], [-150.0, 0.0], Ease::BounceOut);
    let shake = if (DROP_FRAMES..DROP_FRAMES + SHAKE_FRAMES).contains(&input.rel_frame) {
        (x * 2.0).sin() * 5.0
    } else {
        0.0
    };

    VfxFrame {
        opacity: if exiting { 1.0 - p } else { 1.0 },
        offset: Vec2::new(0.0, if exiting { p * 100.0 } else { drop_y + shake }),
        ..VfxFrame::resting(input.glow_tint)
    }
}

fn glitch_flicker<J>(input: &VfxInput<'_>, ph: &Phases, jitter: &mut J) -> VfxFrame
where
    J: JitterSource + ?Sized,
{
    let x = input.rel_frame as f64;
    let p = ph.exit_progress(input.rel_frame);
    let flicker = (x * 0.8).sin() + (x * 1.5).sin();

    let mut offset = Vec2::ZERO;
    if jitter.next_unit() > 0.85 {
        offset.x = (jitter.next_unit() - 0.5) * 20.0;
    }
    if jitter.next_unit() > 0.95 {
        offset.y = (jitter.next_unit() - 0.5) * 10.0;
    }

    VfxFrame {
        opacity: if flicker > 0.0 { 1.0 } else { 0.3 } * (1.0 - p),
        scale: 1.0,
        blur_px: 0.0,
        offset,
        text_shadow: if flicker > 0.4 {
            TextShadow::chromatic(15.0, input.glow_tint)
        } else {
            TextShadow::glow(5.0, input.glow_tint)
        },
    }
}

fn elastic_pop(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    let x = input.rel_frame as f64;
    let p = ph.exit_progress(input.rel_frame);
    let exiting = ph.is_exiting(input.rel_frame);

    let ent_scale = Spring::ELASTIC_POP.value(input.rel_frame, input.fps);
    let idle_pulse = 1.0 + (x / 15.0).sin() * 0.02;

    VfxFrame {
        opacity: if exiting { 1.0 - p } else { 1.0 },
        scale: if exiting {
            ent_scale * 0.8
        } else {
            ent_scale * idle_pulse
        },
        offset: Vec2::new(0.0, if exiting { p * 50.0 } else { 0.0 }),
        ..VfxFrame::resting(input.glow_tint)
    }
}

fn word_swapper(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    // Same slotting as the text reveal: one slot per word, or per sequence element.
    let slots = match input.content {
        PhraseContent::Text(_) => input.content.words().len(),
        PhraseContent::Sequence(parts) => parts.len(),
    }
    .max(1);
    let per_word = input.duration_frames as f64 / slots as f64;
    if per_word <= 0.0 {
        return VfxFrame {
            opacity: 0.0,
            ..VfxFrame::resting(input.glow_tint)
        };
    }

    let p = ph.exit_progress(input.rel_frame);
    let cycle = (input.rel_frame as f64).rem_euclid(per_word);
    let in_frames = per_word * 0.2;
    let out_frames = per_word * 0.2;
    let out_start = per_word - out_frames;
    let first_half = cycle < per_word / 2.0;

    let y = if first_half {
        lerp_clamped(cycle, [0.0, in_frames], [15.0, 0.0], Ease::OUT_EXPO)
    } else {
        interpolate(
            cycle,
            [out_start, per_word],
            [0.0, -10.0],
            Ease::IN,
            Extrapolate::ClampLeft,
        )
    };
    let blur = if first_half {
        lerp_clamped(cycle, [0.0, in_frames], [12.0, 0.0], Ease::Linear)
    } else {
        interpolate(
            cycle,
            [out_start, per_word],
            [0.0, 12.0],
            Ease::Linear,
            Extrapolate::ClampLeft,
        )
    };
    let word_opacity = interpolate_stops(
        cycle,
        &[0.0, in_frames * 0.4, out_start + out_frames * 0.6, per_word],
        &[0.0, 1.0, 1.0, 0.0],
    );
    let scale = interpolate(
        cycle,
        [0.0, per_word],
        [0.98, 1.06],
        Ease::Linear,
        Extrapolate::Extend,
    );

    VfxFrame {
        opacity: word_opacity * (1.0 - p),
        scale,
        blur_px: blur,
        offset: Vec2::new(0.0, y),
        text_shadow: TextShadow::glow(10.0, input.glow_tint),
    }
}

fn fade(input: &VfxInput<'_>, ph: &Phases) -> VfxFrame {
    VfxFrame {
        opacity: 1.0 - ph.exit_progress(input.rel_frame),
        ..VfxFrame::resting(input.glow_tint)
    }
}
