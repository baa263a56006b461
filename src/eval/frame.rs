use crate::{
    composition::model::{Phrase, Position},
    config::EngineConfig,
    effects::vfx::{self, VfxFrame, VfxInput},
    foundation::core::FrameIndex,
    foundation::math::{Rng64, stable_hash64},
    layout::text_box::BoxConstraint,
    text::reveal::reveal_text,
};

/// Everything on screen at one frame, in phrase order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedFrame {
    pub frame: FrameIndex,
    pub phrases: Vec<RenderedPhrase>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderedPhrase {
    pub phrase_id: String,
    pub rel_frame: i64,
    pub text: String,
    pub vfx: VfxFrame,
    pub layout: PhraseLayout,
}

/// Static styling a renderer needs alongside the animated transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhraseLayout {
    pub position: Position, // percent of canvas
    pub font_family: String,
    pub font_size: f64,
    pub font_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub constraint: BoxConstraint,
}

impl PhraseLayout {
    fn of(phrase: &Phrase) -> Self {
        Self {
            position: phrase.position,
            font_family: phrase.font_family.clone(),
            font_size: phrase.font_size,
            font_color: phrase.font_color.clone(),
            background_color: phrase.background_color.clone(),
            constraint: BoxConstraint::for_phrase(phrase),
        }
    }
}

pub struct Evaluator;

impl Evaluator {
    /// Render every phrase active at `frame`.
    ///
    /// A phrase is active while `0 <= frame - start <= duration` (in frames).
    /// Phrases with a non-positive duration never render.
    #[tracing::instrument(skip(phrases, config), fields(phrases = phrases.len()))]
    pub fn eval_frame(phrases: &[Phrase], frame: FrameIndex, config: &EngineConfig) -> RenderedFrame {
        let rendered = phrases
            .iter()
            .filter_map(|p| eval_phrase(p, frame, config))
            .collect();
        RenderedFrame {
            frame,
            phrases: rendered,
        }
    }
}

/// Jitter stream for one phrase at one frame; identical inputs replay identically.
pub fn phrase_jitter(seed: u64, phrase_id: &str, frame: FrameIndex) -> Rng64 {
    let base = stable_hash64(seed, phrase_id);
    Rng64::new(base ^ frame.0.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn eval_phrase(phrase: &Phrase, frame: FrameIndex, config: &EngineConfig) -> Option<RenderedPhrase> {
    let fps = config.fps;
    let duration_frames = phrase.duration_frames(fps);
    let rel_frame = frame.since(phrase.start_frame(fps));
    if duration_frames <= 0 || !(0..=duration_frames).contains(&rel_frame) {
        return None;
    }

    let input = VfxInput {
        style: phrase.vfx_style,
        rel_frame,
        duration_frames,
        blur_intensity: phrase.blur_intensity,
        glow_tint: &phrase.glow_tint,
        content: &phrase.content,
        fps,
    };
    let mut jitter = phrase_jitter(config.seed, &phrase.id, frame);

    Some(RenderedPhrase {
        phrase_id: phrase.id.clone(),
        rel_frame,
        text: reveal_text(&phrase.content, rel_frame, duration_frames, phrase.vfx_style),
        vfx: vfx::evaluate(&input, &mut jitter),
        layout: PhraseLayout::of(phrase),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::model::VfxStyle;

    fn ids(frame: &RenderedFrame) -> Vec<&str> {
        frame.phrases.iter().map(|p| p.phrase_id.as_str()).collect()
    }

    #[test]
    fn activity_window_is_inclusive() {
        let cfg = EngineConfig::default();
        let phrases = vec![Phrase::new("p", "a b c", 1.0, 1.0)];
        assert!(ids(&Evaluator::eval_frame(&phrases, FrameIndex(29), &cfg)).is_empty());
        assert_eq!(ids(&Evaluator::eval_frame(&phrases, FrameIndex(30), &cfg)), ["p"]);
        assert_eq!(ids(&Evaluator::eval_frame(&phrases, FrameIndex(60), &cfg)), ["p"]);
        assert!(ids(&Evaluator::eval_frame(&phrases, FrameIndex(61), &cfg)).is_empty());
    }

    #[test]
    fn overlapping_phrases_render_together_in_order() {
        let cfg = EngineConfig::default();
        let phrases = vec![
            Phrase::new("late", "b", 0.5, 2.0),
            Phrase::new("early", "a", 0.0, 2.0),
        ];
        let out = Evaluator::eval_frame(&phrases, FrameIndex(20), &cfg);
        assert_eq!(ids(&out), ["late", "early"]);
        assert_eq!(out.phrases[0].rel_frame, 5);
    }

    #[test]
    fn zero_duration_renders_nothing() {
        let cfg = EngineConfig::default();
        let phrases = vec![Phrase::new("z", "a b", 0.0, 0.0)];
        assert!(Evaluator::eval_frame(&phrases, FrameIndex(0), &cfg).phrases.is_empty());
    }

    #[test]
    fn scenario_text_and_layout() {
        let cfg = EngineConfig::default();
        let phrases = vec![Phrase::new("p", "a b c", 0.0, 1.0)];
        let text_at = |f| {
            Evaluator::eval_frame(&phrases, FrameIndex(f), &cfg).phrases[0]
                .text
                .clone()
        };
        assert_eq!(text_at(0), "a");
        assert_eq!(text_at(9), "a b");
        assert_eq!(text_at(25), "a b c");

        let out = Evaluator::eval_frame(&phrases, FrameIndex(0), &cfg);
        assert_eq!(out.phrases[0].layout.constraint.max_width_pct, 90.0);
        assert_eq!(out.phrases[0].layout.position, Position { x: 50.0, y: 85.0 });
    }

    #[test]
    fn glitch_output_is_reproducible() {
        let cfg = EngineConfig {
            seed: 42,
            ..EngineConfig::default()
        };
        let phrases = vec![Phrase::new("g", "glitch", 0.0, 4.0).with_style(VfxStyle::GlitchFlicker)];
        for f in 0..120 {
            let a = Evaluator::eval_frame(&phrases, FrameIndex(f), &cfg);
            let b = Evaluator::eval_frame(&phrases, FrameIndex(f), &cfg);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn jitter_differs_between_phrases_and_frames() {
        let a = phrase_jitter(0, "a", FrameIndex(3)).next_u64();
        let b = phrase_jitter(0, "b", FrameIndex(3)).next_u64();
        let c = phrase_jitter(0, "a", FrameIndex(4)).next_u64();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
