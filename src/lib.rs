//! Storyfx is a frame-indexed caption timeline and VFX animation engine.
//!
//! A storyboard (timed caption phrases over a base video) is turned into one
//! [`RenderedFrame`] per frame: the phrases active at that frame, the part of
//! their text that is revealed, and the transform their VFX style produces.
//!
//! # Pipeline overview
//!
//! 1. **Load**: storyboard JSON `-> Vec<Phrase>` ([`parse_storyboard`])
//! 2. **Schedule**: [`Timeline`] advances a looping [`PlaybackClock`] and fires
//!    sound effects through an [`SfxBackend`]
//! 3. **Evaluate**: `phrases + FrameIndex -> RenderedFrame` ([`Evaluator`]), which
//!    combines the text reveal with the per-style [`VfxFrame`]
//!
//! Evaluation is pure: the same phrases, frame and [`EngineConfig`] always give the
//! same output, including the Glitch Flicker jitter.
#![forbid(unsafe_code)]

mod animation;
mod audio;
mod composition;
mod config;
mod effects;
mod eval;
mod foundation;
mod layout;
mod render_request;
mod text;
mod timeline;

pub use animation::ease::{Ease, Extrapolate, interpolate, interpolate_stops};
pub use animation::spring::Spring;
pub use audio::sfx::{
    LogBackend, LogHandle, SfxBackend, SfxHandle, SfxManager, SfxTrigger, gain_db_to_volume,
};
pub use composition::model::{
    BoxVertices, FONT_OPTIONS, Phrase, PhraseContent, PhrasePatch, Position, VfxStyle,
};
pub use composition::storyboard::{parse_storyboard, parse_storyboard_value};
pub use config::EngineConfig;
pub use effects::vfx::{Phases, ShadowLayer, TextShadow, VfxFrame, VfxInput, evaluate as evaluate_vfx};
pub use eval::frame::{Evaluator, PhraseLayout, RenderedFrame, RenderedPhrase, phrase_jitter};
pub use foundation::core::{Fps, FrameIndex, Point, Rect, Size, Vec2};
pub use foundation::error::{StoryfxError, StoryfxResult};
pub use foundation::math::{JitterSource, Rng64, clamp01, stable_hash64};
pub use layout::fit::{DEFAULT_VIDEO_SIZE, fit_canvas};
pub use layout::text_box::{BoxConstraint, DEFAULT_MAX_WIDTH_PCT};
pub use render_request::{RenderRequest, caption_text};
pub use text::reveal::{BUILD_WINDOW_FRACTION, progressive_word_count, reveal_text, slot_index};
pub use timeline::clock::{PlaybackClock, Tick};
pub use timeline::scheduler::Timeline;
pub use timeline::video_sync::{MAX_VIDEO_DRIFT_SECS, video_seek_target};
