//! Which part of a phrase's content is on screen at a given relative frame.
//!
//! Three policies:
//!
//! - **progressive** (single string, every style but Word Swapper): words accumulate
//!   over the first 70% of the phrase, the full line then settles for the rest;
//! - **word swap** (single string, Word Swapper): exactly one word per equal slot;
//! - **sequence** (list content, any style): exactly one element per equal slot.

use crate::composition::model::{PhraseContent, VfxStyle};

/// Share of the phrase spent building up a progressive reveal.
pub const BUILD_WINDOW_FRACTION: f64 = 0.7;

/// Display text for `content` at `rel_frame` of a `duration_frames` long phrase.
///
/// Non-positive durations and empty content produce an empty string.
pub fn reveal_text(
    content: &PhraseContent,
    rel_frame: i64,
    duration_frames: i64,
    style: VfxStyle,
) -> String {
    if duration_frames <= 0 || rel_frame < 0 {
        return String::new();
    }

    match content {
        PhraseContent::Text(text) => {
            let words: Vec<&str> = text.split_whitespace().collect();
            if style == VfxStyle::WordSwapper {
                swap_word(&words, rel_frame, duration_frames).to_string()
            } else {
                progressive(&words, rel_frame, duration_frames)
            }
        }
        PhraseContent::Sequence(parts) => slot_index(parts.len(), rel_frame, duration_frames as f64)
            .and_then(|i| parts.get(i))
            .cloned()
            .unwrap_or_default(),
    }
}

/// Number of words visible under the progressive policy.
pub fn progressive_word_count(word_count: usize, rel_frame: i64, duration_frames: i64) -> usize {
    if word_count == 0 || duration_frames <= 0 || rel_frame < 0 {
        return 0;
    }
    let build = duration_frames as f64 * BUILD_WINDOW_FRACTION;
    let per_word = build / word_count.max(1) as f64;
    let shown = (rel_frame as f64 / per_word).floor() as usize + 1;
    shown.min(word_count)
}

/// Index of the slot containing `rel_frame` when `duration` is split into `n`
/// equal slots, clamped to the last slot.
pub fn slot_index(n: usize, rel_frame: i64, duration: f64) -> Option<usize> {
    if n == 0 || duration <= 0.0 || rel_frame < 0 {
        return None;
    }
    let per_slot = duration / n as f64;
    let idx = (rel_frame as f64 / per_slot).floor() as usize;
    Some(idx.min(n - 1))
}

fn progressive(words: &[&str], rel_frame: i64, duration_frames: i64) -> String {
    let shown = progressive_word_count(words.len(), rel_frame, duration_frames);
    words[..shown].join(" ")
}

fn swap_word<'a>(words: &[&'a str], rel_frame: i64, duration_frames: i64) -> &'a str {
    slot_index(words.len(), rel_frame, duration_frames as f64)
        .map(|i| words[i])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PhraseContent {
        PhraseContent::Text(s.to_string())
    }

    #[test]
    fn progressive_reveal_scenario() {
        let c = text("a b c");
        let style = VfxStyle::CinematicResolve;
        assert_eq!(reveal_text(&c, 0, 30, style), "a");
        assert_eq!(reveal_text(&c, 6, 30, style), "a");
        assert_eq!(reveal_text(&c, 7, 30, style), "a b");
        assert_eq!(reveal_text(&c, 9, 30, style), "a b");
        assert_eq!(reveal_text(&c, 14, 30, style), "a b c");
        assert_eq!(reveal_text(&c, 25, 30, style), "a b c");
        assert_eq!(reveal_text(&c, 30, 30, style), "a b c");
    }

    #[test]
    fn progressive_reveal_is_monotonic_and_complete_after_build() {
        let c = text("the quick brown fox jumps over the lazy dog");
        let n = 9;
        let dur = 47;
        let mut prev = 0;
        for f in 0..=dur {
            let shown = reveal_text(&c, f, dur, VfxStyle::HeavyDrop)
                .split_whitespace()
                .count();
            assert!(shown >= prev);
            prev = shown;
            if f as f64 >= 0.7 * dur as f64 {
                assert_eq!(shown, n);
            }
        }
    }

    #[test]
    fn word_swapper_shows_exactly_one_word() {
        let c = text("a b c");
        let style = VfxStyle::WordSwapper;
        for f in 0..10 {
            assert_eq!(reveal_text(&c, f, 30, style), "a");
        }
        for f in 10..20 {
            assert_eq!(reveal_text(&c, f, 30, style), "b");
        }
        for f in 20..=30 {
            assert_eq!(reveal_text(&c, f, 30, style), "c");
        }
    }

    #[test]
    fn sequence_content_selects_one_element() {
        let c = PhraseContent::Sequence(vec!["first".into(), "second part".into()]);
        assert_eq!(reveal_text(&c, 0, 20, VfxStyle::WordSwapper), "first");
        assert_eq!(reveal_text(&c, 9, 20, VfxStyle::RisingBlur), "first");
        assert_eq!(reveal_text(&c, 10, 20, VfxStyle::RisingBlur), "second part");
        assert_eq!(reveal_text(&c, 20, 20, VfxStyle::RisingBlur), "second part");
    }

    #[test]
    fn degenerate_inputs_yield_empty() {
        let style = VfxStyle::CinematicResolve;
        assert_eq!(reveal_text(&text("a b"), 0, 0, style), "");
        assert_eq!(reveal_text(&text("a b"), 0, -3, VfxStyle::WordSwapper), "");
        assert_eq!(reveal_text(&text("   "), 3, 30, style), "");
        assert_eq!(reveal_text(&text(""), 3, 30, VfxStyle::WordSwapper), "");
        assert_eq!(reveal_text(&PhraseContent::Sequence(vec![]), 3, 30, style), "");
        assert_eq!(reveal_text(&text("a"), -1, 30, style), "");
    }

    #[test]
    fn whitespace_runs_do_not_create_words() {
        let c = text("  a   b  ");
        assert_eq!(reveal_text(&c, 29, 30, VfxStyle::CinematicResolve), "a b");
        assert_eq!(reveal_text(&c, 29, 30, VfxStyle::WordSwapper), "b");
    }
}
