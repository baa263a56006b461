use crate::{
    composition::model::Phrase,
    foundation::core::{Fps, FrameIndex},
};

/// Result of one [`PlaybackClock::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Paused; the frame did not move.
    Held(FrameIndex),
    Advanced(FrameIndex),
    /// Hit the loop bound and restarted at frame 0.
    Wrapped,
}

impl Tick {
    pub fn frame(self) -> Option<FrameIndex> {
        match self {
            Self::Held(_) => None,
            Self::Advanced(f) => Some(f),
            Self::Wrapped => Some(FrameIndex::ZERO),
        }
    }
}

/// Looping frame counter with a play/pause gate.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackClock {
    fps: Fps,
    frame: FrameIndex,
    total_frames: u64,
    playing: bool,
}

impl PlaybackClock {
    pub fn new(fps: Fps, total_frames: u64) -> Self {
        Self {
            fps,
            frame: FrameIndex::ZERO,
            total_frames: total_frames.max(1),
            playing: false,
        }
    }

    /// `floor(fps * max(last phrase end, min_loop_secs))` frames, never 0.
    pub fn loop_frames(fps: Fps, phrases: &[Phrase], min_loop_secs: f64) -> u64 {
        let max_end = phrases
            .iter()
            .map(Phrase::end_secs)
            .filter(|s| s.is_finite())
            .fold(0.0_f64, f64::max);
        fps.secs_to_frames_floor(max_end.max(min_loop_secs)).max(1)
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn start(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.frame = FrameIndex::ZERO;
    }

    /// New loop bound; the frame restarts at 0.
    pub fn rebound(&mut self, total_frames: u64) {
        self.total_frames = total_frames.max(1);
        self.reset();
    }

    /// Jump to `frame`, wrapped into the loop.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.frame = FrameIndex(frame.0 % self.total_frames);
    }

    pub fn tick(&mut self) -> Tick {
        if !self.playing {
            return Tick::Held(self.frame);
        }
        let next = self.frame.0 + 1;
        if next >= self.total_frames {
            self.frame = FrameIndex::ZERO;
            tracing::debug!(total_frames = self.total_frames, "loop wrap");
            Tick::Wrapped
        } else {
            self.frame = FrameIndex(next);
            Tick::Advanced(self.frame)
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.frame.0)
    }

    /// `FRAME: f / total | TIME: s` with seconds to two decimals.
    pub fn hud_label(&self) -> String {
        format!(
            "FRAME: {} / {} | TIME: {:.2}s",
            self.frame.0,
            self.total_frames,
            self.elapsed_secs()
        )
    }
}
