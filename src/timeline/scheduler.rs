use crate::{
    audio::sfx::{SfxBackend, SfxManager, SfxTrigger},
    composition::model::{Phrase, PhrasePatch},
    composition::storyboard::parse_storyboard,
    config::EngineConfig,
    eval::frame::{Evaluator, RenderedFrame},
    foundation::core::FrameIndex,
    foundation::error::{StoryfxError, StoryfxResult},
    timeline::clock::{PlaybackClock, Tick},
};

/// Owns the phrase set, the looping clock and the sound triggers.
///
/// All mutation goes through `&mut self`, so a tick can never observe a new
/// phrase set against a stale frame.
pub struct Timeline<B: SfxBackend> {
    config: EngineConfig,
    phrases: Vec<Phrase>,
    clock: PlaybackClock,
    sfx: SfxManager<B>,
    last_triggers: Vec<SfxTrigger>,
}

impl<B: SfxBackend> Timeline<B> {
    pub fn new(config: EngineConfig, backend: B) -> StoryfxResult<Self> {
        config.validate()?;
        let total = PlaybackClock::loop_frames(config.fps, &[], config.min_loop_secs);
        Ok(Self {
            clock: PlaybackClock::new(config.fps, total),
            sfx: SfxManager::new(backend, &config),
            phrases: Vec::new(),
            last_triggers: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn sfx(&self) -> &SfxManager<B> {
        &self.sfx
    }

    /// Sounds fired by the most recent `play`, `tick` or `seek`.
    pub fn last_triggers(&self) -> &[SfxTrigger] {
        &self.last_triggers
    }

    /// Swap in a new phrase set: clock back to 0, fired set cleared, sounds preloaded.
    pub fn replace_phrases(&mut self, phrases: Vec<Phrase>) {
        tracing::debug!(count = phrases.len(), "replace phrases");
        self.phrases = phrases;
        self.rebound();
        self.sfx.reset_loop();
        self.sfx.preload(&self.phrases);
        self.last_triggers.clear();
    }

    /// Parse and install a storyboard. On error the current phrase set stays.
    pub fn load_storyboard(&mut self, json: &str) -> StoryfxResult<usize> {
        let phrases = parse_storyboard(json)?;
        let count = phrases.len();
        self.replace_phrases(phrases);
        Ok(count)
    }

    /// Edit one phrase in place. Timing edits recompute the loop bound but keep the frame.
    pub fn update_phrase(&mut self, id: &str, patch: &PhrasePatch) -> StoryfxResult<()> {
        let phrase = self
            .phrases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoryfxError::validation(format!("unknown phrase id '{id}'")))?;
        patch.apply_to(phrase);
        tracing::debug!(phrase = id, "phrase updated");
        if phrase.sfx().is_some() {
            self.sfx.preload(std::slice::from_ref(phrase));
        }

        let frame = self.clock.frame();
        let total =
            PlaybackClock::loop_frames(self.config.fps, &self.phrases, self.config.min_loop_secs);
        if total != self.clock.total_frames() {
            self.clock.rebound(total);
            self.clock.seek(frame);
        }
        Ok(())
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    /// Start playback; a phrase whose sound window covers the current frame fires now.
    pub fn play(&mut self) {
        if self.clock.is_playing() {
            return;
        }
        self.clock.start();
        self.scan_sfx();
    }

    pub fn pause(&mut self) {
        self.clock.stop();
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Advance one frame. `None` while paused.
    pub fn tick(&mut self) -> Option<RenderedFrame> {
        match self.clock.tick() {
            Tick::Held(_) => None,
            Tick::Advanced(_) => {
                self.scan_sfx();
                Some(self.render_current())
            }
            Tick::Wrapped => {
                self.sfx.reset_loop();
                self.scan_sfx();
                Some(self.render_current())
            }
        }
    }

    /// Jump to `frame` (wrapped into the loop). Jumping backwards starts a new pass.
    pub fn seek(&mut self, frame: FrameIndex) -> RenderedFrame {
        let before = self.clock.frame();
        self.clock.seek(frame);
        if self.clock.frame() < before {
            self.sfx.reset_loop();
        }
        if self.clock.is_playing() {
            self.scan_sfx();
        } else {
            self.last_triggers.clear();
        }
        self.render_current()
    }

    pub fn render_current(&self) -> RenderedFrame {
        Evaluator::eval_frame(&self.phrases, self.clock.frame(), &self.config)
    }

    /// Render any frame without moving the clock.
    pub fn render_at(&self, frame: FrameIndex) -> RenderedFrame {
        Evaluator::eval_frame(&self.phrases, frame, &self.config)
    }

    fn rebound(&mut self) {
        let total =
            PlaybackClock::loop_frames(self.config.fps, &self.phrases, self.config.min_loop_secs);
        self.clock.rebound(total);
    }

    fn scan_sfx(&mut self) {
        self.last_triggers = self
            .sfx
            .scan(self.clock.frame(), &self.phrases, self.config.fps);
    }
}
