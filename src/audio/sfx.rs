use std::collections::{BTreeMap, BTreeSet};

use crate::{
    composition::model::Phrase,
    config::EngineConfig,
    foundation::core::{Fps, FrameIndex},
    foundation::error::StoryfxResult,
    foundation::math::clamp01,
};

/// One loaded, replayable sound.
pub trait SfxHandle {
    fn set_position_secs(&mut self, secs: f64);
    fn set_volume(&mut self, volume: f64);
    /// Start playback without waiting for it to finish.
    fn play(&mut self) -> StoryfxResult<()>;
}

/// Resolves sound ids to playable handles.
pub trait SfxBackend {
    type Handle: SfxHandle;

    fn load(&mut self, id: &str, source: &str) -> StoryfxResult<Self::Handle>;
}

/// dB gain to linear volume in `[0, 1]`. Non-finite gains count as 0 dB.
pub fn gain_db_to_volume(gain_db: f64) -> f64 {
    let db = if gain_db.is_finite() { gain_db } else { 0.0 };
    clamp01(10.0_f64.powf(db / 20.0))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SfxTrigger {
    pub frame: FrameIndex,
    pub phrase_id: String,
    pub sfx_id: String,
    pub volume: f64,
}

/// Fires each phrase's sound once per loop pass.
///
/// Handles are pooled by sfx id and loaded at most once. Load and playback
/// failures are logged and never reach the caller.
pub struct SfxManager<B: SfxBackend> {
    backend: B,
    pool: BTreeMap<String, B::Handle>,
    failed: BTreeSet<String>,
    fired: BTreeSet<String>,
    config: EngineConfig,
}

impl<B: SfxBackend> SfxManager<B> {
    pub fn new(backend: B, config: &EngineConfig) -> Self {
        Self {
            backend,
            pool: BTreeMap::new(),
            failed: BTreeSet::new(),
            fired: BTreeSet::new(),
            config: config.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_loaded(&self, sfx_id: &str) -> bool {
        self.pool.contains_key(sfx_id)
    }

    pub fn has_fired(&self, phrase_id: &str) -> bool {
        self.fired.contains(phrase_id)
    }

    /// Load every distinct sfx id used by `phrases`. Already pooled ids are skipped.
    pub fn preload(&mut self, phrases: &[Phrase]) {
        for phrase in phrases {
            if let Some(id) = phrase.sfx() {
                self.ensure_loaded(id);
            }
        }
    }

    /// Forget which phrases fired; called when the clock wraps or the phrase set changes.
    pub fn reset_loop(&mut self) {
        self.fired.clear();
    }

    /// Fire every phrase whose trigger window contains `frame` and that has not
    /// fired during this pass.
    pub fn scan(&mut self, frame: FrameIndex, phrases: &[Phrase], fps: Fps) -> Vec<SfxTrigger> {
        let window = i64::try_from(self.config.sfx_window_frames).unwrap_or(i64::MAX);
        let mut triggered = Vec::new();
        for phrase in phrases {
            let Some(sfx_id) = phrase.sfx() else {
                continue;
            };
            let since_start = frame.since(phrase.start_frame(fps));
            if !(0..window).contains(&since_start) || self.fired.contains(&phrase.id) {
                continue;
            }

            self.fired.insert(phrase.id.clone());
            let volume = gain_db_to_volume(phrase.sfx_gain.unwrap_or(0.0));
            if self.fire(sfx_id, volume) {
                tracing::info!(
                    frame = frame.0,
                    phrase = %phrase.id,
                    sfx = sfx_id,
                    volume,
                    "sfx trigger"
                );
                triggered.push(SfxTrigger {
                    frame,
                    phrase_id: phrase.id.clone(),
                    sfx_id: sfx_id.to_string(),
                    volume,
                });
            }
        }
        triggered
    }

    fn ensure_loaded(&mut self, sfx_id: &str) -> bool {
        if self.pool.contains_key(sfx_id) {
            return true;
        }
        if self.failed.contains(sfx_id) {
            return false;
        }
        let source = self.config.sfx_source(sfx_id);
        match self.backend.load(sfx_id, &source) {
            Ok(handle) => {
                tracing::debug!(sfx = sfx_id, %source, "sfx loaded");
                self.pool.insert(sfx_id.to_string(), handle);
                true
            }
            Err(err) => {
                tracing::warn!(sfx = sfx_id, %source, error = %err, "sfx preload failed");
                self.failed.insert(sfx_id.to_string());
                false
            }
        }
    }

    fn fire(&mut self, sfx_id: &str, volume: f64) -> bool {
        if !self.ensure_loaded(sfx_id) {
            return false;
        }
        let Some(handle) = self.pool.get_mut(sfx_id) else {
            return false;
        };
        handle.set_position_secs(0.0);
        handle.set_volume(volume);
        if let Err(err) = handle.play() {
            tracing::warn!(sfx = sfx_id, error = %err, "sfx playback failed");
            return false;
        }
        true
    }
}

/// Backend that only logs; for headless runs.
#[derive(Clone, Debug, Default)]
pub struct LogBackend;

#[derive(Clone, Debug)]
pub struct LogHandle {
    id: String,
    source: String,
    position_secs: f64,
    volume: f64,
}

impl SfxHandle for LogHandle {
    fn set_position_secs(&mut self, secs: f64) {
        self.position_secs = secs;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn play(&mut self) -> StoryfxResult<()> {
        tracing::info!(
            sfx = %self.id,
            source = %self.source,
            position_secs = self.position_secs,
            volume = self.volume,
            "play"
        );
        Ok(())
    }
}

impl SfxBackend for LogBackend {
    type Handle = LogHandle;

    fn load(&mut self, id: &str, source: &str) -> StoryfxResult<LogHandle> {
        Ok(LogHandle {
            id: id.to_string(),
            source: source.to_string(),
            position_secs: 0.0,
            volume: 1.0,
        })
    }
}
