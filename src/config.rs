use std::path::Path;

use crate::foundation::{
    core::Fps,
    error::{StoryfxError, StoryfxResult},
};

/// Engine-wide settings. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fps: Fps,
    /// Lower bound on the loop length, whatever the phrases span.
    pub min_loop_secs: f64,
    /// Frames after a phrase start during which its sound effect may still fire.
    pub sfx_window_frames: u64,
    /// Seeds Glitch Flicker jitter.
    pub seed: u64,
    /// Asset source handed to the audio backend; `{id}` is replaced by the sfx id.
    pub sfx_source_template: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            min_loop_secs: 5.0,
            sfx_window_frames: 5,
            seed: 0,
            sfx_source_template: "./{id}.mp3".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> StoryfxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> StoryfxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoryfxError::validation(format!("read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> StoryfxResult<()> {
        // Re-run the constructor checks; serde bypasses them.
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.min_loop_secs.is_finite() || self.min_loop_secs < 0.0 {
            return Err(StoryfxError::validation(
                "min_loop_secs must be finite and >= 0",
            ));
        }
        if self.sfx_source_template.trim().is_empty() {
            return Err(StoryfxError::validation(
                "sfx_source_template must be non-empty",
            ));
        }
        Ok(())
    }

    pub fn sfx_source(&self, id: &str) -> String {
        self.sfx_source_template.replace("{id}", id)
    }
}
