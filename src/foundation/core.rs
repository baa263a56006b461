use std::time::Duration;

use crate::foundation::error::{StoryfxError, StoryfxResult};

pub use kurbo::{Point, Rect, Size, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub const ZERO: Self = Self(0);

    /// Signed distance from `start` to this frame.
    pub fn since(self, start: i64) -> i64 {
        (self.0 as i64).saturating_sub(start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl Fps {
    pub fn new(num: u32, den: u32) -> StoryfxResult<Self> {
        if den == 0 {
            return Err(StoryfxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StoryfxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Like [`Fps::secs_to_frames_floor`] but keeps the sign, so negative spans stay negative.
    pub fn secs_to_frames_signed(self, secs: f64) -> i64 {
        let v = (secs * self.as_f64()).floor();
        if v.is_finite() { v as i64 } else { 0 }
    }

    /// Wall-clock period of one scheduler tick (`1000 / F` ms).
    pub fn tick_period(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }
}
