use crate::foundation::core::{Fps, FrameIndex};

/// Drift, in seconds, the base video may accumulate before it is re-seeked.
pub const MAX_VIDEO_DRIFT_SECS: f64 = 0.1;

/// Seek target for the background video, if it has drifted from `frame`.
pub fn video_seek_target(frame: FrameIndex, fps: Fps, current_secs: f64) -> Option<f64> {
    let target = fps.frames_to_secs(frame.0);
    if !current_secs.is_finite() || (current_secs - target).abs() > MAX_VIDEO_DRIFT_SECS {
        Some(target)
    } else {
        None
    }
}
