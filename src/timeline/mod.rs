pub(crate) mod clock;
pub(crate) mod scheduler;
pub(crate) mod video_sync;
