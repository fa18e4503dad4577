pub mod clock;
pub mod frame;
pub mod timer;

pub use clock::{PlaybackClock, PlaybackState, SPEED_PRESETS, TickOutcome};
pub use frame::frame_for_time;
pub use timer::{FixedRateTimer, FrameTimer, WallClockTimer};
