//! Cassettes: recorded repository host sessions for offline replay.

pub mod format;
pub mod recorder;
pub mod replayer;
