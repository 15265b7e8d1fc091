//! Waiting-room call notifier.
//!
//! Holds the call shown on the public display plus a short history, plays a
//! chime for each new call, and clears the display after a fixed delay.

pub mod call;
pub mod notifier;
pub mod sound;

#[cfg(test)]
mod tests;

pub use call::Call;
pub use notifier::{HISTORY_LIMIT, NotifierSettings, WaitingRoom, WaitingRoomSnapshot};
pub use sound::{AlertSounder, AudioError, Chime, ChimeKind, SilentSounder, SynthSounder, TerminalBell, sounder_for};
