//! Collaborator traits the host supplies to a session.
//!
//! The sequencer never draws, plays audio or hit-tests; it drives these
//! three seams, all injected at [`start_session`]. All calls happen inside
//! [`TurnSequencer::tick`], on the single thread that owns the session.
//!
//! [`start_session`]: crate::SequencerBuilder::start_session
//! [`TurnSequencer::tick`]: crate::TurnSequencer::tick

use web_time::Duration;

use crate::{SquareIndex, TurnLabel};

/// Display sink for the game.
///
/// All methods are one-way notifications; the sequencer never reads display
/// state back. Text setters are called at session start and again whenever
/// the underlying value changes.
pub trait Presenter {
    /// Visually marks `square` as active for `duration`, then restores its
    /// prior appearance. Implementations must be idempotent if called again
    /// for the same square while it is still lit.
    fn highlight(&mut self, square: SquareIndex, duration: Duration);

    /// Updates the score display.
    fn set_score(&mut self, score: u32);

    /// Updates the lives display.
    fn set_lives(&mut self, lives: u32);

    /// Updates the turn banner.
    fn set_turn(&mut self, label: TurnLabel);

    /// Updates the countdown display with the remaining whole seconds
    /// (rounded up). Only called while a countdown is configured.
    fn set_timer(&mut self, remaining_secs: u32);

    /// The session has ended. Called exactly once, when lives reach zero.
    fn game_over(&mut self, final_score: u32);
}

/// Fire-and-forget tone playback, one tone per square.
///
/// The sequencer does not wait for playback to complete; timing is governed
/// entirely by the configured highlight and gap durations.
pub trait SoundPlayer {
    /// Plays the tone bound to `square`.
    fn play(&mut self, square: SquareIndex);
}

/// Per-tick click polling.
///
/// Called at most once per tick, only while the session is accepting player
/// input. Must never block.
pub trait InputSource {
    /// Returns the square clicked this tick, if any. Clicks that land
    /// outside every square must resolve to `None`, not an error; an index
    /// outside the board is treated as a broken frontend and fails the
    /// session with [`SimonError::InvalidSquare`].
    ///
    /// [`SimonError::InvalidSquare`]: crate::SimonError::InvalidSquare
    fn poll_click(&mut self) -> Option<SquareIndex>;
}
