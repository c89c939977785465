//! Session notifications and the iterator that drains them.

use std::collections::vec_deque::Drain;
use std::iter::FusedIterator;

use crate::{PlayerFault, RoundId, SquareIndex};

/// Notifications that you can receive from the session. Handling them is up
/// to the user; the collaborator traits are driven regardless.
///
/// # Forward Compatibility
///
/// This enum is marked `#[non_exhaustive]` because new event types may be
/// added in future versions. Always include a wildcard arm when matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum SimonEvent {
    /// A new round has begun; the computer is about to present its sequence.
    RoundStarted {
        /// Token of the round that just started.
        round: RoundId,
        /// Length of the freshly generated target sequence.
        length: usize,
    },
    /// The computer presented one element of the target sequence. The same
    /// square and position were also sent to the presenter and sound player.
    PlaybackStep {
        /// Round the element belongs to.
        round: RoundId,
        /// Zero-based position of the element within the target sequence.
        position: usize,
        /// The square being presented.
        square: SquareIndex,
    },
    /// Playback has finished and the session is now accepting clicks.
    PlayerTurnStarted {
        /// Round the player is reproducing.
        round: RoundId,
    },
    /// A click on a square was accepted and appended to the player sequence.
    InputAccepted {
        /// Round the click belongs to.
        round: RoundId,
        /// Zero-based position the click was matched against.
        position: usize,
        /// The clicked square.
        square: SquareIndex,
    },
    /// The player reproduced the whole sequence correctly.
    RoundWon {
        /// The completed round.
        round: RoundId,
        /// Score after the reward was applied.
        score: u32,
    },
    /// The player missed, either by clicking a wrong square or by letting
    /// the countdown expire. One life was deducted.
    RoundLost {
        /// The failed round.
        round: RoundId,
        /// What went wrong.
        fault: PlayerFault,
        /// Lives remaining after the deduction.
        lives_remaining: u32,
    },
    /// Lives reached zero. Terminal; no further events follow.
    GameOver {
        /// Score at the end of the session.
        final_score: u32,
        /// Number of rounds that were decided, the fatal one included.
        rounds_played: u32,
    },
}

/// A zero-allocation opaque iterator that drains events from a session.
///
/// Wraps the internal event queue drain without exposing
/// `std::collections::vec_deque::Drain` in the public API. Obtain one by
/// calling [`TurnSequencer::events()`].
///
/// [`TurnSequencer::events()`]: crate::TurnSequencer::events
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct EventDrain<'a> {
    inner: Drain<'a, SimonEvent>,
}

impl<'a> EventDrain<'a> {
    pub(crate) fn from_drain(inner: Drain<'a, SimonEvent>) -> Self {
        Self { inner }
    }
}

impl Iterator for EventDrain<'_> {
    type Item = SimonEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for EventDrain<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for EventDrain<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for EventDrain<'_> {}

impl std::fmt::Debug for EventDrain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDrain")
            .field("remaining", &self.len())
            .finish()
    }
}
