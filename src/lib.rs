//! # Simon Core
//!
//! A deterministic, engine-agnostic turn sequencer for Simon-style memory
//! games: the computer presents a random sequence of highlighted squares with
//! accompanying tones, the player reproduces it by clicking, and score and
//! lives are tracked until the player runs out of lives.
//!
//! The crate owns only the turn-taking state machine. Rendering, audio and
//! hit-testing belong to the host: they are reached through three narrow
//! collaborator traits ([`Presenter`], [`SoundPlayer`], [`InputSource`])
//! injected at construction, bundled by a [`Config`] type. There are no
//! callbacks and no background tasks; the host calls [`TurnSequencer::tick`]
//! once per frame and the session advances exactly one tick. Long-running
//! phases (sequence playback, pauses, the player countdown) are modeled as
//! explicit tick counters, never as blocking waits.
//!
//! Besides driving the collaborators directly, the session queues
//! [`SimonEvent`] notifications, drained with [`TurnSequencer::events`].
//! Handling events is optional.
//!
//! # Example
//!
//! ```
//! use simon_core::{
//!     Config, InputSource, Presenter, SequencerBuilder, SimonError, SoundPlayer,
//!     SquareIndex, TurnLabel,
//! };
//! use web_time::Duration;
//!
//! // A headless frontend; a real host would draw, play audio and hit-test.
//! struct NullPresenter;
//! impl Presenter for NullPresenter {
//!     fn highlight(&mut self, _square: SquareIndex, _duration: Duration) {}
//!     fn set_score(&mut self, _score: u32) {}
//!     fn set_lives(&mut self, _lives: u32) {}
//!     fn set_turn(&mut self, _label: TurnLabel) {}
//!     fn set_timer(&mut self, _remaining_secs: u32) {}
//!     fn game_over(&mut self, _final_score: u32) {}
//! }
//! struct NullSound;
//! impl SoundPlayer for NullSound {
//!     fn play(&mut self, _square: SquareIndex) {}
//! }
//! struct NullInput;
//! impl InputSource for NullInput {
//!     fn poll_click(&mut self) -> Option<SquareIndex> {
//!         None
//!     }
//! }
//!
//! struct Headless;
//! impl Config for Headless {
//!     type Presenter = NullPresenter;
//!     type Sound = NullSound;
//!     type Input = NullInput;
//! }
//!
//! let mut session = SequencerBuilder::<Headless>::new()
//!     .with_num_squares(4)
//!     .with_seed(7)
//!     .start_session(NullPresenter, NullSound, NullInput)?;
//!
//! // Once per rendered frame:
//! session.tick()?;
//! for event in session.events() {
//!     // react to notifications
//!     let _ = event;
//! }
//! # Ok::<(), SimonError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use builder::SequencerBuilder;
pub use config::{RulesConfig, TimingConfig};
pub use error::SimonError;
pub use event::{EventDrain, SimonEvent};
pub use frontend::{InputSource, Presenter, SoundPlayer};
pub use sequencer::TurnSequencer;

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod frontend;
/// Internal random number generator module based on PCG32.
///
/// Provides a minimal, seedable PRNG so that whole games are reproducible
/// from a single seed. See the module documentation for details.
pub mod rng;
pub mod sequencer;

mod countdown;
mod playback;

pub mod prelude;

// #############
// #   TYPES   #
// #############

/// Identifies one playable square on the board.
///
/// Square indices run from `0` to `num_squares - 1`, where `num_squares` is
/// fixed at session start via [`RulesConfig`]. `SquareIndex` is a newtype
/// wrapper around `usize` so that board positions cannot be accidentally
/// mixed with other integers.
///
/// # Examples
///
/// ```
/// use simon_core::SquareIndex;
///
/// let square = SquareIndex::new(2);
/// assert_eq!(square.as_usize(), 2);
/// assert!(square.is_valid_for(4));
/// assert!(!square.is_valid_for(2));
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct SquareIndex(usize);

impl SquareIndex {
    /// Creates a new `SquareIndex` from a `usize` value.
    ///
    /// Note: This does not validate the index against a board size. Use
    /// [`is_valid_for()`](Self::is_valid_for) to check against a concrete
    /// number of squares.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        SquareIndex(index)
    }

    /// Returns the underlying `usize` value.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns `true` if this index refers to a square on a board with the
    /// given number of squares.
    #[inline]
    #[must_use]
    pub const fn is_valid_for(self, num_squares: usize) -> bool {
        self.0 < num_squares
    }
}

impl std::fmt::Display for SquareIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SquareIndex {
    #[inline]
    fn from(value: usize) -> Self {
        SquareIndex(value)
    }
}

impl From<SquareIndex> for usize {
    #[inline]
    fn from(square: SquareIndex) -> Self {
        square.0
    }
}

/// A tick is a single step of session execution.
///
/// Ticks are the fundamental unit of time in the sequencer. One call to
/// [`TurnSequencer::tick`] advances the session by exactly one tick; at the
/// default 60 fps timing one tick corresponds to one rendered frame.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Tick(u64);

impl Tick {
    /// Creates a new `Tick` from a `u64` value.
    #[inline]
    #[must_use]
    pub const fn new(tick: u64) -> Self {
        Tick(tick)
    }

    /// Returns the underlying `u64` value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;

    #[inline]
    fn add(self, rhs: u64) -> Self::Output {
        Tick(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

/// A monotonically increasing token identifying one round of play.
///
/// A fresh `RoundId` is issued every time a round begins (and again on
/// [`restart`]). Internally the id doubles as a cancellation token: work
/// scheduled for an older round, such as a sequence playback that was
/// superseded by a restart, is discarded before it is allowed to resume, so
/// at most one computer turn is ever in flight.
///
/// [`restart`]: TurnSequencer::restart
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct RoundId(u64);

impl RoundId {
    /// Creates a new `RoundId` from a `u64` value.
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        RoundId(id)
    }

    /// Returns the underlying `u64` value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next round token.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        RoundId(self.0 + 1)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// #############
// #   ENUMS   #
// #############

/// A session is always in exactly one of these phases. Query it via
/// [`current_phase`].
///
/// [`current_phase`]: TurnSequencer::current_phase
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// Between rounds; the next tick begins a new round.
    Idle,
    /// The computer is presenting the target sequence. Input is closed.
    ComputerPlaying,
    /// The player is reproducing the sequence; clicks are accepted.
    PlayerInput,
    /// The round outcome has been decided; a short pause runs before the
    /// next round begins.
    Evaluating,
    /// The player has run out of lives. Terminal: no further rounds are
    /// generated and score/lives no longer change.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Idle => "Idle",
            Phase::ComputerPlaying => "ComputerPlaying",
            Phase::PlayerInput => "PlayerInput",
            Phase::Evaluating => "Evaluating",
            Phase::GameOver => "GameOver",
        };
        write!(f, "{label}")
    }
}

/// The two ways a player can lose a round. Both cost one life and are
/// otherwise handled identically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PlayerFault {
    /// The player clicked a square that does not match the target sequence
    /// at that position.
    WrongSquare,
    /// The player countdown expired before the sequence was completed.
    Timeout,
}

impl std::fmt::Display for PlayerFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerFault::WrongSquare => write!(f, "wrong square"),
            PlayerFault::Timeout => write!(f, "timeout"),
        }
    }
}

/// The turn banner shown by the [`Presenter`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TurnLabel {
    /// The computer is presenting the sequence.
    ComputerTurn,
    /// The player is reproducing the sequence.
    PlayerTurn,
    /// The session has ended.
    GameOver,
}

impl std::fmt::Display for TurnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnLabel::ComputerTurn => write!(f, "Computer's Turn"),
            TurnLabel::PlayerTurn => write!(f, "Player's Turn"),
            TurnLabel::GameOver => write!(f, "Game Over"),
        }
    }
}

/// Compile-time bundle of the collaborator types a session is built with.
///
/// Rather than threading three generic parameters through every signature,
/// the session is generic over a single `Config` implementor that names the
/// [`Presenter`], [`SoundPlayer`] and [`InputSource`] types of the host.
///
/// # Examples
///
/// ```ignore
/// struct MyEngineFrontend;
/// impl Config for MyEngineFrontend {
///     type Presenter = CanvasPresenter;
///     type Sound = XylophoneRack;
///     type Input = MouseRaycaster;
/// }
/// ```
pub trait Config: 'static {
    /// Display sink for highlights, score/lives/turn/timer text and the
    /// game-over notification.
    type Presenter: Presenter;
    /// Fire-and-forget tone playback, one tone per square.
    type Sound: SoundPlayer;
    /// Per-tick click polling.
    type Input: InputSource;
}
