//! Builder for [`TurnSequencer`] sessions.

use std::marker::PhantomData;

use web_time::Duration;

use crate::config::{RulesConfig, TimingConfig};
use crate::rng::Pcg32;
use crate::{Config, SimonError, TurnSequencer};

/// Default event queue size. Events older than this threshold are dropped
/// if not drained.
const DEFAULT_EVENT_QUEUE_SIZE: usize = 100;

/// The [`SequencerBuilder`] builds a [`TurnSequencer`].
///
/// After setting all appropriate values, use
/// [`start_session`](Self::start_session) to consume the builder, validate
/// the configuration and create the session.
///
/// # Examples
///
/// ```
/// # use simon_core::{Config, InputSource, Presenter, SoundPlayer, SquareIndex, TurnLabel};
/// # use web_time::Duration;
/// # struct P; impl Presenter for P {
/// #     fn highlight(&mut self, _s: SquareIndex, _d: Duration) {}
/// #     fn set_score(&mut self, _s: u32) {}
/// #     fn set_lives(&mut self, _l: u32) {}
/// #     fn set_turn(&mut self, _t: TurnLabel) {}
/// #     fn set_timer(&mut self, _r: u32) {}
/// #     fn game_over(&mut self, _f: u32) {}
/// # }
/// # struct S; impl SoundPlayer for S { fn play(&mut self, _s: SquareIndex) {} }
/// # struct I; impl InputSource for I { fn poll_click(&mut self) -> Option<SquareIndex> { None } }
/// # struct C; impl Config for C { type Presenter = P; type Sound = S; type Input = I; }
/// use simon_core::{SequencerBuilder, TimingConfig};
///
/// let session = SequencerBuilder::<C>::new()
///     .with_num_squares(6)
///     .with_sequence_lengths(3, 5)
///     .with_timing(TimingConfig::brisk())
///     .with_seed(42)
///     .start_session(P, S, I)?;
/// # Ok::<(), simon_core::SimonError>(())
/// ```
#[must_use = "SequencerBuilder must be consumed by calling start_session"]
pub struct SequencerBuilder<T>
where
    T: Config,
{
    rules: RulesConfig,
    timing: TimingConfig,
    /// Seed for the sequence generator; `None` seeds from entropy.
    seed: Option<u64>,
    /// Maximum number of events to queue before the oldest are dropped.
    event_queue_size: usize,
    _marker: PhantomData<T>,
}

impl<T: Config> std::fmt::Debug for SequencerBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Destructure to ensure all fields are included when new fields are
        // added.
        let Self {
            rules,
            timing,
            seed,
            event_queue_size,
            _marker,
        } = self;

        f.debug_struct("SequencerBuilder")
            .field("rules", rules)
            .field("timing", timing)
            .field("seed", seed)
            .field("event_queue_size", event_queue_size)
            .finish()
    }
}

impl<T: Config> Default for SequencerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Config> SequencerBuilder<T> {
    /// Construct a new builder with all values set to their defaults.
    pub fn new() -> Self {
        Self {
            rules: RulesConfig::default(),
            timing: TimingConfig::default(),
            seed: None,
            event_queue_size: DEFAULT_EVENT_QUEUE_SIZE,
            _marker: PhantomData,
        }
    }

    /// Replaces the whole rules configuration.
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the whole timing configuration.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the number of playable squares on the board.
    pub fn with_num_squares(mut self, num_squares: usize) -> Self {
        self.rules.num_squares = num_squares;
        self
    }

    /// Sets the inclusive bounds for the generated target sequence length.
    pub fn with_sequence_lengths(mut self, min: usize, max: usize) -> Self {
        self.rules.min_sequence_len = min;
        self.rules.max_sequence_len = max;
        self
    }

    /// Sets the number of lives at session start.
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.rules.starting_lives = lives;
        self
    }

    /// Sets the score reward for a fully correct round.
    pub fn with_round_reward(mut self, reward: u32) -> Self {
        self.rules.round_reward = reward;
        self
    }

    /// Sets the expected tick frequency of the host loop.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.timing.fps = fps;
        self
    }

    /// Sets the player-input countdown; `None` disables the timeout.
    pub fn with_input_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timing.input_timeout = timeout;
        self
    }

    /// Seeds the sequence generator so that whole games are reproducible.
    /// Without a seed the generator is seeded from entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the maximum number of queued events before the oldest are
    /// dropped.
    pub fn with_event_queue_size(mut self, size: usize) -> Self {
        self.event_queue_size = size;
        self
    }

    /// Consumes the builder, validates the configuration and starts a
    /// session with the given collaborators.
    ///
    /// # Errors
    /// - Returns [`InvalidConfig`] if the rules or timing are malformed
    ///   (zero squares, inverted sequence bounds, zero durations, zero fps,
    ///   zero event queue size). Validation happens here, never mid-round.
    ///
    /// [`InvalidConfig`]: SimonError::InvalidConfig
    pub fn start_session(
        self,
        presenter: T::Presenter,
        sound: T::Sound,
        input: T::Input,
    ) -> Result<TurnSequencer<T>, SimonError> {
        self.rules.validate()?;
        self.timing.validate()?;
        if self.event_queue_size == 0 {
            return Err(SimonError::InvalidConfig {
                info: "event_queue_size must be at least 1".to_owned(),
            });
        }
        let rng = match self.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_entropy(),
        };
        Ok(TurnSequencer::new(
            self.rules,
            self.timing,
            rng,
            self.event_queue_size,
            presenter,
            sound,
            input,
        ))
    }
}
