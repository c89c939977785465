//! Session configuration: game rules and timing.
//!
//! Both structs are plain `Copy` value types with sensible defaults and a
//! few named presets. They are validated once, when
//! [`SequencerBuilder::start_session`] consumes the builder; a malformed
//! configuration is rejected there and can never surface mid-round.
//!
//! [`SequencerBuilder::start_session`]: crate::SequencerBuilder::start_session

use web_time::Duration;

use crate::SimonError;

/// Default number of playable squares (the classic four-pad layout).
pub const DEFAULT_NUM_SQUARES: usize = 4;
/// Default inclusive bounds for the target sequence length.
pub const DEFAULT_SEQUENCE_LENGTHS: (usize, usize) = (3, 4);
/// Default score reward for a fully correct round.
pub const DEFAULT_ROUND_REWARD: u32 = 5;
/// Default number of lives at session start.
pub const DEFAULT_STARTING_LIVES: u32 = 3;
/// Default expected tick frequency of the host loop.
pub const DEFAULT_FPS: u32 = 60;
/// Default time a square stays lit during playback.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(500);
/// Default silent gap between playback elements.
pub const DEFAULT_GAP: Duration = Duration::from_millis(700);
/// Default delay between the last playback element and the player's turn.
pub const DEFAULT_LEAD_OUT: Duration = Duration::from_millis(500);
/// Default pause after a round is decided, before the next one begins.
pub const DEFAULT_EVALUATE_PAUSE: Duration = Duration::from_secs(2);
/// Default player-input countdown.
pub const DEFAULT_INPUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Game rules: board size, sequence lengths, scoring and lives.
///
/// # Examples
///
/// ```
/// use simon_core::RulesConfig;
///
/// let rules = RulesConfig {
///     num_squares: 6,
///     ..RulesConfig::default()
/// };
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Number of playable squares. Square indices run in `[0, num_squares)`.
    pub num_squares: usize,
    /// Shortest target sequence that may be generated (inclusive).
    pub min_sequence_len: usize,
    /// Longest target sequence that may be generated (inclusive).
    pub max_sequence_len: usize,
    /// Score awarded for a fully correct round.
    pub round_reward: u32,
    /// Lives at session start; one is lost per miss or timeout.
    pub starting_lives: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            num_squares: DEFAULT_NUM_SQUARES,
            min_sequence_len: DEFAULT_SEQUENCE_LENGTHS.0,
            max_sequence_len: DEFAULT_SEQUENCE_LENGTHS.1,
            round_reward: DEFAULT_ROUND_REWARD,
            starting_lives: DEFAULT_STARTING_LIVES,
        }
    }
}

impl RulesConfig {
    /// Checks the rules for internal consistency.
    ///
    /// # Errors
    /// - Returns [`InvalidConfig`] if there are no squares, the sequence
    ///   length bounds are zero or inverted, or there are no starting lives.
    ///
    /// [`InvalidConfig`]: SimonError::InvalidConfig
    pub fn validate(&self) -> Result<(), SimonError> {
        if self.num_squares == 0 {
            return Err(invalid("num_squares must be at least 1"));
        }
        if self.min_sequence_len == 0 {
            return Err(invalid("min_sequence_len must be at least 1"));
        }
        if self.min_sequence_len > self.max_sequence_len {
            return Err(invalid(
                "min_sequence_len must not exceed max_sequence_len",
            ));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives must be at least 1"));
        }
        Ok(())
    }
}

/// Timing parameters of the session, in wall-clock durations.
///
/// Durations are converted to whole tick counts against `fps` when the
/// session starts (rounded, with a minimum of one tick), so the session
/// itself never touches a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Expected tick frequency of the host loop.
    pub fps: u32,
    /// How long each square stays lit during the computer's turn.
    pub highlight: Duration,
    /// Silent gap after each playback element.
    pub gap: Duration,
    /// Delay between the end of playback and the player's turn.
    pub lead_out: Duration,
    /// Pause after a round is decided, for both outcomes.
    pub evaluate_pause: Duration,
    /// Player-input countdown; `None` disables the timeout entirely.
    pub input_timeout: Option<Duration>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            highlight: DEFAULT_HIGHLIGHT,
            gap: DEFAULT_GAP,
            lead_out: DEFAULT_LEAD_OUT,
            evaluate_pause: DEFAULT_EVALUATE_PAUSE,
            input_timeout: Some(DEFAULT_INPUT_TIMEOUT),
        }
    }
}

impl TimingConfig {
    /// A snappier preset for experienced players: shorter highlights, gaps
    /// and pauses, and a five second countdown.
    #[must_use]
    pub fn brisk() -> Self {
        Self {
            fps: DEFAULT_FPS,
            highlight: Duration::from_millis(250),
            gap: Duration::from_millis(350),
            lead_out: Duration::from_millis(250),
            evaluate_pause: Duration::from_secs(1),
            input_timeout: Some(Duration::from_secs(5)),
        }
    }

    /// A forgiving preset: longer highlights and gaps, and a twenty second
    /// countdown.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            fps: DEFAULT_FPS,
            highlight: Duration::from_millis(750),
            gap: Duration::from_secs(1),
            lead_out: Duration::from_millis(750),
            evaluate_pause: Duration::from_secs(3),
            input_timeout: Some(Duration::from_secs(20)),
        }
    }

    /// Checks the timing for internal consistency.
    ///
    /// # Errors
    /// - Returns [`InvalidConfig`] if `fps` is zero or any configured
    ///   duration is zero.
    ///
    /// [`InvalidConfig`]: SimonError::InvalidConfig
    pub fn validate(&self) -> Result<(), SimonError> {
        if self.fps == 0 {
            return Err(invalid("fps must be at least 1"));
        }
        if self.highlight.is_zero() {
            return Err(invalid("highlight duration must be positive"));
        }
        if self.gap.is_zero() {
            return Err(invalid("gap duration must be positive"));
        }
        if self.lead_out.is_zero() {
            return Err(invalid("lead_out duration must be positive"));
        }
        if self.evaluate_pause.is_zero() {
            return Err(invalid("evaluate_pause duration must be positive"));
        }
        if let Some(timeout) = self.input_timeout {
            if timeout.is_zero() {
                return Err(invalid("input_timeout duration must be positive"));
            }
        }
        Ok(())
    }

    /// Converts the configured durations to whole tick counts.
    pub(crate) fn to_ticks(self) -> TickCounts {
        TickCounts {
            ticks_per_sec: self.fps,
            highlight: ticks_for(self.highlight, self.fps),
            gap: ticks_for(self.gap, self.fps),
            lead_out: ticks_for(self.lead_out, self.fps),
            evaluate_pause: ticks_for(self.evaluate_pause, self.fps),
            input_timeout: self.input_timeout.map(|t| ticks_for(t, self.fps)),
        }
    }
}

/// Timing parameters resolved to tick counts. Internal; computed once at
/// session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TickCounts {
    pub(crate) ticks_per_sec: u32,
    pub(crate) highlight: u32,
    pub(crate) gap: u32,
    pub(crate) lead_out: u32,
    pub(crate) evaluate_pause: u32,
    pub(crate) input_timeout: Option<u32>,
}

fn ticks_for(duration: Duration, fps: u32) -> u32 {
    let ticks = (duration.as_secs_f64() * f64::from(fps)).round() as u32;
    ticks.max(1)
}

fn invalid(info: &str) -> SimonError {
    SimonError::InvalidConfig {
        info: info.to_owned(),
    }
}
