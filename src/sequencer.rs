//! The session type driving the computer-turn / player-turn cycle.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::{debug, trace};
use web_time::Duration;

use crate::config::{RulesConfig, TickCounts, TimingConfig};
use crate::countdown::{Countdown, CountdownStep};
use crate::event::{EventDrain, SimonEvent};
use crate::frontend::{InputSource, Presenter, SoundPlayer};
use crate::playback::{PlaybackProgress, PlaybackScript};
use crate::rng::Pcg32;
use crate::{Config, Phase, PlayerFault, RoundId, SimonError, SquareIndex, Tick, TurnLabel};

/// A running Simon session.
///
/// Built by [`SequencerBuilder`]; owns the injected collaborators, the game
/// state (score, lives, target and player sequences, turn phase) and a
/// bounded queue of [`SimonEvent`] notifications.
///
/// The session is advanced exclusively through [`tick()`], called once per
/// host tick. All collaborator calls happen inside `tick()`, on the calling
/// thread; there is no interior mutability and no background work.
///
/// [`SequencerBuilder`]: crate::SequencerBuilder
/// [`tick()`]: Self::tick
pub struct TurnSequencer<T>
where
    T: Config,
{
    rules: RulesConfig,
    ticks: TickCounts,
    /// Wall-clock highlight duration handed to the presenter.
    highlight_duration: Duration,
    presenter: T::Presenter,
    sound: T::Sound,
    input: T::Input,
    rng: Pcg32,
    phase: Phase,
    score: u32,
    lives: u32,
    round: RoundId,
    rounds_played: u32,
    now: Tick,
    target: SmallVec<[SquareIndex; 4]>,
    entered: SmallVec<[SquareIndex; 4]>,
    playback: Option<PlaybackScript>,
    countdown: Option<Countdown>,
    /// Last value sent to `Presenter::set_timer`, to avoid repeat calls.
    timer_display: Option<u32>,
    pause_remaining: u32,
    events: VecDeque<SimonEvent>,
    event_capacity: usize,
}

impl<T: Config> TurnSequencer<T> {
    pub(crate) fn new(
        rules: RulesConfig,
        timing: TimingConfig,
        rng: Pcg32,
        event_capacity: usize,
        mut presenter: T::Presenter,
        sound: T::Sound,
        input: T::Input,
    ) -> Self {
        presenter.set_score(0);
        presenter.set_lives(rules.starting_lives);
        Self {
            rules,
            ticks: timing.to_ticks(),
            highlight_duration: timing.highlight,
            presenter,
            sound,
            input,
            rng,
            phase: Phase::Idle,
            score: 0,
            lives: rules.starting_lives,
            round: RoundId::default(),
            rounds_played: 0,
            now: Tick::default(),
            target: SmallVec::new(),
            entered: SmallVec::new(),
            playback: None,
            countdown: None,
            timer_display: None,
            pause_remaining: 0,
            events: VecDeque::with_capacity(event_capacity.min(32)),
            event_capacity,
        }
    }

    /// Advances the session by exactly one tick. Call this once per host
    /// tick (e.g. once per rendered frame).
    ///
    /// Within one tick at most one click is processed; long-running phases
    /// progress by one tick's worth of their counters. Once the session is
    /// in [`Phase::GameOver`] this is a no-op.
    ///
    /// # Errors
    /// - Returns [`InvalidSquare`] if the input source reports a square
    ///   index outside the board.
    ///
    /// [`InvalidSquare`]: SimonError::InvalidSquare
    pub fn tick(&mut self) -> Result<(), SimonError> {
        self.now += 1;
        match self.phase {
            Phase::Idle => {
                self.begin_round();
                Ok(())
            }
            Phase::ComputerPlaying => {
                self.advance_playback();
                Ok(())
            }
            Phase::PlayerInput => self.advance_player_turn(),
            Phase::Evaluating => {
                self.advance_pause();
                Ok(())
            }
            Phase::GameOver => Ok(()),
        }
    }

    /// Resets score, lives and round history and begins a fresh session on
    /// the next tick.
    ///
    /// Any in-flight computer turn is superseded: the old playback script is
    /// discarded before it can resume. This is the only way score and lives
    /// are ever reset.
    pub fn restart(&mut self) {
        self.round = self.round.next();
        self.score = 0;
        self.lives = self.rules.starting_lives;
        self.rounds_played = 0;
        self.target.clear();
        self.entered.clear();
        self.playback = None;
        self.countdown = None;
        self.timer_display = None;
        self.pause_remaining = 0;
        self.phase = Phase::Idle;
        self.presenter.set_score(0);
        self.presenter.set_lives(self.lives);
        debug!("session restarted");
    }

    /// Returns all queued events in order. The queue is bounded; if it is
    /// not drained regularly the oldest events are dropped first.
    pub fn events(&mut self) -> EventDrain<'_> {
        EventDrain::from_drain(self.events.drain(..))
    }

    /// The phase the session is currently in.
    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    /// The current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Token of the current round. Incremented when a round begins and on
    /// [`restart`](Self::restart).
    #[must_use]
    pub fn current_round(&self) -> RoundId {
        self.round
    }

    /// Number of rounds decided so far (won or lost, the fatal one
    /// included).
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Ticks elapsed since the session started.
    #[must_use]
    pub fn current_tick(&self) -> Tick {
        self.now
    }

    /// Number of playable squares on the board.
    #[must_use]
    pub fn num_squares(&self) -> usize {
        self.rules.num_squares
    }

    fn begin_round(&mut self) {
        self.round = self.round.next();
        let length = self.rng.gen_range_inclusive(
            self.rules.min_sequence_len as u32,
            self.rules.max_sequence_len as u32,
        ) as usize;
        self.target.clear();
        for _ in 0..length {
            let square = self.rng.gen_range(0, self.rules.num_squares as u32);
            self.target.push(SquareIndex::new(square as usize));
        }
        self.playback = Some(PlaybackScript::new(
            self.round,
            self.target.clone(),
            self.ticks.highlight,
            self.ticks.gap,
            self.ticks.lead_out,
        ));
        self.phase = Phase::ComputerPlaying;
        self.presenter.set_turn(TurnLabel::ComputerTurn);
        debug!(round = self.round.as_u64(), length, "starting round");
        self.push_event(SimonEvent::RoundStarted {
            round: self.round,
            length,
        });
    }

    fn advance_playback(&mut self) {
        let Some(script) = self.playback.as_mut() else {
            // Nothing to resume; regenerate on the next tick.
            self.phase = Phase::Idle;
            return;
        };
        // Round token check: a script built for a superseded round must not
        // resume (at most one computer turn is ever in flight).
        if script.round() != self.round {
            trace!(
                stale = script.round().as_u64(),
                current = self.round.as_u64(),
                "discarding superseded playback"
            );
            self.playback = None;
            self.phase = Phase::Idle;
            return;
        }
        match script.advance() {
            PlaybackProgress::Onset { position, square } => {
                self.presenter.highlight(square, self.highlight_duration);
                self.sound.play(square);
                self.push_event(SimonEvent::PlaybackStep {
                    round: self.round,
                    position,
                    square,
                });
            }
            PlaybackProgress::Waiting => {}
            PlaybackProgress::Done => {
                self.playback = None;
                self.begin_player_turn();
            }
        }
    }

    fn begin_player_turn(&mut self) {
        self.entered.clear();
        self.phase = Phase::PlayerInput;
        self.countdown = self
            .ticks
            .input_timeout
            .map(|ticks| Countdown::new(ticks, self.ticks.ticks_per_sec));
        self.presenter.set_turn(TurnLabel::PlayerTurn);
        if let Some(countdown) = &self.countdown {
            let display = countdown.display_secs();
            self.presenter.set_timer(display);
            self.timer_display = Some(display);
        }
        trace!(round = self.round.as_u64(), "accepting player input");
        self.push_event(SimonEvent::PlayerTurnStarted { round: self.round });
    }

    fn advance_player_turn(&mut self) -> Result<(), SimonError> {
        if let Some(square) = self.input.poll_click() {
            if !square.is_valid_for(self.rules.num_squares) {
                return Err(SimonError::InvalidSquare {
                    square,
                    num_squares: self.rules.num_squares,
                });
            }
            self.accept_click(square);
            return Ok(());
        }
        // No click this tick; run the countdown.
        if let Some(countdown) = self.countdown.as_mut() {
            match countdown.advance() {
                CountdownStep::Expired => {
                    trace!(round = self.round.as_u64(), "player countdown expired");
                    self.resolve_miss(PlayerFault::Timeout);
                }
                CountdownStep::Running { display } => {
                    if self.timer_display != Some(display) {
                        self.presenter.set_timer(display);
                        self.timer_display = Some(display);
                    }
                }
            }
        }
        Ok(())
    }

    fn accept_click(&mut self, square: SquareIndex) {
        // The phase leaves PlayerInput the moment the sequence is complete,
        // so the player can never submit more entries than the target holds.
        if self.entered.len() >= self.target.len() {
            return;
        }
        let position = self.entered.len();
        self.entered.push(square);
        trace!(
            round = self.round.as_u64(),
            position,
            square = square.as_usize(),
            "click accepted"
        );
        self.push_event(SimonEvent::InputAccepted {
            round: self.round,
            position,
            square,
        });
        if self.target[position] != square {
            self.resolve_miss(PlayerFault::WrongSquare);
        } else if self.entered.len() == self.target.len() {
            self.resolve_win();
        }
        // Correct prefix: stay in PlayerInput and await the next click.
    }

    fn resolve_win(&mut self) {
        self.score += self.rules.round_reward;
        self.presenter.set_score(self.score);
        debug!(
            round = self.round.as_u64(),
            score = self.score,
            "round won"
        );
        self.push_event(SimonEvent::RoundWon {
            round: self.round,
            score: self.score,
        });
        self.finish_round();
    }

    fn resolve_miss(&mut self, fault: PlayerFault) {
        self.lives = self.lives.saturating_sub(1);
        self.presenter.set_lives(self.lives);
        debug!(
            round = self.round.as_u64(),
            %fault,
            lives = self.lives,
            "round lost"
        );
        self.push_event(SimonEvent::RoundLost {
            round: self.round,
            fault,
            lives_remaining: self.lives,
        });
        if self.lives == 0 {
            self.enter_game_over();
        } else {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.rounds_played += 1;
        self.countdown = None;
        self.timer_display = None;
        self.pause_remaining = self.ticks.evaluate_pause;
        self.phase = Phase::Evaluating;
    }

    fn enter_game_over(&mut self) {
        self.rounds_played += 1;
        self.countdown = None;
        self.timer_display = None;
        self.playback = None;
        self.phase = Phase::GameOver;
        self.presenter.set_turn(TurnLabel::GameOver);
        self.presenter.game_over(self.score);
        debug!(
            final_score = self.score,
            rounds = self.rounds_played,
            "game over"
        );
        self.push_event(SimonEvent::GameOver {
            final_score: self.score,
            rounds_played: self.rounds_played,
        });
    }

    fn advance_pause(&mut self) {
        self.pause_remaining = self.pause_remaining.saturating_sub(1);
        if self.pause_remaining == 0 {
            self.entered.clear();
            self.phase = Phase::Idle;
        }
    }

    fn push_event(&mut self, event: SimonEvent) {
        if self.events.len() >= self.event_capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

impl<T: Config> std::fmt::Debug for TurnSequencer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnSequencer")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("round", &self.round)
            .field("rounds_played", &self.rounds_played)
            .field("tick", &self.now)
            .field("target_len", &self.target.len())
            .field("entered_len", &self.entered.len())
            .field("queued_events", &self.events.len())
            .finish()
    }
}
