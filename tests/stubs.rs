use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use web_time::Duration;

use simon_core::{
    Config, InputSource, Phase, Presenter, SequencerBuilder, SimonEvent, SoundPlayer, SquareIndex,
    TurnLabel, TurnSequencer,
};

/// Everything the presenter was told, in call order per channel.
#[derive(Debug, Default)]
pub struct PresenterLog {
    pub highlights: Vec<(SquareIndex, Duration)>,
    pub scores: Vec<u32>,
    pub lives: Vec<u32>,
    pub turns: Vec<TurnLabel>,
    pub timers: Vec<u32>,
    pub game_overs: Vec<u32>,
}

pub struct RecordingPresenter {
    log: Rc<RefCell<PresenterLog>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> (Self, Rc<RefCell<PresenterLog>>) {
        let log = Rc::new(RefCell::new(PresenterLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl Presenter for RecordingPresenter {
    fn highlight(&mut self, square: SquareIndex, duration: Duration) {
        self.log.borrow_mut().highlights.push((square, duration));
    }

    fn set_score(&mut self, score: u32) {
        self.log.borrow_mut().scores.push(score);
    }

    fn set_lives(&mut self, lives: u32) {
        self.log.borrow_mut().lives.push(lives);
    }

    fn set_turn(&mut self, label: TurnLabel) {
        self.log.borrow_mut().turns.push(label);
    }

    fn set_timer(&mut self, remaining_secs: u32) {
        self.log.borrow_mut().timers.push(remaining_secs);
    }

    fn game_over(&mut self, final_score: u32) {
        self.log.borrow_mut().game_overs.push(final_score);
    }
}

pub struct RecordingSound {
    plays: Rc<RefCell<Vec<SquareIndex>>>,
}

impl RecordingSound {
    #[must_use]
    pub fn new() -> (Self, Rc<RefCell<Vec<SquareIndex>>>) {
        let plays = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                plays: plays.clone(),
            },
            plays,
        )
    }
}

impl SoundPlayer for RecordingSound {
    fn play(&mut self, square: SquareIndex) {
        self.plays.borrow_mut().push(square);
    }
}

/// An input source fed from a shared click queue; one click per poll.
pub struct ScriptedInput {
    clicks: Rc<RefCell<VecDeque<SquareIndex>>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new() -> (Self, Rc<RefCell<VecDeque<SquareIndex>>>) {
        let clicks = Rc::new(RefCell::new(VecDeque::new()));
        (
            Self {
                clicks: clicks.clone(),
            },
            clicks,
        )
    }
}

impl InputSource for ScriptedInput {
    fn poll_click(&mut self) -> Option<SquareIndex> {
        self.clicks.borrow_mut().pop_front()
    }
}

pub struct StubConfig;

impl Config for StubConfig {
    type Presenter = RecordingPresenter;
    type Sound = RecordingSound;
    type Input = ScriptedInput;
}

/// Drives a session tick by tick and records everything observable.
pub struct Harness {
    pub session: TurnSequencer<StubConfig>,
    pub presenter: Rc<RefCell<PresenterLog>>,
    pub sounds: Rc<RefCell<Vec<SquareIndex>>>,
    pub clicks: Rc<RefCell<VecDeque<SquareIndex>>>,
    pub events: Vec<SimonEvent>,
}

/// One tick per configured duration unit keeps tests short: at 1 fps the
/// default 500 ms highlight and 700 ms gap each become a single tick, the
/// 2 s pause two ticks and the 10 s countdown ten ticks.
pub const TEST_FPS: u32 = 1;

impl Harness {
    #[allow(dead_code)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(|builder| builder)
    }

    /// Builds a harness from a customized builder. The base builder is
    /// seeded and runs at [`TEST_FPS`].
    #[must_use]
    pub fn with_builder(
        customize: impl FnOnce(SequencerBuilder<StubConfig>) -> SequencerBuilder<StubConfig>,
    ) -> Self {
        let (presenter, presenter_log) = RecordingPresenter::new();
        let (sound, sound_log) = RecordingSound::new();
        let (input, clicks) = ScriptedInput::new();
        let builder = SequencerBuilder::<StubConfig>::new()
            .with_seed(7)
            .with_fps(TEST_FPS);
        let session = customize(builder)
            .start_session(presenter, sound, input)
            .expect("valid test configuration");
        Self {
            session,
            presenter: presenter_log,
            sounds: sound_log,
            clicks,
            events: Vec::new(),
        }
    }

    /// Advances one tick and drains events into `self.events`.
    pub fn tick(&mut self) {
        self.session.tick().expect("tick failed");
        self.events.extend(self.session.events());
    }

    #[allow(dead_code)]
    pub fn tick_n(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Ticks until the session reaches `phase`, returning the tick count.
    pub fn tick_until_phase(&mut self, phase: Phase) -> u32 {
        let mut ticks = 0;
        while self.session.current_phase() != phase {
            self.tick();
            ticks += 1;
            assert!(ticks < 10_000, "never reached phase {phase}");
        }
        ticks
    }

    /// Queues a click and advances one tick.
    #[allow(dead_code)]
    pub fn click(&mut self, square: usize) {
        self.clicks
            .borrow_mut()
            .push_back(SquareIndex::new(square));
        self.tick();
    }

    /// Reconstructs the current round's target sequence from the playback
    /// events, the way a real frontend observes it.
    #[allow(dead_code)]
    #[must_use]
    pub fn last_round_target(&self) -> Vec<SquareIndex> {
        let current = self.session.current_round();
        let mut target: Vec<(usize, SquareIndex)> = self
            .events
            .iter()
            .filter_map(|event| match event {
                SimonEvent::PlaybackStep {
                    round,
                    position,
                    square,
                } if *round == current => Some((*position, *square)),
                _ => None,
            })
            .collect();
        target.sort_by_key(|(position, _)| *position);
        target.into_iter().map(|(_, square)| square).collect()
    }

    /// Runs the computer's turn to completion and returns the presented
    /// target sequence.
    #[allow(dead_code)]
    pub fn run_to_player_turn(&mut self) -> Vec<SquareIndex> {
        self.tick_until_phase(Phase::PlayerInput);
        self.last_round_target()
    }
}
