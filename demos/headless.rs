//! A terminal-only demo: a scripted "player" echoes every presented
//! sequence back, winning round after round until a configurable misclick
//! ends the run.
//!
//! Run with: cargo run --example headless

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use simon_core::{
    Config, InputSource, Phase, Presenter, SequencerBuilder, SimonEvent, SoundPlayer, SquareIndex,
    TurnLabel, TurnSequencer,
};
use web_time::Duration;

/// Rounds the scripted player reproduces correctly before misclicking on
/// purpose, over and over, until the lives run out.
const WINNING_ROUNDS: u32 = 3;

struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn highlight(&mut self, square: SquareIndex, _duration: Duration) {
        println!("  [{square}] lights up");
    }

    fn set_score(&mut self, score: u32) {
        println!("score: {score}");
    }

    fn set_lives(&mut self, lives: u32) {
        println!("lives: {lives}");
    }

    fn set_turn(&mut self, label: TurnLabel) {
        println!("-- {label} --");
    }

    fn set_timer(&mut self, _remaining_secs: u32) {}

    fn game_over(&mut self, final_score: u32) {
        println!("== Game over, final score {final_score} ==");
    }
}

struct ConsoleSound;

impl SoundPlayer for ConsoleSound {
    fn play(&mut self, square: SquareIndex) {
        println!("  (tone {square})");
    }
}

struct QueueInput {
    clicks: Rc<RefCell<VecDeque<SquareIndex>>>,
}

impl InputSource for QueueInput {
    fn poll_click(&mut self) -> Option<SquareIndex> {
        self.clicks.borrow_mut().pop_front()
    }
}

struct DemoConfig;

impl Config for DemoConfig {
    type Presenter = ConsolePresenter;
    type Sound = ConsoleSound;
    type Input = QueueInput;
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // configure logging: output sequencer logs to standard out
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::DEBUG)
            .finish(),
    )?;

    let clicks = Rc::new(RefCell::new(VecDeque::new()));
    let input = QueueInput {
        clicks: clicks.clone(),
    };

    // 1 fps keeps the demo instant: every configured duration becomes a
    // handful of ticks instead of wall-clock seconds.
    let mut session: TurnSequencer<DemoConfig> = SequencerBuilder::<DemoConfig>::new()
        .with_seed(2024)
        .with_fps(1)
        .start_session(ConsolePresenter, ConsoleSound, input)?;

    let mut pattern = Vec::new();
    let mut won = 0;
    while session.current_phase() != Phase::GameOver {
        session.tick()?;
        let events: Vec<SimonEvent> = session.events().collect();
        for event in events {
            match event {
                SimonEvent::PlaybackStep { square, .. } => pattern.push(square),
                SimonEvent::PlayerTurnStarted { .. } => {
                    let mut queue = clicks.borrow_mut();
                    if won < WINNING_ROUNDS {
                        queue.extend(pattern.drain(..));
                    } else {
                        // Deliberately answer with an off-by-one square.
                        let first = pattern.drain(..).next().unwrap_or_default();
                        let wrong = (first.as_usize() + 1) % session.num_squares();
                        queue.push_back(SquareIndex::new(wrong));
                    }
                }
                SimonEvent::RoundWon { .. } => won += 1,
                _ => {}
            }
        }
    }

    println!(
        "played {} rounds, final score {}",
        session.rounds_played(),
        session.score()
    );
    Ok(())
}
