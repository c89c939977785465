//! Benchmarks for full headless game sessions.
//!
//! Run with: cargo bench --bench full_game

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use web_time::Duration;

use simon_core::{
    Config, InputSource, Phase, Presenter, SequencerBuilder, SimonEvent, SoundPlayer, SquareIndex,
    TurnLabel, TurnSequencer,
};

struct NullPresenter;

impl Presenter for NullPresenter {
    fn highlight(&mut self, _square: SquareIndex, _duration: Duration) {}
    fn set_score(&mut self, _score: u32) {}
    fn set_lives(&mut self, _lives: u32) {}
    fn set_turn(&mut self, _label: TurnLabel) {}
    fn set_timer(&mut self, _remaining_secs: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
}

struct NullSound;

impl SoundPlayer for NullSound {
    fn play(&mut self, _square: SquareIndex) {}
}

struct QueueInput {
    clicks: Rc<RefCell<VecDeque<SquareIndex>>>,
}

impl InputSource for QueueInput {
    fn poll_click(&mut self) -> Option<SquareIndex> {
        self.clicks.borrow_mut().pop_front()
    }
}

struct BenchConfig;

impl Config for BenchConfig {
    type Presenter = NullPresenter;
    type Sound = NullSound;
    type Input = QueueInput;
}

fn session_with_queue() -> (TurnSequencer<BenchConfig>, Rc<RefCell<VecDeque<SquareIndex>>>) {
    let clicks = Rc::new(RefCell::new(VecDeque::new()));
    let input = QueueInput {
        clicks: clicks.clone(),
    };
    let session = SequencerBuilder::<BenchConfig>::new()
        .with_seed(7)
        .with_fps(1)
        .start_session(NullPresenter, NullSound, input)
        .expect("valid bench configuration");
    (session, clicks)
}

/// Plays perfectly until `rounds` rounds are won, echoing every presented
/// sequence back through the click queue.
fn play_perfect_rounds(rounds: u32) -> u32 {
    let (mut session, clicks) = session_with_queue();
    let mut pattern = Vec::new();
    let mut won = 0;
    loop {
        session.tick().expect("bench input only produces valid squares");
        let events: Vec<SimonEvent> = session.events().collect();
        for event in events {
            match event {
                SimonEvent::PlaybackStep { square, .. } => pattern.push(square),
                SimonEvent::PlayerTurnStarted { .. } => {
                    clicks.borrow_mut().extend(pattern.drain(..));
                }
                SimonEvent::RoundWon { .. } => {
                    won += 1;
                    if won == rounds {
                        return session.score();
                    }
                }
                _ => {}
            }
        }
    }
}

/// Never clicks; the countdown burns down every life until game over.
fn play_silent_game() -> u32 {
    let (mut session, _clicks) = session_with_queue();
    while session.current_phase() != Phase::GameOver {
        session.tick().expect("no input, no invalid squares");
    }
    session.rounds_played()
}

fn bench_perfect_player(c: &mut Criterion) {
    let mut group = c.benchmark_group("perfect player");
    for rounds in [10u32, 100].iter() {
        group.bench_with_input(BenchmarkId::new("rounds", rounds), rounds, |b, &rounds| {
            b.iter(|| play_perfect_rounds(black_box(rounds)));
        });
    }
    group.finish();
}

fn bench_silent_game(c: &mut Criterion) {
    c.bench_function("silent game to game over", |b| {
        b.iter(play_silent_game);
    });
}

criterion_group!(benches, bench_perfect_player, bench_silent_game);
criterion_main!(benches);
