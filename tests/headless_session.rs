use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flick::config::Config;
use flick::game::{Game, Input, Phase, Shot};
use flick::runtime::{FixedTicker, FlickEvent, Runner, TestEventSource};
use ratatui::{backend::TestBackend, Terminal};

fn esc() -> FlickEvent {
    FlickEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
}

fn seeded_config(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        ..Config::default()
    }
}

/// Cell whose center lands closest to the playfield point, for a terminal of
/// `cols` x `rows` showing a 960x540 playfield.
fn cell_for(x: f64, y: f64, cols: u16, rows: u16) -> (u16, u16) {
    let column = (x / 960.0 * cols as f64).floor() as u16;
    let row = (y / 540.0 * rows as f64).floor() as u16;
    (column.min(cols - 1), row.min(rows - 1))
}

// Drives the real frame loop against a fake terminal: one press on a target,
// then escape. Both land in the first frame.
#[test]
fn headless_press_then_escape() {
    let mut game = Game::new(seeded_config(17), Instant::now());
    let target = game.field().targets()[0].clone();
    let (column, row) = cell_for(target.x, target.y, 96, 54);

    let (tx, rx) = mpsc::channel();
    tx.send(FlickEvent::Press { column, row }).unwrap();
    tx.send(esc()).unwrap();

    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let mut terminal = Terminal::new(TestBackend::new(96, 54)).unwrap();

    flick::app::run(&mut terminal, &mut game, &mut runner).unwrap();

    assert_eq!(game.stats().shots(), 1);
    assert_eq!(game.stats().hits(), 1);
    assert_eq!(game.stats().accuracy(), 100.0);
    assert_eq!(game.phase(), Phase::Running);
}

// A short session runs out on its own; presses afterwards change nothing.
#[test]
fn headless_session_expires() {
    let config = Config {
        session_secs: 1,
        ..seeded_config(5)
    };
    let mut game = Game::new(config, Instant::now());

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(10)),
    );
    let mut terminal = Terminal::new(TestBackend::new(96, 54)).unwrap();

    // quit only after the session has had time to finish
    let feeder = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(1300));
        tx.send(FlickEvent::Press { column: 40, row: 20 }).unwrap();
        tx.send(esc()).unwrap();
    });

    flick::app::run(&mut terminal, &mut game, &mut runner).unwrap();
    feeder.join().unwrap();

    assert_eq!(game.phase(), Phase::Finished);
    assert_eq!(game.stats().shots(), 0);
    assert_eq!(game.stats().hits(), 0);
}

// Mirrors a player: hit on center two seconds after spawn, then a miss.
#[test]
fn hit_then_miss_scenario() {
    let start = Instant::now();
    let mut game = Game::new(seeded_config(8), start);
    let target = game.field().targets()[1].clone();

    let shot = game.press(target.x, target.y, start + Duration::from_secs(2));
    match shot {
        Shot::Hit { index, reaction } => {
            assert_eq!(index, 1);
            assert!((reaction - 2.0).abs() < 1e-9);
        }
        other => panic!("expected a hit, got {other:?}"),
    }
    assert!(game.field().targets()[1].radius <= target.radius);

    // a corner point no target can reach (margin 50 > max radius 38)
    let shot = game.press(1.0, 1.0, start + Duration::from_secs(3));
    assert_eq!(shot, Shot::Miss);

    assert_eq!(game.stats().shots(), 2);
    assert_eq!(game.stats().hits(), 1);
    assert_eq!(game.stats().accuracy(), 50.0);
    assert!((game.stats().average_reaction() - 2.0).abs() < 1e-9);
}

#[test]
fn finish_transition_happens_once() {
    let start = Instant::now();
    let mut game = Game::new(seeded_config(2), start);
    let end = start + Duration::from_secs(60);

    let transitions = (0..5)
        .filter(|i| game.update(end + Duration::from_millis(100 * i)))
        .count();
    assert_eq!(transitions, 1);

    let target = game.field().targets()[0].clone();
    game.frame([Input::Press { x: target.x, y: target.y }], end);
    assert_eq!(game.stats().shots(), 0);
}
