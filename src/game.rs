use crossterm::event::{KeyCode, KeyModifiers};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::clock::SessionClock;
use crate::config::Config;
use crate::field::TargetField;
use crate::runtime::FlickEvent;
use crate::stats::SessionStats;
use crate::ui::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Running,
    Finished,
}

/// Input the game reacts to, already translated to playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Quit,
    Press { x: f64, y: f64 },
}

impl Input {
    /// Esc and ctrl+c quit; presses outside the viewport are dropped.
    pub fn from_event(event: &FlickEvent, viewport: &Viewport) -> Option<Self> {
        match event {
            FlickEvent::Key(key) => match key.code {
                KeyCode::Esc => Some(Input::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Quit)
                }
                _ => None,
            },
            FlickEvent::Press { column, row } => viewport
                .playfield_point(*column, *row)
                .map(|(x, y)| Input::Press { x, y }),
            FlickEvent::Resize => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// What a single press amounted to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shot {
    /// Session is over, the press is discarded
    Ignored,
    Hit { index: usize, reaction: f64 },
    Miss,
}

/// One timed session: owns the targets, the stats and the clock
#[derive(Debug)]
pub struct Game {
    config: Config,
    rng: ChaCha8Rng,
    field: TargetField,
    stats: SessionStats,
    clock: SessionClock,
    phase: Phase,
}

impl Game {
    /// Seeds from `config.seed` when set, otherwise from OS entropy.
    pub fn new(config: Config, now: Instant) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng, now)
    }

    pub fn with_rng(config: Config, mut rng: ChaCha8Rng, now: Instant) -> Self {
        let field = TargetField::new(config.target_count, &config, &mut rng, now);
        let stats = SessionStats::new(config.miss_penalty);
        let clock = SessionClock::start(config.session_duration(), now);

        log::info!(
            "session started: {} targets, {}s, seed {:?}",
            field.len(),
            config.session_secs,
            config.seed
        );

        Self {
            config,
            rng,
            field,
            stats,
            clock,
            phase: Phase::Running,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn field(&self) -> &TargetField {
        &self.field
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Applies this frame's inputs in order, then re-checks the clock.
    /// A quit stops processing immediately.
    pub fn frame<I>(&mut self, inputs: I, now: Instant) -> Control
    where
        I: IntoIterator<Item = Input>,
    {
        for input in inputs {
            match input {
                Input::Quit => return Control::Quit,
                Input::Press { x, y } => {
                    self.press(x, y, now);
                }
            }
        }
        self.update(now);
        Control::Continue
    }

    /// At most one target is credited per press.
    pub fn press(&mut self, x: f64, y: f64, now: Instant) -> Shot {
        if self.phase != Phase::Running || !self.clock.is_active(now) {
            return Shot::Ignored;
        }

        self.stats.record_shot();
        match self.field.hit_test(x, y) {
            Some(index) => {
                let reaction = self
                    .field
                    .register_hit(index, &self.config, &mut self.rng, now);
                self.stats.record_hit(reaction);
                log::debug!(
                    "hit target {} after {:.0} ms, radius now {}",
                    index,
                    reaction * 1000.0,
                    self.field.targets()[index].radius
                );
                Shot::Hit { index, reaction }
            }
            None => {
                self.stats.record_miss();
                log::debug!("miss at ({:.0}, {:.0})", x, y);
                Shot::Miss
            }
        }
    }

    /// Moves to `Finished` once the clock runs out. True only on the call
    /// that makes the transition.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.phase == Phase::Finished || self.clock.is_active(now) {
            return false;
        }
        self.phase = Phase::Finished;
        log::info!(
            "session {}: {} shots, {} hits, {:.1}% accuracy, {:.0} ms average reaction",
            self.phase,
            self.stats.shots(),
            self.stats.hits(),
            self.stats.accuracy(),
            self.stats.average_reaction() * 1000.0
        );
        true
    }
}
