use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Backend event consumed by the frame loop
#[derive(Clone, Debug, PartialEq)]
pub enum FlickEvent {
    Key(KeyEvent),
    /// Primary button went down at this terminal cell
    Press { column: u16, row: u16 },
    Resize,
}

/// Source of terminal events, buffered between frames.
pub trait EventSource {
    /// Next pending event without blocking, or `None` when the buffer is empty.
    fn poll_event(&mut self) -> io::Result<Option<FlickEvent>>;
}

/// Production event source reading crossterm's input queue
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermEventSource {
    fn poll_event(&mut self) -> io::Result<Option<FlickEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                // Windows reports releases too
                CtEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(FlickEvent::Key(key)));
                }
                CtEvent::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                    return Ok(Some(FlickEvent::Press {
                        column: m.column,
                        row: m.row,
                    }));
                }
                CtEvent::Resize(_, _) => return Ok(Some(FlickEvent::Resize)),
                _ => {}
            }
        }
        Ok(None)
    }
}

/// Test event source fed through a channel
pub struct TestEventSource {
    rx: Receiver<FlickEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<FlickEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn poll_event(&mut self) -> io::Result<Option<FlickEvent>> {
        match self.rx.try_recv() {
            Ok(ev) => Ok(Some(ev)),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => Ok(None),
        }
    }
}

/// Configurable frame interval
pub trait Ticker {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Ticker capping the loop at `hz` frames per second.
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / hz.max(1) as f64))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Drains input and paces frames for the game loop
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Every event buffered since the last call, oldest first.
    pub fn drain(&mut self) -> io::Result<Vec<FlickEvent>> {
        let mut events = Vec::new();
        while let Some(ev) = self.event_source.poll_event()? {
            events.push(ev);
        }
        Ok(events)
    }

    /// Sleeps out whatever is left of the frame that began at `frame_start`.
    pub fn pace(&self, frame_start: Instant) {
        let left = self.ticker.interval().saturating_sub(frame_start.elapsed());
        if !left.is_zero() {
            std::thread::sleep(left);
        }
    }
}

const FPS_WINDOW: usize = 10;

/// Rolling frames-per-second estimate over the last few frames
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: VecDeque<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Instant) {
        if self.frames.len() == FPS_WINDOW {
            self.frames.pop_front();
        }
        self.frames.push_back(now);
    }

    pub fn fps(&self) -> f64 {
        match (self.frames.front(), self.frames.back()) {
            (Some(first), Some(last)) if self.frames.len() > 1 => {
                let span = last.duration_since(*first).as_secs_f64();
                if span > 0.0 {
                    (self.frames.len() - 1) as f64 / span
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}
