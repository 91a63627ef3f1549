use rand::Rng;
use std::time::Instant;

use crate::config::{Config, Rgb};
use crate::target::Target;

const MARKER_COLOR: Rgb = Rgb(255, 255, 255);

/// Drawing seam between the core and whatever backend paints the playfield.
/// Coordinates are playfield coordinates (origin top-left, y down).
pub trait Renderer {
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb);
}

/// Fixed-size, ordered set of targets for one session
#[derive(Debug, Clone)]
pub struct TargetField {
    targets: Vec<Target>,
}

impl TargetField {
    pub fn new<R: Rng + ?Sized>(count: usize, config: &Config, rng: &mut R, now: Instant) -> Self {
        let targets = (0..count)
            .map(|_| Target::spawn(config, rng, now))
            .collect();
        Self { targets }
    }

    pub fn from_targets(targets: Vec<Target>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Index of the target whose center is closest to the point, among those
    /// containing it. Equal distances resolve to the lowest index.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<usize> {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.contains(px, py))
            .map(|(idx, t)| (idx, t.distance_sq(px, py)))
            // min_by keeps the first of several equal minimums
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }

    /// Credits a hit on `index`, respawning it, and returns the reaction time
    /// in seconds since that target last appeared.
    pub fn register_hit<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        config: &Config,
        rng: &mut R,
        now: Instant,
    ) -> f64 {
        let target = &mut self.targets[index];
        let reaction = target.age(now).as_secs_f64();
        target.shrink_and_respawn(config, rng, now);
        reaction
    }

    pub fn draw_all<D: Renderer + ?Sized>(&self, renderer: &mut D) {
        for t in &self.targets {
            renderer.fill_circle(t.x, t.y, t.radius as f64, t.color);
            renderer.fill_circle(t.x, t.y, t.marker_radius() as f64, MARKER_COLOR);
        }
    }
}
