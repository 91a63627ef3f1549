use rand::Rng;
use std::time::{Duration, Instant};

use crate::config::{Config, Rgb};

/// Green and blue channels are fixed; only red varies between targets.
const TARGET_GREEN: u8 = 50;
const TARGET_BLUE: u8 = 70;
const MIN_RED: u8 = 120;

/// One clickable circle on the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub radius: u32,
    pub color: Rgb,
    pub spawned_at: Instant,
}

impl Target {
    /// Fresh target with a random radius, position and color.
    pub fn spawn<R: Rng + ?Sized>(config: &Config, rng: &mut R, now: Instant) -> Self {
        let radius = rng.gen_range(config.min_radius..=config.max_radius);
        let mut target = Self {
            x: 0.0,
            y: 0.0,
            radius,
            color: Rgb(MIN_RED, TARGET_GREEN, TARGET_BLUE),
            spawned_at: now,
        };
        target.relocate(config, rng, now);
        target
    }

    /// Boundary points count as inside.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let r = self.radius as f64;
        self.distance_sq(px, py) <= r * r
    }

    pub fn distance_sq(&self, px: f64, py: f64) -> f64 {
        let dx = px - self.x;
        let dy = py - self.y;
        dx * dx + dy * dy
    }

    /// Shrinks the radius (never below the configured minimum) and moves the
    /// target somewhere new. The shrunk radius carries over to the new spot.
    pub fn shrink_and_respawn<R: Rng + ?Sized>(
        &mut self,
        config: &Config,
        rng: &mut R,
        now: Instant,
    ) {
        self.radius = shrunk_radius(self.radius, config);
        self.relocate(config, rng, now);
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.spawned_at)
    }

    /// Radius of the white center marker.
    pub fn marker_radius(&self) -> u32 {
        (self.radius / 6).max(2)
    }

    fn relocate<R: Rng + ?Sized>(&mut self, config: &Config, rng: &mut R, now: Instant) {
        let margin = config.spawn_margin as f64;
        self.x = rng.gen_range(margin..=config.width as f64 - margin);
        self.y = rng.gen_range(margin..=config.height as f64 - margin);
        self.color = Rgb(rng.gen_range(MIN_RED..=u8::MAX), TARGET_GREEN, TARGET_BLUE);
        self.spawned_at = now;
    }
}

fn shrunk_radius(radius: u32, config: &Config) -> u32 {
    let shrunk = (radius as f64 * config.hit_shrink).floor() as u32;
    shrunk.max(config.min_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target_at(x: f64, y: f64, radius: u32) -> Target {
        Target {
            x,
            y,
            radius,
            color: Rgb(200, TARGET_GREEN, TARGET_BLUE),
            spawned_at: Instant::now(),
        }
    }

    #[test]
    fn test_spawn_respects_bounds() {
        let config = Config::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let now = Instant::now();

        for _ in 0..500 {
            let t = Target::spawn(&config, &mut rng, now);
            assert!(t.x >= 50.0 && t.x <= 910.0, "x out of range: {}", t.x);
            assert!(t.y >= 50.0 && t.y <= 490.0, "y out of range: {}", t.y);
            assert!((18..=38).contains(&t.radius));
            assert!(t.color.0 >= MIN_RED);
            assert_eq!((t.color.1, t.color.2), (TARGET_GREEN, TARGET_BLUE));
            assert_eq!(t.spawned_at, now);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_seed() {
        let config = Config::default();
        let now = Instant::now();
        let a = Target::spawn(&config, &mut ChaCha8Rng::seed_from_u64(99), now);
        let b = Target::spawn(&config, &mut ChaCha8Rng::seed_from_u64(99), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_contains() {
        let t = target_at(100.0, 100.0, 20);

        assert!(t.contains(100.0, 100.0));
        assert!(t.contains(110.0, 110.0));
        assert!(!t.contains(115.0, 115.0));
        assert!(!t.contains(200.0, 100.0));
    }

    #[test]
    fn test_contains_boundary_point() {
        let t = target_at(100.0, 100.0, 20);

        assert!(t.contains(120.0, 100.0));
        assert!(t.contains(100.0, 80.0));
        assert!(!t.contains(120.001, 100.0));
    }

    #[test]
    fn test_shrink_and_respawn() {
        let config = Config::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let spawned = Instant::now();
        let later = spawned + Duration::from_secs(2);
        let mut t = target_at(100.0, 100.0, 38);
        t.spawned_at = spawned;

        t.shrink_and_respawn(&config, &mut rng, later);

        assert_eq!(t.radius, 32);
        assert_eq!(t.spawned_at, later);
        assert!(t.x >= 50.0 && t.x <= 910.0);
        assert!(t.y >= 50.0 && t.y <= 490.0);
    }

    #[test]
    fn test_repeated_shrink_floors_at_min_radius() {
        let config = Config::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let now = Instant::now();
        let mut t = target_at(100.0, 100.0, 38);

        let mut radii = vec![];
        for _ in 0..10 {
            t.shrink_and_respawn(&config, &mut rng, now);
            radii.push(t.radius);
        }

        assert_eq!(&radii[..4], &[32, 27, 22, 18]);
        assert!(radii.iter().all(|&r| r >= 18));
        assert_eq!(*radii.last().unwrap(), 18);
    }

    #[test]
    fn test_marker_radius() {
        assert_eq!(target_at(0.0, 0.0, 38).marker_radius(), 6);
        assert_eq!(target_at(0.0, 0.0, 18).marker_radius(), 3);
        assert_eq!(target_at(0.0, 0.0, 6).marker_radius(), 2);
    }

    #[test]
    fn test_age_never_negative() {
        let t = target_at(0.0, 0.0, 20);
        let before = t.spawned_at.checked_sub(Duration::from_millis(10));
        if let Some(before) = before {
            assert_eq!(t.age(before), Duration::ZERO);
        }
        assert_eq!(t.age(t.spawned_at + Duration::from_millis(250)), Duration::from_millis(250));
    }
}
