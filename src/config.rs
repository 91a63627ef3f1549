use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One day; longer sessions are rejected
pub const MAX_SESSION_SECS: u64 = 24 * 60 * 60;
pub const MAX_TARGETS: usize = 256;

/// An RGB color, serialized as `[r, g, b]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

/// Startup constants for a session. Built once, then only read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub session_secs: u64,
    pub target_count: usize,
    pub min_radius: u32,
    pub max_radius: u32,
    pub spawn_margin: u32,
    /// Multiplier applied to a target's radius each time it is hit
    pub hit_shrink: f64,
    /// Delta applied to hits on a miss: 0 disables, negative penalizes (floored at 0)
    pub miss_penalty: i32,
    pub background: Rgb,
    pub foreground: Rgb,
    pub title: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            fps: 120,
            session_secs: 60,
            target_count: 4,
            min_radius: 18,
            max_radius: 38,
            spawn_margin: 50,
            hit_shrink: 0.85,
            miss_penalty: 0,
            background: Rgb(20, 22, 28),
            foreground: Rgb(240, 240, 240),
            title: "Aim Trainer".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Zero(&'static str),
    TooLarge { field: &'static str, max: u64 },
    RadiusRange { min: u32, max: u32 },
    Shrink(f64),
    PositivePenalty(i32),
    NoSpawnArea { margin: u32 },
    MarginTooSmall { margin: u32, max_radius: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Zero(field) => write!(f, "{field} must be greater than zero"),
            ConfigError::TooLarge { field, max } => write!(f, "{field} must be at most {max}"),
            ConfigError::RadiusRange { min, max } => {
                write!(f, "min radius {min} is larger than max radius {max}")
            }
            ConfigError::Shrink(s) => write!(f, "hit shrink {s} must be in (0, 1]"),
            ConfigError::PositivePenalty(p) => {
                write!(f, "miss penalty {p} must be zero or negative")
            }
            ConfigError::NoSpawnArea { margin } => {
                write!(f, "spawn margin {margin} leaves no room on the playfield")
            }
            ConfigError::MarginTooSmall { margin, max_radius } => write!(
                f,
                "spawn margin {margin} is smaller than max radius {max_radius}; \
                 targets would clip the edge"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width as u64),
            ("height", self.height as u64),
            ("fps", self.fps as u64),
            ("session duration", self.session_secs),
            ("target count", self.target_count as u64),
            ("min radius", self.min_radius as u64),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(name));
            }
        }
        for (field, value, max) in [
            ("session duration", self.session_secs, MAX_SESSION_SECS),
            ("target count", self.target_count as u64, MAX_TARGETS as u64),
        ] {
            if value > max {
                return Err(ConfigError::TooLarge { field, max });
            }
        }
        if self.min_radius > self.max_radius {
            return Err(ConfigError::RadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.hit_shrink > 0.0 && self.hit_shrink <= 1.0) {
            return Err(ConfigError::Shrink(self.hit_shrink));
        }
        if self.miss_penalty > 0 {
            return Err(ConfigError::PositivePenalty(self.miss_penalty));
        }
        let margin = self.spawn_margin;
        if margin.saturating_mul(2) >= self.width || margin.saturating_mul(2) >= self.height {
            return Err(ConfigError::NoSpawnArea { margin });
        }
        if margin < self.max_radius {
            return Err(ConfigError::MarginTooSmall {
                margin,
                max_radius: self.max_radius,
            });
        }
        Ok(())
    }

    pub fn session_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_secs)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "flick") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("flick_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                log::warn!(
                    "cannot read config {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!(
                    "ignoring unreadable config {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
