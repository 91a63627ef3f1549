use crate::util::{fastest, mean, std_dev};

/// Shot/hit counters and reaction samples for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    shots: u32,
    hits: u32,
    misses: u32,
    reactions: Vec<f64>,
    miss_penalty: i32,
}

impl SessionStats {
    /// `miss_penalty` is added to hits on every miss (0 turns it off).
    pub fn new(miss_penalty: i32) -> Self {
        Self {
            miss_penalty,
            ..Self::default()
        }
    }

    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    /// `reaction` is in seconds.
    pub fn record_hit(&mut self, reaction: f64) {
        self.hits += 1;
        self.reactions.push(reaction);
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
        if self.miss_penalty != 0 {
            self.hits = self.hits.saturating_add_signed(self.miss_penalty);
        }
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn reactions(&self) -> &[f64] {
        &self.reactions
    }

    /// Hits as a percentage of shots; 0 before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.hits as f64 / self.shots as f64 * 100.0
    }

    /// Mean reaction time in seconds; 0 before the first hit.
    pub fn average_reaction(&self) -> f64 {
        mean(&self.reactions).unwrap_or(0.0)
    }

    pub fn best_reaction(&self) -> Option<f64> {
        fastest(&self.reactions)
    }

    pub fn reaction_std_dev(&self) -> f64 {
        std_dev(&self.reactions).unwrap_or(0.0)
    }
}
