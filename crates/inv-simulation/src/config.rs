/// Step budget used when none is given.
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Knobs for one invasion run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for the run's single random source.
    pub seed: u64,
    /// Number of aliens to unleash.
    pub aliens: usize,
    /// Maximum number of steps before the simulation stops.
    pub max_steps: u64,
    /// Length of generated alien names.
    pub name_length: usize,
    /// Event log cap; 0 keeps every event.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            aliens: 0,
            max_steps: DEFAULT_MAX_STEPS,
            name_length: 8,
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Seed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of aliens to unleash.
    pub fn with_aliens(mut self, aliens: usize) -> Self {
        self.aliens = aliens;
        self
    }

    /// Set the step budget.
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = steps;
        self
    }

    /// Set the length of generated alien names.
    pub fn with_name_length(mut self, length: usize) -> Self {
        self.name_length = length;
        self
    }

    /// Cap the event log (0 keeps everything).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}
