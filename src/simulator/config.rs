//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per run before stopping
    pub max_ticks_per_run: u64,

    /// Real milliseconds per frame
    pub frame_ms: f64,

    /// Where the scripted player mines
    pub mine_location: String,

    /// Where the scripted player empties its inventory
    pub bank_location: String,

    /// Where the scripted player fights between bank trips
    pub hunt_location: String,

    /// Fights started per bank trip
    pub fights_per_trip: u32,

    /// Flee once HP drops to this share of max HP
    pub flee_below_hp_ratio: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            // One real hour at 100 ms frames.
            max_ticks_per_run: 36_000,
            frame_ms: 100.0,
            mine_location: "lumbridge_swamp_mine".to_string(),
            bank_location: "lumbridge_castle_bank".to_string(),
            hunt_location: "lumbridge_swamp".to_string(),
            fights_per_trip: 3,
            flee_below_hp_ratio: 0.25,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded config for quick checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 3,
            seed: Some(seed),
            max_ticks_per_run: 6_000,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Pure gathering: no fights between bank trips.
    pub fn mining_only(num_runs: u32) -> Self {
        Self {
            num_runs,
            fights_per_trip: 0,
            ..Default::default()
        }
    }
}
