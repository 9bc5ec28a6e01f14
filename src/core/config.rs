use crate::core::constants::{
    AUTOSAVE_INTERVAL_MS, ENEMY_TURN_DELAY_MS, MESSAGE_LOG_CAPACITY, START_LOCATION_ID,
};

/// Runtime tunables for a [`crate::core::Game`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub autosave_interval_ms: f64,
    pub enemy_turn_delay_ms: f64,
    /// New games and respawns start here.
    pub start_location: String,
    pub message_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
            start_location: START_LOCATION_ID.to_string(),
            message_log_capacity: MESSAGE_LOG_CAPACITY,
        }
    }
}
