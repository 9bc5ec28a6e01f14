use serde::Serialize;

use crate::activity::CurrentActivity;
use crate::character::Player;
use crate::combat::{CombatSession, CombatStance};
use crate::core::constants::{DEFAULT_MENU, START_LOCATION_ID};
use crate::items::Bank;

/// Everything that makes up one running game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub player: Player,
    pub bank: Bank,
    /// In-game minutes since day 1, 00:00.
    pub time_minutes: f64,
    pub current_location: String,
    pub current_menu: String,
    /// Crafting menu filter text.
    pub armory_search: String,
    pub stance: CombatStance,
    /// At most one timed activity runs at a time.
    pub activity: CurrentActivity,
    /// Present only while fighting. Dropping it cancels any pending enemy turn.
    pub combat: Option<CombatSession>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(START_LOCATION_ID)
    }
}

impl GameState {
    pub fn new(start_location: &str) -> Self {
        Self {
            player: Player::default(),
            bank: Bank::new(),
            time_minutes: 0.0,
            current_location: start_location.to_string(),
            current_menu: DEFAULT_MENU.to_string(),
            armory_search: String::new(),
            stance: CombatStance::default(),
            activity: CurrentActivity::Idle,
            combat: None,
        }
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    pub fn is_traveling(&self) -> bool {
        self.activity.is_traveling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = GameState::default();
        assert_eq!(state.current_location, "lumbridge");
        assert_eq!(state.current_menu, "main");
        assert_eq!(state.time_minutes, 0.0);
        assert_eq!(state.bank.gold, 0);
        assert!(state.bank.items.is_empty());
        assert!(!state.in_combat());
        assert!(!state.is_traveling());
        assert_eq!(state.stance, CombatStance::Accurate);
    }
}
