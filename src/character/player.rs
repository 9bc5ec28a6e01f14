use serde::Serialize;

use crate::core::constants::{
    DEFAULT_GOLD, DEFAULT_INVENTORY_CAPACITY, DEFAULT_MAX_HP, DEFAULT_PLAYER_NAME,
};
use crate::core::events::GameEvent;
use crate::items::Inventory;
use crate::skills::{SkillName, Skills};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub gold: u64,
    pub inventory: Inventory,
    pub skills: Skills,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            max_hp: DEFAULT_MAX_HP,
            hp: DEFAULT_MAX_HP,
            gold: DEFAULT_GOLD,
            inventory: Inventory::new(DEFAULT_INVENTORY_CAPACITY),
            skills: Skills::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Grants XP and records a `LevelUp` event for each level gained.
    pub fn award_xp(&mut self, skill: SkillName, amount: u64, events: &mut Vec<GameEvent>) {
        if amount == 0 {
            return;
        }
        let before = self.skills.level(skill);
        let gained = self.skills.grant_xp(skill, amount);
        for offset in 1..=gained {
            events.push(GameEvent::LevelUp {
                skill,
                level: before + offset,
            });
        }
    }
}
