//! Events emitted by commands and ticks.
//!
//! Game logic never formats UI directly. It returns [`GameEvent`]s and the
//! orchestrator turns them into message-log lines through [`GameEvent::message`].

use serde::Serialize;

use crate::activity::ActivityKind;
use crate::combat::CombatStance;
use crate::skills::SkillName;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    // ── Travel ──────────────────────────────────────────────────
    TravelStarted {
        destination: String,
        duration_ms: u64,
    },
    Arrived {
        location: String,
    },
    AgilityXp {
        amount: u64,
    },
    Moved {
        location: String,
    },

    // ── Production ──────────────────────────────────────────────
    ActivityStarted {
        kind: ActivityKind,
        target: String,
    },
    ActivityCancelled {
        kind: ActivityKind,
        target: String,
    },
    OreMined {
        ore: String,
        xp: u64,
    },
    IngotSmelted {
        ingot: String,
        xp: u64,
    },
    SmeltingFailed {
        ingot: String,
    },
    ItemCrafted {
        item: String,
        xp: u64,
    },
    MissingMaterials {
        target: String,
    },
    InventoryFull,

    // ── Skills ──────────────────────────────────────────────────
    LevelUp {
        skill: SkillName,
        level: u32,
    },

    // ── Combat ──────────────────────────────────────────────────
    CombatStarted {
        enemy: String,
    },
    StanceChanged {
        stance: CombatStance,
    },
    PlayerHit {
        enemy: String,
        damage: u32,
    },
    EnemyHit {
        enemy: String,
        damage: u32,
    },
    EnemyDefeated {
        enemy: String,
    },
    LootReceived {
        item: String,
    },
    LootLost {
        item: String,
    },
    PlayerDefeated {
        respawn: String,
    },
    Fled,

    // ── Bank ────────────────────────────────────────────────────
    ItemDeposited {
        item: String,
        quantity: u32,
    },
    ItemWithdrawn {
        item: String,
        quantity: u32,
    },
    GoldDeposited {
        amount: u64,
    },
    GoldWithdrawn {
        amount: u64,
    },

    // ── Persistence ─────────────────────────────────────────────
    GameSaved,
    GameLoaded,
    SaveFailed,
    LoadFailed,
}

impl GameEvent {
    /// Player-facing log line for this event.
    pub fn message(&self) -> String {
        match self {
            GameEvent::TravelStarted { destination, .. } => {
                format!("You begin traveling to {}...", destination)
            }
            GameEvent::Arrived { location } => format!("You arrive at {}.", location),
            GameEvent::AgilityXp { amount } => {
                format!("You gained {} Agility XP from traveling.", amount)
            }
            GameEvent::Moved { location } => format!("You walk to {}.", location),
            GameEvent::ActivityStarted { kind, target } => {
                format!("Started {} {}...", kind.verb_ing(), target)
            }
            GameEvent::ActivityCancelled { kind, target } => {
                format!("You stop {} {}.", kind.verb_ing(), target)
            }
            GameEvent::OreMined { ore, xp } => format!("Mined 1x {}! (+{} Mining XP)", ore, xp),
            GameEvent::IngotSmelted { ingot, xp } => {
                format!("Smelted 1x {}! (+{} Smelting XP)", ingot, xp)
            }
            GameEvent::SmeltingFailed { ingot } => {
                format!("The ore is too impure and you fail to smelt {}.", ingot)
            }
            GameEvent::ItemCrafted { item, xp } => {
                format!("Crafted 1x {}! (+{} Smithing XP)", item, xp)
            }
            GameEvent::MissingMaterials { target } => {
                format!("You no longer have the materials to make {}.", target)
            }
            GameEvent::InventoryFull => "Inventory is full!".to_string(),
            GameEvent::LevelUp { skill, level } => {
                format!("Congratulations! Your {} level is now {}.", skill, level)
            }
            GameEvent::CombatStarted { enemy } => format!("A {} appears!", enemy),
            GameEvent::StanceChanged { stance } => format!("Combat stance set to {}.", stance),
            GameEvent::PlayerHit { enemy, damage } => {
                format!("You deal {} damage to {}!", damage, enemy)
            }
            GameEvent::EnemyHit { enemy, damage } => {
                format!("{} deals {} damage to you!", enemy, damage)
            }
            GameEvent::EnemyDefeated { enemy } => format!("You defeated the {}!", enemy),
            GameEvent::LootReceived { item } => format!("You received 1x {}!", item),
            GameEvent::LootLost { item } => {
                format!("Your inventory is full. The {} is left behind.", item)
            }
            GameEvent::PlayerDefeated { respawn } => {
                format!("You have been defeated! Respawning at {}...", respawn)
            }
            GameEvent::Fled => "You fled from combat!".to_string(),
            GameEvent::ItemDeposited { item, quantity } => {
                format!("Deposited {}x {} to bank.", quantity, item)
            }
            GameEvent::ItemWithdrawn { item, quantity } => {
                format!("Withdrew {}x {} from bank.", quantity, item)
            }
            GameEvent::GoldDeposited { amount } => format!("Deposited {} gold to bank.", amount),
            GameEvent::GoldWithdrawn { amount } => format!("Withdrew {} gold from bank.", amount),
            GameEvent::GameSaved => "Game saved.".to_string(),
            GameEvent::GameLoaded => "Game loaded.".to_string(),
            GameEvent::SaveFailed => "Failed to save game.".to_string(),
            GameEvent::LoadFailed => "Failed to load saved game. Starting fresh.".to_string(),
        }
    }

    /// True when the event changes something the player can see.
    pub fn needs_render(&self) -> bool {
        !matches!(self, GameEvent::GameSaved)
    }
}

/// Outcome of a single [`crate::core::Game::tick`] call.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    /// True when any visible state changed (time, progress or events).
    pub needs_render: bool,
    pub autosaved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let hit = GameEvent::PlayerHit {
            enemy: "Goblin".into(),
            damage: 5,
        };
        assert_eq!(hit.message(), "You deal 5 damage to Goblin!");

        let mined = GameEvent::OreMined {
            ore: "Copper Ore".into(),
            xp: 5,
        };
        assert_eq!(mined.message(), "Mined 1x Copper Ore! (+5 Mining XP)");

        let started = GameEvent::ActivityStarted {
            kind: ActivityKind::Mining,
            target: "Tin Ore".into(),
        };
        assert_eq!(started.message(), "Started mining Tin Ore...");
    }

    #[test]
    fn test_save_event_does_not_force_render() {
        assert!(!GameEvent::GameSaved.needs_render());
        assert!(GameEvent::Fled.needs_render());
    }
}
