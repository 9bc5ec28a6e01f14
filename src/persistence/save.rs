//! Versioned save blob.
//!
//! The blob keeps the browser-era layout (camelCase keys, skills keyed by
//! display name). Every field has a default so partial saves still load.
//! Older versions are upgraded on the raw JSON before deserializing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::errors::PersistenceError;
use crate::activity::{start_crafting, start_mining, start_smelting, ActivityKind, CurrentActivity};
use crate::combat::CombatStance;
use crate::core::constants::{
    DEFAULT_GOLD, DEFAULT_INVENTORY_CAPACITY, DEFAULT_MAX_HP, DEFAULT_MENU, DEFAULT_PLAYER_NAME,
    SAVE_VERSION,
};
use crate::core::game_state::GameState;
use crate::items::{Bank, Inventory, ItemLedger, ItemStack};
use crate::skills::{Skill, SkillName};
use crate::world::LocationGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub version: u32,
    pub time_minutes: f64,
    pub current_location: String,
    pub current_menu: String,
    pub player: PlayerData,
    pub bank: Bank,
    pub mining: MiningData,
    pub smelting: SmeltingData,
    pub armory: ArmoryData,
    pub combat: CombatData,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            time_minutes: 0.0,
            // Empty means the graph's start location.
            current_location: String::new(),
            current_menu: DEFAULT_MENU.to_string(),
            player: PlayerData::default(),
            bank: Bank::default(),
            mining: MiningData::default(),
            smelting: SmeltingData::default(),
            armory: ArmoryData::default(),
            combat: CombatData::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerData {
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub gold: u64,
    pub inventory_capacity: u32,
    pub inventory: Vec<ItemStack>,
    pub stats: BTreeMap<String, SkillData>,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAYER_NAME.to_string(),
            max_hp: DEFAULT_MAX_HP,
            hp: DEFAULT_MAX_HP,
            gold: DEFAULT_GOLD,
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            inventory: Vec::new(),
            stats: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillData {
    pub level: u32,
    pub xp: u64,
}

impl Default for SkillData {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MiningData {
    pub active_ore_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmeltingData {
    pub active_ingot_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArmoryData {
    pub active_recipe_id: Option<String>,
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombatData {
    /// Recorded for compatibility; combat is never resumed from a save.
    pub in_combat: bool,
    pub stance: CombatStance,
}

impl SaveData {
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        let stats = player
            .skills
            .iter()
            .map(|skill| {
                (
                    skill.name.name().to_string(),
                    SkillData {
                        level: skill.level,
                        xp: skill.xp,
                    },
                )
            })
            .collect();

        let (mut ore, mut ingot, mut recipe) = (None, None, None);
        match &state.activity {
            CurrentActivity::Mining(p) => ore = Some(p.target_id.clone()),
            CurrentActivity::Smelting(p) => ingot = Some(p.target_id.clone()),
            CurrentActivity::Crafting(p) => recipe = Some(p.target_id.clone()),
            CurrentActivity::Idle | CurrentActivity::Traveling { .. } => {}
        }

        Self {
            version: SAVE_VERSION,
            time_minutes: state.time_minutes,
            current_location: state.current_location.clone(),
            current_menu: state.current_menu.clone(),
            player: PlayerData {
                name: player.name.clone(),
                max_hp: player.max_hp,
                hp: player.hp,
                gold: player.gold,
                inventory_capacity: player.inventory.capacity(),
                inventory: player.inventory.stacks().to_vec(),
                stats,
            },
            bank: state.bank.clone(),
            mining: MiningData {
                active_ore_id: ore,
            },
            smelting: SmeltingData {
                active_ingot_id: ingot,
            },
            armory: ArmoryData {
                active_recipe_id: recipe,
                search: state.armory_search.clone(),
            },
            combat: CombatData {
                in_combat: state.in_combat(),
                stance: state.stance,
            },
        }
    }

    /// Rebuilds a playable state, repairing anything out of range.
    pub fn into_state(self, graph: &LocationGraph) -> GameState {
        let mut state = GameState::new(graph.start_location());

        state.time_minutes = if self.time_minutes.is_finite() && self.time_minutes >= 0.0 {
            self.time_minutes
        } else {
            0.0
        };

        if graph.contains(&self.current_location) {
            state.current_location = self.current_location;
        } else if !self.current_location.is_empty() {
            log::warn!(
                "saved location '{}' does not exist, starting at {}",
                self.current_location,
                graph.start_location()
            );
        }
        if !self.current_menu.is_empty() {
            state.current_menu = self.current_menu;
        }

        let data = self.player;
        let player = &mut state.player;
        if !data.name.trim().is_empty() {
            player.name = data.name;
        }
        player.max_hp = data.max_hp.max(1);
        player.hp = data.hp.min(player.max_hp);
        player.gold = data.gold;
        player.inventory = Inventory::restore(data.inventory_capacity, data.inventory);
        for (name, skill) in data.stats {
            match name.parse::<SkillName>() {
                Ok(skill_name) => player
                    .skills
                    .set(Skill::restore(skill_name, skill.level, skill.xp)),
                Err(_) => log::warn!("ignoring unknown skill '{}' in save", name),
            }
        }

        state.bank = Bank {
            gold: self.bank.gold,
            items: ItemLedger::from_stacks(self.bank.items.stacks().to_vec()),
        };
        state.stance = self.combat.stance;
        state.armory_search = self.armory.search;

        resume_production(
            &mut state,
            graph,
            self.mining.active_ore_id,
            self.smelting.active_ingot_id,
            self.armory.active_recipe_id,
        );
        state
    }
}

/// Restarts the first recorded production that still passes its checks.
fn resume_production(
    state: &mut GameState,
    graph: &LocationGraph,
    ore: Option<String>,
    ingot: Option<String>,
    recipe: Option<String>,
) {
    let attempts = [
        ore.map(|id| (ActivityKind::Mining, id)),
        ingot.map(|id| (ActivityKind::Smelting, id)),
        recipe.map(|id| (ActivityKind::Crafting, id)),
    ];
    for (kind, id) in attempts.into_iter().flatten() {
        let result = match kind {
            ActivityKind::Mining => start_mining(state, graph, &id),
            ActivityKind::Smelting => start_smelting(state, graph, &id),
            _ => start_crafting(state, graph, &id),
        };
        match result {
            Ok(_) => return,
            Err(e) => log::info!("not resuming {} of '{}': {}", kind, id, e),
        }
    }
}

/// Upgrades a raw blob to the current schema version.
pub fn migrate(mut value: Value) -> Result<Value, PersistenceError> {
    let Some(obj) = value.as_object_mut() else {
        return Err(PersistenceError::Corrupt(
            "top level is not an object".to_string(),
        ));
    };

    let version = match obj.get("version") {
        None | Some(Value::Null) => 1,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| PersistenceError::Corrupt(format!("bad version field {}", v)))?,
    };
    if version > SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }

    if version < 2 {
        let combat = obj.entry("combat").or_insert_with(|| json!({}));
        if !combat.is_object() {
            *combat = json!({});
        }
        if let Some(combat) = combat.as_object_mut() {
            combat
                .entry("stance")
                .or_insert_with(|| json!(CombatStance::default().as_str()));
        }
        log::info!("migrated save from version {} to 2", version);
    }

    obj.insert("version".to_string(), json!(SAVE_VERSION));
    Ok(value)
}

pub fn encode(state: &GameState) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&SaveData::from_state(state))?)
}

pub fn decode(blob: &str, graph: &LocationGraph) -> Result<GameState, PersistenceError> {
    let raw: Value = serde_json::from_str(blob)?;
    let data: SaveData = serde_json::from_value(migrate(raw)?)?;
    Ok(data.into_state(graph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_loads_fresh_player() {
        let graph = LocationGraph::default();
        let state = decode("{}", &graph).unwrap();
        assert_eq!(state.player.name, "Adventurer");
        assert_eq!(state.player.hp, 30);
        assert_eq!(state.player.gold, 20);
        assert_eq!(state.player.inventory.capacity(), 20);
        assert_eq!(state.current_location, "lumbridge");
        assert_eq!(state.current_menu, "main");
    }

    #[test]
    fn test_missing_location_uses_graph_start() {
        let graph = LocationGraph::default().with_start_location("falador");
        let state = decode("{\"version\": 2}", &graph).unwrap();
        assert_eq!(state.current_location, "falador");
    }

    #[test]
    fn test_v1_blob_migrates_stance() {
        let v1 = json!({
            "version": 1,
            "timeMinutes": 125.5,
            "currentLocation": "lumbridge_swamp",
            "currentMenu": "main",
            "player": {
                "name": "Zezima",
                "maxHp": 30,
                "hp": 12,
                "gold": 7,
                "inventoryCapacity": 20,
                "inventory": [{"id": "copper_ore", "name": "Copper Ore", "quantity": 3}],
                "stats": {"Mining": {"level": 4, "xp": 10}}
            },
            "bank": {"gold": 40, "items": [{"id": "tin_ore", "name": "Tin Ore", "quantity": 5}]},
            "mining": {"activeOreId": null},
            "smelting": {"activeIngotId": null},
            "armory": {"activeRecipeId": null, "search": "sword"},
            "combat": {"inCombat": true}
        });
        let migrated = migrate(v1.clone()).unwrap();
        assert_eq!(migrated["version"], json!(2));
        assert_eq!(migrated["combat"]["stance"], json!("accurate"));

        let graph = LocationGraph::default();
        let state = decode(&v1.to_string(), &graph).unwrap();
        assert_eq!(state.player.name, "Zezima");
        assert_eq!(state.player.hp, 12);
        assert_eq!(state.player.inventory.quantity_of("copper_ore"), 3);
        assert_eq!(state.player.skills.level(SkillName::Mining), 4);
        assert_eq!(state.bank.gold, 40);
        assert_eq!(state.bank.items.quantity_of("tin_ore"), 5);
        assert_eq!(state.armory_search, "sword");
        assert_eq!(state.time_minutes, 125.5);
        assert!(!state.in_combat());
    }

    #[test]
    fn test_oversized_version_is_corrupt() {
        let graph = LocationGraph::default();
        // 2^32 + 2 would wrap to 2 if truncated.
        let err = decode("{\"version\": 4294967298}", &graph).unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt(_)));
    }

    #[test]
    fn test_newer_version_refused() {
        let graph = LocationGraph::default();
        let err = decode("{\"version\": 99}", &graph).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedVersion(99)));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let graph = LocationGraph::default();
        assert!(matches!(decode("not json", &graph), Err(PersistenceError::Json(_))));
        assert!(matches!(decode("[1,2]", &graph), Err(PersistenceError::Corrupt(_))));
        assert!(matches!(
            decode("{\"version\": \"two\"}", &graph),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn test_out_of_range_values_repaired() {
        let blob = json!({
            "version": 2,
            "currentLocation": "atlantis",
            "player": {
                "maxHp": 30,
                "hp": 99,
                "stats": {"Cooking": {"level": 50, "xp": 0}}
            },
            "bank": {"gold": 0, "items": [{"id": "coal", "name": "Coal", "quantity": 0}]}
        });
        let graph = LocationGraph::default();
        let state = decode(&blob.to_string(), &graph).unwrap();
        assert_eq!(state.current_location, "lumbridge");
        assert_eq!(state.player.hp, 30);
        assert!(state.bank.items.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_progress() {
        let graph = LocationGraph::default();
        let mut state = GameState::default();
        state.player.gold = 123;
        state.player.inventory.add_item("leather", "Leather", 2);
        state.player.skills.grant_xp(SkillName::Agility, 250);
        state.bank.items.add("coal", "Coal", 9);
        state.stance = CombatStance::Defensive;
        state.time_minutes = 3000.0;

        let restored = decode(&encode(&state).unwrap(), &graph).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_running_mining_resumes_from_zero() {
        let graph = LocationGraph::default();
        let mut state = GameState::default();
        state.current_location = "lumbridge_swamp_mine".into();
        start_mining(&mut state, &graph, "tin_ore").unwrap();
        if let Some(p) = state.activity.progress_mut() {
            p.progress = 0.7;
        }

        let restored = decode(&encode(&state).unwrap(), &graph).unwrap();
        assert!(matches!(restored.activity, CurrentActivity::Mining(_)));
        let progress = restored.activity.progress().unwrap();
        assert_eq!(progress.target_id, "tin_ore");
        assert_eq!(progress.progress, 0.0);
    }

    #[test]
    fn test_invalid_recorded_activity_dropped() {
        let graph = LocationGraph::default();
        let blob = json!({
            "version": 2,
            "currentLocation": "lumbridge",
            "mining": {"activeOreId": "copper_ore"}
        });
        let state = decode(&blob.to_string(), &graph).unwrap();
        assert!(state.activity.is_idle());
    }
}
