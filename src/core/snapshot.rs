//! Read-only views of the game for a renderer.

use serde::Serialize;

use crate::activity::{effective_travel_time, target_name, ActivityKind, CurrentActivity};
use crate::combat::{CombatStance, LootEntry};
use crate::core::game_state::GameState;
use crate::items::ItemStack;
use crate::skills::SkillName;
use crate::utils::format_game_time;
use crate::world::{Action, Encounter, LocationGraph};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsView {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillView {
    pub name: SkillName,
    pub level: u32,
    pub xp: u64,
    pub xp_for_next_level: u64,
    pub progress_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryView {
    pub items: Vec<ItemStack>,
    pub used: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankView {
    pub gold: u64,
    pub items: Vec<ItemStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionView {
    pub id: String,
    pub name: String,
    pub base_time_ms: u64,
    /// After the player's Agility bonus.
    pub travel_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub emoji: String,
    pub actions: Vec<Action>,
    pub connections: Vec<ConnectionView>,
    pub mining_options: Vec<String>,
    pub encounters: Vec<Encounter>,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityView {
    pub kind: ActivityKind,
    pub target_id: String,
    pub target_name: String,
    pub progress_ratio: f64,
    pub remaining_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatView {
    pub enemy_name: String,
    pub enemy_hp: i32,
    pub enemy_max_hp: u32,
    pub enemy_attack: u32,
    pub enemy_defense: u32,
    pub enemy_loot: Vec<LootEntry>,
    pub player_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub vitals: VitalsView,
    pub skills: Vec<SkillView>,
    pub inventory: InventoryView,
    pub bank: BankView,
    pub time_minutes: u64,
    pub time_label: String,
    pub location: Option<LocationView>,
    pub activity: Option<ActivityView>,
    pub combat: Option<CombatView>,
    pub stance: CombatStance,
    pub current_menu: String,
    pub armory_search: String,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, graph: &LocationGraph) -> Self {
        let player = &state.player;
        let time_minutes = state.time_minutes.max(0.0).floor() as u64;
        Self {
            vitals: VitalsView {
                name: player.name.clone(),
                hp: player.hp,
                max_hp: player.max_hp,
                gold: player.gold,
            },
            skills: player
                .skills
                .iter()
                .map(|s| SkillView {
                    name: s.name,
                    level: s.level,
                    xp: s.xp,
                    xp_for_next_level: s.xp_for_next_level(),
                    progress_ratio: s.progress_ratio(),
                })
                .collect(),
            inventory: InventoryView {
                items: player.inventory.stacks().to_vec(),
                used: player.inventory.count(),
                capacity: player.inventory.capacity(),
            },
            bank: BankView {
                gold: state.bank.gold,
                items: state.bank.items.stacks().to_vec(),
            },
            time_minutes,
            time_label: format_game_time(time_minutes),
            location: location_view(state, graph),
            activity: activity_view(&state.activity, graph),
            combat: state.combat.as_ref().map(|c| CombatView {
                enemy_name: c.enemy.name.clone(),
                enemy_hp: c.enemy.hp,
                enemy_max_hp: c.enemy.max_hp,
                enemy_attack: c.enemy.attack,
                enemy_defense: c.enemy.defense,
                enemy_loot: c.enemy.loot.clone(),
                player_turn: c.is_player_turn(),
            }),
            stance: state.stance,
            current_menu: state.current_menu.clone(),
            armory_search: state.armory_search.clone(),
        }
    }
}

fn location_view(state: &GameState, graph: &LocationGraph) -> Option<LocationView> {
    let loc = graph.get(&state.current_location)?;
    let agility = state.player.skills.level(SkillName::Agility);
    let connections = loc
        .connections
        .iter()
        .map(|(id, &base)| ConnectionView {
            id: id.clone(),
            name: graph.get(id).map(|l| l.name.clone()).unwrap_or_else(|| id.clone()),
            base_time_ms: base,
            travel_time_ms: effective_travel_time(base, agility),
        })
        .collect();
    Some(LocationView {
        id: loc.id.clone(),
        name: loc.name.clone(),
        kind: loc.kind.clone(),
        description: loc.description.clone(),
        emoji: loc.emoji.clone(),
        actions: loc.actions.clone(),
        connections,
        mining_options: loc.mining_options.clone(),
        encounters: loc.encounters.clone(),
        parent: loc.parent.clone(),
    })
}

fn activity_view(activity: &CurrentActivity, graph: &LocationGraph) -> Option<ActivityView> {
    let kind = activity.kind()?;
    let progress = activity.progress()?;
    Some(ActivityView {
        kind,
        target_id: progress.target_id.clone(),
        target_name: target_name(activity, graph),
        progress_ratio: progress.progress.clamp(0.0, 1.0),
        remaining_ms: progress.remaining_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::start_mining;
    use crate::combat::{spawn_enemy, CombatSession};

    #[test]
    fn test_fresh_snapshot() {
        let graph = LocationGraph::default();
        let state = GameState::default();
        let snap = GameSnapshot::capture(&state, &graph);
        assert_eq!(snap.vitals.hp, 30);
        assert_eq!(snap.skills.len(), 8);
        assert_eq!(snap.skills[0].xp_for_next_level, 100);
        assert_eq!(snap.inventory.capacity, 20);
        assert_eq!(snap.time_label, "Day 1 • 00:00");
        assert_eq!(snap.location.as_ref().unwrap().id, "lumbridge");
        assert!(snap.activity.is_none());
        assert!(snap.combat.is_none());
    }

    #[test]
    fn test_activity_view_names_target() {
        let graph = LocationGraph::default();
        let mut state = GameState::default();
        state.current_location = "lumbridge_swamp_mine".into();
        start_mining(&mut state, &graph, "copper_ore").unwrap();
        let snap = GameSnapshot::capture(&state, &graph);
        let view = snap.activity.unwrap();
        assert_eq!(view.kind, ActivityKind::Mining);
        assert_eq!(view.target_name, "Copper Ore");
        assert_eq!(view.remaining_ms, 4000.0);
    }

    #[test]
    fn test_connections_show_agility_time() {
        let graph = LocationGraph::default();
        let state = GameState::default();
        let snap = GameSnapshot::capture(&state, &graph);
        let conn = &snap.location.unwrap().connections[0];
        assert_eq!(conn.travel_time_ms, effective_travel_time(conn.base_time_ms, 1));
    }

    #[test]
    fn test_combat_view_shows_enemy_stats_and_loot() {
        let graph = LocationGraph::default();
        let mut state = GameState::default();
        state.combat = Some(CombatSession::new(spawn_enemy("goblin").unwrap()));
        let snap = GameSnapshot::capture(&state, &graph);
        let view = snap.combat.unwrap();
        assert_eq!(view.enemy_name, "Goblin");
        assert_eq!((view.enemy_hp, view.enemy_max_hp), (20, 20));
        assert_eq!((view.enemy_attack, view.enemy_defense), (3, 2));
        assert_eq!(view.enemy_loot.len(), 1);
        assert_eq!(view.enemy_loot[0].id, "copper_ore");
        assert!(view.player_turn);
    }
}
