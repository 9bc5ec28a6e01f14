use rand::Rng;

use super::data::spawn_enemy;
use super::types::{CombatPhase, CombatSession, CombatStance};
use crate::activity::exit_location;
use crate::core::constants::{
    COMBAT_XP_PER_DAMAGE, DEFENSE_XP_PER_DAMAGE_TAKEN, HITPOINTS_XP_PER_DAMAGE, PLAYER_MAX_HIT_ROLL,
};
use crate::core::errors::CommandError;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::skills::SkillName;
use crate::world::LocationGraph;

/// Draws an enemy from the current location's encounter table.
pub fn start_combat(
    state: &mut GameState,
    graph: &LocationGraph,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.in_combat() {
        return Err(CommandError::InCombat);
    }
    if state.is_traveling() {
        return Err(CommandError::Traveling);
    }
    if !state.activity.is_idle() {
        return Err(CommandError::Busy);
    }

    let enemy_id = graph
        .weighted_random_encounter(&state.current_location, rng)
        .ok_or(CommandError::NoEncounters)?;
    let enemy = spawn_enemy(&enemy_id).ok_or_else(|| CommandError::UnknownEnemy(enemy_id.clone()))?;

    let name = enemy.name.clone();
    state.combat = Some(CombatSession::new(enemy));
    Ok(vec![GameEvent::CombatStarted { enemy: name }])
}

/// Stance can change at any time except while the enemy is about to strike.
pub fn set_stance(state: &mut GameState, stance: CombatStance) -> Result<GameEvent, CommandError> {
    if state.combat.as_ref().is_some_and(|c| !c.is_player_turn()) {
        return Err(CommandError::NotYourTurn);
    }
    state.stance = stance;
    Ok(GameEvent::StanceChanged { stance })
}

/// `max(1, roll(1..=8) - defense)`.
pub fn roll_player_damage(enemy_defense: u32, rng: &mut impl Rng) -> u32 {
    let roll = rng.gen_range(1..=PLAYER_MAX_HIT_ROLL);
    (roll - enemy_defense as i32).max(1) as u32
}

/// `roll(1..=attack)`, never below 1.
pub fn roll_enemy_damage(enemy_attack: u32, rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=enemy_attack.max(1))
}

/// XP awarded per skill for dealing `damage` under `stance`. Hitpoints XP is
/// always included.
pub fn damage_xp(stance: CombatStance, damage: u32) -> Vec<(SkillName, u64)> {
    let damage = damage as u64;
    let total = damage * COMBAT_XP_PER_DAMAGE;
    let trained = stance.trained_skills();
    let share = total / trained.len() as u64;

    let mut awards: Vec<(SkillName, u64)> = trained.iter().map(|&skill| (skill, share)).collect();
    let hitpoints = (damage as f64 * HITPOINTS_XP_PER_DAMAGE).floor() as u64;
    awards.push((SkillName::Hitpoints, hitpoints));
    awards
}

pub fn player_attack(
    state: &mut GameState,
    now_ms: f64,
    enemy_turn_delay_ms: f64,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, CommandError> {
    let session = state.combat.as_ref().ok_or(CommandError::NotInCombat)?;
    if !session.is_player_turn() {
        return Err(CommandError::NotYourTurn);
    }
    let damage = roll_player_damage(session.enemy.defense, rng);
    apply_player_hit(state, damage, now_ms, enemy_turn_delay_ms, rng)
}

/// Resolves a player hit of `damage`. Either ends the fight in victory or
/// schedules the enemy's turn `enemy_turn_delay_ms` after `now_ms`.
pub fn apply_player_hit(
    state: &mut GameState,
    damage: u32,
    now_ms: f64,
    enemy_turn_delay_ms: f64,
    rng: &mut impl Rng,
) -> Result<Vec<GameEvent>, CommandError> {
    let session = state.combat.as_mut().ok_or(CommandError::NotInCombat)?;
    if !session.is_player_turn() {
        return Err(CommandError::NotYourTurn);
    }

    session.enemy.take_damage(damage);
    let enemy_name = session.enemy.name.clone();
    let enemy_alive = session.enemy.is_alive();
    if enemy_alive {
        session.phase = CombatPhase::EnemyTurn {
            due_at_ms: now_ms + enemy_turn_delay_ms,
        };
    }

    let mut events = vec![GameEvent::PlayerHit {
        enemy: enemy_name,
        damage,
    }];
    for (skill, xp) in damage_xp(state.stance, damage) {
        state.player.award_xp(skill, xp, &mut events);
    }

    if !enemy_alive {
        events.extend(resolve_victory(state, rng));
    }
    Ok(events)
}

fn resolve_victory(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let Some(session) = state.combat.take() else {
        return Vec::new();
    };
    let mut events = vec![GameEvent::EnemyDefeated {
        enemy: session.enemy.name.clone(),
    }];
    for loot in &session.enemy.loot {
        if rng.gen::<f64>() >= loot.chance {
            continue;
        }
        if state.player.inventory.add_item(&loot.id, &loot.name, 1) {
            events.push(GameEvent::LootReceived {
                item: loot.name.clone(),
            });
        } else {
            events.push(GameEvent::LootLost {
                item: loot.name.clone(),
            });
        }
    }
    events
}

/// Runs the enemy's turn immediately if one is pending.
pub fn enemy_attack(
    state: &mut GameState,
    graph: &LocationGraph,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let Some(session) = state.combat.as_ref() else {
        return Vec::new();
    };
    if session.is_player_turn() {
        return Vec::new();
    }
    let damage = roll_enemy_damage(session.enemy.attack, rng);
    apply_enemy_hit(state, graph, damage)
}

/// Resolves an enemy hit of `damage`. Defeat heals the player and moves them
/// to the respawn location.
pub fn apply_enemy_hit(state: &mut GameState, graph: &LocationGraph, damage: u32) -> Vec<GameEvent> {
    let Some(session) = state.combat.as_mut() else {
        return Vec::new();
    };
    session.phase = CombatPhase::PlayerTurn;
    let enemy_name = session.enemy.name.clone();

    state.player.take_damage(damage);
    let mut events = vec![GameEvent::EnemyHit {
        enemy: enemy_name,
        damage,
    }];
    let defense_xp = damage as u64 * DEFENSE_XP_PER_DAMAGE_TAKEN;
    state.player.award_xp(SkillName::Defense, defense_xp, &mut events);

    if !state.player.is_alive() {
        state.combat = None;
        state.player.heal_full();
        let respawn = graph.start_location().to_string();
        let name = graph
            .get(&respawn)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| respawn.clone());
        state.current_location = respawn;
        events.push(GameEvent::PlayerDefeated { respawn: name });
    }
    events
}

/// Fires the deferred enemy turn once it is due on the game clock.
pub fn tick_combat(
    state: &mut GameState,
    graph: &LocationGraph,
    now_ms: f64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let due = state
        .combat
        .as_ref()
        .is_some_and(|session| session.enemy_turn_due(now_ms));
    if !due {
        return Vec::new();
    }
    enemy_attack(state, graph, rng)
}

/// Ends combat with no rewards, dropping any pending enemy turn, then steps
/// back out of the location.
pub fn flee(state: &mut GameState, graph: &LocationGraph) -> Result<Vec<GameEvent>, CommandError> {
    if state.combat.take().is_none() {
        return Err(CommandError::NotInCombat);
    }
    let mut events = vec![GameEvent::Fled];
    events.extend(exit_location(state, graph)?);
    Ok(events)
}
