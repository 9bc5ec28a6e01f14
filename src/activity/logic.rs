//! Starting, advancing and completing timed activities.

use rand::Rng;

use super::recipes::{recipe_book, Recipe};
use super::types::{ActivityKind, ActivityProgress, CurrentActivity};
use crate::core::constants::{AGILITY_SPEED_LEVEL_CAP, AGILITY_SPEED_PER_LEVEL, AGILITY_XP_PER_SECOND};
use crate::core::errors::CommandError;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::skills::SkillName;
use crate::world::{Action, Location, LocationGraph};

/// Travel-time multiplier for an Agility level: 0.995 at level 1, 0.505 from 99.
pub fn agility_speed_factor(agility_level: u32) -> f64 {
    1.0 - AGILITY_SPEED_PER_LEVEL * agility_level.min(AGILITY_SPEED_LEVEL_CAP) as f64
}

pub fn effective_travel_time(base_time_ms: u64, agility_level: u32) -> u64 {
    let scaled = (base_time_ms as f64 * agility_speed_factor(agility_level)).floor() as u64;
    scaled.max(1)
}

/// Agility XP for a completed trip, paid on the unscaled distance.
pub fn agility_xp_for(base_time_ms: u64) -> u64 {
    (base_time_ms as f64 / 1000.0 * AGILITY_XP_PER_SECOND).floor() as u64
}

fn current_location<'a>(
    state: &GameState,
    graph: &'a LocationGraph,
) -> Result<&'a Location, CommandError> {
    graph
        .get(&state.current_location)
        .ok_or_else(|| CommandError::UnknownLocation(state.current_location.clone()))
}

/// Display name for whatever the activity is targeting.
pub fn target_name(activity: &CurrentActivity, graph: &LocationGraph) -> String {
    let Some(id) = activity.target_id() else {
        return String::new();
    };
    let book = recipe_book();
    let name = match activity {
        CurrentActivity::Traveling { .. } => graph.get(id).map(|l| l.name.as_str()),
        CurrentActivity::Mining(_) => book.ore(id).map(|r| r.name),
        CurrentActivity::Smelting(_) => book.ingot(id).map(|r| r.name),
        CurrentActivity::Crafting(_) => book.crafting(id).map(|r| r.name),
        CurrentActivity::Idle => None,
    };
    name.unwrap_or(id).to_string()
}

/// Stops whatever is running. Progress is discarded.
pub fn cancel_activity(state: &mut GameState, graph: &LocationGraph) -> Option<GameEvent> {
    let kind = state.activity.kind()?;
    let target = target_name(&state.activity, graph);
    state.activity = CurrentActivity::Idle;
    Some(GameEvent::ActivityCancelled { kind, target })
}

fn cancel_production(state: &mut GameState, graph: &LocationGraph, events: &mut Vec<GameEvent>) {
    if state.activity.is_production() {
        events.extend(cancel_activity(state, graph));
    }
}

pub fn travel_to(
    state: &mut GameState,
    graph: &LocationGraph,
    destination_id: &str,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.in_combat() {
        return Err(CommandError::InCombat);
    }
    if state.is_traveling() {
        return Err(CommandError::AlreadyTraveling);
    }
    let destination = graph
        .get(destination_id)
        .ok_or_else(|| CommandError::UnknownLocation(destination_id.to_string()))?;
    if destination.id == state.current_location {
        return Err(CommandError::AlreadyThere(destination.name.clone()));
    }

    let mut events = Vec::new();
    cancel_production(state, graph, &mut events);

    let base_time_ms = graph
        .travel_time_between(&state.current_location, destination_id)
        .millis();
    let agility = state.player.skills.level(SkillName::Agility);
    let duration_ms = effective_travel_time(base_time_ms, agility);

    state.activity = CurrentActivity::Traveling {
        progress: ActivityProgress::new(destination_id, duration_ms),
        base_time_ms,
    };
    events.push(GameEvent::TravelStarted {
        destination: destination.name.clone(),
        duration_ms,
    });
    Ok(events)
}

/// Steps back to the parent location, or the start location at the top level.
pub fn exit_location(
    state: &mut GameState,
    graph: &LocationGraph,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.in_combat() {
        return Err(CommandError::InCombat);
    }
    if state.is_traveling() {
        return Err(CommandError::Traveling);
    }

    let mut events = Vec::new();
    cancel_production(state, graph, &mut events);

    let target = graph.exit_target(&state.current_location).to_string();
    let name = graph
        .get(&target)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| target.clone());
    state.current_location = target;
    events.push(GameEvent::Moved { location: name });
    Ok(events)
}

fn production_action(kind: ActivityKind) -> (Action, &'static str) {
    match kind {
        ActivityKind::Mining => (Action::Mine, "mine"),
        ActivityKind::Smelting => (Action::Smelt, "smelt"),
        _ => (Action::Craft, "make"),
    }
}

/// Shared gate for mining, smelting and crafting.
fn begin_production(
    state: &mut GameState,
    graph: &LocationGraph,
    recipe: &Recipe,
    kind: ActivityKind,
) -> Result<Vec<GameEvent>, CommandError> {
    if state.in_combat() {
        return Err(CommandError::InCombat);
    }
    if state.is_traveling() {
        return Err(CommandError::Traveling);
    }

    let (action, verb) = production_action(kind);
    let skill = recipe.skill();
    if !recipe.meets_level_requirement(state.player.skills.level(skill)) {
        return Err(CommandError::LevelTooLow {
            skill,
            required: recipe.level_req,
            verb,
            target: recipe.name.to_string(),
        });
    }

    let location = current_location(state, graph)?;
    if !location.has_action(action) {
        return Err(CommandError::ActionUnavailable(verb));
    }
    if kind == ActivityKind::Mining {
        if !location.offers_ore(recipe.id) {
            return Err(CommandError::OreNotHere(recipe.name.to_string()));
        }
        if !state.player.inventory.has_space(1) {
            return Err(CommandError::InventoryFull);
        }
    } else if !recipe.has_ingredients(&state.player.inventory) {
        return Err(CommandError::MissingIngredients(recipe.name.to_string()));
    }

    let mut events = Vec::new();
    cancel_production(state, graph, &mut events);

    let progress = ActivityProgress::new(recipe.id, recipe.base_time_ms);
    state.activity = match kind {
        ActivityKind::Mining => CurrentActivity::Mining(progress),
        ActivityKind::Smelting => CurrentActivity::Smelting(progress),
        _ => CurrentActivity::Crafting(progress),
    };
    events.push(GameEvent::ActivityStarted {
        kind,
        target: recipe.name.to_string(),
    });
    Ok(events)
}

pub fn start_mining(
    state: &mut GameState,
    graph: &LocationGraph,
    ore_id: &str,
) -> Result<Vec<GameEvent>, CommandError> {
    let ore = recipe_book()
        .ore(ore_id)
        .ok_or_else(|| CommandError::UnknownOre(ore_id.to_string()))?;
    begin_production(state, graph, ore, ActivityKind::Mining)
}

pub fn start_smelting(
    state: &mut GameState,
    graph: &LocationGraph,
    ingot_id: &str,
) -> Result<Vec<GameEvent>, CommandError> {
    let ingot = recipe_book()
        .ingot(ingot_id)
        .ok_or_else(|| CommandError::UnknownIngot(ingot_id.to_string()))?;
    begin_production(state, graph, ingot, ActivityKind::Smelting)
}

pub fn start_crafting(
    state: &mut GameState,
    graph: &LocationGraph,
    recipe_id: &str,
) -> Result<Vec<GameEvent>, CommandError> {
    let recipe = recipe_book()
        .crafting(recipe_id)
        .ok_or_else(|| CommandError::UnknownRecipe(recipe_id.to_string()))?;
    begin_production(state, graph, recipe, ActivityKind::Crafting)
}

/// Advances the running activity by `delta_ms` and settles it if it completes.
/// A completion ends the activity; any overshoot is discarded.
pub fn tick_activity(
    state: &mut GameState,
    graph: &LocationGraph,
    delta_ms: f64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let Some(progress) = state.activity.progress_mut() else {
        return Vec::new();
    };
    if !progress.advance(delta_ms) {
        return Vec::new();
    }

    match std::mem::take(&mut state.activity) {
        CurrentActivity::Traveling {
            progress,
            base_time_ms,
        } => complete_travel(state, graph, &progress.target_id, base_time_ms),
        CurrentActivity::Mining(progress) => complete_mining(state, &progress.target_id),
        CurrentActivity::Smelting(progress) => complete_smelting(state, &progress.target_id, rng),
        CurrentActivity::Crafting(progress) => complete_crafting(state, &progress.target_id),
        CurrentActivity::Idle => Vec::new(),
    }
}

fn complete_travel(
    state: &mut GameState,
    graph: &LocationGraph,
    destination_id: &str,
    base_time_ms: u64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let xp = agility_xp_for(base_time_ms);
    if xp > 0 {
        events.push(GameEvent::AgilityXp { amount: xp });
        state.player.award_xp(SkillName::Agility, xp, &mut events);
    }
    state.current_location = destination_id.to_string();
    let name = graph
        .get(destination_id)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| destination_id.to_string());
    events.push(GameEvent::Arrived { location: name });
    events
}

fn complete_mining(state: &mut GameState, ore_id: &str) -> Vec<GameEvent> {
    let Some(ore) = recipe_book().ore(ore_id) else {
        log::warn!("mining finished for unknown ore '{}'", ore_id);
        return Vec::new();
    };
    if !state.player.inventory.add_item(ore.id, ore.name, 1) {
        return vec![GameEvent::InventoryFull];
    }
    let mut events = vec![GameEvent::OreMined {
        ore: ore.name.to_string(),
        xp: ore.xp,
    }];
    state.player.award_xp(SkillName::Mining, ore.xp, &mut events);
    events
}

/// Removes every ingredient, or nothing if any is short.
fn consume_ingredients(state: &mut GameState, recipe: &Recipe) -> bool {
    if !recipe.has_ingredients(&state.player.inventory) {
        return false;
    }
    for ingredient in &recipe.ingredients {
        state
            .player
            .inventory
            .remove_item(ingredient.id, ingredient.quantity);
    }
    true
}

fn complete_smelting(state: &mut GameState, ingot_id: &str, rng: &mut impl Rng) -> Vec<GameEvent> {
    let Some(ingot) = recipe_book().ingot(ingot_id) else {
        log::warn!("smelting finished for unknown ingot '{}'", ingot_id);
        return Vec::new();
    };
    if !consume_ingredients(state, ingot) {
        return vec![GameEvent::MissingMaterials {
            target: ingot.name.to_string(),
        }];
    }
    if !rng.gen_bool(ingot.success_chance()) {
        return vec![GameEvent::SmeltingFailed {
            ingot: ingot.name.to_string(),
        }];
    }
    if !state.player.inventory.add_item(ingot.id, ingot.name, 1) {
        return vec![GameEvent::InventoryFull];
    }
    let mut events = vec![GameEvent::IngotSmelted {
        ingot: ingot.name.to_string(),
        xp: ingot.xp,
    }];
    state.player.award_xp(SkillName::Smelting, ingot.xp, &mut events);
    events
}

fn complete_crafting(state: &mut GameState, recipe_id: &str) -> Vec<GameEvent> {
    let Some(recipe) = recipe_book().crafting(recipe_id) else {
        log::warn!("crafting finished for unknown recipe '{}'", recipe_id);
        return Vec::new();
    };
    if !consume_ingredients(state, recipe) {
        return vec![GameEvent::MissingMaterials {
            target: recipe.name.to_string(),
        }];
    }
    if !state.player.inventory.add_item(recipe.id, recipe.name, 1) {
        return vec![GameEvent::InventoryFull];
    }
    let mut events = vec![GameEvent::ItemCrafted {
        item: recipe.name.to_string(),
        xp: recipe.xp,
    }];
    state.player.award_xp(SkillName::Smithing, recipe.xp, &mut events);
    events
}
