//! Scripted playthroughs driven through the game orchestrator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::activity::recipe_book;
use crate::combat::CombatStance;
use crate::core::{Game, GameConfig, GameEvent};
use crate::persistence::MemoryStore;
use crate::skills::SkillName;
use crate::utils::MessageLog;
use crate::world::LocationGraph;

type SimGame = Game<MemoryStore, MessageLog>;

/// What the scripted player is working towards.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Mining,
    Banking,
    Hunting { fights_left: u32 },
}

struct Script<'a> {
    config: &'a SimConfig,
    phase: Phase,
    route: VecDeque<String>,
}

impl<'a> Script<'a> {
    fn new(config: &'a SimConfig) -> Self {
        Self {
            config,
            phase: Phase::Mining,
            route: VecDeque::new(),
        }
    }

    fn home(&self) -> &str {
        match self.phase {
            Phase::Mining => &self.config.mine_location,
            Phase::Banking => &self.config.bank_location,
            Phase::Hunting { .. } => &self.config.hunt_location,
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.route.clear();
    }

    /// Issues at most one command for this frame.
    fn act(&mut self, game: &mut SimGame, rng: &mut impl Rng, stats: &mut RunStats) -> Vec<GameEvent> {
        let state = game.state();
        if let Some(session) = &state.combat {
            if !session.is_player_turn() {
                return Vec::new();
            }
            let hp_ratio = state.player.hp as f64 / state.player.max_hp.max(1) as f64;
            let result = if hp_ratio <= self.config.flee_below_hp_ratio {
                game.flee_combat()
            } else {
                game.player_attack(rng)
            };
            return result.unwrap_or_default();
        }
        if !state.activity.is_idle() {
            return Vec::new();
        }

        let current = state.current_location.clone();
        if current != self.home() {
            if self.route.is_empty() {
                match game.graph().route(&current, self.home()) {
                    Some(route) => self.route = route.into(),
                    None => {
                        log::warn!("no route from '{}' to '{}'", current, self.home());
                        return Vec::new();
                    }
                }
            }
            if let Some(next) = self.route.pop_front() {
                return match game.travel_to(&next) {
                    Ok(events) => events,
                    Err(_) => {
                        self.route.clear();
                        Vec::new()
                    }
                };
            }
            return Vec::new();
        }

        match self.phase {
            Phase::Mining => {
                let Some(ore_id) = pick_ore(game) else {
                    self.enter(Phase::Banking);
                    return Vec::new();
                };
                match game.start_mining(&ore_id) {
                    Ok(events) => events,
                    Err(_) => {
                        self.enter(Phase::Banking);
                        Vec::new()
                    }
                }
            }
            Phase::Banking => {
                let stacks = game.state().player.inventory.stacks().to_vec();
                let mut events = Vec::new();
                for stack in stacks {
                    if let Ok(deposited) = game.deposit_item(&stack.id, stack.quantity) {
                        stats.items_banked += stack.quantity as u64;
                        events.extend(deposited);
                    }
                }
                stats.bank_trips += 1;
                self.enter(Phase::Hunting {
                    fights_left: self.config.fights_per_trip,
                });
                events
            }
            Phase::Hunting { fights_left } => {
                let player = &game.state().player;
                let hp_ratio = player.hp as f64 / player.max_hp.max(1) as f64;
                // HP only comes back on respawn, so a hurt player stops fighting.
                if fights_left == 0 || hp_ratio <= self.config.flee_below_hp_ratio {
                    self.enter(Phase::Mining);
                    return Vec::new();
                }
                self.phase = Phase::Hunting {
                    fights_left: fights_left - 1,
                };
                let stance = pick_stance(game);
                let mut events = game.set_combat_stance(stance.as_str()).unwrap_or_default();
                match game.start_combat(rng) {
                    Ok(started) => events.extend(started),
                    Err(_) => self.enter(Phase::Mining),
                }
                events
            }
        }
    }
}

/// The mineable ore here that the inventory holds least of.
fn pick_ore(game: &SimGame) -> Option<String> {
    let state = game.state();
    if !state.player.inventory.has_space(1) {
        return None;
    }
    let location = game.graph().get(&state.current_location)?;
    let mining_level = state.player.skills.level(SkillName::Mining);
    recipe_book()
        .ores()
        .iter()
        .filter(|ore| location.offers_ore(ore.id) && ore.meets_level_requirement(mining_level))
        .min_by_key(|ore| state.player.inventory.quantity_of(ore.id))
        .map(|ore| ore.id.to_string())
}

/// Trains whichever melee skill is lowest.
fn pick_stance(game: &SimGame) -> CombatStance {
    let skills = &game.state().player.skills;
    [
        CombatStance::Accurate,
        CombatStance::Aggressive,
        CombatStance::Defensive,
    ]
    .into_iter()
    .min_by_key(|stance| {
        stance
            .trained_skills()
            .iter()
            .map(|skill| skills.level(*skill))
            .min()
            .unwrap_or(0)
    })
    .unwrap_or_default()
}

fn record(stats: &mut RunStats, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::OreMined { .. } => stats.ores_mined += 1,
            GameEvent::EnemyDefeated { .. } => stats.kills += 1,
            GameEvent::PlayerDefeated { .. } => stats.deaths += 1,
            GameEvent::Fled => stats.flees += 1,
            GameEvent::LootReceived { .. } => stats.loot_drops += 1,
            GameEvent::LevelUp { .. } => stats.level_ups += 1,
            _ => {}
        }
    }
}

fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let game_config = GameConfig::default();
    let messages = MessageLog::new(game_config.message_log_capacity);
    let mut game = Game::with_config(
        game_config,
        LocationGraph::default(),
        MemoryStore::new(),
        messages,
    );
    game.state_mut().current_location = config.mine_location.clone();

    let mut stats = RunStats::default();
    let mut script = Script::new(config);

    for _ in 0..config.max_ticks_per_run {
        let events = script.act(&mut game, rng, &mut stats);
        record(&mut stats, &events);
        let result = game.tick(config.frame_ms, rng);
        record(&mut stats, &result.events);
        stats.ticks += 1;
    }

    let state = game.state();
    stats.game_minutes = state.time_minutes;
    stats.skill_levels = state
        .player
        .skills
        .iter()
        .map(|skill| (skill.name.name().to_string(), skill.level))
        .collect();
    stats
}

/// Runs the configured number of playthroughs and aggregates them.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };
        let stats = simulate_single_run(config, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}: {} ores, {} kills, {} deaths, {} bank trips",
                run_idx + 1,
                stats.ores_mined,
                stats.kills,
                stats.deaths,
                stats.bank_trips
            );
        }
        runs.push(stats);
    }

    SimReport::from_runs(runs)
}
