//! The game orchestrator.
//!
//! [`Game`] owns the state, the world graph and the two collaborators (save
//! store and message sink). The host calls [`Game::tick`] once per frame with
//! the elapsed real time and forwards player input to the command methods.
//! Every command returns the events it produced and also writes them to the
//! message sink; rejected commands write their error text instead.

use rand::Rng;

use crate::activity;
use crate::combat::{self, CombatStance};
use crate::core::bank;
use crate::core::config::GameConfig;
use crate::core::errors::CommandError;
use crate::core::events::{GameEvent, TickResult};
use crate::core::game_state::GameState;
use crate::core::snapshot::GameSnapshot;
use crate::core::tick::game_tick;
use crate::persistence::{decode, encode, PersistenceError, SaveStore};
use crate::utils::MessageSink;
use crate::world::LocationGraph;

pub type CommandResult = Result<Vec<GameEvent>, CommandError>;

pub struct Game<S: SaveStore, M: MessageSink> {
    state: GameState,
    graph: LocationGraph,
    config: GameConfig,
    store: S,
    messages: M,
    /// Monotonic sum of accepted tick deltas, in ms.
    clock_ms: f64,
    since_autosave_ms: f64,
}

impl<S: SaveStore, M: MessageSink> Game<S, M> {
    pub fn new(store: S, messages: M) -> Self {
        Self::with_config(GameConfig::default(), LocationGraph::default(), store, messages)
    }

    /// `config.start_location` overrides the graph's own start location.
    pub fn with_config(config: GameConfig, graph: LocationGraph, store: S, messages: M) -> Self {
        let graph = graph.with_start_location(&config.start_location);
        let state = GameState::new(&config.start_location);
        let mut game = Self {
            state,
            graph,
            config,
            store,
            messages,
            clock_ms: 0.0,
            since_autosave_ms: 0.0,
        };
        let welcome = game
            .graph
            .get(&game.config.start_location)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| game.config.start_location.clone());
        game.messages.push(format!("Welcome to {}!", welcome));
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that set up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn messages(&self) -> &M {
        &self.messages
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.graph)
    }

    /// Advances the game by `delta_ms` of real time. Negative or non-finite
    /// deltas are treated as zero.
    pub fn tick(&mut self, delta_ms: f64, rng: &mut impl Rng) -> TickResult {
        let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms
        } else {
            0.0
        };
        self.clock_ms += delta_ms;

        let mut events = game_tick(&mut self.state, &self.graph, self.clock_ms, delta_ms, rng);
        self.publish(&events);

        let mut autosaved = false;
        self.since_autosave_ms += delta_ms;
        if self.since_autosave_ms >= self.config.autosave_interval_ms {
            self.since_autosave_ms = 0.0;
            autosaved = self.save_game().is_ok();
            if autosaved {
                events.push(GameEvent::GameSaved);
            }
        }

        let needs_render = delta_ms > 0.0 || events.iter().any(GameEvent::needs_render);
        TickResult {
            events,
            needs_render,
            autosaved,
        }
    }

    fn publish(&mut self, events: &[GameEvent]) {
        for event in events {
            self.messages.push(event.message());
        }
    }

    fn report(&mut self, result: CommandResult) -> CommandResult {
        match &result {
            Ok(events) => self.publish(events),
            Err(err) => {
                if err.is_integrity_gap() {
                    log::warn!("game data integrity gap: {}", err);
                }
                self.messages.push(err.to_string());
            }
        }
        result
    }

    /// Reports a bank transaction and saves straight away if it went through.
    fn report_bank(&mut self, result: Result<GameEvent, CommandError>) -> CommandResult {
        let result = self.report(result.map(|event| vec![event]));
        if result.is_ok() {
            // Failures are already logged and shown by save_game.
            let _ = self.save_game();
        }
        result
    }

    // ── Movement ────────────────────────────────────────────────

    pub fn travel_to(&mut self, destination_id: &str) -> CommandResult {
        let result = activity::travel_to(&mut self.state, &self.graph, destination_id);
        self.report(result)
    }

    pub fn exit_location(&mut self) -> CommandResult {
        let result = activity::exit_location(&mut self.state, &self.graph);
        self.report(result)
    }

    // ── Production ──────────────────────────────────────────────

    pub fn start_mining(&mut self, ore_id: &str) -> CommandResult {
        let result = activity::start_mining(&mut self.state, &self.graph, ore_id);
        self.report(result)
    }

    pub fn start_smelting(&mut self, ingot_id: &str) -> CommandResult {
        let result = activity::start_smelting(&mut self.state, &self.graph, ingot_id);
        self.report(result)
    }

    pub fn start_crafting(&mut self, recipe_id: &str) -> CommandResult {
        let result = activity::start_crafting(&mut self.state, &self.graph, recipe_id);
        self.report(result)
    }

    /// Stops the running activity. Doing nothing is not an error.
    pub fn cancel_activity(&mut self) -> CommandResult {
        let events: Vec<GameEvent> = activity::cancel_activity(&mut self.state, &self.graph)
            .into_iter()
            .collect();
        self.report(Ok(events))
    }

    // ── Combat ──────────────────────────────────────────────────

    pub fn start_combat(&mut self, rng: &mut impl Rng) -> CommandResult {
        let result = combat::start_combat(&mut self.state, &self.graph, rng);
        self.report(result)
    }

    pub fn set_combat_stance(&mut self, stance: &str) -> CommandResult {
        let result = stance
            .parse::<CombatStance>()
            .map_err(|_| CommandError::UnknownStance(stance.to_string()))
            .and_then(|stance| combat::set_stance(&mut self.state, stance))
            .map(|event| vec![event]);
        self.report(result)
    }

    pub fn player_attack(&mut self, rng: &mut impl Rng) -> CommandResult {
        let result = combat::player_attack(
            &mut self.state,
            self.clock_ms,
            self.config.enemy_turn_delay_ms,
            rng,
        );
        self.report(result)
    }

    /// Lands a hit of a known size. Used by scripted hosts and tests.
    pub fn player_hit(&mut self, damage: u32, rng: &mut impl Rng) -> CommandResult {
        let result = combat::apply_player_hit(
            &mut self.state,
            damage,
            self.clock_ms,
            self.config.enemy_turn_delay_ms,
            rng,
        );
        self.report(result)
    }

    pub fn flee_combat(&mut self) -> CommandResult {
        let result = combat::flee(&mut self.state, &self.graph);
        self.report(result)
    }

    // ── Bank ────────────────────────────────────────────────────

    pub fn deposit_item(&mut self, item_id: &str, quantity: u32) -> CommandResult {
        let result = bank::deposit_item(&mut self.state, &self.graph, item_id, quantity);
        self.report_bank(result)
    }

    pub fn withdraw_item(&mut self, item_id: &str, quantity: u32) -> CommandResult {
        let result = bank::withdraw_item(&mut self.state, &self.graph, item_id, quantity);
        self.report_bank(result)
    }

    pub fn deposit_gold(&mut self, amount: u64) -> CommandResult {
        let result = bank::deposit_gold(&mut self.state, &self.graph, amount);
        self.report_bank(result)
    }

    pub fn withdraw_gold(&mut self, amount: u64) -> CommandResult {
        let result = bank::withdraw_gold(&mut self.state, &self.graph, amount);
        self.report_bank(result)
    }

    // ── Menus ───────────────────────────────────────────────────

    pub fn set_menu(&mut self, menu: &str) {
        self.state.current_menu = menu.to_string();
    }

    pub fn set_armory_search(&mut self, query: &str) {
        self.state.armory_search = query.to_string();
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Writes the current state to the store. Failures are logged and shown
    /// to the player but never retried.
    pub fn save_game(&mut self) -> Result<(), PersistenceError> {
        let result = encode(&self.state).and_then(|blob| self.store.save(&blob));
        match &result {
            Ok(()) => self.messages.push(GameEvent::GameSaved.message()),
            Err(e) => {
                log::error!("failed to save game: {}", e);
                self.messages.push(GameEvent::SaveFailed.message());
            }
        }
        result
    }

    /// Replaces the state with the stored save. Returns `Ok(false)` when there
    /// is nothing saved. A save that cannot be read leaves a fresh game.
    pub fn load_game(&mut self) -> Result<bool, PersistenceError> {
        let loaded = self
            .store
            .load()
            .and_then(|blob| blob.map(|b| decode(&b, &self.graph)).transpose());
        match loaded {
            Ok(None) => Ok(false),
            Ok(Some(state)) => {
                self.state = state;
                self.since_autosave_ms = 0.0;
                self.messages.push(GameEvent::GameLoaded.message());
                Ok(true)
            }
            Err(e) => {
                log::error!("failed to load game: {}", e);
                self.state = GameState::new(&self.config.start_location);
                self.messages.push(GameEvent::LoadFailed.message());
                Err(e)
            }
        }
    }

    /// Deletes the save and starts over.
    pub fn reset_game(&mut self) -> Result<(), PersistenceError> {
        let result = self.store.delete();
        if let Err(e) = &result {
            log::error!("failed to delete save: {}", e);
        }
        self.state = GameState::new(&self.config.start_location);
        self.since_autosave_ms = 0.0;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::utils::MessageLog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_game() -> Game<MemoryStore, MessageLog> {
        Game::new(MemoryStore::new(), MessageLog::default())
    }

    #[test]
    fn test_welcome_message() {
        let game = new_game();
        assert_eq!(game.messages().last(), Some("Welcome to Lumbridge!"));
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut game = new_game();
        let mut rng = StdRng::seed_from_u64(1);
        let result = game.tick(-50.0, &mut rng);
        assert!(!result.needs_render);
        game.tick(f64::NAN, &mut rng);
        game.tick(f64::INFINITY, &mut rng);
        assert_eq!(game.clock_ms(), 0.0);
        assert_eq!(game.state().time_minutes, 0.0);
    }

    #[test]
    fn test_autosave_every_interval() {
        let mut game = new_game();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(!game.tick(29_999.0, &mut rng).autosaved);
        assert!(game.tick(1.0, &mut rng).autosaved);
        assert_eq!(game.store().save_count(), 1);
        assert!(!game.tick(1_000.0, &mut rng).autosaved);
    }

    #[test]
    fn test_rejection_goes_to_message_log() {
        let mut game = new_game();
        let err = game.start_mining("iron_ore").unwrap_err();
        assert_eq!(game.messages().last(), Some(err.to_string().as_str()));
    }

    #[test]
    fn test_unknown_stance() {
        let mut game = new_game();
        assert_eq!(
            game.set_combat_stance("berserk"),
            Err(CommandError::UnknownStance("berserk".into()))
        );
        game.set_combat_stance("aggressive").unwrap();
        assert_eq!(game.state().stance, CombatStance::Aggressive);
    }

    #[test]
    fn test_menu_and_search() {
        let mut game = new_game();
        game.set_menu("armory");
        game.set_armory_search("bronze");
        let snap = game.snapshot();
        assert_eq!(snap.current_menu, "armory");
        assert_eq!(snap.armory_search, "bronze");
    }

    #[test]
    fn test_cancel_when_idle_is_ok() {
        let mut game = new_game();
        assert_eq!(game.cancel_activity(), Ok(Vec::new()));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut game = Game::new(MemoryStore::failing(), MessageLog::default());
        assert!(game.save_game().is_err());
        assert_eq!(game.messages().last(), Some("Failed to save game."));
    }
}
