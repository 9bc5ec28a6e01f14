//! Per-frame game advancement.
//!
//! `game_tick()` advances one frame of `delta_ms` real milliseconds: the game
//! clock, the running activity and any due enemy turn. It returns the events
//! that happened so the caller can report them without the logic touching the
//! message log.

use rand::Rng;

use crate::activity::tick_activity;
use crate::combat::tick_combat;
use crate::core::constants::GAME_MINUTES_PER_REAL_MS;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::world::LocationGraph;

/// `now_ms` is the monotonic clock after this frame's delta was added.
pub fn game_tick(
    state: &mut GameState,
    graph: &LocationGraph,
    now_ms: f64,
    delta_ms: f64,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    state.time_minutes += delta_ms * GAME_MINUTES_PER_REAL_MS;

    let mut events = tick_activity(state, graph, delta_ms, rng);
    events.extend(tick_combat(state, graph, now_ms, rng));
    events
}
