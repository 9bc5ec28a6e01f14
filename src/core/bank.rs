//! Bank transactions between the player and the bank at a bank location.

use crate::core::errors::CommandError;
use crate::core::events::GameEvent;
use crate::core::game_state::GameState;
use crate::items::clamp_transfer;
use crate::world::{Action, LocationGraph};

fn require_bank(state: &GameState, graph: &LocationGraph) -> Result<(), CommandError> {
    if state.in_combat() {
        return Err(CommandError::InCombat);
    }
    if state.is_traveling() {
        return Err(CommandError::Traveling);
    }
    let location = graph
        .get(&state.current_location)
        .ok_or_else(|| CommandError::UnknownLocation(state.current_location.clone()))?;
    if !location.has_action(Action::Bank) {
        return Err(CommandError::ActionUnavailable("bank"));
    }
    Ok(())
}

/// Moves up to `quantity` of an item into the bank.
pub fn deposit_item(
    state: &mut GameState,
    graph: &LocationGraph,
    item_id: &str,
    quantity: u32,
) -> Result<GameEvent, CommandError> {
    require_bank(state, graph)?;
    let stack = state
        .player
        .inventory
        .get(item_id)
        .cloned()
        .ok_or_else(|| CommandError::NotInInventory(item_id.to_string()))?;
    if quantity == 0 {
        return Err(CommandError::ZeroAmount);
    }

    let room = state.bank.items.room_for(item_id);
    let amount = clamp_transfer(quantity as u64, stack.quantity.min(room) as u64) as u32;
    if amount == 0 || !state.bank.items.add(&stack.id, &stack.name, amount) {
        return Err(CommandError::BankStackFull(stack.name));
    }
    state.player.inventory.remove_item(item_id, amount);
    Ok(GameEvent::ItemDeposited {
        item: stack.name,
        quantity: amount,
    })
}

/// Moves up to `quantity` of an item out of the bank, limited by free
/// inventory space. Anything that does not fit stays in the bank.
pub fn withdraw_item(
    state: &mut GameState,
    graph: &LocationGraph,
    item_id: &str,
    quantity: u32,
) -> Result<GameEvent, CommandError> {
    require_bank(state, graph)?;
    let stack = state
        .bank
        .items
        .get(item_id)
        .cloned()
        .ok_or_else(|| CommandError::NotInBank(item_id.to_string()))?;
    if quantity == 0 {
        return Err(CommandError::ZeroAmount);
    }
    let free = state.player.inventory.free_space();
    if free == 0 {
        return Err(CommandError::InventoryFull);
    }

    let amount = clamp_transfer(quantity.min(free) as u64, stack.quantity as u64) as u32;
    state.bank.items.remove(item_id, amount);
    state.player.inventory.add_item(&stack.id, &stack.name, amount);
    Ok(GameEvent::ItemWithdrawn {
        item: stack.name,
        quantity: amount,
    })
}

pub fn deposit_gold(
    state: &mut GameState,
    graph: &LocationGraph,
    amount: u64,
) -> Result<GameEvent, CommandError> {
    require_bank(state, graph)?;
    if state.player.gold == 0 {
        return Err(CommandError::NoGoldToDeposit);
    }
    if amount == 0 {
        return Err(CommandError::ZeroAmount);
    }
    let moved = clamp_transfer(amount, state.player.gold);
    state.player.gold -= moved;
    state.bank.gold += moved;
    Ok(GameEvent::GoldDeposited { amount: moved })
}

pub fn withdraw_gold(
    state: &mut GameState,
    graph: &LocationGraph,
    amount: u64,
) -> Result<GameEvent, CommandError> {
    require_bank(state, graph)?;
    if state.bank.gold == 0 {
        return Err(CommandError::NoGoldInBank);
    }
    if amount == 0 {
        return Err(CommandError::ZeroAmount);
    }
    let moved = clamp_transfer(amount, state.bank.gold);
    state.bank.gold -= moved;
    state.player.gold += moved;
    Ok(GameEvent::GoldWithdrawn { amount: moved })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_bank() -> (GameState, LocationGraph) {
        let graph = LocationGraph::default();
        let bank = graph
            .iter()
            .find(|l| l.has_action(Action::Bank))
            .unwrap()
            .id
            .clone();
        let mut state = GameState::default();
        state.current_location = bank;
        (state, graph)
    }

    #[test]
    fn test_bank_requires_bank_location() {
        let graph = LocationGraph::default();
        let mut state = GameState::default();
        assert_eq!(
            deposit_gold(&mut state, &graph, 5),
            Err(CommandError::ActionUnavailable("bank"))
        );
        assert_eq!(state.player.gold, 20);
    }

    #[test]
    fn test_deposit_gold_with_empty_purse() {
        let (mut state, graph) = at_bank();
        state.player.gold = 0;
        assert_eq!(
            deposit_gold(&mut state, &graph, 50),
            Err(CommandError::NoGoldToDeposit)
        );
        assert_eq!(state.bank.gold, 0);
    }

    #[test]
    fn test_deposit_gold_clamped() {
        let (mut state, graph) = at_bank();
        assert_eq!(
            deposit_gold(&mut state, &graph, 500),
            Ok(GameEvent::GoldDeposited { amount: 20 })
        );
        assert_eq!(state.player.gold, 0);
        assert_eq!(state.bank.gold, 20);
    }

    #[test]
    fn test_withdraw_gold_clamped() {
        let (mut state, graph) = at_bank();
        state.bank.gold = 40;
        withdraw_gold(&mut state, &graph, 1000).unwrap();
        assert_eq!(state.bank.gold, 0);
        assert_eq!(state.player.gold, 60);
        assert_eq!(
            withdraw_gold(&mut state, &graph, 1),
            Err(CommandError::NoGoldInBank)
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        let (mut state, graph) = at_bank();
        assert_eq!(deposit_gold(&mut state, &graph, 0), Err(CommandError::ZeroAmount));
    }

    #[test]
    fn test_deposit_item_clamped() {
        let (mut state, graph) = at_bank();
        state.player.inventory.add_item("coal", "Coal", 3);
        let event = deposit_item(&mut state, &graph, "coal", 10).unwrap();
        assert_eq!(
            event,
            GameEvent::ItemDeposited {
                item: "Coal".into(),
                quantity: 3
            }
        );
        assert_eq!(state.player.inventory.quantity_of("coal"), 0);
        assert_eq!(state.bank.items.quantity_of("coal"), 3);
    }

    #[test]
    fn test_deposit_stops_at_full_bank_stack() {
        let (mut state, graph) = at_bank();
        state.bank.items.add("coal", "Coal", u32::MAX - 2);
        state.player.inventory.add_item("coal", "Coal", 5);

        let event = deposit_item(&mut state, &graph, "coal", 5).unwrap();
        assert_eq!(
            event,
            GameEvent::ItemDeposited {
                item: "Coal".into(),
                quantity: 2
            }
        );
        assert_eq!(state.bank.items.quantity_of("coal"), u32::MAX);
        assert_eq!(state.player.inventory.quantity_of("coal"), 3);

        assert_eq!(
            deposit_item(&mut state, &graph, "coal", 3),
            Err(CommandError::BankStackFull("Coal".into()))
        );
        assert_eq!(state.player.inventory.quantity_of("coal"), 3);
    }

    #[test]
    fn test_deposit_missing_item() {
        let (mut state, graph) = at_bank();
        assert!(matches!(
            deposit_item(&mut state, &graph, "coal", 1),
            Err(CommandError::NotInInventory(_))
        ));
    }

    #[test]
    fn test_withdraw_limited_by_free_space() {
        let (mut state, graph) = at_bank();
        state.player.inventory.add_item("leather", "Leather", 18);
        state.bank.items.add("coal", "Coal", 10);
        let event = withdraw_item(&mut state, &graph, "coal", 10).unwrap();
        assert_eq!(
            event,
            GameEvent::ItemWithdrawn {
                item: "Coal".into(),
                quantity: 2
            }
        );
        assert_eq!(state.bank.items.quantity_of("coal"), 8);
        assert_eq!(state.player.inventory.count(), 20);
        assert_eq!(
            withdraw_item(&mut state, &graph, "coal", 1),
            Err(CommandError::InventoryFull)
        );
    }
}
