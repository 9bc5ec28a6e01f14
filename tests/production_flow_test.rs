//! Gathering and production chains: mine, walk, smelt, walk, craft.

use idlescape::activity::{ActivityKind, CurrentActivity};
use idlescape::core::{CommandError, GameEvent};
use idlescape::persistence::MemoryStore;
use idlescape::skills::SkillName;
use idlescape::utils::MessageLog;
use idlescape::Game;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type TestGame = Game<MemoryStore, MessageLog>;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn game_at(location: &str) -> TestGame {
    let mut game = Game::new(MemoryStore::new(), MessageLog::default());
    game.state_mut().current_location = location.to_string();
    game
}

/// Ticks in 100 ms frames until the current activity ends, collecting events.
fn run_until_idle(game: &mut TestGame, rng: &mut ChaCha8Rng, max_frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        if game.state().activity.is_idle() {
            break;
        }
        events.extend(game.tick(100.0, rng).events);
    }
    events
}

#[test]
fn test_mine_smelt_craft_chain() {
    let mut game = game_at("lumbridge_swamp_mine");
    let mut rng = test_rng();

    game.start_mining("copper_ore").unwrap();
    let events = run_until_idle(&mut game, &mut rng, 100);
    assert!(events.contains(&GameEvent::OreMined {
        ore: "Copper Ore".to_string(),
        xp: 5,
    }));
    assert_eq!(game.state().player.inventory.quantity_of("copper_ore"), 1);

    game.travel_to("edgeville_furnace").unwrap();
    run_until_idle(&mut game, &mut rng, 200);
    assert_eq!(game.state().current_location, "edgeville_furnace");

    game.start_smelting("copper_ingot").unwrap();
    let events = run_until_idle(&mut game, &mut rng, 100);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::IngotSmelted { .. })));
    assert_eq!(game.state().player.inventory.quantity_of("copper_ore"), 0);
    assert_eq!(game.state().player.inventory.quantity_of("copper_ingot"), 1);

    game.travel_to("crafting_guild").unwrap();
    run_until_idle(&mut game, &mut rng, 200);
    assert_eq!(game.state().current_location, "crafting_guild");

    game.start_crafting("copper_dagger").unwrap();
    let events = run_until_idle(&mut game, &mut rng, 100);
    assert!(events.contains(&GameEvent::ItemCrafted {
        item: "Copper Dagger".to_string(),
        xp: 5,
    }));
    let inventory = &game.state().player.inventory;
    assert_eq!(inventory.quantity_of("copper_ingot"), 0);
    assert_eq!(inventory.quantity_of("copper_dagger"), 1);
    assert!(game.state().player.skills.get(SkillName::Smithing).xp > 0);
}

#[test]
fn test_smelting_needs_a_furnace() {
    let mut game = game_at("lumbridge_swamp_mine");
    game.state_mut()
        .player
        .inventory
        .add_item("copper_ore", "Copper Ore", 1);

    let err = game.start_smelting("copper_ingot").unwrap_err();
    assert!(matches!(err, CommandError::ActionUnavailable(_)));
    assert!(game.state().activity.is_idle());
}

#[test]
fn test_smelting_without_ore_is_rejected() {
    let mut game = game_at("edgeville_furnace");
    let err = game.start_smelting("bronze_ingot").unwrap_err();
    assert!(matches!(err, CommandError::MissingIngredients(_)));
}

#[test]
fn test_mining_with_full_inventory_is_rejected() {
    let mut game = game_at("lumbridge_swamp_mine");
    game.state_mut()
        .player
        .inventory
        .add_item("tin_ore", "Tin Ore", 20);

    let err = game.start_mining("copper_ore").unwrap_err();
    assert_eq!(err, CommandError::InventoryFull);
}

#[test]
fn test_ore_not_offered_here() {
    let mut game = game_at("lumbridge_swamp_mine");
    game.state_mut()
        .player
        .skills
        .grant_xp(SkillName::Mining, 100_000);

    let err = game.start_mining("coal").unwrap_err();
    assert!(matches!(err, CommandError::OreNotHere(_)));
}

#[test]
fn test_switching_production_replaces_the_old_one() {
    let mut game = game_at("lumbridge_swamp_mine");

    game.start_mining("copper_ore").unwrap();
    let events = game.start_mining("tin_ore").unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ActivityCancelled {
            kind: ActivityKind::Mining,
            ..
        }
    )));
    assert!(matches!(
        &game.state().activity,
        CurrentActivity::Mining(progress) if progress.target_id == "tin_ore"
    ));
}

#[test]
fn test_travel_cancels_production() {
    let mut game = game_at("lumbridge_swamp_mine");
    let mut rng = test_rng();

    game.start_mining("copper_ore").unwrap();
    game.tick(1000.0, &mut rng);
    game.travel_to("lumbridge_swamp").unwrap();

    assert!(game.state().is_traveling());
    run_until_idle(&mut game, &mut rng, 100);
    assert_eq!(game.state().current_location, "lumbridge_swamp");
    assert_eq!(game.state().player.inventory.count(), 0);
}

#[test]
fn test_cancel_when_idle_is_quiet() {
    let mut game = game_at("lumbridge");
    assert_eq!(game.cancel_activity().unwrap(), Vec::new());
}

#[test]
fn test_cannot_travel_while_traveling() {
    let mut game = game_at("lumbridge");
    game.travel_to("lumbridge_castle").unwrap();
    assert_eq!(
        game.travel_to("lumbridge_swamp").unwrap_err(),
        CommandError::AlreadyTraveling
    );
}

#[test]
fn test_travel_time_shrinks_with_agility() {
    let mut game = game_at("lumbridge");
    game.state_mut()
        .player
        .skills
        .set(idlescape::skills::Skill::restore(SkillName::Agility, 99, 0));

    let events = game.travel_to("lumbridge_castle").unwrap();

    // 1500 * (1 - 0.005 * 99) = 757.5
    assert!(events.contains(&GameEvent::TravelStarted {
        destination: "Lumbridge Castle".to_string(),
        duration_ms: 757,
    }));
}
